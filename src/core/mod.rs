pub mod black_scholes;
pub mod compound;
pub mod debt;
pub mod fire;
pub mod mortgage;
pub mod options;
pub mod rent_buy;

mod rng;

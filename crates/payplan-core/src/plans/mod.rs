//! The five payment plan computations. Each is a pure function of its
//! input struct; none depends on another's output except the static
//! 80%-balance schedule embedded in spot-down and 20/80 results.

pub mod balance;
pub mod deferred;
pub mod spot_cash;
pub mod spot_down;
pub mod twenty_eighty;

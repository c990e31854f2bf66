//! Invariant math: pure functions over reserves, no account access.

pub mod calculator;
pub mod constant_product;
pub mod fees;

pub use calculator::*;
pub use constant_product::*;
pub use fees::*;

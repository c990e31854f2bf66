pub mod settlement;
pub mod token;

pub use settlement::*;
pub use token::*;

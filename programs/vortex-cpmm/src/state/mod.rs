pub mod config;
pub mod oracle;
pub mod pool;

pub use config::*;
pub use oracle::*;
pub use pool::*;

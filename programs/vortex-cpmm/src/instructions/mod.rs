pub mod admin;
pub mod deposit;
pub mod initialize;
pub mod swap_base_input;
pub mod swap_base_output;
pub mod withdraw;

#[allow(ambiguous_glob_reexports)]
pub use admin::*;
#[allow(ambiguous_glob_reexports)]
pub use deposit::*;
#[allow(ambiguous_glob_reexports)]
pub use initialize::*;
#[allow(ambiguous_glob_reexports)]
pub use swap_base_input::*;
#[allow(ambiguous_glob_reexports)]
pub use swap_base_output::*;
#[allow(ambiguous_glob_reexports)]
pub use withdraw::*;

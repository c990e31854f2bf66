pub mod collect_fee;
pub mod create_amm_config;
pub mod update_amm_config;
pub mod update_pool_status;

#[allow(ambiguous_glob_reexports)]
pub use collect_fee::*;
#[allow(ambiguous_glob_reexports)]
pub use create_amm_config::*;
#[allow(ambiguous_glob_reexports)]
pub use update_amm_config::*;
#[allow(ambiguous_glob_reexports)]
pub use update_pool_status::*;

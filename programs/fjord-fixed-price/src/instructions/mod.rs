pub mod buy_shares;
pub mod close_pool;
pub mod global_pool_fees;
pub mod initialize_pool;
pub mod pool_management;
pub mod read_context;
pub mod redeem;

pub use buy_shares::*;
pub use close_pool::*;
pub use global_pool_fees::*;
pub use initialize_pool::*;
pub use pool_management::*;
pub use read_context::*;
pub use redeem::*;

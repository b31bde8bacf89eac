pub mod buyer_position;
pub mod factory_config;
pub mod fixed_price_pool;
pub mod sale_config;

pub use buyer_position::*;
pub use factory_config::*;
pub use fixed_price_pool::*;
pub use sale_config::*;

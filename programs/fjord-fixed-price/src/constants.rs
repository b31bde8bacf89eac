use anchor_lang::prelude::*;

pub const ONE_DAY_SECONDS: i64 = 60 * 60 * 24;

/**
 * Maximum platform fee the factory may charge a pool (10%)
 */
#[constant]
pub const MAX_FEE_BIPS: u16 = 1_000;

// Seeds
pub const FACTORY_SEED: &[u8] = b"factory_config";
pub const POOL_SEED: &[u8] = b"fixed_price_pool";
pub const POSITION_SEED: &[u8] = b"buyer_position";

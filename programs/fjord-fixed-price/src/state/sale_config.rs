use anchor_lang::prelude::*;
use solana_program::keccak;

use crate::{FactoryConfig, PoolError, MAX_FEE_BIPS, ONE_DAY_SECONDS, POOL_SEED};

// Packed immutable configuration layout. Integers are big-endian and every
// offset is cumulative, so reordering or resizing a field moves every pool
// address derived from it.
pub const ASSET_OFFSET: usize = 0;
pub const SHARE_OFFSET: usize = ASSET_OFFSET + KEY_WIDTH;
pub const FEE_RECIPIENT_OFFSET: usize = SHARE_OFFSET + KEY_WIDTH;
pub const CREATOR_OFFSET: usize = FEE_RECIPIENT_OFFSET + KEY_WIDTH;
pub const PRICE_OFFSET: usize = CREATOR_OFFSET + KEY_WIDTH;
pub const BUY_LIMIT_OFFSET: usize = PRICE_OFFSET + AMOUNT_WIDTH;
pub const SOFT_CAP_OFFSET: usize = BUY_LIMIT_OFFSET + AMOUNT_WIDTH;
pub const HARD_CAP_OFFSET: usize = SOFT_CAP_OFFSET + AMOUNT_WIDTH;
pub const SALE_START_OFFSET: usize = HARD_CAP_OFFSET + AMOUNT_WIDTH;
pub const SALE_END_OFFSET: usize = SALE_START_OFFSET + TIMESTAMP_WIDTH;
pub const FEE_RATE_OFFSET: usize = SALE_END_OFFSET + TIMESTAMP_WIDTH;
pub const ALLOW_LIST_ROOT_OFFSET: usize = FEE_RATE_OFFSET + FEE_RATE_WIDTH;
pub const PACKED_CONFIG_LEN: usize = ALLOW_LIST_ROOT_OFFSET + 32;

pub const KEY_WIDTH: usize = 32;
pub const AMOUNT_WIDTH: usize = 11;
pub const TIMESTAMP_WIDTH: usize = 5;
pub const FEE_RATE_WIDTH: usize = 8;

/// Largest price representable in the 11 byte price field.
pub const MAX_PRICE: u128 = (1u128 << (8 * AMOUNT_WIDTH)) - 1;
/// Largest unix timestamp representable in a 5 byte field.
pub const MAX_TIMESTAMP: i64 = (1i64 << (8 * TIMESTAMP_WIDTH)) - 1;
/// `MAX_FEE_BIPS` expressed as a WAD fraction.
pub const MAX_FEE_RATE: u64 = MAX_FEE_BIPS as u64 * WAD_PER_BIP;
pub const WAD_PER_BIP: u64 = 100_000_000_000_000;

/// Creator supplied sale parameters. The mints, the creator and the fee
/// settings come from accounts, not instruction data.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaleParams {
    // Asset units per share, scaled by 1e18
    pub price: u128,
    pub buy_limit: u64,
    pub soft_cap: u64,
    pub hard_cap: u64,
    // Timestamp
    pub sale_start: i64,
    // Timestamp
    pub sale_end: i64,
    pub allow_list_root: [u8; 32],
}

/// The full immutable configuration of a sale, as packed into the pool.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaleConfig {
    pub asset: Pubkey,
    pub share: Pubkey,
    pub fee_recipient: Pubkey,
    pub creator: Pubkey,
    pub price: u128,
    pub buy_limit: u64,
    pub soft_cap: u64,
    pub hard_cap: u64,
    pub sale_start: i64,
    pub sale_end: i64,
    // Fraction of raised assets owed to the platform, scaled by 1e18
    pub platform_fee_rate: u64,
    pub allow_list_root: [u8; 32],
}

impl SaleConfig {
    /// Captures the factory's fee settings at creation time.
    pub fn new(
        params: &SaleParams,
        asset: Pubkey,
        share: Pubkey,
        creator: Pubkey,
        factory: &FactoryConfig,
    ) -> Self {
        Self {
            asset,
            share,
            fee_recipient: factory.fee_recipient,
            creator,
            price: params.price,
            buy_limit: params.buy_limit,
            soft_cap: params.soft_cap,
            hard_cap: params.hard_cap,
            sale_start: params.sale_start,
            sale_end: params.sale_end,
            platform_fee_rate: factory.platform_fee_rate(),
            allow_list_root: params.allow_list_root,
        }
    }

    pub fn validate(&self, current_time: i64) -> Result<()> {
        require_keys_neq!(self.asset, self.share, PoolError::InvalidAssetOrShare);
        require!(
            self.asset != Pubkey::default() && self.share != Pubkey::default(),
            PoolError::InvalidAssetOrShare
        );

        if current_time.saturating_add(ONE_DAY_SECONDS) > self.sale_end
            || self.sale_end.saturating_sub(self.sale_start) < ONE_DAY_SECONDS
        {
            return err!(PoolError::SalePeriodTooShort);
        }
        require!(
            self.sale_start >= 0 && self.sale_end <= MAX_TIMESTAMP,
            PoolError::TimestampOutOfRange
        );

        require!(
            self.soft_cap <= self.hard_cap && self.buy_limit <= self.hard_cap,
            PoolError::InvalidCapConfig
        );
        require!(
            self.price > 0 && self.price <= MAX_PRICE,
            PoolError::InvalidPrice
        );
        require!(
            self.platform_fee_rate <= MAX_FEE_RATE,
            PoolError::MaxFeeExceeded
        );
        Ok(())
    }

    /// Packs the configuration. Values wider than their field are truncated,
    /// `validate` rejects them before a pool is created.
    pub fn pack(&self) -> [u8; PACKED_CONFIG_LEN] {
        let mut out = [0u8; PACKED_CONFIG_LEN];
        out[ASSET_OFFSET..SHARE_OFFSET].copy_from_slice(self.asset.as_ref());
        out[SHARE_OFFSET..FEE_RECIPIENT_OFFSET].copy_from_slice(self.share.as_ref());
        out[FEE_RECIPIENT_OFFSET..CREATOR_OFFSET].copy_from_slice(self.fee_recipient.as_ref());
        out[CREATOR_OFFSET..PRICE_OFFSET].copy_from_slice(self.creator.as_ref());
        write_uint(&mut out, PRICE_OFFSET, AMOUNT_WIDTH, self.price);
        write_uint(&mut out, BUY_LIMIT_OFFSET, AMOUNT_WIDTH, self.buy_limit.into());
        write_uint(&mut out, SOFT_CAP_OFFSET, AMOUNT_WIDTH, self.soft_cap.into());
        write_uint(&mut out, HARD_CAP_OFFSET, AMOUNT_WIDTH, self.hard_cap.into());
        write_uint(&mut out, SALE_START_OFFSET, TIMESTAMP_WIDTH, self.sale_start as u64 as u128);
        write_uint(&mut out, SALE_END_OFFSET, TIMESTAMP_WIDTH, self.sale_end as u64 as u128);
        write_uint(&mut out, FEE_RATE_OFFSET, FEE_RATE_WIDTH, self.platform_fee_rate.into());
        out[ALLOW_LIST_ROOT_OFFSET..].copy_from_slice(&self.allow_list_root);
        out
    }

    pub fn unpack(packed: &[u8; PACKED_CONFIG_LEN]) -> Self {
        Self {
            asset: read_key(packed, ASSET_OFFSET),
            share: read_key(packed, SHARE_OFFSET),
            fee_recipient: read_key(packed, FEE_RECIPIENT_OFFSET),
            creator: read_key(packed, CREATOR_OFFSET),
            price: read_uint(packed, PRICE_OFFSET, AMOUNT_WIDTH),
            buy_limit: read_uint(packed, BUY_LIMIT_OFFSET, AMOUNT_WIDTH) as u64,
            soft_cap: read_uint(packed, SOFT_CAP_OFFSET, AMOUNT_WIDTH) as u64,
            hard_cap: read_uint(packed, HARD_CAP_OFFSET, AMOUNT_WIDTH) as u64,
            sale_start: read_uint(packed, SALE_START_OFFSET, TIMESTAMP_WIDTH) as i64,
            sale_end: read_uint(packed, SALE_END_OFFSET, TIMESTAMP_WIDTH) as i64,
            platform_fee_rate: read_uint(packed, FEE_RATE_OFFSET, FEE_RATE_WIDTH) as u64,
            allow_list_root: read_root(packed, ALLOW_LIST_ROOT_OFFSET),
        }
    }

    /// keccak256 of the packed bytes, used as the config seed of the pool PDA.
    pub fn digest(&self) -> [u8; 32] {
        keccak::hash(&self.pack()).0
    }
}

/// Derives the pool address for `config` and `salt` under `factory`. This is
/// the same derivation `create_pool` initializes the pool account at.
pub fn predict_pool_address(factory: &Pubkey, config: &SaleConfig, salt: &[u8; 32]) -> Pubkey {
    find_pool_address(factory, &config.digest(), salt).0
}

pub fn find_pool_address(factory: &Pubkey, config_hash: &[u8; 32], salt: &[u8; 32]) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[POOL_SEED, factory.as_ref(), config_hash, salt],
        &crate::ID,
    )
}

fn write_uint(out: &mut [u8], offset: usize, width: usize, value: u128) {
    let bytes = value.to_be_bytes();
    out[offset..offset + width].copy_from_slice(&bytes[bytes.len() - width..]);
}

pub fn read_uint(packed: &[u8], offset: usize, width: usize) -> u128 {
    let mut bytes = [0u8; 16];
    bytes[16 - width..].copy_from_slice(&packed[offset..offset + width]);
    u128::from_be_bytes(bytes)
}

pub fn read_key(packed: &[u8], offset: usize) -> Pubkey {
    Pubkey::new_from_array(read_root(packed, offset))
}

pub fn read_root(packed: &[u8], offset: usize) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&packed[offset..offset + 32]);
    out
}

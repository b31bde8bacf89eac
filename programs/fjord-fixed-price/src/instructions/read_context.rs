use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};

use crate::{FixedPricePool, PoolError, SaleConfig, POOL_SEED};

#[derive(Accounts)]
pub struct ReturnPreviewContext<'info> {
  #[account(
    seeds = [POOL_SEED, pool.factory.as_ref(), pool.config_hash.as_ref(), pool.salt.as_ref()],
    bump = pool.bump
  )]
  pub pool: Box<Account<'info, FixedPricePool>>,
  // Token mints
  #[account(address = pool.asset_mint() @ PoolError::InvalidMint)]
  pub asset_token_mint: Box<Account<'info, Mint>>,
  #[account(address = pool.share_mint() @ PoolError::InvalidMint)]
  pub share_token_mint: Box<Account<'info, Mint>>,
  #[account(
    associated_token::mint = asset_token_mint,
    associated_token::authority = pool
  )]
  pub pool_asset_token_account: Box<Account<'info, TokenAccount>>,
  #[account(
    associated_token::mint = share_token_mint,
    associated_token::authority = pool
  )]
  pub pool_share_token_account: Box<Account<'info, TokenAccount>>,
}

/// Read-only view of a pool for clients and indexers
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
  pub config: SaleConfig,
  pub total_sold: u64,
  pub closed: bool,
  pub success: bool,
  pub paused: bool,
  pub asset_balance: u64,
  pub share_balance: u64,
}

pub fn read_pool(ctx: Context<ReturnPreviewContext>) -> Result<PoolSnapshot> {
  let pool = &ctx.accounts.pool;
  Ok(PoolSnapshot {
    config: pool.config(),
    total_sold: pool.total_sold,
    closed: pool.closed,
    success: pool.success,
    paused: pool.paused,
    asset_balance: ctx.accounts.pool_asset_token_account.amount,
    share_balance: ctx.accounts.pool_share_token_account.amount,
  })
}

pub fn preview_shares_out(ctx: Context<ReturnPreviewContext>, assets_in: u64) -> Result<u64> {
  ctx.accounts.pool.preview_shares_out(assets_in)
}

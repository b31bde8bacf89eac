use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    reentrancy, transfer_tokens_from, FixedPricePool, Payee, PoolClosed, PoolError, Settlement,
    Vault, POOL_SEED,
};

#[derive(Accounts)]
pub struct ClosePool<'info> {
    // The pool
    #[account(
      mut,
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
      mut,
      associated_token::mint = asset_token_mint,
      associated_token::authority = pool
    )]
    pub pool_asset_token_account: Box<Account<'info, TokenAccount>>,
    #[account(
      mut,
      associated_token::mint = share_token_mint,
      associated_token::authority = pool
    )]
    pub pool_share_token_account: Box<Account<'info, TokenAccount>>,
    // Settlement destinations
    #[account(
      mut,
      token::mint = asset_token_mint,
      constraint = creator_asset_token_account.owner == pool.creator() @ PoolError::InvalidTokenOwner
    )]
    pub creator_asset_token_account: Box<Account<'info, TokenAccount>>,
    #[account(
      mut,
      token::mint = share_token_mint,
      constraint = creator_share_token_account.owner == pool.creator() @ PoolError::InvalidTokenOwner
    )]
    pub creator_share_token_account: Box<Account<'info, TokenAccount>>,
    #[account(
      mut,
      token::mint = asset_token_mint,
      constraint = fee_recipient_asset_token_account.owner == pool.fee_recipient() @ PoolError::InvalidTokenOwner
    )]
    pub fee_recipient_asset_token_account: Box<Account<'info, TokenAccount>>,
    // Anyone may close a pool once the sale has ended
    pub user: Signer<'info>,
    pub token_program: Program<'info, Token>,
}

/// Settles the sale. A pool that reached its soft cap pays the platform fee
/// and the raised assets out and returns unsold shares to the creator; a pool
/// that missed it returns every share to the creator and keeps the assets for
/// buyer refunds.
pub fn close_pool(ctx: Context<ClosePool>) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;
    let share_balance = ctx.accounts.pool_share_token_account.amount;
    let asset_balance = ctx.accounts.pool_asset_token_account.amount;

    let pool = &mut ctx.accounts.pool;
    reentrancy::lock(pool)?;

    let settlement = pool.settle(current_time, share_balance, asset_balance)?;

    let factory = pool.factory;
    let config_hash = pool.config_hash;
    let salt = pool.salt;
    let bump = [pool.bump];
    let seeds: &[&[u8]] = &[POOL_SEED, factory.as_ref(), &config_hash, &salt, &bump];

    match settlement {
        Settlement::Success {
            platform_fee,
            creator_payout,
            ..
        } => msg!(
            "Sale succeeded: {} shares sold, fee {} creator payout {}",
            pool.total_sold,
            platform_fee,
            creator_payout
        ),
        Settlement::Failed { .. } => msg!(
            "Sale failed: {} of {} soft cap sold, assets held for refunds",
            pool.total_sold,
            pool.soft_cap()
        ),
    }

    for payout in settlement.payouts() {
        let vault = match payout.vault {
            Vault::Asset => &ctx.accounts.pool_asset_token_account,
            Vault::Share => &ctx.accounts.pool_share_token_account,
        };
        let destination = match (payout.vault, payout.payee) {
            (Vault::Asset, Payee::FeeRecipient) => &ctx.accounts.fee_recipient_asset_token_account,
            (Vault::Asset, Payee::Creator) => &ctx.accounts.creator_asset_token_account,
            (Vault::Share, _) => &ctx.accounts.creator_share_token_account,
        };
        transfer_tokens_from(
            ctx.accounts.token_program.to_account_info(),
            vault.to_account_info(),
            destination.to_account_info(),
            pool.to_account_info(),
            seeds,
            payout.amount,
        )?;
    }

    let (platform_fee, creator_assets, creator_shares) = settlement.totals();

    reentrancy::unlock(pool);

    emit!(PoolClosed {
        pool: pool.key(),
        success: pool.success,
        total_sold: pool.total_sold,
        platform_fee,
        creator_assets,
        creator_shares,
        timestamp: current_time,
    });

    Ok(())
}

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    reentrancy, transfer_tokens_from, BuyerPosition, FixedPricePool, PoolError, Redeem, Vault,
    POOL_SEED, POSITION_SEED,
};

#[derive(Accounts)]
pub struct RedeemPosition<'info> {
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
    // The buyer's ledger row. Created empty for callers that never bought,
    // who redeem nothing.
    #[account(
      init_if_needed,
      payer = user,
      space = 8 + BuyerPosition::LEN,
      seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
      bump
    )]
    pub user_position: Box<Account<'info, BuyerPosition>>,
    // Recipient token accounts. Shares are paid after a successful sale,
    // assets are refunded after a failed one.
    #[account(mut, token::mint = share_token_mint)]
    pub recipient_share_token_account: Box<Account<'info, TokenAccount>>,
    #[account(mut, token::mint = asset_token_mint)]
    pub recipient_asset_token_account: Box<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub user: Signer<'info>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Pays out the caller's position once the pool is closed and clears it.
/// Redeeming an empty position returns zero without moving tokens.
pub fn redeem(ctx: Context<RedeemPosition>) -> Result<u64> {
    let pool_key = ctx.accounts.pool.key();
    let user_key = ctx.accounts.user.key();

    let position = &mut ctx.accounts.user_position;
    if position.buyer == Pubkey::default() {
        position.pool = pool_key;
        position.buyer = user_key;
        position.bump = ctx.bumps.user_position;
    }

    let pool = &mut ctx.accounts.pool;
    reentrancy::lock(pool)?;

    let redemption = pool.take_redemption(position)?;
    let amount = redemption.amount();

    let factory = pool.factory;
    let config_hash = pool.config_hash;
    let salt = pool.salt;
    let bump = [pool.bump];
    let seeds: &[&[u8]] = &[POOL_SEED, factory.as_ref(), &config_hash, &salt, &bump];

    if let Some((vault, amount)) = redemption.payout() {
        let (source, recipient) = match vault {
            Vault::Share => (
                &ctx.accounts.pool_share_token_account,
                &ctx.accounts.recipient_share_token_account,
            ),
            Vault::Asset => (
                &ctx.accounts.pool_asset_token_account,
                &ctx.accounts.recipient_asset_token_account,
            ),
        };
        transfer_tokens_from(
            ctx.accounts.token_program.to_account_info(),
            source.to_account_info(),
            recipient.to_account_info(),
            pool.to_account_info(),
            seeds,
            amount,
        )?;

        emit!(Redeem {
            user: user_key,
            recipient: recipient.owner,
            amount,
            success: pool.success,
        });
    } else {
        msg!("Nothing to redeem for {}", user_key);
    }

    reentrancy::unlock(pool);

    Ok(amount)
}

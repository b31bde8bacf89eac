use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    reentrancy, standard_checks, transfer_tokens_to, Buy, BuyerPosition, FixedPricePool,
    PoolError, POOL_SEED, POSITION_SEED,
};

#[derive(Accounts)]
pub struct BuyShares<'info> {
    // The pool
    #[account(
      mut,
      seeds = [POOL_SEED, pool.factory.as_ref(), pool.config_hash.as_ref(), pool.salt.as_ref()],
      bump = pool.bump
    )]
    pub pool: Box<Account<'info, FixedPricePool>>,
    #[account(address = pool.asset_mint() @ PoolError::InvalidMint)]
    pub asset_token_mint: Box<Account<'info, Mint>>,
    #[account(
      mut,
      associated_token::mint = asset_token_mint,
      associated_token::authority = pool
    )]
    pub pool_asset_token_account: Box<Account<'info, TokenAccount>>,
    // The token account the buyer pays from
    #[account(
      mut,
      token::mint = asset_token_mint,
      token::authority = buyer
    )]
    pub buyer_asset_token_account: Box<Account<'info, TokenAccount>>,
    // The buyer's ledger row in the pool
    #[account(
      init_if_needed,
      payer = buyer,
      space = 8 + BuyerPosition::LEN,
      seeds = [POSITION_SEED, pool.key().as_ref(), buyer.key().as_ref()],
      bump
    )]
    pub buyer_position: Box<Account<'info, BuyerPosition>>,
    #[account(mut)]
    pub buyer: Signer<'info>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Exchange a specific amount of assets for shares at the pool's fixed price.
/// The shares stay in the pool until the buyer redeems after a successful close.
/// * `ctx` - The program context
/// * `assets_in` - The number of assets paid into the pool
/// * `merkle_proof` - The Merkle proof for the allow list, if the pool has one
#[access_control(standard_checks::before_buy(&ctx, &merkle_proof))]
pub fn buy_shares(
    ctx: Context<BuyShares>,
    assets_in: u64,
    merkle_proof: Option<Vec<[u8; 32]>>,
) -> Result<u64> {
    let pool_key = ctx.accounts.pool.key();
    let buyer_key = ctx.accounts.buyer.key();

    let position = &mut ctx.accounts.buyer_position;
    if position.buyer == Pubkey::default() {
        position.pool = pool_key;
        position.buyer = buyer_key;
        position.bump = ctx.bumps.buyer_position;
    }

    let pool = &mut ctx.accounts.pool;
    reentrancy::lock(pool)?;

    let shares_out = pool.record_buy(position, assets_in)?;

    // Transfer assets from buyer to pool
    transfer_tokens_to(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.buyer_asset_token_account.to_account_info(),
        ctx.accounts.pool_asset_token_account.to_account_info(),
        ctx.accounts.buyer.to_account_info(),
        assets_in,
    )?;

    reentrancy::unlock(pool);

    emit!(Buy {
        user: buyer_key,
        assets: assets_in,
        shares: shares_out,
    });

    Ok(shares_out)
}

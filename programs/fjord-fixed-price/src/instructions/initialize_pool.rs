use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    predict_pool_address, transfer_tokens_to, FactoryConfig, FixedPricePool, PoolCreated,
    PoolError, SaleConfig, SaleParams, FACTORY_SEED, POOL_SEED,
};

#[derive(Accounts)]
#[instruction(params: SaleParams, salt: [u8; 32], config_hash: [u8; 32])]
pub struct InitializePool<'info> {
    // Token mints
    pub asset_token_mint: Box<Account<'info, Mint>>,
    #[account(
        constraint = share_token_mint.key() != asset_token_mint.key() @ PoolError::InvalidAssetOrShare
    )]
    pub share_token_mint: Box<Account<'info, Mint>>,
    // Global factory config, source of the fee settings captured by the pool
    #[account(
        seeds = [FACTORY_SEED],
        bump = factory.bump
    )]
    pub factory: Box<Account<'info, FactoryConfig>>,
    #[account(
        init,
        payer = creator,
        space = FixedPricePool::LEN,
        seeds = [POOL_SEED, factory.key().as_ref(), config_hash.as_ref(), salt.as_ref()],
        bump
    )]
    pub pool: Box<Account<'info, FixedPricePool>>,
    // Token accounts that the pool will use to hold the tokens. The pool
    // address is public before creation, so either vault may already exist.
    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = share_token_mint,
        associated_token::authority = pool
    )]
    pub pool_share_token_account: Box<Account<'info, TokenAccount>>,
    #[account(
        init_if_needed,
        payer = creator,
        associated_token::mint = asset_token_mint,
        associated_token::authority = pool
    )]
    pub pool_asset_token_account: Box<Account<'info, TokenAccount>>,
    // Creator token account funding the share allocation
    #[account(mut, token::mint = share_token_mint, token::authority = creator)]
    pub creator_share_token_account: Box<Account<'info, TokenAccount>>,
    #[account(mut)]
    pub creator: Signer<'info>, // Creator of the pool
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ReadFactory<'info> {
    #[account(
        seeds = [FACTORY_SEED],
        bump = factory.bump
    )]
    pub factory: Account<'info, FactoryConfig>,
}

/// Creates a fixed price pool at the address derived from its packed
/// configuration and `salt`.
/// * `params` - The creator supplied sale parameters
/// * `salt` - Distinguishes pools with identical configurations
/// * `config_hash` - keccak256 of the packed configuration, the pool's address seed
/// * `share_allocation` - Shares moved from the creator into the pool
pub fn create_pool(
    ctx: Context<InitializePool>,
    params: SaleParams,
    salt: [u8; 32],
    config_hash: [u8; 32],
    share_allocation: u64,
) -> Result<Pubkey> {
    let config = SaleConfig::new(
        &params,
        ctx.accounts.asset_token_mint.key(),
        ctx.accounts.share_token_mint.key(),
        ctx.accounts.creator.key(),
        &ctx.accounts.factory,
    );

    let current_time = Clock::get()?.unix_timestamp;
    config.validate(current_time)?;

    if config.digest() != config_hash {
        return err!(PoolError::ConfigHashMismatch);
    }

    let factory = ctx.accounts.factory.key();
    let pool = &mut ctx.accounts.pool;
    pool.set_inner(FixedPricePool::new(factory, salt, &config, ctx.bumps.pool));

    // Transfer the share allocation to the pool
    if share_allocation > 0 {
        transfer_tokens_to(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.creator_share_token_account.to_account_info(),
            ctx.accounts.pool_share_token_account.to_account_info(),
            ctx.accounts.creator.to_account_info(),
            share_allocation,
        )?;
    }

    let pool_key = ctx.accounts.pool.key();
    msg!(
        "Pool {} created, hard cap {} soft cap {} allocation {}",
        pool_key,
        config.hard_cap,
        config.soft_cap,
        share_allocation
    );

    // Emit creation event
    emit!(PoolCreated {
        pool: pool_key,
        creator: config.creator,
        asset_mint: config.asset,
        share_mint: config.share,
    });

    Ok(pool_key)
}

/// Returns the address `create_pool` would initialize for these inputs under
/// the factory's current fee settings.
pub fn preview_pool_address(
    ctx: Context<ReadFactory>,
    params: SaleParams,
    asset_token_mint: Pubkey,
    share_token_mint: Pubkey,
    creator: Pubkey,
    salt: [u8; 32],
) -> Result<Pubkey> {
    let config = SaleConfig::new(
        &params,
        asset_token_mint,
        share_token_mint,
        creator,
        &ctx.accounts.factory,
    );
    Ok(predict_pool_address(&ctx.accounts.factory.key(), &config, &salt))
}

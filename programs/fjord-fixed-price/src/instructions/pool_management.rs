use crate::{FixedPricePool, PauseToggled, PoolError, POOL_SEED};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct OnlyPoolCreator<'info> {
    #[account(
      mut,
      seeds = [POOL_SEED, pool.factory.as_ref(), pool.config_hash.as_ref(), pool.salt.as_ref()],
      bump = pool.bump,
      constraint = pool.creator() == creator.key() @ PoolError::NotPoolCreator
    )]
    pub pool: Box<Account<'info, FixedPricePool>>,
    pub creator: Signer<'info>, // Creator of the pool
}

/// Pausing only blocks purchases, closing and redemption stay available.
pub fn toggle_pause(ctx: Context<OnlyPoolCreator>) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.paused = !pool.paused;

    emit!(PauseToggled {
        pool: pool.key(),
        paused: pool.paused,
    });

    Ok(())
}

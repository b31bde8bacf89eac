use crate::{verify_allow_list, BuyShares, FixedPricePool, PoolError};
use anchor_lang::prelude::*;

pub mod allow_list {
    use super::*;

    pub fn _only_allow_listed(
        ctx: &Context<BuyShares>,
        merkle_proof: &Option<Vec<[u8; 32]>>,
    ) -> Result<()> {
        // an empty root admits everyone, otherwise the buyer must prove membership
        let allow_list_root = ctx.accounts.pool.allow_list_root();
        let proof = merkle_proof.as_deref().unwrap_or(&[]);
        if !verify_allow_list(&allow_list_root, &ctx.accounts.buyer.key(), proof) {
            return Err(PoolError::AllowListRejected.into());
        }
        Ok(())
    }
}

pub mod sale {
    use super::*;

    pub fn _when_sale_active(ctx: &Context<BuyShares>) -> Result<()> {
        let current_time = Clock::get()?.unix_timestamp;
        ctx.accounts.pool.check_trading_allowed(current_time)
    }
}

pub mod reentrancy {
    use super::*;

    /// Takes the pool lock and writes it back to the account before any CPI
    /// leaves the program.
    pub fn lock(pool: &mut Account<'_, FixedPricePool>) -> Result<()> {
        pool.enter()?;
        pool.exit(&crate::ID)
    }

    pub fn unlock(pool: &mut Account<'_, FixedPricePool>) {
        pool.leave();
    }
}

pub fn before_buy(ctx: &Context<BuyShares>, merkle_proof: &Option<Vec<[u8; 32]>>) -> Result<()> {
    sale::_when_sale_active(ctx)?;
    allow_list::_only_allow_listed(ctx, merkle_proof)?;
    Ok(())
}

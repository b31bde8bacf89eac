use crate::{AccessControlError, FactoryConfig, FACTORY_SEED};
use anchor_lang::prelude::*;

#[derive(Accounts)]
pub struct FeeConfig<'info> {
    #[account(
        mut,
        seeds = [FACTORY_SEED],
        constraint = config.owner == owner.key() @AccessControlError::Unauthorized,
        bump = config.bump
    )]
    pub config: Account<'info, FactoryConfig>,
    pub owner: Signer<'info>,
}

// Factory fee setters. Pools capture both values at creation, so changes
// only apply to pools created afterwards.
pub mod setter {
    use super::*;
    use crate::{FeeRateChanged, FeeRecipientChanged};

    pub fn set_fee_recipient(ctx: Context<FeeConfig>, fee_recipient: Pubkey) -> Result<()> {
        let config = &mut ctx.accounts.config;
        config.fee_recipient = fee_recipient;

        emit!(FeeRecipientChanged { fee_recipient });

        Ok(())
    }

    pub fn set_platform_fee(ctx: Context<FeeConfig>, platform_fee: u16) -> Result<()> {
        ctx.accounts.config.set_platform_fee(platform_fee)?;

        emit!(FeeRateChanged { platform_fee });

        Ok(())
    }
}

use anchor_lang::prelude::*;

use crate::{program::FjordFixedPrice, FactoryConfig, FACTORY_SEED};

// Creates the factory singleton. Only the program's upgrade authority may do this.
#[derive(Accounts)]
pub struct InitializeFactory<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + FactoryConfig::LEN,
        seeds = [FACTORY_SEED],
        bump,
    )]
    pub config: Account<'info, FactoryConfig>,
    #[account(constraint = program.programdata_address()? == Some(program_data.key()))]
    pub program: Program<'info, FjordFixedPrice>,
    #[account(constraint = program_data.upgrade_authority_address == Some(authority.key()))]
    pub program_data: Account<'info, ProgramData>,
    #[account(mut)]
    pub authority: Signer<'info>,
    pub system_program: Program<'info, System>,
}

// The owner check runs in the handler so a wrong signer gets AccessControlError
// rather than a generic constraint error.
#[derive(Accounts)]
pub struct OnlyOwner<'info> {
    #[account(
        mut,
        seeds = [FACTORY_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, FactoryConfig>,
    pub owner: Signer<'info>,
}

#[derive(Accounts)]
pub struct AcceptOwner<'info> {
    #[account(
        mut,
        seeds = [FACTORY_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, FactoryConfig>,
    pub new_owner: Signer<'info>,
}

pub mod initializer {
    use super::*;

    pub fn initialize_factory_config(
        ctx: Context<InitializeFactory>,
        owner_key: Pubkey,
        fee_recipient: Pubkey,
        platform_fee: u16,
    ) -> Result<()> {
        let mut config = FactoryConfig {
            owner: owner_key,
            pending_owner: None,
            fee_recipient,
            platform_fee: 0,
            bump: ctx.bumps.config,
        };
        config.set_platform_fee(platform_fee)?;

        ctx.accounts.config.set_inner(config);

        msg!(
            "Factory initialized, owner {} fee recipient {} platform fee {} bips",
            owner_key,
            fee_recipient,
            platform_fee
        );

        Ok(())
    }
}

pub mod access_control {
    use super::*;
    use crate::{OwnerNominated, OwnershipTransferred};

    #[access_control(_check_only_owner(&ctx))]
    pub fn nominate_new_owner(ctx: Context<OnlyOwner>, new_owner: Pubkey) -> Result<()> {
        ctx.accounts.config.pending_owner = Some(new_owner);

        emit!(OwnerNominated {
            owner: ctx.accounts.config.owner,
            pending_owner: new_owner,
        });

        Ok(())
    }

    pub fn accept_owner(ctx: Context<AcceptOwner>) -> Result<()> {
        let new_owner = ctx.accounts.new_owner.key();
        let previous_owner = ctx.accounts.config.accept_ownership(&new_owner)?;

        emit!(OwnershipTransferred {
            previous_owner,
            new_owner,
        });

        Ok(())
    }

    // "Modifiers"
    pub fn _check_only_owner(ctx: &Context<OnlyOwner>) -> Result<()> {
        ctx.accounts.config.check_owner(&ctx.accounts.owner.key())
    }
}

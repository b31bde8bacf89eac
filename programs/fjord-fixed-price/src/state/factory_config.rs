use anchor_lang::prelude::*;

use crate::{AccessControlError, PoolError, MAX_FEE_BIPS, WAD_PER_BIP};

#[account]
pub struct FactoryConfig {
    // Owner address
    pub owner: Pubkey,
    // Nominated by the owner, becomes owner once it accepts
    pub pending_owner: Option<Pubkey>,

    // Fee settings, captured into each pool at creation
    pub fee_recipient: Pubkey,
    // Basis points
    pub platform_fee: u16,

    // We store our bump seed as a form of optimization
    pub bump: u8,
}

impl FactoryConfig {
    // owner(32) + optional pending owner (1 + 32) + fee recipient(32) + platform fee(2) + bump(1)
    pub const LEN: usize = 32 + 1 + 32 + 32 + 2 + 1;

    /// Platform fee as a 1e18 fraction, the unit pools store.
    pub fn platform_fee_rate(&self) -> u64 {
        u64::from(self.platform_fee) * WAD_PER_BIP
    }

    pub fn check_owner(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *signer, AccessControlError::Unauthorized);
        Ok(())
    }

    pub fn set_platform_fee(&mut self, platform_fee: u16) -> Result<()> {
        require!(platform_fee <= MAX_FEE_BIPS, PoolError::MaxFeeExceeded);
        self.platform_fee = platform_fee;
        Ok(())
    }

    /// Completes a two step transfer. Only the nominated key may accept and
    /// the nomination is consumed. Returns the previous owner.
    pub fn accept_ownership(&mut self, signer: &Pubkey) -> Result<Pubkey> {
        require!(
            self.pending_owner == Some(*signer),
            AccessControlError::Unauthorized
        );
        let previous_owner = self.owner;
        self.owner = *signer;
        self.pending_owner = None;
        Ok(previous_owner)
    }
}

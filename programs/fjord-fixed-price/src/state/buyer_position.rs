use anchor_lang::prelude::*;

/// Ledger row of a buyer in a fixed price pool
#[account]
pub struct BuyerPosition {
    pub pool: Pubkey,
    pub buyer: Pubkey,
    pub shares_purchased: u64,
    pub assets_paid: u64,
    pub bump: u8,
}

impl BuyerPosition {
    // pool(32) + buyer(32) + shares_purchased(8) + assets_paid(8) + bump(1)
    pub const LEN: usize = 32 + 32 + 8 + 8 + 1;

    pub fn is_empty(&self) -> bool {
        self.shares_purchased == 0 && self.assets_paid == 0
    }
}

use anchor_lang::prelude::*;

// Emitted when a pool is created
#[event]
pub struct PoolCreated {
    pub pool: Pubkey,
    pub creator: Pubkey,
    pub asset_mint: Pubkey,
    pub share_mint: Pubkey,
}

// Emitted when assets (collateral token) are exchanged for shares (project token)
#[event]
pub struct Buy {
    // The pubkey of the buyer
    pub user: Pubkey,
    // The amount of assets paid in
    pub assets: u64,
    // The amount of shares recorded for the buyer
    pub shares: u64,
}

// Emitted when a buyer redeems shares (successful sale) or assets (failed sale)
#[event]
pub struct Redeem {
    pub user: Pubkey,
    pub recipient: Pubkey,
    pub amount: u64,
    pub success: bool,
}

/// Emitted once per pool when the sale is settled
#[event]
pub struct PoolClosed {
    pub pool: Pubkey,
    pub success: bool,
    pub total_sold: u64,
    pub platform_fee: u64,
    pub creator_assets: u64,
    pub creator_shares: u64,
    pub timestamp: i64,
}

#[event]
pub struct PauseToggled {
    pub pool: Pubkey,
    pub paused: bool,
}

#[event]
pub struct FeeRecipientChanged {
    pub fee_recipient: Pubkey,
}

#[event]
pub struct FeeRateChanged {
    pub platform_fee: u16,
}

#[event]
pub struct OwnerNominated {
    pub owner: Pubkey,
    pub pending_owner: Pubkey,
}

#[event]
pub struct OwnershipTransferred {
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
}

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;
pub use constants::*;
pub use error::*;
pub use events::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

// Program Id for the Fjord fixed price program. This is the address this program will be deployed to.
declare_id!("25wZK2UsDUdVeZMjaw7n6nPjj52N2mdb5K4AHqmxSg3V");

#[program]
pub mod fjord_fixed_price {
    use super::*;

    // Factory administration
    pub fn initialize_factory(
        ctx: Context<InitializeFactory>,
        owner_key: Pubkey,
        fee_recipient: Pubkey,
        platform_fee: u16,
    ) -> Result<()> {
        initializer::initialize_factory_config(ctx, owner_key, fee_recipient, platform_fee)
    }

    pub fn nominate_new_owner(ctx: Context<OnlyOwner>, new_owner: Pubkey) -> Result<()> {
        access_control::nominate_new_owner(ctx, new_owner)
    }

    pub fn accept_owner(ctx: Context<AcceptOwner>) -> Result<()> {
        access_control::accept_owner(ctx)
    }

    pub fn set_fee_recipient(ctx: Context<FeeConfig>, fee_recipient: Pubkey) -> Result<()> {
        setter::set_fee_recipient(ctx, fee_recipient)
    }

    pub fn set_platform_fee(ctx: Context<FeeConfig>, platform_fee: u16) -> Result<()> {
        setter::set_platform_fee(ctx, platform_fee)
    }

    // Pool creation
    pub fn create_pool(
        ctx: Context<InitializePool>,
        params: SaleParams,
        salt: [u8; 32],
        config_hash: [u8; 32],
        share_allocation: u64,
    ) -> Result<Pubkey> {
        initialize_pool::create_pool(ctx, params, salt, config_hash, share_allocation)
    }

    pub fn preview_pool_address(
        ctx: Context<ReadFactory>,
        params: SaleParams,
        asset_token_mint: Pubkey,
        share_token_mint: Pubkey,
        creator: Pubkey,
        salt: [u8; 32],
    ) -> Result<Pubkey> {
        initialize_pool::preview_pool_address(
            ctx,
            params,
            asset_token_mint,
            share_token_mint,
            creator,
            salt,
        )
    }

    // Sale
    pub fn buy(
        ctx: Context<BuyShares>,
        assets_in: u64,
        merkle_proof: Option<Vec<[u8; 32]>>,
    ) -> Result<u64> {
        buy_shares::buy_shares(ctx, assets_in, merkle_proof)
    }

    pub fn close_pool(ctx: Context<ClosePool>) -> Result<()> {
        close_pool::close_pool(ctx)
    }

    pub fn redeem(ctx: Context<RedeemPosition>) -> Result<u64> {
        redeem::redeem(ctx)
    }

    pub fn toggle_pause(ctx: Context<OnlyPoolCreator>) -> Result<()> {
        pool_management::toggle_pause(ctx)
    }

    // Views
    pub fn read_pool(ctx: Context<ReturnPreviewContext>) -> Result<PoolSnapshot> {
        read_context::read_pool(ctx)
    }

    pub fn preview_shares_out(ctx: Context<ReturnPreviewContext>, assets_in: u64) -> Result<u64> {
        read_context::preview_shares_out(ctx, assets_in)
    }
}

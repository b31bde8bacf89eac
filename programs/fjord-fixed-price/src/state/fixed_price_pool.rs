use anchor_lang::prelude::*;

use crate::state::sale_config::*;
use crate::{div_wad_down, mul_wad_down, safe_add, safe_sub, BuyerPosition, PoolError};

/// Account storing a fixed price sale. The sale configuration lives in
/// `immutable_args` and is never written after creation.
#[account]
pub struct FixedPricePool {
    // Factory the pool was created under
    pub factory: Pubkey,
    pub salt: [u8; 32],
    // keccak256 of `immutable_args`
    pub config_hash: [u8; 32],
    pub immutable_args: [u8; PACKED_CONFIG_LEN],

    // The total number of shares sold, never above the hard cap
    pub total_sold: u64,
    // Flag to indicate the sale is settled
    pub closed: bool,
    // Outcome of the sale, meaningful once closed
    pub success: bool,
    pub paused: bool,
    // Set while a mutating instruction is in progress
    pub locked: bool,

    pub bump: u8,
}

/// Token movements owed when a pool closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    Success {
        // Shares above `total_sold`, returned to the creator
        share_surplus: u64,
        platform_fee: u64,
        creator_payout: u64,
    },
    Failed {
        // Every share held by the pool, returned to the creator
        share_refund: u64,
    },
}

/// Amount owed to a buyer on redemption. Shares after a successful sale,
/// assets after a failed one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redemption {
    Shares(u64),
    Assets(u64),
}

/// Pool token vault a payout is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vault {
    Asset,
    Share,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payee {
    FeeRecipient,
    Creator,
}

/// A single token movement out of a pool vault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub vault: Vault,
    pub payee: Payee,
    pub amount: u64,
}

impl Settlement {
    /// Transfers owed at close, in execution order. Zero amounts are left out.
    pub fn payouts(&self) -> Vec<Payout> {
        let payouts = match *self {
            Settlement::Success {
                share_surplus,
                platform_fee,
                creator_payout,
            } => vec![
                Payout {
                    vault: Vault::Asset,
                    payee: Payee::FeeRecipient,
                    amount: platform_fee,
                },
                Payout {
                    vault: Vault::Asset,
                    payee: Payee::Creator,
                    amount: creator_payout,
                },
                Payout {
                    vault: Vault::Share,
                    payee: Payee::Creator,
                    amount: share_surplus,
                },
            ],
            Settlement::Failed { share_refund } => vec![Payout {
                vault: Vault::Share,
                payee: Payee::Creator,
                amount: share_refund,
            }],
        };
        payouts.into_iter().filter(|payout| payout.amount > 0).collect()
    }

    /// (platform fee, creator assets, creator shares)
    pub fn totals(&self) -> (u64, u64, u64) {
        match *self {
            Settlement::Success {
                share_surplus,
                platform_fee,
                creator_payout,
            } => (platform_fee, creator_payout, share_surplus),
            Settlement::Failed { share_refund } => (0, 0, share_refund),
        }
    }
}

impl Redemption {
    pub fn amount(&self) -> u64 {
        match self {
            Redemption::Shares(amount) | Redemption::Assets(amount) => *amount,
        }
    }

    pub fn vault(&self) -> Vault {
        match self {
            Redemption::Shares(_) => Vault::Share,
            Redemption::Assets(_) => Vault::Asset,
        }
    }

    /// The vault to pay from, or `None` when nothing is owed.
    pub fn payout(&self) -> Option<(Vault, u64)> {
        Some((self.vault(), self.amount())).filter(|(_, amount)| *amount > 0)
    }
}

impl FixedPricePool {
    // discriminator(8) + factory(32) + salt(32) + config hash(32) + immutable args
    // + total_sold(8) + closed, success, paused, locked(4) + bump(1)
    pub const LEN: usize = 8 + 32 + 32 + 32 + PACKED_CONFIG_LEN + 8 + 4 + 1;

    pub fn new(factory: Pubkey, salt: [u8; 32], config: &SaleConfig, bump: u8) -> Self {
        Self {
            factory,
            salt,
            config_hash: config.digest(),
            immutable_args: config.pack(),
            total_sold: 0,
            closed: false,
            success: false,
            paused: false,
            locked: false,
            bump,
        }
    }

    pub fn config(&self) -> SaleConfig {
        SaleConfig::unpack(&self.immutable_args)
    }

    pub fn asset_mint(&self) -> Pubkey {
        read_key(&self.immutable_args, ASSET_OFFSET)
    }

    pub fn share_mint(&self) -> Pubkey {
        read_key(&self.immutable_args, SHARE_OFFSET)
    }

    pub fn fee_recipient(&self) -> Pubkey {
        read_key(&self.immutable_args, FEE_RECIPIENT_OFFSET)
    }

    pub fn creator(&self) -> Pubkey {
        read_key(&self.immutable_args, CREATOR_OFFSET)
    }

    pub fn price(&self) -> u128 {
        read_uint(&self.immutable_args, PRICE_OFFSET, AMOUNT_WIDTH)
    }

    pub fn buy_limit(&self) -> u64 {
        read_uint(&self.immutable_args, BUY_LIMIT_OFFSET, AMOUNT_WIDTH) as u64
    }

    pub fn soft_cap(&self) -> u64 {
        read_uint(&self.immutable_args, SOFT_CAP_OFFSET, AMOUNT_WIDTH) as u64
    }

    pub fn hard_cap(&self) -> u64 {
        read_uint(&self.immutable_args, HARD_CAP_OFFSET, AMOUNT_WIDTH) as u64
    }

    pub fn sale_start(&self) -> i64 {
        read_uint(&self.immutable_args, SALE_START_OFFSET, TIMESTAMP_WIDTH) as i64
    }

    pub fn sale_end(&self) -> i64 {
        read_uint(&self.immutable_args, SALE_END_OFFSET, TIMESTAMP_WIDTH) as i64
    }

    pub fn platform_fee_rate(&self) -> u64 {
        read_uint(&self.immutable_args, FEE_RATE_OFFSET, FEE_RATE_WIDTH) as u64
    }

    pub fn allow_list_root(&self) -> [u8; 32] {
        read_root(&self.immutable_args, ALLOW_LIST_ROOT_OFFSET)
    }

    /// Takes the re-entrancy lock. Every mutating instruction enters first.
    pub fn enter(&mut self) -> Result<()> {
        require!(!self.locked, PoolError::ReentrantCall);
        self.locked = true;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.locked = false;
    }

    pub fn check_trading_allowed(&self, current_time: i64) -> Result<()> {
        require!(!self.paused, PoolError::PoolPaused);
        if current_time < self.sale_start() || current_time >= self.sale_end() {
            return err!(PoolError::TradingDisallowed);
        }
        Ok(())
    }

    /// floor(assets_in * 1e18 / price)
    pub fn preview_shares_out(&self, assets_in: u64) -> Result<u64> {
        Ok(div_wad_down(assets_in, self.price())?)
    }

    /// Records a purchase against the buyer's row and the pool total.
    /// Nothing is written unless both the buy limit and the hard cap hold.
    pub fn record_buy(&mut self, position: &mut BuyerPosition, assets_in: u64) -> Result<u64> {
        let shares_out = self.preview_shares_out(assets_in)?;

        let buyer_shares = safe_add(position.shares_purchased, shares_out)?;
        require!(
            buyer_shares <= self.buy_limit(),
            PoolError::BuyLimitExceeded
        );

        let total_sold = safe_add(self.total_sold, shares_out)?;
        require!(total_sold <= self.hard_cap(), PoolError::HardCapExceeded);

        position.assets_paid = safe_add(position.assets_paid, assets_in)?;
        position.shares_purchased = buyer_shares;
        self.total_sold = total_sold;

        Ok(shares_out)
    }

    /// Closes the sale against the vault balances and fixes the outcome.
    /// Fails without writing anything if the pool is closed, the sale is
    /// still running, or a successful sale is short of shares.
    pub fn settle(
        &mut self,
        current_time: i64,
        share_balance: u64,
        asset_balance: u64,
    ) -> Result<Settlement> {
        if self.closed || current_time < self.sale_end() {
            return err!(PoolError::ClosingDisallowed);
        }

        let settlement = if self.total_sold >= self.soft_cap() {
            require!(
                share_balance >= self.total_sold,
                PoolError::InsufficientShareBalance
            );
            let platform_fee = mul_wad_down(asset_balance, self.platform_fee_rate())?;
            Settlement::Success {
                share_surplus: safe_sub(share_balance, self.total_sold)?,
                platform_fee,
                creator_payout: safe_sub(asset_balance, platform_fee)?,
            }
        } else {
            Settlement::Failed {
                share_refund: share_balance,
            }
        };

        self.closed = true;
        self.success = matches!(settlement, Settlement::Success { .. });

        Ok(settlement)
    }

    /// Clears the buyer's row and returns what it was worth. A row that is
    /// already empty yields a zero redemption rather than an error.
    pub fn take_redemption(&self, position: &mut BuyerPosition) -> Result<Redemption> {
        require!(self.closed, PoolError::RedeemDisallowed);

        let redemption = if self.success {
            Redemption::Shares(position.shares_purchased)
        } else {
            Redemption::Assets(position.assets_paid)
        };

        position.shares_purchased = 0;
        position.assets_paid = 0;

        Ok(redemption)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ONE_DAY_SECONDS, WAD};

    const START: i64 = 1_700_000_000;
    const END: i64 = START + 3 * ONE_DAY_SECONDS;

    fn pool_with(price: u128, buy_limit: u64, soft_cap: u64, hard_cap: u64) -> FixedPricePool {
        let config = SaleConfig {
            asset: Pubkey::new_unique(),
            share: Pubkey::new_unique(),
            fee_recipient: Pubkey::new_unique(),
            creator: Pubkey::new_unique(),
            price,
            buy_limit,
            soft_cap,
            hard_cap,
            sale_start: START,
            sale_end: END,
            platform_fee_rate: 200 * WAD_PER_BIP,
            allow_list_root: [0u8; 32],
        };
        FixedPricePool::new(Pubkey::new_unique(), [3u8; 32], &config, 255)
    }

    fn position() -> BuyerPosition {
        BuyerPosition {
            pool: Pubkey::new_unique(),
            buyer: Pubkey::new_unique(),
            shares_purchased: 0,
            assets_paid: 0,
            bump: 0,
        }
    }

    fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: PoolError) {
        assert_eq!(
            result.unwrap_err(),
            anchor_lang::error::Error::from(expected)
        );
    }

    #[test]
    fn accessors_decode_the_packed_config() {
        let pool = pool_with(2 * WAD, 100, 200, 300);
        let config = pool.config();

        assert_eq!(pool.asset_mint(), config.asset);
        assert_eq!(pool.share_mint(), config.share);
        assert_eq!(pool.creator(), config.creator);
        assert_eq!(pool.fee_recipient(), config.fee_recipient);
        assert_eq!(pool.price(), 2 * WAD);
        assert_eq!(pool.buy_limit(), 100);
        assert_eq!(pool.soft_cap(), 200);
        assert_eq!(pool.hard_cap(), 300);
        assert_eq!(pool.sale_start(), START);
        assert_eq!(pool.sale_end(), END);
        assert_eq!(pool.platform_fee_rate(), 200 * WAD_PER_BIP);
        assert_eq!(pool.allow_list_root(), [0u8; 32]);
        assert_eq!(pool.config_hash, config.digest());
    }

    #[test]
    fn trading_window_is_half_open() {
        let mut pool = pool_with(WAD, 100, 200, 300);

        assert_err(pool.check_trading_allowed(START - 1), PoolError::TradingDisallowed);
        pool.check_trading_allowed(START).unwrap();
        pool.check_trading_allowed(END - 1).unwrap();
        assert_err(pool.check_trading_allowed(END), PoolError::TradingDisallowed);

        pool.paused = true;
        assert_err(pool.check_trading_allowed(START + 1), PoolError::PoolPaused);
    }

    #[test]
    fn buy_rounds_in_favour_of_the_pool() {
        // 3 assets per share
        let mut pool = pool_with(3 * WAD, 100, 0, 300);
        let mut buyer = position();

        assert_eq!(pool.record_buy(&mut buyer, 8).unwrap(), 2);
        assert_eq!(buyer.shares_purchased, 2);
        assert_eq!(buyer.assets_paid, 8);
        assert_eq!(pool.total_sold, 2);

        // below one share is accepted and recorded as paid
        assert_eq!(pool.record_buy(&mut buyer, 2).unwrap(), 0);
        assert_eq!(buyer.assets_paid, 10);
        assert_eq!(pool.total_sold, 2);
    }

    #[test]
    fn buy_limit_is_checked_cumulatively() {
        let mut pool = pool_with(WAD, 100, 200, 300);
        let mut buyer = position();

        pool.record_buy(&mut buyer, 60).unwrap();
        assert_err(pool.record_buy(&mut buyer, 41), PoolError::BuyLimitExceeded);
        assert_eq!(buyer.shares_purchased, 60);
        assert_eq!(buyer.assets_paid, 60);
        assert_eq!(pool.total_sold, 60);

        assert_eq!(pool.record_buy(&mut buyer, 40).unwrap(), 40);
        assert_eq!(buyer.shares_purchased, 100);
    }

    #[test]
    fn hard_cap_is_never_exceeded() {
        let mut pool = pool_with(WAD, 100, 200, 250);
        let mut a = position();
        let mut b = position();
        let mut c = position();

        pool.record_buy(&mut a, 100).unwrap();
        pool.record_buy(&mut b, 100).unwrap();
        assert_err(pool.record_buy(&mut c, 51), PoolError::HardCapExceeded);
        assert!(c.is_empty());
        assert_eq!(pool.record_buy(&mut c, 50).unwrap(), 50);
        assert_eq!(pool.total_sold, 250);
        assert_eq!(
            a.shares_purchased + b.shares_purchased + c.shares_purchased,
            pool.total_sold
        );
    }

    #[test]
    fn close_is_rejected_before_sale_end_and_after_closing() {
        let mut pool = pool_with(WAD, 100, 0, 300);

        assert_err(pool.settle(END - 1, 300, 0), PoolError::ClosingDisallowed);
        assert!(!pool.closed);

        pool.settle(END, 300, 0).unwrap();
        assert!(pool.closed);
        assert_err(pool.settle(END + 1, 300, 0), PoolError::ClosingDisallowed);
    }

    #[test]
    fn successful_close_splits_assets_and_returns_surplus() {
        let mut pool = pool_with(WAD, 100, 100, 300);
        let mut buyer = position();
        pool.record_buy(&mut buyer, 100).unwrap();

        let settlement = pool.settle(END, 300, 100).unwrap();
        assert_eq!(
            settlement,
            Settlement::Success {
                share_surplus: 200,
                platform_fee: 2,
                creator_payout: 98,
            }
        );
        assert!(pool.closed);
        assert!(pool.success);
    }

    #[test]
    fn underfunded_successful_close_is_an_integrity_error() {
        let mut pool = pool_with(WAD, 100, 100, 300);
        let mut buyer = position();
        pool.record_buy(&mut buyer, 100).unwrap();

        assert_err(pool.settle(END, 99, 100), PoolError::InsufficientShareBalance);
        assert!(!pool.closed);
        assert!(!pool.success);
    }

    #[test]
    fn failed_close_refunds_every_share_to_the_creator() {
        let mut pool = pool_with(WAD, 100, 200, 300);
        let mut buyer = position();
        pool.record_buy(&mut buyer, 50).unwrap();

        let settlement = pool.settle(END, 300, 50).unwrap();
        assert_eq!(settlement, Settlement::Failed { share_refund: 300 });
        assert!(pool.closed);
        assert!(!pool.success);
    }

    #[test]
    fn redemption_requires_a_closed_pool() {
        let pool = pool_with(WAD, 100, 200, 300);
        let mut buyer = position();
        assert_err(pool.take_redemption(&mut buyer), PoolError::RedeemDisallowed);
    }

    #[test]
    fn redemption_pays_once_and_clears_both_fields() {
        let mut pool = pool_with(2 * WAD, 100, 0, 300);
        let mut buyer = position();
        pool.record_buy(&mut buyer, 21).unwrap();
        pool.settle(END, 300, 21).unwrap();

        assert_eq!(pool.take_redemption(&mut buyer).unwrap(), Redemption::Shares(10));
        assert!(buyer.is_empty());
        assert_eq!(pool.take_redemption(&mut buyer).unwrap().amount(), 0);
    }

    #[test]
    fn failed_sale_refunds_assets_paid() {
        let mut pool = pool_with(2 * WAD, 100, 200, 300);
        let mut buyer = position();
        let mut bystander = position();
        pool.record_buy(&mut buyer, 21).unwrap();
        pool.settle(END, 300, 21).unwrap();

        assert_eq!(pool.take_redemption(&mut buyer).unwrap(), Redemption::Assets(21));
        assert!(buyer.is_empty());
        assert_eq!(pool.take_redemption(&mut buyer).unwrap(), Redemption::Assets(0));
        assert_eq!(pool.take_redemption(&mut bystander).unwrap(), Redemption::Assets(0));
    }

    #[test]
    fn successful_settlement_pays_fee_then_creator_then_surplus() {
        let settlement = Settlement::Success {
            share_surplus: 50,
            platform_fee: 6,
            creator_payout: 294,
        };
        assert_eq!(
            settlement.payouts(),
            vec![
                Payout {
                    vault: Vault::Asset,
                    payee: Payee::FeeRecipient,
                    amount: 6,
                },
                Payout {
                    vault: Vault::Asset,
                    payee: Payee::Creator,
                    amount: 294,
                },
                Payout {
                    vault: Vault::Share,
                    payee: Payee::Creator,
                    amount: 50,
                },
            ]
        );
        assert_eq!(settlement.totals(), (6, 294, 50));
    }

    #[test]
    fn settlement_skips_zero_transfers() {
        // zero fee rate and a sold-out pool
        let settlement = Settlement::Success {
            share_surplus: 0,
            platform_fee: 0,
            creator_payout: 300,
        };
        assert_eq!(
            settlement.payouts(),
            vec![Payout {
                vault: Vault::Asset,
                payee: Payee::Creator,
                amount: 300,
            }]
        );

        assert!(Settlement::Failed { share_refund: 0 }.payouts().is_empty());
    }

    #[test]
    fn failed_settlement_only_returns_shares() {
        let settlement = Settlement::Failed { share_refund: 300 };
        assert_eq!(
            settlement.payouts(),
            vec![Payout {
                vault: Vault::Share,
                payee: Payee::Creator,
                amount: 300,
            }]
        );
        assert_eq!(settlement.totals(), (0, 0, 300));
    }

    #[test]
    fn redemption_draws_from_the_matching_vault() {
        assert_eq!(Redemption::Shares(10).payout(), Some((Vault::Share, 10)));
        assert_eq!(Redemption::Assets(21).payout(), Some((Vault::Asset, 21)));
        assert_eq!(Redemption::Shares(0).payout(), None);
        assert_eq!(Redemption::Assets(0).payout(), None);
        assert_eq!(Redemption::Assets(0).vault(), Vault::Asset);
    }

    #[test]
    fn lock_rejects_nested_entry() {
        let mut pool = pool_with(WAD, 100, 200, 300);

        pool.enter().unwrap();
        assert_err(pool.enter(), PoolError::ReentrantCall);
        pool.leave();
        pool.enter().unwrap();
    }
}

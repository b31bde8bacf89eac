use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

/// Moves tokens out of a pool vault. The pool PDA signs with `seeds`.
pub fn transfer_tokens_from<'a>(
    token_program: AccountInfo<'a>,
    vault: AccountInfo<'a>,
    destination: AccountInfo<'a>,
    pool: AccountInfo<'a>,
    seeds: &[&[u8]],
    amount: u64,
) -> Result<()> {
    let signer_seeds = &[seeds];
    let cpi_ctx = CpiContext::new_with_signer(
        token_program,
        Transfer {
            from: vault,
            to: destination,
            authority: pool,
        },
        signer_seeds,
    );

    token::transfer(cpi_ctx, amount)
}

/// Moves tokens from a user owned account, signed by the user.
pub fn transfer_tokens_to<'a>(
    token_program: AccountInfo<'a>,
    source: AccountInfo<'a>,
    destination: AccountInfo<'a>,
    owner: AccountInfo<'a>,
    amount: u64,
) -> Result<()> {
    let cpi_ctx = CpiContext::new(
        token_program,
        Transfer {
            from: source,
            to: destination,
            authority: owner,
        },
    );

    token::transfer(cpi_ctx, amount)
}

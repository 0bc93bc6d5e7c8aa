//! Result types shared by the math and the account snapshots.

use serde::Serialize;

/// Fee and slippage breakdown for a hypothetical swap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwapQuote {
    pub amount_in:      u64,
    /// Output before the fee is taken.
    pub gross_out:      u64,
    /// Total fee, `gross_out · fee_bps / 10000`.
    pub fee:            u64,
    /// Part of `fee` that accrues to the pool admin.
    pub admin_fee:      u64,
    /// What the trader receives.
    pub amount_out:     u64,
    /// `amount_out` less the caller's slippage tolerance.
    pub min_amount_out: u64,
    /// `1 − amount_out / amount_in` against a 1:1 reference price.
    pub price_impact:   f64,
    pub amp:            u64,
    pub fee_bps:        u64,
}

/// Tokens released by burning LP from a 2-token pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WithdrawAmounts {
    pub amount0: u64,
    pub amount1: u64,
}

/// Side of a 2-token pool swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapDirection {
    /// Token 0 in, token 1 out.
    ZeroToOne,
    /// Token 1 in, token 0 out.
    OneToZero,
}

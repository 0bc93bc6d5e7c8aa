//! Swap simulation: invariant + output solver + fee.
//!
//! The fee is always taken from the gross output, never from the input.

use crate::constants::FEE_DENOMINATOR;
use crate::error::{Error, Result};
use crate::types::SwapQuote;

use super::fixed_point::{div_wide, mul_wide};
use super::invariant::calc_d;
use super::output::{calc_y, calc_y_n, check_indices};

// ─── 2-token ──────────────────────────────────────────────────────────────────

/// Output of a 2-token swap after fees.
///
/// If the solver reports an output balance that did not shrink, the swap
/// yields 0 rather than an error.
pub fn simulate_swap(
    bal_in:    u64,
    bal_out:   u64,
    amount_in: u64,
    amp:       u64,
    fee_bps:   u64,
) -> Result<u64> {
    let gross = gross_output(bal_in, bal_out, amount_in, amp)?;
    Ok(gross - swap_fee(gross, fee_bps)?)
}

/// Output before fees.
pub fn gross_output(bal_in: u64, bal_out: u64, amount_in: u64, amp: u64) -> Result<u64> {
    let d = calc_d(bal_in, bal_out, amp)?;
    let new_bal_in = bal_in.checked_add(amount_in).ok_or(Error::MathOverflow)?;
    let new_bal_out = calc_y(new_bal_in, d, amp)?;
    if new_bal_out >= bal_out {
        return Ok(0);
    }
    Ok(bal_out - new_bal_out)
}

// ─── N-token ──────────────────────────────────────────────────────────────────

/// Output of an N-token swap from `from_idx` to `to_idx` after fees.
pub fn simulate_swap_n(
    balances:  &[u64],
    from_idx:  usize,
    to_idx:    usize,
    amount_in: u64,
    amp:       u64,
    fee_bps:   u64,
) -> Result<u64> {
    let gross = gross_output_n(balances, from_idx, to_idx, amount_in, amp)?;
    Ok(gross - swap_fee(gross, fee_bps)?)
}

pub fn gross_output_n(
    balances:  &[u64],
    from_idx:  usize,
    to_idx:    usize,
    amount_in: u64,
    amp:       u64,
) -> Result<u64> {
    check_indices(balances.len(), from_idx, to_idx)?;
    let new_y = calc_y_n(balances, from_idx, to_idx, amount_in, amp)?;
    let bal_out = balances[to_idx];
    if new_y >= bal_out {
        return Ok(0);
    }
    Ok(bal_out - new_y)
}

// ─── Fees and quotes ──────────────────────────────────────────────────────────

/// `gross · fee_bps / 10000`, truncating.
pub fn swap_fee(gross: u64, fee_bps: u64) -> Result<u64> {
    if fee_bps > FEE_DENOMINATOR {
        return Err(Error::InvalidArgument(format!(
            "fee_bps {fee_bps} exceeds {FEE_DENOMINATOR}"
        )));
    }
    Ok(div_wide(mul_wide(gross, fee_bps), FEE_DENOMINATOR))
}

/// Minimum acceptable output under a slippage tolerance in bps.
pub fn calc_min_output(expected_output: u64, slippage_bps: u64) -> u64 {
    let keep = FEE_DENOMINATOR.saturating_sub(slippage_bps);
    div_wide(mul_wide(expected_output, keep), FEE_DENOMINATOR)
}

/// Price impact against a 1:1 reference rate, as a fraction (0.01 = 1%).
pub fn calc_price_impact(
    bal_in:    u64,
    bal_out:   u64,
    amount_in: u64,
    amp:       u64,
    fee_bps:   u64,
) -> Result<f64> {
    if amount_in == 0 {
        return Err(Error::InvalidArgument("amount_in must be non-zero".into()));
    }
    let out = simulate_swap(bal_in, bal_out, amount_in, amp, fee_bps)?;
    Ok(1.0 - out as f64 / amount_in as f64)
}

/// Full fee and slippage breakdown for a hypothetical 2-token swap.
///
/// `admin_fee_pct` is the share of the fee (0–100) that accrues to the admin.
pub fn quote_swap(
    bal_in:        u64,
    bal_out:       u64,
    amount_in:     u64,
    amp:           u64,
    fee_bps:       u64,
    admin_fee_pct: u64,
    slippage_bps:  u64,
) -> Result<SwapQuote> {
    let gross_out = gross_output(bal_in, bal_out, amount_in, amp)?;
    let fee = swap_fee(gross_out, fee_bps)?;
    let amount_out = gross_out - fee;
    let admin_fee = div_wide(mul_wide(fee, admin_fee_pct.min(100)), 100);

    let price_impact = if amount_in == 0 {
        0.0
    } else {
        1.0 - amount_out as f64 / amount_in as f64
    };

    Ok(SwapQuote {
        amount_in,
        gross_out,
        fee,
        admin_fee,
        amount_out,
        min_amount_out: calc_min_output(amount_out, slippage_bps),
        price_impact,
        amp,
        fee_bps,
    })
}

//! StableSwap invariant `D`.
//!
//! Solves `A·nⁿ·Σxᵢ + D = A·D·nⁿ + Dⁿ⁺¹ / (nⁿ·Πxᵢ)` by Newton's method:
//!
//! ```text
//! D_P = Dⁿ⁺¹ / (nⁿ·Πxᵢ)                     (folded one balance at a time)
//! D'  = (Ann·S + D_P·n)·D / ((Ann − 1)·D + (n + 1)·D_P)      Ann = A·nⁿ
//! ```
//!
//! Every step truncates, so results match the program bit for bit.

use tracing::debug;

use crate::constants::{MAX_TOKENS, NEWTON_ITERATIONS};
use crate::error::{Error, Result};

use super::fixed_point::mul_wide;

/// Invariant of a 2-token pool.
pub fn calc_d(x: u64, y: u64, amp: u64) -> Result<u64> {
    calc_d_n(&[x, y], amp)
}

/// Invariant of an N-token pool (`2..=8` balances).
///
/// A zero sum is defined as `D = 0`. A zero balance in an otherwise funded
/// pool, a zero denominator, or an exhausted iteration cap is an error.
pub fn calc_d_n(balances: &[u64], amp: u64) -> Result<u64> {
    let n = token_count(balances.len())?;

    let mut s: u64 = 0;
    for b in balances {
        s = s.checked_add(*b).ok_or(Error::MathOverflow)?;
    }
    if s == 0 {
        return Ok(0);
    }

    let ann = ann(amp, n)?;
    let ann_minus_one = ann.checked_sub(1).ok_or(Error::InvalidAmp(amp))?;
    let mut d = s;

    for _ in 0..NEWTON_ITERATIONS {
        let mut d_p = d as u128;
        for (index, b) in balances.iter().enumerate() {
            if *b == 0 {
                debug!(index, "calc_d: zero balance");
                return Err(Error::ZeroBalance { index });
            }
            d_p = d_p
                .checked_mul(d as u128)
                .ok_or(Error::MathOverflow)?
                / mul_wide(n, *b);
        }

        let d_prev = d;

        let num = mul_wide(ann, s)
            .checked_add(d_p.checked_mul(n as u128).ok_or(Error::MathOverflow)?)
            .and_then(|v| v.checked_mul(d as u128))
            .ok_or(Error::MathOverflow)?;
        let denom = mul_wide(ann_minus_one, d)
            .checked_add(d_p.checked_mul(n as u128 + 1).ok_or(Error::MathOverflow)?)
            .ok_or(Error::MathOverflow)?;

        if denom == 0 {
            debug!(d, "calc_d: zero denominator");
            return Err(Error::ZeroDenominator);
        }

        d = u64::try_from(num / denom).map_err(|_| Error::MathOverflow)?;

        if d.abs_diff(d_prev) <= 1 {
            return Ok(d);
        }
    }

    debug!(iterations = NEWTON_ITERATIONS, ?balances, amp, "calc_d: no convergence");
    Err(Error::NoConvergence { iterations: NEWTON_ITERATIONS })
}

/// Validate a token count and return it as `u64`.
pub(crate) fn token_count(len: usize) -> Result<u64> {
    if !(2..=MAX_TOKENS).contains(&len) {
        return Err(Error::InvalidTokenCount(len.min(u8::MAX as usize) as u8));
    }
    Ok(len as u64)
}

/// `Ann = A·nⁿ`.
pub(crate) fn ann(amp: u64, n: u64) -> Result<u64> {
    let nn = (0..n).fold(1u64, |acc, _| acc * n);
    amp.checked_mul(nn).ok_or(Error::MathOverflow)
}

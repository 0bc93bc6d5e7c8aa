//! Output-balance solver.
//!
//! Given the invariant `D` and the post-deposit balances of every token but
//! the output one, solves `y² + (b − D)·y = c` for the output balance `y`:
//!
//! ```text
//! c = Dⁿ⁺¹ / (nⁿ·Ann·Πx'ᵢ)     b = S' + D / Ann
//! y' = (y² + c) / (2y + b − D)              seeded with y = D
//! ```

use tracing::debug;

use crate::constants::NEWTON_ITERATIONS;
use crate::error::{Error, Result};

use super::fixed_point::mul_wide;
use super::invariant::{ann, calc_d_n, token_count};

/// New balance of the output token of a 2-token pool once the input
/// balance has become `x_new`.
pub fn calc_y(x_new: u64, d: u64, amp: u64) -> Result<u64> {
    if x_new == 0 {
        return Err(Error::ZeroBalance { index: 0 });
    }
    let ann = ann(amp, 2)?;
    if ann == 0 {
        return Err(Error::InvalidAmp(amp));
    }

    let c = mul_wide(d, d) / (2 * x_new as u128);
    let c = c.checked_mul(d as u128).ok_or(Error::MathOverflow)? / (2 * ann as u128);
    let b = x_new as u128 + (d / ann) as u128;

    solve_y(c, b, d)
}

/// New balance of `to_idx` after `amount_in` of `from_idx` enters an
/// N-token pool.
///
/// `D` is taken from the pre-swap balances. The input token contributes its
/// post-deposit balance to `S'` and `c`; every other non-output token
/// contributes its pre-swap balance.
pub fn calc_y_n(
    balances:  &[u64],
    from_idx:  usize,
    to_idx:    usize,
    amount_in: u64,
    amp:       u64,
) -> Result<u64> {
    let n = token_count(balances.len())?;
    check_indices(balances.len(), from_idx, to_idx)?;

    let d = calc_d_n(balances, amp)?;
    let ann = ann(amp, n)?;
    if ann == 0 {
        return Err(Error::InvalidAmp(amp));
    }

    let mut s_prime: u128 = 0;
    let mut c: u128 = d as u128;
    for (index, balance) in balances.iter().enumerate() {
        if index == to_idx {
            continue;
        }
        let x = if index == from_idx {
            balance.checked_add(amount_in).ok_or(Error::MathOverflow)?
        } else {
            *balance
        };
        if x == 0 {
            return Err(Error::ZeroBalance { index });
        }
        s_prime += x as u128;
        c = c.checked_mul(d as u128).ok_or(Error::MathOverflow)? / mul_wide(n, x);
    }

    let c = c.checked_mul(d as u128).ok_or(Error::MathOverflow)? / mul_wide(ann, n);
    let b = s_prime + (d / ann) as u128;

    solve_y(c, b, d)
}

/// Newton iteration shared by the 2- and N-token forms.
fn solve_y(c: u128, b: u128, d: u64) -> Result<u64> {
    let mut y = d;

    for _ in 0..NEWTON_ITERATIONS {
        let y_prev = y;

        let num = mul_wide(y, y).checked_add(c).ok_or(Error::MathOverflow)?;
        // 2y + b − D stays positive while y approaches the root from above.
        let denom = (2 * y as u128 + b)
            .checked_sub(d as u128)
            .ok_or(Error::MathOverflow)?;
        if denom == 0 {
            debug!(y, d, "calc_y: zero denominator");
            return Err(Error::ZeroDenominator);
        }

        y = u64::try_from(num / denom).map_err(|_| Error::MathOverflow)?;

        if y.abs_diff(y_prev) <= 1 {
            return Ok(y);
        }
    }

    debug!(iterations = NEWTON_ITERATIONS, d, "calc_y: no convergence");
    Err(Error::NoConvergence { iterations: NEWTON_ITERATIONS })
}

pub(crate) fn check_indices(n_tokens: usize, from_idx: usize, to_idx: usize) -> Result<()> {
    for index in [from_idx, to_idx] {
        if index >= n_tokens {
            return Err(Error::InvalidTokenIndex { index, n_tokens });
        }
    }
    if from_idx == to_idx {
        return Err(Error::SameToken(from_idx));
    }
    Ok(())
}

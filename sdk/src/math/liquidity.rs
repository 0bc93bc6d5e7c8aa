//! LP-token issuance and redemption.

use crate::constants::VIRTUAL_PRICE_PRECISION;
use crate::error::{Error, Result};
use crate::types::WithdrawAmounts;

use super::fixed_point::{div_wide, isqrt_u128, mul_wide};
use super::invariant::{calc_d, calc_d_n};

/// LP minted by the first deposit: the geometric mean `√(amount0·amount1)`.
pub fn calc_initial_lp(amount0: u64, amount1: u64) -> u64 {
    isqrt_u128(mul_wide(amount0, amount1))
}

/// LP minted for a 2-token deposit.
///
/// With zero supply this is the bootstrap case ([`calc_initial_lp`]).
/// Otherwise `lp_supply · (D1 − D0) / D0`, where `D0` and `D1` are the
/// invariants before and after the deposit.
pub fn calc_lp_tokens(
    amt0:      u64,
    amt1:      u64,
    bal0:      u64,
    bal1:      u64,
    lp_supply: u64,
    amp:       u64,
) -> Result<u64> {
    if lp_supply == 0 {
        return Ok(calc_initial_lp(amt0, amt1));
    }

    let d0 = calc_d(bal0, bal1, amp)?;
    let d1 = calc_d(
        bal0.checked_add(amt0).ok_or(Error::MathOverflow)?,
        bal1.checked_add(amt1).ok_or(Error::MathOverflow)?,
        amp,
    )?;
    mint_from_invariants(lp_supply, d0, d1)
}

/// LP minted for an N-token deposit.
///
/// With zero supply the depositor receives the invariant of the deposit
/// itself; otherwise the same `lp_supply · (D1 − D0) / D0` rule applies.
pub fn calc_lp_tokens_n(
    amounts:   &[u64],
    balances:  &[u64],
    lp_supply: u64,
    amp:       u64,
) -> Result<u64> {
    if amounts.len() != balances.len() {
        return Err(Error::InvalidArgument(format!(
            "{} amounts for {} balances",
            amounts.len(),
            balances.len()
        )));
    }
    if lp_supply == 0 {
        return calc_d_n(amounts, amp);
    }

    let after = balances
        .iter()
        .zip(amounts)
        .map(|(b, a)| b.checked_add(*a).ok_or(Error::MathOverflow))
        .collect::<Result<Vec<u64>>>()?;

    let d0 = calc_d_n(balances, amp)?;
    let d1 = calc_d_n(&after, amp)?;
    mint_from_invariants(lp_supply, d0, d1)
}

fn mint_from_invariants(lp_supply: u64, d0: u64, d1: u64) -> Result<u64> {
    if d0 == 0 {
        return Err(Error::NoLiquidity);
    }
    let growth = d1.checked_sub(d0).ok_or(Error::MathOverflow)?;
    u64::try_from(mul_wide(lp_supply, growth) / d0 as u128).map_err(|_| Error::MathOverflow)
}

/// Tokens returned for burning `lp_amount`: `balanceᵢ · lp_amount / lp_supply`.
pub fn calc_withdraw(
    lp_amount: u64,
    bal0:      u64,
    bal1:      u64,
    lp_supply: u64,
) -> Result<WithdrawAmounts> {
    if lp_supply == 0 {
        return Err(Error::NoLiquidity);
    }
    Ok(WithdrawAmounts {
        amount0: div_wide(mul_wide(bal0, lp_amount), lp_supply),
        amount1: div_wide(mul_wide(bal1, lp_amount), lp_supply),
    })
}

/// Proportional withdrawal across every balance of an N-token pool.
pub fn calc_withdraw_n(lp_amount: u64, balances: &[u64], lp_supply: u64) -> Result<Vec<u64>> {
    if lp_supply == 0 {
        return Err(Error::NoLiquidity);
    }
    Ok(balances
        .iter()
        .map(|b| div_wide(mul_wide(*b, lp_amount), lp_supply))
        .collect())
}

/// LP value relative to the underlying: `D · 1e18 / lp_supply`.
pub fn calc_virtual_price(bal0: u64, bal1: u64, lp_supply: u64, amp: u64) -> Result<u128> {
    if lp_supply == 0 {
        return Err(Error::NoLiquidity);
    }
    let d = calc_d(bal0, bal1, amp)?;
    Ok(d as u128 * VIRTUAL_PRICE_PRECISION / lp_supply as u128)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_mints_geometric_mean() {
        assert_eq!(calc_lp_tokens(100, 400, 0, 0, 0, 100).unwrap(), 200);
        assert_eq!(calc_initial_lp(1_000_000, 1_000_000), 1_000_000);
        assert_eq!(calc_initial_lp(0, 5), 0);
    }

    #[test]
    fn balanced_deposit_mints_proportionally() {
        // Doubling a balanced pool doubles D, so supply doubles too.
        let lp = calc_lp_tokens(1_000_000, 1_000_000, 1_000_000, 1_000_000, 2_000_000, 100).unwrap();
        assert_eq!(lp, 2_000_000);
    }

    #[test]
    fn single_sided_deposit_mints_less_than_value() {
        let lp = calc_lp_tokens(100_000, 0, 1_000_000, 1_000_000, 2_000_000, 100).unwrap();
        assert!(lp < 100_000);
        assert!(lp > 99_900, "lp={lp}");
    }

    #[test]
    fn deposit_into_drained_pool_fails() {
        assert_eq!(
            calc_lp_tokens(10, 10, 0, 0, 1_000, 100),
            Err(Error::NoLiquidity)
        );
        assert!(calc_lp_tokens(10, 10, 0, 50, 1_000, 100).is_err());
    }

    #[test]
    fn withdraw_is_proportional_and_truncates() {
        let w = calc_withdraw(1, 10, 20, 3).unwrap();
        assert_eq!(w, WithdrawAmounts { amount0: 3, amount1: 6 });
        let w = calc_withdraw(500, 1_000_000, 3_000_000, 1_000).unwrap();
        assert_eq!(w, WithdrawAmounts { amount0: 500_000, amount1: 1_500_000 });
        assert_eq!(calc_withdraw(1, 10, 10, 0), Err(Error::NoLiquidity));
    }

    #[test]
    fn withdraw_n_matches_two_token_split() {
        let v = calc_withdraw_n(250, &[1_000, 2_000, 3_000], 1_000).unwrap();
        assert_eq!(v, vec![250, 500, 750]);
        assert_eq!(calc_withdraw_n(1, &[1, 2], 0), Err(Error::NoLiquidity));
    }

    #[test]
    fn n_token_deposit() {
        let balances = [1_000_000u64; 3];
        assert_eq!(calc_lp_tokens_n(&[500_000; 3], &[0; 3], 0, 100).unwrap(), 1_500_000);
        let lp = calc_lp_tokens_n(&[1_000_000; 3], &balances, 3_000_000, 100).unwrap();
        assert_eq!(lp, 3_000_000);
        assert!(calc_lp_tokens_n(&[1, 2], &balances, 3_000_000, 100).is_err());
    }

    #[test]
    fn virtual_price_of_balanced_pool() {
        let vp = calc_virtual_price(1_000_000, 1_000_000, 2_000_000, 100).unwrap();
        assert_eq!(vp, VIRTUAL_PRICE_PRECISION);
        assert_eq!(calc_virtual_price(1, 1, 0, 100), Err(Error::NoLiquidity));
    }
}

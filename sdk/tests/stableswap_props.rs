//! Property checks for the invariant, swap and ramp math.

use aex402_sdk::math::{
    calc_d, calc_d_n, calc_withdraw, get_current_amp, quote_swap, simulate_swap,
};
use aex402_sdk::Error;
use proptest::prelude::*;

proptest! {
    #[test]
    fn balanced_pool_invariant_is_the_sum(v in 1u64..=1_000_000_000_000, amp in 1u64..=100_000) {
        prop_assert_eq!(calc_d(v, v, amp), Ok(2 * v));
    }

    #[test]
    fn balanced_n_pool_invariant_is_the_sum(
        n in 2usize..=8,
        v in 1u64..=1_000_000_000,
        amp in 1u64..=100_000,
    ) {
        prop_assert_eq!(calc_d_n(&vec![v; n], amp), Ok(n as u64 * v));
    }

    #[test]
    fn balanced_swap_returns_less_than_input(
        bal in 1_000_000_000u64..=1_000_000_000_000,
        amount in 1_000_000u64..=1_000_000_000,
        amp in 1u64..=10_000,
    ) {
        let out = simulate_swap(bal, bal, amount, amp, 30).unwrap();
        prop_assert!(out > 0);
        prop_assert!(out < amount, "out={} amount={}", out, amount);
    }

    #[test]
    fn quote_fee_breakdown_is_consistent(
        bal0 in 1_000_000u64..=100_000_000_000,
        ratio_pct in 10u64..=1_000,
        amount in 1u64..=1_000_000_000,
        amp in 1u64..=5_000,
        fee_bps in 0u64..=1_000,
        admin_fee_pct in 0u64..=100,
        slippage_bps in 0u64..=10_000,
    ) {
        let bal1 = bal0 / 100 * ratio_pct;
        let q = quote_swap(bal0, bal1, amount, amp, fee_bps, admin_fee_pct, slippage_bps).unwrap();
        prop_assert_eq!(q.gross_out, q.amount_out + q.fee);
        prop_assert_eq!(q.fee as u128, q.gross_out as u128 * fee_bps as u128 / 10_000);
        prop_assert!(q.admin_fee <= q.fee);
        prop_assert!(q.min_amount_out <= q.amount_out);
        prop_assert!(q.gross_out <= bal1);
    }

    #[test]
    fn fee_scales_the_fee_free_output(
        bal in 1_000_000_000u64..=1_000_000_000_000,
        amount in 1u64..=1_000_000_000,
        amp in 1u64..=10_000,
        fee_bps in 0u64..=10_000,
    ) {
        let free = simulate_swap(bal, bal, amount, amp, 0).unwrap();
        let charged = simulate_swap(bal, bal, amount, amp, fee_bps).unwrap();
        prop_assert_eq!(charged as u128, free as u128 - free as u128 * fee_bps as u128 / 10_000);
    }

    #[test]
    fn zero_balance_in_funded_pool_is_an_error(v in 1u64..=u32::MAX as u64, amp in 1u64..=100_000) {
        prop_assert_eq!(calc_d(0, v, amp), Err(Error::ZeroBalance { index: 0 }));
        prop_assert_eq!(calc_d(v, 0, amp), Err(Error::ZeroBalance { index: 1 }));
    }

    #[test]
    fn ramp_stays_between_endpoints(
        amp in 1u64..=100_000,
        target in 1u64..=100_000,
        start in -1_000_000_000i64..=1_000_000_000,
        duration in 1i64..=10_000_000,
        offset in -20_000_000i64..=20_000_000,
    ) {
        let stop = start + duration;
        let now = start + offset;
        let current = get_current_amp(amp, target, start, stop, now);
        prop_assert!(current >= amp.min(target) && current <= amp.max(target));
        if now <= start {
            prop_assert_eq!(current, amp);
        }
        if now >= stop {
            prop_assert_eq!(current, target);
        }
    }

    #[test]
    fn ramp_moves_monotonically(
        amp in 1u64..=100_000,
        target in 1u64..=100_000,
        duration in 1i64..=1_000_000,
        a in 0i64..=1_000_000,
        b in 0i64..=1_000_000,
    ) {
        let (early, late) = (a.min(b), a.max(b));
        let x = get_current_amp(amp, target, 0, duration, early);
        let y = get_current_amp(amp, target, 0, duration, late);
        if target >= amp {
            prop_assert!(x <= y);
        } else {
            prop_assert!(x >= y);
        }
    }

    #[test]
    fn withdrawal_never_exceeds_reserves(
        bal0 in 0u64..=u64::MAX / 2,
        bal1 in 0u64..=u64::MAX / 2,
        supply in 1u64..=u64::MAX,
        share in 0u64..=u64::MAX,
    ) {
        let lp = share % supply + 1;
        let out = calc_withdraw(lp, bal0, bal1, supply).unwrap();
        prop_assert!(out.amount0 <= bal0);
        prop_assert!(out.amount1 <= bal1);
    }
}

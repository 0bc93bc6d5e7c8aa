//! Accumulator-per-share farming rewards, scaled by [`REWARD_PRECISION`].

use crate::constants::REWARD_PRECISION;

use super::fixed_point::mul_wide;

/// `staked · acc_reward / 1e12 − reward_debt`, clamped to zero.
pub fn calc_pending_reward(staked: u64, acc_reward: u64, reward_debt: u64) -> u64 {
    let earned = mul_wide(staked, acc_reward) / REWARD_PRECISION as u128;
    let pending = earned.saturating_sub(reward_debt as u128);
    u64::try_from(pending).unwrap_or(u64::MAX)
}

/// Accumulator after distributing `reward` across `total_staked`.
///
/// Nothing staked leaves the accumulator untouched.
pub fn calc_new_acc_reward(current_acc: u64, reward: u64, total_staked: u64) -> u64 {
    if total_staked == 0 {
        return current_acc;
    }
    let increase = mul_wide(reward, REWARD_PRECISION) / total_staked as u128;
    let increase = u64::try_from(increase).unwrap_or(u64::MAX);
    current_acc.saturating_add(increase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_reward() {
        // 1.5 reward tokens per staked unit
        let acc = 1_500_000_000_000;
        assert_eq!(calc_pending_reward(1_000, acc, 0), 1_500);
        assert_eq!(calc_pending_reward(1_000, acc, 400), 1_100);
        assert_eq!(calc_pending_reward(1_000, acc, 2_000), 0);
        assert_eq!(calc_pending_reward(0, acc, 0), 0);
    }

    #[test]
    fn accumulator_growth() {
        assert_eq!(calc_new_acc_reward(7, 1_000, 0), 7);
        assert_eq!(calc_new_acc_reward(0, 1_000, 1_000), REWARD_PRECISION);
        assert_eq!(calc_new_acc_reward(5, 1, 3), 5 + 333_333_333_333);
    }

    #[test]
    fn distribute_then_claim() {
        let acc = calc_new_acc_reward(0, 9_000, 3_000);
        assert_eq!(calc_pending_reward(1_000, acc, 0), 3_000);
    }
}

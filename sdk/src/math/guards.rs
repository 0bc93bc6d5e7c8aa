//! Pre-trade sanity checks mirrored from the program.

use crate::constants::MIN_SWAP;

/// Largest balance ratio the program accepts by default.
pub const DEFAULT_MAX_IMBALANCE_RATIO: u64 = 10;

/// False if either balance is empty or one exceeds `max_ratio` times the other.
pub fn check_imbalance(bal0: u64, bal1: u64, max_ratio: u64) -> bool {
    if bal0 == 0 || bal1 == 0 {
        return false;
    }
    let (hi, lo) = if bal0 > bal1 { (bal0, bal1) } else { (bal1, bal0) };
    hi <= lo.saturating_mul(max_ratio)
}

/// Whether `amount` clears `min`. The program uses [`MIN_SWAP`] for swaps.
pub fn check_min_amount(amount: u64, min: u64) -> bool {
    amount >= min
}

/// [`check_min_amount`] against [`MIN_SWAP`].
pub fn check_swap_amount(amount: u64) -> bool {
    check_min_amount(amount, MIN_SWAP)
}

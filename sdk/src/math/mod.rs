//! StableSwap math.
//!
//! Mirrors the on-chain fixed-point arithmetic exactly so off-chain estimates
//! match on-chain results: 128-bit intermediates and truncating division at
//! every step.

pub mod amp;
pub mod fixed_point;
pub mod guards;
pub mod invariant;
pub mod liquidity;
pub mod output;
pub mod rewards;
pub mod swap;

pub use amp::{check_amp, get_current_amp};
pub use fixed_point::{div_wide, isqrt, isqrt_u128, mul_wide};
pub use guards::{check_imbalance, check_min_amount, check_swap_amount, DEFAULT_MAX_IMBALANCE_RATIO};
pub use invariant::{calc_d, calc_d_n};
pub use liquidity::{
    calc_initial_lp, calc_lp_tokens, calc_lp_tokens_n, calc_virtual_price, calc_withdraw,
    calc_withdraw_n,
};
pub use output::{calc_y, calc_y_n};
pub use rewards::{calc_new_acc_reward, calc_pending_reward};
pub use swap::{
    calc_min_output, calc_price_impact, gross_output, gross_output_n, quote_swap, simulate_swap,
    simulate_swap_n, swap_fee,
};

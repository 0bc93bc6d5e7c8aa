//! Amplification ramping.

use crate::constants::{MAX_AMP, MIN_AMP};

/// Effective amplification at `now` while ramping from `amp` to `target_amp`
/// over `[ramp_start, ramp_end]`.
///
/// Outside the window the endpoint applies; an empty window means the ramp
/// has already completed. Inside it the value is interpolated linearly with
/// truncating division.
pub fn get_current_amp(
    amp:        u64,
    target_amp: u64,
    ramp_start: i64,
    ramp_end:   i64,
    now:        i64,
) -> u64 {
    if now >= ramp_end || ramp_end == ramp_start {
        return target_amp;
    }
    if now <= ramp_start {
        return amp;
    }

    // ramp_start < now < ramp_end, so both spans are positive.
    let elapsed = now.abs_diff(ramp_start) as u128;
    let duration = ramp_end.abs_diff(ramp_start) as u128;

    if target_amp > amp {
        let step = (target_amp - amp) as u128 * elapsed / duration;
        amp + step as u64
    } else {
        let step = (amp - target_amp) as u128 * elapsed / duration;
        amp - step as u64
    }
}

/// Whether `amp` lies within `MIN_AMP..=MAX_AMP`.
pub fn check_amp(amp: u64) -> bool {
    (MIN_AMP..=MAX_AMP).contains(&amp)
}

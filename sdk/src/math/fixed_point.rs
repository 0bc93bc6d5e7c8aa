//! Double-width arithmetic and integer square roots.
//!
//! Every division truncates toward zero, matching the program's integer
//! semantics.

/// 64×64 → 128-bit multiply. Never overflows.
#[inline]
pub fn mul_wide(a: u64, b: u64) -> u128 {
    a as u128 * b as u128
}

/// 128 ÷ 64 → 64-bit division.
///
/// A zero divisor yields 0 rather than an error. A quotient wider than 64
/// bits keeps its low 64 bits, as the program's narrowing cast does.
#[inline]
pub fn div_wide(n: u128, d: u64) -> u64 {
    if d == 0 {
        return 0;
    }
    (n / d as u128) as u64
}

/// Integer square root (floor) by Newton's method.
///
/// Returns 0 for 0 and 1 for inputs in `1..=3`.
pub fn isqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    if n <= 3 {
        return 1;
    }
    // (x + 1) / 2 without overflowing at u64::MAX
    let mut x = n;
    let mut y = n / 2 + n % 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// Integer square root of a 128-bit value. The root of any `u128` fits in 64 bits.
pub fn isqrt_u128(n: u128) -> u64 {
    if n == 0 {
        return 0;
    }
    if n <= 3 {
        return 1;
    }
    let mut x = n;
    let mut y = n / 2 + n % 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_multiply_does_not_overflow() {
        assert_eq!(mul_wide(u64::MAX, u64::MAX), (u64::MAX as u128) * (u64::MAX as u128));
        assert_eq!(mul_wide(0, u64::MAX), 0);
    }

    #[test]
    fn wide_divide_truncates_and_tolerates_zero() {
        assert_eq!(div_wide(10, 3), 3);
        assert_eq!(div_wide(mul_wide(u64::MAX, 7), 7), u64::MAX);
        assert_eq!(div_wide(12345, 0), 0);
    }

    #[test]
    fn isqrt_small_values() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(2), 1);
        assert_eq!(isqrt(3), 1);
        assert_eq!(isqrt(4), 2);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(40_000), 200);
    }

    #[test]
    fn isqrt_extremes() {
        assert_eq!(isqrt(u64::MAX), u32::MAX as u64);
        assert_eq!(isqrt_u128(u128::MAX), u64::MAX);
        assert_eq!(isqrt_u128(mul_wide(1 << 40, 1 << 40)), 1 << 40);
        assert_eq!(isqrt_u128(mul_wide(100, 400)), 200);
    }

    #[test]
    fn isqrt_is_floor() {
        for n in [5u64, 99, 1_000_001, 123_456_789_012] {
            let r = isqrt(n);
            assert!(r * r <= n && (r + 1) * (r + 1) > n, "n={n} r={r}");
        }
    }
}

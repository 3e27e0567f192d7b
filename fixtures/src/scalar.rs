//! Scalar fixtures
//!
//! Integer functions with branches, loops, and call chains.

/// Double and offset a signed integer, clamped at zero.
///
/// Returns `0` for negative input, `2 * a + 1` otherwise. This is the
/// prototypical inlining candidate: tiny body, one branch.
///
/// # Test Cases
/// - scalar_transform(-5) = 0
/// - scalar_transform(0) = 1
/// - scalar_transform(10) = 21
/// - scalar_transform(62) = 125
#[inline(never)]
pub fn scalar_transform(a: i64) -> i64 {
    if a < 0 {
        return 0;
    }
    (a * 2) + 1
}

/// Sum a derived series when `x > y`, otherwise combine both inputs.
///
/// For `x > y` accumulates `scalar_transform(i) - i` over `0..x`.
/// Otherwise returns `scalar_transform(y) + x`. Equal inputs take the
/// fallback branch.
///
/// # Test Cases
/// - branched_accumulate(5, 10) = 26
/// - branched_accumulate(10, 5) = 55
/// - branched_accumulate(7, 7) = 22
/// - branched_accumulate(0, -3) = 0
#[inline(never)]
pub fn branched_accumulate(x: i64, y: i64) -> i64 {
    let mut total: i64 = 0;
    if x > y {
        for i in 0..x {
            total += scalar_transform(i) - i;
        }
    } else {
        total = scalar_transform(y) + x;
    }
    total
}

/// [`scalar_transform`] with `i64` overflow reported as `None`.
pub fn checked_scalar_transform(a: i64) -> Option<i64> {
    if a < 0 {
        return Some(0);
    }
    a.checked_mul(2)?.checked_add(1)
}

/// [`branched_accumulate`] with `i64` overflow reported as `None`.
///
/// The loop branch sums `i + 1` over `0..x`, so its total is taken in
/// closed form instead of iterating.
///
/// # Test Cases
/// - checked_branched_accumulate(5, 10) = Some(26)
/// - checked_branched_accumulate(0, 5000000000000000000) = None
pub fn checked_branched_accumulate(x: i64, y: i64) -> Option<i64> {
    if x > y {
        if x <= 0 {
            return Some(0);
        }
        let x = i128::from(x);
        i64::try_from(x * (x + 1) / 2).ok()
    } else {
        checked_scalar_transform(y)?.checked_add(x)
    }
}

/// Intermediate results of [`call_chain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallChain {
    /// `scalar_transform(10)`
    pub first: i64,
    /// `scalar_transform(20)`
    pub second: i64,
    /// `scalar_transform(first + second)`
    pub chained: i64,
}

/// Thread three calls to [`scalar_transform`], the last consuming the
/// first two results.
///
/// # Test Cases
/// - call_chain() = { first: 21, second: 41, chained: 125 }
#[inline(never)]
pub fn call_chain() -> CallChain {
    let first = scalar_transform(10);
    let second = scalar_transform(20);
    let chained = scalar_transform(first + second);
    CallChain {
        first,
        second,
        chained,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_transform_negative_clamps() {
        for a in [-1, -2, -100, i64::MIN] {
            assert_eq!(scalar_transform(a), 0);
        }
    }

    #[test]
    fn test_scalar_transform_non_negative() {
        assert_eq!(scalar_transform(0), 1);
        assert_eq!(scalar_transform(1), 3);
        assert_eq!(scalar_transform(10), 21);
        assert_eq!(scalar_transform(20), 41);
    }

    #[test]
    fn test_branched_fallback() {
        assert_eq!(branched_accumulate(5, 10), 26);
        assert_eq!(branched_accumulate(7, 7), 22);
        assert_eq!(branched_accumulate(-4, 3), 3);
    }

    #[test]
    fn test_branched_loop() {
        // scalar_transform(i) - i == i + 1 for i >= 0
        assert_eq!(branched_accumulate(10, 5), 55);
        assert_eq!(branched_accumulate(1, 0), 1);
    }

    #[test]
    fn test_branched_empty_loop() {
        assert_eq!(branched_accumulate(0, -3), 0);
        assert_eq!(branched_accumulate(-1, -7), 0);
    }

    #[test]
    fn test_checked_matches_unchecked() {
        for x in -30..30 {
            for y in -30..30 {
                assert_eq!(
                    checked_branched_accumulate(x, y),
                    Some(branched_accumulate(x, y)),
                    "x = {}, y = {}",
                    x,
                    y
                );
            }
        }
        assert_eq!(checked_scalar_transform(-9), Some(0));
        assert_eq!(checked_scalar_transform(62), Some(125));
    }

    #[test]
    fn test_checked_overflow() {
        assert_eq!(checked_scalar_transform(i64::MAX / 2), Some(i64::MAX));
        assert_eq!(checked_scalar_transform(i64::MAX / 2 + 1), None);
        assert_eq!(checked_branched_accumulate(0, 5_000_000_000_000_000_000), None);
        assert_eq!(checked_branched_accumulate(i64::MAX, 0), None);
        assert_eq!(checked_branched_accumulate(i64::MAX / 2, i64::MAX / 2), None);
        assert_eq!(checked_branched_accumulate(-5, i64::MAX / 2), Some(i64::MAX - 5));
        // sum of 1..=4_000_000_000 still fits
        assert_eq!(
            checked_branched_accumulate(4_000_000_000, 0),
            Some(8_000_000_002_000_000_000)
        );
    }

    #[test]
    fn test_call_chain() {
        let chain = call_chain();
        assert_eq!(chain.first, 21);
        assert_eq!(chain.second, 41);
        assert_eq!(chain.chained, 125);
    }
}

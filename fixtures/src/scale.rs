//! Generic scaling fixtures
//!
//! One generic function, monomorphized once per numeric type it is used
//! with. Each instantiation follows the arithmetic of its own type.

use std::fmt;

/// Numeric types the scaler can be instantiated with.
///
/// The intermediate `(v * 2) / 1.5` is computed in `f64` and converted back
/// with an `as` cast: integral types truncate toward zero (saturating at
/// the type bounds), floating types round to nearest.
pub trait Scalable: Copy + PartialOrd + fmt::Debug + fmt::Display {
    /// Name used when narrating an instantiation.
    const TYPE_NAME: &'static str;

    /// Results strictly above this are large.
    const LARGE_THRESHOLD: Self;

    fn to_real(self) -> f64;

    fn from_real(value: f64) -> Self;
}

macro_rules! impl_scalable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalable for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);
                const LARGE_THRESHOLD: Self = 100 as $ty;

                #[inline]
                fn to_real(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_real(value: f64) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_scalable!(i8, i16, i32, i64, f32, f64);

/// Input and output of one [`scale_value`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaled<T: Scalable> {
    pub original: T,
    pub processed: T,
}

impl<T: Scalable> Scaled<T> {
    /// Whether the processed value exceeds 100 in `T`'s own arithmetic.
    pub fn is_large(&self) -> bool {
        self.processed > T::LARGE_THRESHOLD
    }

    pub fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }
}

/// Apply `(value * 2) / 1.5` under the rules of `T`.
///
/// # Test Cases
/// - scale_value(10_i32) = 13
/// - scale_value(5_i16) = 6
/// - scale_value(20.5_f64) ≈ 27.333
/// - scale_value(30.5_f32) ≈ 40.666668
#[inline(never)]
pub fn scale_value<T: Scalable>(value: T) -> Scaled<T> {
    let processed = T::from_real((value.to_real() * 2.0) / 1.5);
    Scaled {
        original: value,
        processed,
    }
}

/// Non-generic counterpart, compiled exactly once.
#[inline(never)]
pub fn standalone_function() -> &'static str {
    "This is a standalone function."
}

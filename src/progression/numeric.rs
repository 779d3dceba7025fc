//! Integer element types a progression can range over.
//!
//! All progression arithmetic is routed through `i128`, which holds every value
//! (and every difference of two values) of the supported primitive types.

use std::fmt::{Debug, Display};

/// Primitive integer usable as a progression element.
pub trait Numeric: Copy + Ord + Debug + Display + Send + Sync + 'static {
    /// Multiplicative identity, the default step.
    fn one() -> Self;

    /// Lossless widening to `i128`.
    fn to_wide(self) -> i128;

    /// Narrowing from `i128`; `None` when the value does not fit.
    fn from_wide(value: i128) -> Option<Self>;
}

macro_rules! impl_numeric {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                #[inline]
                fn one() -> Self {
                    1
                }

                #[inline]
                fn to_wide(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_wide(value: i128) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }
            }
        )*
    };
}

impl_numeric!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widening_is_lossless() {
        assert_eq!(u64::MAX.to_wide(), u64::MAX as i128);
        assert_eq!(i64::MIN.to_wide(), i64::MIN as i128);
        assert_eq!(u64::from_wide(u64::MAX as i128), Some(u64::MAX));
    }

    #[test]
    fn test_narrowing_rejects_out_of_range() {
        assert_eq!(u8::from_wide(256), None);
        assert_eq!(u8::from_wide(-1), None);
        assert_eq!(i8::from_wide(-128), Some(i8::MIN));
    }
}

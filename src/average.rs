//! Combining the two middle items of an even-sized set.

/// Types that can produce a value midway between two values.
pub trait Average {
    /// Returns the value midway between `self` and `other`.
    fn average(&self, other: &Self) -> Self;
}

macro_rules! int_average {
    ($($t:ty)*) => ($(
        impl Average for $t {
            /// Returns `floor((self + other) / 2)`, computed without overflow.
            fn average(&self, other: &$t) -> $t { (self & other) + ((self ^ other) >> 1) }
        }
    )*)
}

int_average!{u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize}

macro_rules! float_average {
    ($($t:ty)*) => ($(
        impl Average for $t {
            fn average(&self, other: &$t) -> $t { self / 2.0 + other / 2.0 }
        }
    )*)
}

float_average!{f32 f64}

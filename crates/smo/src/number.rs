//! Exact numeric conversions between Rust primitives and SMO numbers.

/// Integer primitives that can be decoded from and encoded to SMO numbers.
pub trait SmoInteger: Copy + Sized {
    const TYPE_NAME: &'static str;

    fn from_i64_exact(value: i64) -> Option<Self>;
    fn from_f64_exact(value: f64) -> Option<Self>;
    fn to_i128(self) -> i128;

    /// The value as an `i64`, when it fits.
    fn to_i64_exact(self) -> Option<i64> {
        i64::try_from(self.to_i128()).ok()
    }

    /// The value as an `f64`, when the conversion loses nothing.
    fn to_f64_exact(self) -> Option<f64> {
        let wide = self.to_i128();
        let float = wide as f64;
        // f64 -> i128 saturates, so a round trip detects any rounding.
        (float as i128 == wide).then_some(float)
    }
}

macro_rules! impl_smo_integer {
    ($($ty:ty => $min:expr, $max_exclusive:expr;)*) => {$(
        impl SmoInteger for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);

            fn from_i64_exact(value: i64) -> Option<Self> {
                <$ty>::try_from(value).ok()
            }

            fn from_f64_exact(value: f64) -> Option<Self> {
                if value.fract() != 0.0 || value < $min || value >= $max_exclusive {
                    return None;
                }
                Some(value as $ty)
            }

            fn to_i128(self) -> i128 {
                self as i128
            }
        }
    )*};
}

impl_smo_integer! {
    i8 => -128.0, 128.0;
    i16 => -32768.0, 32768.0;
    i32 => -2147483648.0, 2147483648.0;
    i64 => -9223372036854775808.0, 9223372036854775808.0;
    isize => isize::MIN as f64, -(isize::MIN as f64);
    u8 => 0.0, 256.0;
    u16 => 0.0, 65536.0;
    u32 => 0.0, 4294967296.0;
    u64 => 0.0, 18446744073709551616.0;
    usize => 0.0, 2.0 * -(isize::MIN as f64);
}

/// Floating-point primitives that can be decoded from SMO numbers.
pub trait SmoFloat: Copy + Sized {
    const TYPE_NAME: &'static str;

    /// Converts a double. Non-finite values always convert, keeping their
    /// class, sign and NaN signalling bit; finite values must be exact.
    fn from_f64_keeping_non_finite(value: f64) -> Option<Self>;
    fn from_i64_exact(value: i64) -> Option<Self>;
    fn to_f64(self) -> f64;
}

impl SmoFloat for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn from_f64_keeping_non_finite(value: f64) -> Option<Self> {
        Some(value)
    }

    fn from_i64_exact(value: i64) -> Option<Self> {
        let float = value as f64;
        (float as i128 == value as i128).then_some(float)
    }

    fn to_f64(self) -> f64 {
        self
    }
}

const F64_QUIET_BIT: u64 = 1 << 51;
const F32_SIGN_BIT: u32 = 1 << 31;
const F32_QUIET_NAN: u32 = 0x7fc0_0000;
const F32_SIGNALING_NAN: u32 = 0x7fa0_0000;

impl SmoFloat for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn from_f64_keeping_non_finite(value: f64) -> Option<Self> {
        if value.is_nan() {
            let bits = value.to_bits();
            let mut narrow = if bits & F64_QUIET_BIT != 0 {
                F32_QUIET_NAN
            } else {
                F32_SIGNALING_NAN
            };
            if value.is_sign_negative() {
                narrow |= F32_SIGN_BIT;
            }
            return Some(f32::from_bits(narrow));
        }
        if value.is_infinite() {
            return Some(if value > 0.0 {
                f32::INFINITY
            } else {
                f32::NEG_INFINITY
            });
        }
        let narrow = value as f32;
        (narrow as f64 == value).then_some(narrow)
    }

    fn from_i64_exact(value: i64) -> Option<Self> {
        let float = value as f32;
        (float as i128 == value as i128).then_some(float)
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

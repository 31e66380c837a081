use alloc::string::String;
use core::fmt;
use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div, DivAssign,
    Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};
use core::str::FromStr;
#[cfg(feature = "serde")] use serde::{Deserialize, Serialize};
use tracing::debug;
use wrapping_arithmetic::wrappit;

use crate::error::Error;

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 128-bit two's complement signed integer.
///
/// Addition, subtraction, multiplication and negation wrap silently on overflow.
/// Division, remainder and shifts have fallible `try_*` forms; their operator
/// forms panic on the same conditions, like native integers do.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Int128(i128);

#[inline] fn check_base(base: u32) -> Result<(), Error> {
    if (2 ..= 36).contains(&base) { Ok(()) } else { Err(Error::InvalidBase(base)) }
}

#[inline] fn check_shift(n: i32) -> Result<u32, Error> {
    if (0 .. 128).contains(&n) { Ok(n as u32) } else { Err(Error::ShiftOutOfRange(n as i64)) }
}

/// Strips the optional base prefix. In base 8 the prefix is a single `0`.
fn strip_base_prefix(s: &str, base: u32) -> &str {
    match base {
        16 => s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s),
        8 => s.strip_prefix('0').unwrap_or(s),
        2 => s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")).unwrap_or(s),
        _ => s,
    }
}

#[wrappit] #[inline]
fn push_digit(value: i128, base: u32, digit: u32) -> i128 {
    value * base as i128 + digit as i128
}

fn parse(s: &str, base: u32) -> Result<Int128, Error> {
    check_base(base)?;

    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1 ..]),
        Some(b'+') => (false, &s[1 ..]),
        _ => (false, s),
    };
    if unsigned.is_empty() {
        return Err(Error::EmptyDigits);
    }

    // An empty digit sequence after a consumed prefix is zero.
    let mut value: i128 = 0;
    for c in strip_base_prefix(unsigned, base).chars() {
        let digit = c.to_digit(36).ok_or(Error::InvalidDigit(c))?;
        if digit >= base {
            return Err(Error::DigitExceedsBase { digit, base });
        }
        value = push_digit(value, base, digit);
    }

    Ok(Int128(if negative { value.wrapping_neg() } else { value }))
}

impl Int128 {
    pub const ZERO: Int128 = Int128(0);
    pub const ONE: Int128 = Int128(1);
    pub const MIN: Int128 = Int128(i128::MIN);
    pub const MAX: Int128 = Int128(i128::MAX);

    #[inline]
    pub const fn new(value: i128) -> Self {
        Int128(value)
    }

    /// Returns the underlying value.
    #[inline]
    pub const fn get(self) -> i128 {
        self.0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn is_nonzero(self) -> bool {
        self.0 != 0
    }

    /// Parses `s` in the given base, which must be in 2..=36.
    ///
    /// Accepts an optional sign followed by an optional prefix:
    /// `0x`/`0X` in base 16, `0` in base 8 and `0b`/`0B` in base 2.
    /// Digits are case insensitive. Values that do not fit wrap around.
    pub fn from_str_radix(s: &str, base: u32) -> Result<Self, Error> {
        parse(s, base).map_err(|error| {
            debug!(input = s, base, %error, "cannot parse Int128");
            error
        })
    }

    /// Formats the value in the given base, which must be in 2..=36.
    /// Letter digits are lowercase and negative values get a leading `-`.
    pub fn to_str_radix(self, base: u32) -> Result<String, Error> {
        check_base(base).map_err(|error| {
            debug!(base, %error, "cannot format Int128");
            error
        })?;
        let mut buffer = [0u8; 128];
        let digits = self.magnitude_digits(base, &mut buffer);
        let mut s = String::with_capacity(digits.len() + 1);
        if self.is_negative() {
            s.push('-');
        }
        s.push_str(digits);
        Ok(s)
    }

    /// Writes the digits of the magnitude into the tail of the buffer.
    /// 128 bytes hold the longest case, `MIN` in base 2.
    fn magnitude_digits(self, base: u32, buffer: &mut [u8; 128]) -> &str {
        let base = base as u128;
        // unsigned_abs has no overflow at MIN.
        let mut n = self.0.unsigned_abs();
        let mut i = buffer.len();
        loop {
            i -= 1;
            buffer[i] = DIGITS[(n % base) as usize];
            n /= base;
            if n == 0 { break; }
        }
        core::str::from_utf8(&buffer[i ..]).unwrap_or_default()
    }

    /// Absolute value. `MIN.abs()` wraps back to `MIN`.
    #[inline]
    pub const fn abs(self) -> Self {
        Int128(self.0.wrapping_abs())
    }

    /// Division truncating toward zero. `MIN / -1` wraps to `MIN`.
    pub fn try_div<T: Into<Int128>>(self, rhs: T) -> Result<Self, Error> {
        let rhs: Int128 = rhs.into();
        if rhs.0 == 0 {
            return Err(Error::DivisionByZero);
        }
        Ok(Int128(self.0.wrapping_div(rhs.0)))
    }

    /// Remainder with the sign of the dividend. `MIN % -1` is zero.
    pub fn try_rem<T: Into<Int128>>(self, rhs: T) -> Result<Self, Error> {
        let rhs: Int128 = rhs.into();
        if rhs.0 == 0 {
            return Err(Error::DivisionByZero);
        }
        Ok(Int128(self.0.wrapping_rem(rhs.0)))
    }

    /// Left shift by n, which must be in 0..128.
    pub fn try_shl(self, n: i32) -> Result<Self, Error> {
        let n = check_shift(n)?;
        Ok(Int128(self.0 << n))
    }

    /// Arithmetic right shift by n, which must be in 0..128.
    pub fn try_shr(self, n: i32) -> Result<Self, Error> {
        let n = check_shift(n)?;
        Ok(Int128(self.0 >> n))
    }

    pub fn try_div_assign<T: Into<Int128>>(&mut self, rhs: T) -> Result<(), Error> {
        *self = self.try_div(rhs)?;
        Ok(())
    }

    pub fn try_rem_assign<T: Into<Int128>>(&mut self, rhs: T) -> Result<(), Error> {
        *self = self.try_rem(rhs)?;
        Ok(())
    }

    pub fn try_shl_assign(&mut self, n: i32) -> Result<(), Error> {
        *self = self.try_shl(n)?;
        Ok(())
    }

    pub fn try_shr_assign(&mut self, n: i32) -> Result<(), Error> {
        *self = self.try_shr(n)?;
        Ok(())
    }

    /// Increments in place and returns the new value.
    #[inline]
    pub fn pre_increment(&mut self) -> Self {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    /// Increments in place and returns the previous value.
    #[inline]
    pub fn post_increment(&mut self) -> Self {
        let previous = *self;
        self.0 = self.0.wrapping_add(1);
        previous
    }

    /// Decrements in place and returns the new value.
    #[inline]
    pub fn pre_decrement(&mut self) -> Self {
        self.0 = self.0.wrapping_sub(1);
        *self
    }

    /// Decrements in place and returns the previous value.
    #[inline]
    pub fn post_decrement(&mut self) -> Self {
        let previous = *self;
        self.0 = self.0.wrapping_sub(1);
        previous
    }
}

macro_rules! impl_from_native {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Int128 {
                #[inline]
                fn from(value: $t) -> Self {
                    Int128(value as i128)
                }
            }
        )*
    };
}

// u128 reinterprets the bit pattern.
impl_from_native!(bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<Int128> for i128 {
    #[inline]
    fn from(value: Int128) -> Self {
        value.0
    }
}

macro_rules! impl_as_native {
    ($($name:ident: $t:ty),*) => {
        impl Int128 {
            $(
                /// Converts with `as` cast semantics: integers truncate, floats round.
                #[inline]
                pub fn $name(self) -> $t {
                    self.0 as $t
                }
            )*
        }
    };
}

impl_as_native!(
    as_i8: i8, as_i16: i16, as_i32: i32, as_i64: i64, as_isize: isize,
    as_u8: u8, as_u16: u16, as_u32: u32, as_u64: u64, as_u128: u128, as_usize: usize,
    as_f32: f32, as_f64: f64
);

macro_rules! impl_binary_op {
    ($op:ident, $method:ident, $op_assign:ident, $method_assign:ident, $native:ident) => {
        impl<T: Into<Int128>> $op<T> for Int128 {
            type Output = Int128;
            #[inline]
            fn $method(self, rhs: T) -> Int128 {
                let rhs: Int128 = rhs.into();
                Int128(self.0.$native(rhs.0))
            }
        }

        impl<T: Into<Int128>> $op_assign<T> for Int128 {
            #[inline]
            fn $method_assign(&mut self, rhs: T) {
                *self = $op::$method(*self, rhs);
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, wrapping_add);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, wrapping_sub);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, wrapping_mul);
impl_binary_op!(BitAnd, bitand, BitAndAssign, bitand_assign, bitand);
impl_binary_op!(BitOr, bitor, BitOrAssign, bitor_assign, bitor);
impl_binary_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, bitxor);

macro_rules! impl_fallible_op {
    ($op:ident, $method:ident, $op_assign:ident, $method_assign:ident, $try:ident, $rhs:ty) => {
        impl $op<$rhs> for Int128 {
            type Output = Int128;
            /// # Panics
            /// Panics where the `try_` form returns an error.
            #[inline]
            fn $method(self, rhs: $rhs) -> Int128 {
                match self.$try(rhs) {
                    Ok(value) => value,
                    Err(error) => panic!("{}", error),
                }
            }
        }

        impl $op_assign<$rhs> for Int128 {
            #[inline]
            fn $method_assign(&mut self, rhs: $rhs) {
                *self = $op::$method(*self, rhs);
            }
        }
    };
}

impl_fallible_op!(Shl, shl, ShlAssign, shl_assign, try_shl, i32);
impl_fallible_op!(Shr, shr, ShrAssign, shr_assign, try_shr, i32);

impl<T: Into<Int128>> Div<T> for Int128 {
    type Output = Int128;
    /// # Panics
    /// Panics on a zero divisor.
    #[inline]
    fn div(self, rhs: T) -> Int128 {
        match self.try_div(rhs) {
            Ok(value) => value,
            Err(error) => panic!("{}", error),
        }
    }
}

impl<T: Into<Int128>> DivAssign<T> for Int128 {
    #[inline]
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

impl<T: Into<Int128>> Rem<T> for Int128 {
    type Output = Int128;
    /// # Panics
    /// Panics on a zero divisor.
    #[inline]
    fn rem(self, rhs: T) -> Int128 {
        match self.try_rem(rhs) {
            Ok(value) => value,
            Err(error) => panic!("{}", error),
        }
    }
}

impl<T: Into<Int128>> RemAssign<T> for Int128 {
    #[inline]
    fn rem_assign(&mut self, rhs: T) {
        *self = *self % rhs;
    }
}

impl Neg for Int128 {
    type Output = Int128;
    #[inline]
    fn neg(self) -> Int128 {
        Int128(self.0.wrapping_neg())
    }
}

impl Not for Int128 {
    type Output = Int128;
    #[inline]
    fn not(self) -> Int128 {
        Int128(!self.0)
    }
}

impl fmt::Display for Int128 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buffer = [0u8; 128];
        f.pad_integral(!self.is_negative(), "", self.magnitude_digits(10, &mut buffer))
    }
}

impl FromStr for Int128 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Int128::from_str_radix(s, 10)
    }
}

use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    DivisionByZero,
    OutOfRange,
    InvalidArgument,
}

/// Errors raised by `Int128` and `JavaRandom`.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    #[error("division by zero")]
    DivisionByZero,
    #[error("shift amount {0} out of range [0, 128)")]
    ShiftOutOfRange(i64),
    #[error("base {0} must be between 2 and 36")]
    InvalidBase(u32),
    #[error("invalid character {0:?} in string")]
    InvalidDigit(char),
    #[error("digit {digit} exceeds base {base}")]
    DigitExceedsBase { digit: u32, base: u32 },
    #[error("no digits to parse")]
    EmptyDigits,
    #[error("bound must be positive, got {0}")]
    NonPositiveBound(i64),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DivisionByZero => ErrorKind::DivisionByZero,
            Error::ShiftOutOfRange(_) => ErrorKind::OutOfRange,
            Error::InvalidBase(_)
            | Error::InvalidDigit(_)
            | Error::DigitExceedsBase { .. }
            | Error::EmptyDigits
            | Error::NonPositiveBound(_) => ErrorKind::InvalidArgument,
        }
    }
}

#[cfg(test)] mod tests {
    use super::*;

    #[test] pub fn kinds() {
        assert_eq!(ErrorKind::DivisionByZero, Error::DivisionByZero.kind());
        assert_eq!(ErrorKind::OutOfRange, Error::ShiftOutOfRange(128).kind());
        assert_eq!(ErrorKind::OutOfRange, Error::ShiftOutOfRange(-1).kind());
        assert_eq!(ErrorKind::InvalidArgument, Error::InvalidBase(37).kind());
        assert_eq!(ErrorKind::InvalidArgument, Error::InvalidDigit('?').kind());
        assert_eq!(ErrorKind::InvalidArgument, Error::DigitExceedsBase { digit: 9, base: 8 }.kind());
        assert_eq!(ErrorKind::InvalidArgument, Error::EmptyDigits.kind());
        assert_eq!(ErrorKind::InvalidArgument, Error::NonPositiveBound(0).kind());
    }

    #[test] pub fn messages() {
        assert_eq!("division by zero", Error::DivisionByZero.to_string());
        assert_eq!("base 1 must be between 2 and 36", Error::InvalidBase(1).to_string());
        assert_eq!("digit 9 exceeds base 8", Error::DigitExceedsBase { digit: 9, base: 8 }.to_string());
    }
}

//! Error types.

/// Alias for [`core::result::Result`] with the crate [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Malformed input: bad radix, bad digit, negative exponent,
    /// non-positive modulus, or a mismatched buffer length.
    InvalidArgument,

    /// Division by zero.
    DivideByZero,

    /// No modular inverse exists for the given operands.
    NotInvertible,

    /// Message (or digest plus its DigestInfo) exceeds the key capacity.
    MessageTooLong,

    /// Malformed PKCS#1 v1.5 structure on decode.
    InvalidPadding,

    /// Public key failed its consistency checks.
    InvalidKey,

    /// Private key failed its consistency checks.
    KeyValidation,

    /// Signature does not match the expected encoded block.
    SignatureMismatch,

    /// Decryption error.
    Decryption,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "invalid argument"),
            Error::DivideByZero => write!(f, "division by zero"),
            Error::NotInvertible => write!(f, "no modular inverse exists"),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::InvalidPadding => write!(f, "invalid padding"),
            Error::InvalidKey => write!(f, "invalid public key"),
            Error::KeyValidation => write!(f, "private key validation failed"),
            Error::SignatureMismatch => write!(f, "verification error"),
            Error::Decryption => write!(f, "decryption error"),
        }
    }
}

impl core::error::Error for Error {}

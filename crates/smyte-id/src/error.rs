//! Error types for constructing and decoding [`crate::SmyteId`] values.
//!
//! Decoding failures (`InvalidLength`, `ParseInt` and the Base32 variants)
//! originate from external data and are always recoverable. The range
//! variants are what the checked constructor reports; the panicking
//! constructor turns them into a fatal precondition failure.

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors `smyte-id` can produce.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// `timestamp_ms - TIMESTAMP_EPOCH` does not fit in the 40-bit field.
    #[error("timestamp {timestamp_ms} for offset {offset} is out of range")]
    TimestampOutOfRange { timestamp_ms: i64, offset: i64 },

    /// The virtual shard is not in `[0, VIRTUAL_SHARD_COUNT)`.
    #[error("virtual shard {virtual_shard} for offset {offset} is out of range")]
    VirtualShardOutOfRange { virtual_shard: u16, offset: i64 },

    /// A serialized id must be exactly 8 bytes.
    #[error("invalid length: expected 8 bytes, got {len}")]
    InvalidLength { len: usize },

    /// Shard counts must be strictly positive.
    #[error("invalid shard count: {shard_count}")]
    InvalidShardCount { shard_count: i64 },

    /// The decimal text form could not be parsed.
    #[error("invalid decimal id: {0}")]
    ParseInt(#[from] core::num::ParseIntError),

    /// A Base32 id must be exactly 13 characters.
    #[cfg(feature = "base32")]
    #[error("invalid base32 length: expected 13 characters, got {len}")]
    Base32InvalidLength { len: usize },

    /// A character outside the Crockford alphabet.
    #[cfg(feature = "base32")]
    #[error("invalid base32 ascii byte {byte:#04x} at index {index}")]
    Base32InvalidAscii { byte: u8, index: usize },

    /// The leading character sets the excess 65th bit.
    #[cfg(feature = "base32")]
    #[error("base32 value overflows 64 bits")]
    Base32Overflow,
}

use super::layout::write_bit_layout;
use crate::{Error, MachineField, Result};
use core::{fmt, num::NonZeroU32, str::FromStr};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A 64-bit id derived deterministically from a log offset, an event
/// timestamp and a virtual shard.
///
/// - 1 bit sign (always 0 for generated ids)
/// - 40 bits timestamp (ms since [`SmyteId::TIMESTAMP_EPOCH`])
/// - 10 bits unique nonce (`offset mod 1024`)
/// - 13 bits machine field (see [`MachineField`])
///
/// ```text
///  Bit Index:  63       63 62            23 22          13 12            0
///              +----------+----------------+--------------+---------------+
///  Field:      | sign (1) | timestamp (40) | unique (10)  | machine (13)  |
///              +----------+----------------+--------------+---------------+
///              |<--------- MSB -------- 64 bits -------- LSB ----------->|
/// ```
///
/// Ordering on the raw value sorts by timestamp, then unique nonce, then
/// machine field. [`SmyteId::to_bytes`] preserves that order byte-wise.
///
/// # Example
///
/// ```
/// use smyte_id::SmyteId;
///
/// let id = SmyteId::generate_from_offset(5, SmyteId::TIMESTAMP_EPOCH, 3);
/// assert_eq!(id.unique(), 5);
/// assert_eq!(id.timestamp(), SmyteId::TIMESTAMP_EPOCH);
/// assert_eq!(id.virtual_shard(), Some(3));
/// ```
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SmyteId {
    id: i64,
}

const _: () = assert!(
    1 + SmyteId::TIMESTAMP_BITS + SmyteId::UNIQUE_BITS + SmyteId::MACHINE_BITS == i64::BITS,
    "layout must cover all 64 bits"
);

impl SmyteId {
    /// Width of the timestamp field.
    pub const TIMESTAMP_BITS: u32 = 40;
    /// Number of representable timestamps, `2^40`.
    pub const TIMESTAMP_SIZE: i64 = 1 << Self::TIMESTAMP_BITS;
    /// Unix ms of 2010-01-01T00:00:00Z.
    pub const TIMESTAMP_EPOCH: i64 = 1_262_304_000_000;

    /// Width of the unique nonce field.
    pub const UNIQUE_BITS: u32 = 10;
    pub const UNIQUE_SIZE: i64 = 1 << Self::UNIQUE_BITS;

    /// Width of the machine field.
    pub const MACHINE_BITS: u32 = 13;
    pub const MACHINE_SIZE: i64 = 1 << Self::MACHINE_BITS;
    /// First machine value reserved for virtual shards.
    pub const MACHINE_BASE: i64 = Self::MACHINE_SIZE - Self::VIRTUAL_SHARD_COUNT;

    pub const VIRTUAL_SHARD_BITS: u32 = 10;
    pub const VIRTUAL_SHARD_COUNT: i64 = 1 << Self::VIRTUAL_SHARD_BITS;

    /// Bit position of the unique nonce.
    pub const UNIQUE_SHIFT: u32 = Self::MACHINE_BITS;
    /// Bit position of the timestamp.
    pub const TIMESTAMP_SHIFT: u32 = Self::UNIQUE_BITS + Self::MACHINE_BITS;

    /// Smallest timestamp accepted by [`SmyteId::generate_from_offset`].
    pub const MIN_TIMESTAMP: i64 = Self::TIMESTAMP_EPOCH;
    /// Largest timestamp accepted by [`SmyteId::generate_from_offset`].
    pub const MAX_TIMESTAMP: i64 = Self::TIMESTAMP_EPOCH + Self::TIMESTAMP_SIZE - 1;

    /// Serialized size in bytes.
    pub const SIZE: usize = core::mem::size_of::<i64>();

    /// Generates an id from a log offset, an event timestamp in Unix
    /// milliseconds and a virtual shard in `[0, 1024)`.
    ///
    /// The same triple always yields the same id.
    ///
    /// # Panics
    ///
    /// Panics if the timestamp is outside
    /// `[MIN_TIMESTAMP, MAX_TIMESTAMP]` or the virtual shard is out of range.
    /// Either is a caller bug; use [`SmyteId::try_generate_from_offset`] when
    /// the inputs are not trusted.
    #[track_caller]
    pub fn generate_from_offset(offset: i64, timestamp_ms: i64, virtual_shard: u16) -> Self {
        match Self::try_generate_from_offset(offset, timestamp_ms, virtual_shard) {
            Ok(id) => id,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::error!(%err, offset, timestamp_ms, virtual_shard, "refusing to generate id");
                panic!("{err}");
            }
        }
    }

    /// Checked form of [`SmyteId::generate_from_offset`].
    ///
    /// # Errors
    ///
    /// - [`Error::TimestampOutOfRange`] if `timestamp_ms - TIMESTAMP_EPOCH` is
    ///   not in `[0, 2^40)`
    /// - [`Error::VirtualShardOutOfRange`] if `virtual_shard >= 1024`
    #[cfg_attr(feature = "tracing", instrument(level = "trace"))]
    pub fn try_generate_from_offset(
        offset: i64,
        timestamp_ms: i64,
        virtual_shard: u16,
    ) -> Result<Self> {
        let shifted = timestamp_ms
            .checked_sub(Self::TIMESTAMP_EPOCH)
            .filter(|shifted| (0..Self::TIMESTAMP_SIZE).contains(shifted))
            .ok_or(Error::TimestampOutOfRange {
                timestamp_ms,
                offset,
            })?;
        if i64::from(virtual_shard) >= Self::VIRTUAL_SHARD_COUNT {
            return Err(Error::VirtualShardOutOfRange {
                virtual_shard,
                offset,
            });
        }

        // Floor modulo: negative offsets still land in [0, UNIQUE_SIZE).
        let unique = offset.rem_euclid(Self::UNIQUE_SIZE);
        let machine = i64::from(MachineField::VirtualShard(virtual_shard).to_raw());
        Ok(Self {
            id: (((shifted << Self::UNIQUE_BITS) + unique) << Self::MACHINE_BITS) + machine,
        })
    }

    /// Wraps a raw value without validation.
    pub const fn from_raw(raw: i64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw signed value.
    pub const fn raw(&self) -> i64 {
        self.id
    }

    /// Returns `true` if the sign bit is clear, which holds for every
    /// generated id.
    pub const fn is_valid(&self) -> bool {
        self.id >= 0
    }

    /// Returns the timestamp field, in ms relative to
    /// [`SmyteId::TIMESTAMP_EPOCH`].
    pub const fn shifted_timestamp(&self) -> i64 {
        self.id >> Self::TIMESTAMP_SHIFT
    }

    /// Returns the timestamp in Unix milliseconds.
    pub const fn timestamp(&self) -> i64 {
        self.shifted_timestamp() + Self::TIMESTAMP_EPOCH
    }

    /// Returns the unique nonce.
    pub const fn unique(&self) -> u16 {
        ((self.id >> Self::UNIQUE_SHIFT) & (Self::UNIQUE_SIZE - 1)) as u16
    }

    /// Returns the machine field, tagged by whether it encodes a virtual
    /// shard.
    ///
    /// Ids with the sign bit set never came from generation, so their low
    /// bits are reported as a plain machine id rather than a virtual shard.
    pub const fn machine(&self) -> MachineField {
        let raw = (self.id & (Self::MACHINE_SIZE - 1)) as u16;
        if self.is_valid() {
            MachineField::from_raw(raw)
        } else {
            MachineField::Machine(raw)
        }
    }

    /// Returns the virtual shard in `[0, 1024)`, or `None` when the machine
    /// field holds an ordinary machine id.
    pub const fn virtual_shard(&self) -> Option<u16> {
        self.machine().virtual_shard()
    }

    /// Spreads ids over `shard_count` physical buckets.
    ///
    /// The machine bits are folded into the higher bits before the modulo so
    /// small or power-of-two shard counts don't cluster on the machine field.
    /// The result is always in `[0, shard_count)`.
    pub const fn shard_index(&self, shard_count: NonZeroU32) -> u32 {
        let mixed = self.id ^ (self.id >> Self::MACHINE_BITS);
        mixed.rem_euclid(shard_count.get() as i64) as u32
    }

    /// [`SmyteId::shard_index`] for callers holding an unchecked count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShardCount`] if `shard_count` is not in
    /// `[1, u32::MAX]`.
    pub fn try_shard_index(&self, shard_count: i64) -> Result<u32> {
        u32::try_from(shard_count)
            .ok()
            .and_then(NonZeroU32::new)
            .map(|count| self.shard_index(count))
            .ok_or(Error::InvalidShardCount { shard_count })
    }
}

impl From<SmyteId> for i64 {
    fn from(id: SmyteId) -> Self {
        id.id
    }
}

impl fmt::Display for SmyteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::LowerHex for SmyteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.id, f)
    }
}

impl fmt::UpperHex for SmyteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.id, f)
    }
}

impl fmt::Debug for SmyteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return write_bit_layout(f, self);
        }
        f.debug_struct("SmyteId")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp())
            .field("unique", &self.unique())
            .field("machine", &self.machine())
            .finish()
    }
}

impl FromStr for SmyteId {
    type Err = Error;

    /// Parses the decimal form produced by [`fmt::Display`].
    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::from_raw(s.parse()?))
    }
}

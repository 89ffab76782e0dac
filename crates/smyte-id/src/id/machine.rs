use crate::SmyteId;
use core::fmt;

/// The low 13 bits of a [`SmyteId`].
///
/// The top 1024 values of the field (`[MACHINE_BASE, MACHINE_SIZE)`) are
/// reserved for virtual shards. Anything below that is a plain machine id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MachineField {
    /// An ordinary machine id in `[0, MACHINE_BASE)`.
    Machine(u16),
    /// A virtual shard in `[0, VIRTUAL_SHARD_COUNT)`.
    VirtualShard(u16),
}

impl MachineField {
    /// Classifies a raw 13-bit machine field.
    ///
    /// Bits above the field width are ignored.
    pub const fn from_raw(raw: u16) -> Self {
        let raw = raw & (SmyteId::MACHINE_SIZE as u16 - 1);
        if raw < SmyteId::MACHINE_BASE as u16 {
            Self::Machine(raw)
        } else {
            Self::VirtualShard(raw % SmyteId::VIRTUAL_SHARD_COUNT as u16)
        }
    }

    /// Returns the raw 13-bit value stored in the id.
    pub const fn to_raw(self) -> u16 {
        match self {
            Self::Machine(id) => id,
            Self::VirtualShard(shard) => SmyteId::MACHINE_BASE as u16 + shard,
        }
    }

    /// Returns the virtual shard, if this field encodes one.
    pub const fn virtual_shard(self) -> Option<u16> {
        match self {
            Self::Machine(_) => None,
            Self::VirtualShard(shard) => Some(shard),
        }
    }
}

impl fmt::Display for MachineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Machine(id) => write!(f, "machine {id}"),
            Self::VirtualShard(shard) => write!(f, "virtual shard {shard}"),
        }
    }
}

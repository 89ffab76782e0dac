use crate::{Error, Result, SmyteId};

/// Big-endian wire form.
///
/// Big-endian encoding of a fixed-width non-negative integer sorts the same
/// byte-wise as numerically, so the 8-byte form works as a storage sort key.
impl SmyteId {
    /// Serializes the id as 8 big-endian bytes.
    pub const fn to_bytes(&self) -> [u8; Self::SIZE] {
        self.raw().to_be_bytes()
    }

    /// Appends the 8 big-endian bytes to `out`.
    pub fn append_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }

    /// Decodes a fixed 8-byte big-endian buffer.
    pub const fn from_be_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self::from_raw(i64::from_be_bytes(bytes))
    }

    /// Decodes a big-endian buffer of untrusted length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] unless `bytes` is exactly 8 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::SIZE] = bytes
            .try_into()
            .map_err(|_| Error::InvalidLength { len: bytes.len() })?;
        Ok(Self::from_be_bytes(bytes))
    }
}

impl TryFrom<&[u8]> for SmyteId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl From<[u8; SmyteId::SIZE]> for SmyteId {
    fn from(bytes: [u8; SmyteId::SIZE]) -> Self {
        Self::from_be_bytes(bytes)
    }
}

impl From<SmyteId> for [u8; SmyteId::SIZE] {
    fn from(id: SmyteId) -> Self {
        id.to_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const EPOCH: i64 = SmyteId::TIMESTAMP_EPOCH;

    #[test]
    fn bytes_are_big_endian() {
        let id = SmyteId::generate_from_offset(5, EPOCH, 3);
        assert_eq!(id.to_bytes(), [0, 0, 0, 0, 0, 0, 0xbc, 0x03]);

        let max = SmyteId::generate_from_offset(1023, SmyteId::MAX_TIMESTAMP, 1023);
        assert_eq!(max.to_bytes(), [0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
    }

    #[test]
    fn bytes_roundtrip() {
        let mut rng = rand::rng();
        for _ in 0..1_000 {
            let id = SmyteId::from_raw(rng.random());
            assert_eq!(SmyteId::from_bytes(&id.to_bytes()), Ok(id));
            assert_eq!(SmyteId::from(<[u8; 8]>::from(id)), id);
        }
    }

    #[test]
    fn from_bytes_rejects_wrong_length() {
        assert_eq!(SmyteId::from_bytes(&[]), Err(Error::InvalidLength { len: 0 }));
        assert_eq!(
            SmyteId::try_from(&[0_u8; 7][..]),
            Err(Error::InvalidLength { len: 7 })
        );
        assert_eq!(
            SmyteId::from_bytes(&[0_u8; 9]),
            Err(Error::InvalidLength { len: 9 })
        );
    }

    #[test]
    fn byte_order_matches_numeric_order() {
        let mut rng = rand::rng();
        for _ in 0..1_000 {
            let a = SmyteId::generate_from_offset(
                rng.random(),
                rng.random_range(SmyteId::MIN_TIMESTAMP..=SmyteId::MAX_TIMESTAMP),
                rng.random_range(0..1024),
            );
            let b = SmyteId::generate_from_offset(
                rng.random(),
                rng.random_range(SmyteId::MIN_TIMESTAMP..=SmyteId::MAX_TIMESTAMP),
                rng.random_range(0..1024),
            );
            assert_eq!(a.cmp(&b), a.to_bytes().cmp(&b.to_bytes()), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn append_to_extends_buffer() {
        let a = SmyteId::generate_from_offset(1, EPOCH, 0);
        let b = SmyteId::generate_from_offset(2, EPOCH + 1, 1);
        let mut out = b"key:".to_vec();
        a.append_to(&mut out);
        b.append_to(&mut out);
        assert_eq!(out.len(), 4 + 16);
        assert_eq!(SmyteId::from_bytes(&out[4..12]), Ok(a));
        assert_eq!(SmyteId::from_bytes(&out[12..]), Ok(b));
    }
}

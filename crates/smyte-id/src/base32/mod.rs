mod crockford;

use crate::{Result, SmyteId};

/// Crockford Base32 text form.
///
/// Every id encodes to exactly 13 characters from
/// `0123456789ABCDEFGHJKMNPQRSTVWXYZ`. The alphabet is in ASCII order, so for
/// valid ids string order equals numeric order.
impl SmyteId {
    /// Length of the Base32 form.
    pub const BASE32_SIZE: usize = crockford::ENCODED_LEN;

    /// Returns a zeroed buffer for [`SmyteId::encode_to_buf`].
    pub const fn base32_buf() -> [u8; Self::BASE32_SIZE] {
        [0; Self::BASE32_SIZE]
    }

    /// Encodes the id as a 13-character Crockford Base32 string.
    ///
    /// ```
    /// use smyte_id::SmyteId;
    ///
    /// let id = SmyteId::from_raw(42);
    /// assert_eq!(id.encode(), "000000000001A");
    /// ```
    pub fn encode(&self) -> String {
        let mut buf = Self::base32_buf();
        self.encode_to_buf(&mut buf).to_owned()
    }

    /// Encodes into `buf` without allocating and returns it as a `&str`.
    pub fn encode_to_buf<'buf>(&self, buf: &'buf mut [u8; Self::BASE32_SIZE]) -> &'buf str {
        crockford::encode(&self.to_bytes(), buf);
        // SAFETY: every byte written comes from the ASCII alphabet.
        unsafe { core::str::from_utf8_unchecked(buf) }
    }

    /// Decodes a 13-character Crockford Base32 string.
    ///
    /// Lower case and the `O`/`I`/`L` aliases are accepted.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Base32InvalidLength`] if the input is not 13 characters
    /// - [`crate::Error::Base32InvalidAscii`] on a character outside the alphabet
    /// - [`crate::Error::Base32Overflow`] if the first character sets the
    ///   excess 65th bit
    pub fn decode(s: impl AsRef<str>) -> Result<Self> {
        let raw = crockford::decode(s.as_ref())?;
        Ok(Self::from_be_bytes(raw.to_be_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, SmyteId};
    use rand::Rng;

    #[test]
    fn encode_decode_generated_ids() {
        let id = SmyteId::generate_from_offset(5, SmyteId::TIMESTAMP_EPOCH, 3);
        let encoded = id.encode();
        assert_eq!(encoded, "0000000001F03");
        assert_eq!(SmyteId::decode(&encoded), Ok(id));

        let mut buf = SmyteId::base32_buf();
        assert_eq!(id.encode_to_buf(&mut buf), encoded);
    }

    #[test]
    fn negative_ids_survive_base32() {
        let id = SmyteId::from_raw(-1);
        assert_eq!(id.encode(), "FZZZZZZZZZZZZ");
        assert_eq!(SmyteId::decode("FZZZZZZZZZZZZ"), Ok(id));
    }

    #[test]
    fn string_order_matches_numeric_order() {
        let mut rng = rand::rng();
        for _ in 0..1_000 {
            let a = SmyteId::from_raw(rng.random_range(0..=i64::MAX));
            let b = SmyteId::from_raw(rng.random_range(0..=i64::MAX));
            assert_eq!(a.cmp(&b), a.encode().cmp(&b.encode()));
        }
    }

    #[test]
    fn decode_reports_errors() {
        assert_eq!(
            SmyteId::decode("short"),
            Err(Error::Base32InvalidLength { len: 5 })
        );
        assert_eq!(SmyteId::decode("Z000000000000"), Err(Error::Base32Overflow));
    }
}

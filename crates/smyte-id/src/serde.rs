//! Adapters for `#[serde(with = "...")]`.
//!
//! [`SmyteId`] itself serializes transparently as its native integer. These
//! modules pick a different representation per field.

use crate::SmyteId;
use core::fmt;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer, SmyteId};

    /// Serialize an id as its native signed integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(id: &SmyteId, s: S) -> Result<S::Ok, S::Error> {
        id.raw().serialize(s)
    }

    /// Deserialize an id from its native signed integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<SmyteId, D::Error> {
        i64::deserialize(d).map(SmyteId::from_raw)
    }
}

pub mod as_bytes {
    use super::{Deserializer, SeqAccess, Serializer, SmyteId, Visitor, de, fmt};

    struct BytesVisitor;

    impl<'de> Visitor<'de> for BytesVisitor {
        type Value = SmyteId;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("8 big-endian bytes")
        }

        fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<SmyteId, E> {
            SmyteId::from_bytes(v).map_err(E::custom)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<SmyteId, A::Error> {
            let mut bytes = [0_u8; SmyteId::SIZE];
            for (i, byte) in bytes.iter_mut().enumerate() {
                *byte = seq
                    .next_element()?
                    .ok_or_else(|| <A::Error as de::Error>::invalid_length(i, &self))?;
            }
            if seq.next_element::<u8>()?.is_some() {
                return Err(de::Error::invalid_length(SmyteId::SIZE + 1, &self));
            }
            Ok(SmyteId::from_be_bytes(bytes))
        }
    }

    /// Serialize an id as its 8-byte big-endian form.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(id: &SmyteId, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bytes(&id.to_bytes())
    }

    /// Deserialize an id from its 8-byte big-endian form.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the input is
    /// not exactly 8 bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<SmyteId, D::Error> {
        d.deserialize_bytes(BytesVisitor)
    }
}

#[cfg(feature = "base32")]
pub mod as_base32 {
    use super::{Deserializer, Serializer, SmyteId, Visitor, de, fmt};

    struct Base32Visitor;

    impl Visitor<'_> for Base32Visitor {
        type Value = SmyteId;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a Crockford base32 encoded string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<SmyteId, E> {
            SmyteId::decode(v).map_err(E::custom)
        }
    }

    /// Serialize an id as a 13-character Crockford base32 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S: Serializer>(id: &SmyteId, s: S) -> Result<S::Ok, S::Error> {
        let mut buf = SmyteId::base32_buf();
        s.serialize_str(id.encode_to_buf(&mut buf))
    }

    /// Deserialize an id from a Crockford base32 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the string is
    /// not a valid 13-character encoding.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<SmyteId, D::Error> {
        d.deserialize_str(Base32Visitor)
    }
}

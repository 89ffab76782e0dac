use crate::{Error, Result};

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;

/// Characters needed for 64 bits; the first character carries one excess bit.
pub const ENCODED_LEN: usize = (u64::BITS as usize).div_ceil(BITS_PER_CHAR);

/// Characters Crockford reads as a digit, next to the digit they stand for.
const ALIASES: [(u8, u8); 3] = [(b'O', 0), (b'I', 1), (b'L', 1)];

/// Byte to 5-bit value, case-insensitive. Unknown bytes map to `NO_VALUE`.
const LOOKUP: [u8; 256] = {
    let mut table = [NO_VALUE; 256];
    let mut value = 0;
    while value < ALPHABET.len() {
        let upper = ALPHABET[value];
        table[upper as usize] = value as u8;
        table[upper.to_ascii_lowercase() as usize] = value as u8;
        value += 1;
    }
    let mut alias = 0;
    while alias < ALIASES.len() {
        let (upper, value) = ALIASES[alias];
        table[upper as usize] = value;
        table[upper.to_ascii_lowercase() as usize] = value;
        alias += 1;
    }
    table
};

/// Encodes 8 big-endian bytes into 13 Crockford characters.
///
/// The excess leading bit is always zero, so the output sorts like the input.
pub fn encode(input: &[u8; 8], out: &mut [u8; ENCODED_LEN]) {
    let mut bits = ENCODED_LEN * BITS_PER_CHAR - input.len() * 8;
    let mut acc = 0_u16;
    let mut pos = 0;
    for &b in input {
        acc = (acc << 8) | u16::from(b);
        bits += 8;
        while bits >= BITS_PER_CHAR {
            bits -= BITS_PER_CHAR;
            out[pos] = ALPHABET[usize::from((acc >> bits) & 0x1F)];
            pos += 1;
        }
    }
}

/// Decodes 13 Crockford characters into a `u64`.
pub fn decode(encoded: &str) -> Result<u64> {
    let bytes = encoded.as_bytes();
    if bytes.len() != ENCODED_LEN {
        return Err(Error::Base32InvalidLength { len: bytes.len() });
    }

    let mut acc = 0_u64;
    for (index, &byte) in bytes.iter().enumerate() {
        let val = LOOKUP[usize::from(byte)];
        if val == NO_VALUE {
            return Err(Error::Base32InvalidAscii { byte, index });
        }
        // The top bit of the first character has no home in 64 bits.
        if index == 0 && val > 0x0F {
            return Err(Error::Base32Overflow);
        }
        acc = (acc << BITS_PER_CHAR) | u64::from(val);
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_u64(val: u64) -> String {
        let mut buf = [0_u8; ENCODED_LEN];
        encode(&val.to_be_bytes(), &mut buf);
        String::from_utf8(buf.to_vec()).unwrap()
    }

    #[test]
    fn encodes_known_values() {
        assert_eq!(ENCODED_LEN, 13);
        assert_eq!(encode_u64(0), "0000000000000");
        assert_eq!(encode_u64(42), "000000000001A");
        assert_eq!(encode_u64(i64::MAX as u64), "7ZZZZZZZZZZZZ");
        assert_eq!(encode_u64(u64::MAX), "FZZZZZZZZZZZZ");
    }

    #[test]
    fn decode_inverts_encode() {
        for val in [0, 1, 31, 32, 42, 1 << 40, i64::MAX as u64, u64::MAX] {
            assert_eq!(decode(&encode_u64(val)), Ok(val));
        }
    }

    #[test]
    fn decode_accepts_lowercase_and_aliases() {
        assert_eq!(decode("000000000001a"), Ok(42));
        assert_eq!(decode("OOOOOOOOOOO1A"), Ok(42));
        assert_eq!(decode("0000000000001"), decode("000000000000l"));
        assert_eq!(decode("0000000000001"), decode("000000000000I"));
    }

    #[test]
    fn lookup_covers_alphabet_and_aliases_only() {
        let accepted = LOOKUP.iter().filter(|&&v| v != NO_VALUE).count();
        // 10 digits, 22 letters in both cases, 3 aliases in both cases
        assert_eq!(accepted, 10 + 22 * 2 + 3 * 2);
        for (value, &c) in ALPHABET.iter().enumerate() {
            assert_eq!(usize::from(LOOKUP[usize::from(c)]), value);
            assert_eq!(usize::from(LOOKUP[usize::from(c.to_ascii_lowercase())]), value);
        }
        assert_eq!(LOOKUP[usize::from(b'o')], 0);
        assert_eq!(LOOKUP[usize::from(b'l')], 1);
        assert_eq!(LOOKUP[usize::from(b'U')], NO_VALUE);
        assert_eq!(LOOKUP[usize::from(b'u')], NO_VALUE);
    }

    #[test]
    fn decode_rejects_bad_input() {
        assert_eq!(decode(""), Err(Error::Base32InvalidLength { len: 0 }));
        assert_eq!(
            decode("00000000000000"),
            Err(Error::Base32InvalidLength { len: 14 })
        );
        assert_eq!(
            decode("00000000000U0"),
            Err(Error::Base32InvalidAscii {
                byte: b'U',
                index: 11
            })
        );
        assert_eq!(decode("G000000000000"), Err(Error::Base32Overflow));
        assert_eq!(decode("ZZZZZZZZZZZZZ"), Err(Error::Base32Overflow));
    }
}

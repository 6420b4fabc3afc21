//! Participant address type with `kyc_` prefix.
//!
//! Address format: `kyc_` + base32(account key, 52 chars) + base32(checksum, 8 chars)
//!
//! Checksum: first 5 bytes of Blake2b-256(account key).
//! Base32 alphabet: `13456789abcdefghijkmnopqrstuwxyz` (avoids ambiguous chars).
//! Total address length: 4 (prefix) + 52 + 8 = 64 characters.
//!
//! Decoding fails closed: any string that is not the canonical encoding of
//! some account key is rejected with an [`AddressError`].

use crate::error::AddressError;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

type Blake2b256 = Blake2b<U32>;

/// Base32 alphabet (32 chars, avoids visually ambiguous 0/O, 2/Z, l/I, v).
const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Number of base32 characters for the account key (256 bits → ceil(256/5) = 52).
const KEY_CHARS: usize = 52;
/// Number of base32 characters for the checksum (40 bits → 40/5 = 8).
const CHECKSUM_CHARS: usize = 8;
/// Number of checksum bytes taken from the key digest.
const CHECKSUM_BYTES: usize = 5;

/// A network participant address.
///
/// Holds the decoded 32-byte account key; two addresses are equal iff their
/// keys are byte-identical. The canonical string form is produced by
/// [`fmt::Display`] and accepted by [`Address::decode`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 32]);

impl Address {
    /// The standard prefix for all addresses.
    pub const PREFIX: &'static str = "kyc_";

    /// Total length of a canonical address string.
    pub const ENCODED_LEN: usize = 4 + KEY_CHARS + CHECKSUM_CHARS;

    /// Create an address from a raw 32-byte account key.
    pub const fn from_bytes(key: [u8; 32]) -> Self {
        Self(key)
    }

    /// The raw account key.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Decode a participant-supplied address string.
    ///
    /// Surrounding whitespace is ignored; everything else must match the
    /// canonical encoding exactly (prefix, length, alphabet, zero padding
    /// bits and checksum).
    pub fn decode(raw: &str) -> Result<Self, AddressError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(AddressError::Empty);
        }
        let encoded = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| AddressError::InvalidPrefix(s.to_string()))?;
        if encoded.len() != KEY_CHARS + CHECKSUM_CHARS {
            return Err(AddressError::InvalidLength {
                expected: Self::ENCODED_LEN,
                got: s.len(),
            });
        }
        // Length check above counts bytes; a multi-byte char would make this split panic.
        if !encoded.is_ascii() {
            return Err(AddressError::InvalidCharacter);
        }

        let (key_encoded, checksum_encoded) = encoded.split_at(KEY_CHARS);
        let key: [u8; 32] = decode_base32_fixed(key_encoded)?;
        let checksum: [u8; CHECKSUM_BYTES] = decode_base32_fixed(checksum_encoded)?;

        if checksum != key_checksum(&key) {
            return Err(AddressError::ChecksumMismatch);
        }
        Ok(Self(key))
    }

    /// Whether `raw` decodes to a valid address.
    pub fn is_valid(raw: &str) -> bool {
        Self::decode(raw).is_ok()
    }

    /// The canonical string form.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(Self::ENCODED_LEN);
        out.push_str(Self::PREFIX);
        out.push_str(&encode_base32(&self.0));
        out.push_str(&encode_base32(&key_checksum(&self.0)));
        out
    }
}

fn key_checksum(key: &[u8; 32]) -> [u8; CHECKSUM_BYTES] {
    let mut hasher = Blake2b256::new();
    hasher.update(key);
    let digest = hasher.finalize();
    let mut out = [0u8; CHECKSUM_BYTES];
    out.copy_from_slice(&digest[..CHECKSUM_BYTES]);
    out
}

/// Encode a byte slice as base32.
fn encode_base32(bytes: &[u8]) -> String {
    let total_bits = bytes.len() * 8;
    let num_chars = total_bits.div_ceil(5);
    let mut result = String::with_capacity(num_chars);

    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    // Remaining bits (padded with zeros on the right).
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }

    result
}

/// Decode a base32 string into a fixed-size byte array.
///
/// Rejects characters outside the alphabet, short input and non-zero
/// padding bits, so every key has exactly one accepted encoding.
fn decode_base32_fixed<const N: usize>(s: &str) -> Result<[u8; N], AddressError> {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        let val = BASE32_DECODE
            .get(c as usize)
            .copied()
            .filter(|v| *v != 0xFF)
            .ok_or(AddressError::InvalidCharacter)?;
        buffer = ((buffer << 5) | val as u64) & 0xFFFF;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos >= N {
                return Err(AddressError::NonCanonical);
            }
            result[pos] = (buffer >> bits_in_buffer) as u8;
            pos += 1;
        }
    }

    if pos < N {
        return Err(AddressError::NonCanonical);
    }
    if buffer & ((1u64 << bits_in_buffer) - 1) != 0 {
        return Err(AddressError::NonCanonical);
    }
    Ok(result)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.encode())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::decode(&s)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_has_prefix_and_length() {
        let addr = Address::from_bytes([7u8; 32]);
        let s = addr.to_string();
        assert!(s.starts_with("kyc_"));
        assert_eq!(s.len(), Address::ENCODED_LEN);
    }

    #[test]
    fn decode_roundtrip() {
        let addr = Address::from_bytes([0xAB; 32]);
        let decoded = Address::decode(&addr.to_string()).unwrap();
        assert_eq!(decoded, addr);
    }

    #[test]
    fn decode_ignores_surrounding_whitespace() {
        let addr = Address::from_bytes([3u8; 32]);
        let padded = format!("  {addr}\n");
        assert_eq!(Address::decode(&padded).unwrap(), addr);
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(Address::decode(""), Err(AddressError::Empty));
        assert_eq!(Address::decode("   "), Err(AddressError::Empty));
    }

    #[test]
    fn invalid_prefix_rejected() {
        let addr = Address::from_bytes([1u8; 32]).to_string();
        let bad = addr.replacen("kyc_", "abc_", 1);
        assert!(matches!(
            Address::decode(&bad),
            Err(AddressError::InvalidPrefix(_))
        ));
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(matches!(
            Address::decode("kyc_tooshort"),
            Err(AddressError::InvalidLength { .. })
        ));
        assert!(matches!(
            Address::decode("kyc_"),
            Err(AddressError::InvalidLength { .. })
        ));
    }

    #[test]
    fn invalid_character_rejected() {
        let mut s = Address::from_bytes([9u8; 32]).to_string();
        s.replace_range(10..11, "0");
        assert_eq!(Address::decode(&s), Err(AddressError::InvalidCharacter));
    }

    #[test]
    fn non_ascii_rejected() {
        let mut s = Address::from_bytes([9u8; 32]).to_string();
        s.replace_range(10..12, "é");
        assert_eq!(Address::decode(&s), Err(AddressError::InvalidCharacter));
    }

    #[test]
    fn invalid_checksum_rejected() {
        let mut bad = Address::from_bytes([5u8; 32]).to_string();
        let last = bad.pop().unwrap();
        let replacement = if last == '1' { '3' } else { '1' };
        bad.push(replacement);
        assert_eq!(Address::decode(&bad), Err(AddressError::ChecksumMismatch));
    }

    #[test]
    fn nonzero_padding_bits_rejected() {
        // The 52nd key character carries 1 data bit + 4 padding bits.
        let addr = Address::from_bytes([0u8; 32]);
        let mut s = addr.to_string();
        let idx = Address::PREFIX.len() + KEY_CHARS - 1;
        s.replace_range(idx..idx + 1, "3");
        assert_eq!(Address::decode(&s), Err(AddressError::NonCanonical));
    }

    #[test]
    fn different_keys_different_addresses() {
        let a = Address::from_bytes([1u8; 32]);
        let b = Address::from_bytes([2u8; 32]);
        assert_ne!(a, b);
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn serde_uses_canonical_string() {
        let addr = Address::from_bytes([4u8; 32]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{addr}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn serde_rejects_malformed_string() {
        let result: Result<Address, _> = serde_json::from_str("\"kyc_garbage\"");
        assert!(result.is_err());
    }
}

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::Error;

/// SHA-256 digest used for content addressing
///
/// rendered as 64 lowercase hex characters everywhere; the store never
/// mixes case, since the digest doubles as the on-disk object path.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash([u8; 32]);

impl Hash {
    /// zero hash (useful as sentinel in tests)
    pub const ZERO: Hash = Hash([0u8; 32]);

    /// create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// parse from hex string
    pub fn from_hex(s: &str) -> crate::Result<Self> {
        let bytes = hex::decode(s).map_err(|_| Error::InvalidHashHex(s.to_string()))?;
        if bytes.len() != 32 {
            return Err(Error::InvalidHashHex(s.to_string()));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// get raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// split into path components for the object store
    /// returns (first 2 hex chars, remaining 62 hex chars)
    pub fn to_path_components(&self) -> (String, String) {
        let hex = self.to_hex();
        (hex[..2].to_string(), hex[2..].to_string())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", &self.to_hex()[..12])
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// compute the digest of a byte sequence
///
/// identical content always yields the identical digest; this is the sole
/// identity for blobs.
pub fn digest(content: &[u8]) -> Hash {
    Hash(Sha256::digest(content).into())
}

/// compute the digest of a structured record
///
/// each field is canonicalized as `name: value\n`, in the order given by
/// the caller, and the digest is taken over the concatenation. callers must
/// pass fields in a fixed order or identities become unreproducible; the
/// canonical byte form is deliberately independent of any on-disk
/// serialization format.
pub fn digest_record<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Hash {
    let mut hasher = Sha256::new();
    for (name, value) in fields {
        hasher.update(name.as_bytes());
        hasher.update(b": ");
        hasher.update(value.as_bytes());
        hasher.update(b"\n");
    }
    Hash(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_hex_roundtrip() {
        let original =
            Hash::from_hex("abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789")
                .unwrap();
        let hex = original.to_hex();
        let parsed = Hash::from_hex(&hex).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_hash_invalid_hex() {
        assert!(Hash::from_hex("not valid hex").is_err());
        assert!(Hash::from_hex("abcd").is_err()); // too short
        assert!(Hash::from_hex(
            "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789ff"
        )
        .is_err()); // too long
    }

    #[test]
    fn test_hash_path_components() {
        let h =
            Hash::from_hex("abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789")
                .unwrap();
        let (dir, file) = h.to_path_components();
        assert_eq!(dir, "ab");
        assert_eq!(file, "cdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789");
    }

    #[test]
    fn test_digest_determinism() {
        let h1 = digest(b"hello");
        let h2 = digest(b"hello");
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_digest_distinct_content() {
        // sampled inequality, not proof
        let inputs: Vec<Vec<u8>> = (0u32..64)
            .map(|i| format!("sample input {}", i).into_bytes())
            .collect();
        let mut digests: Vec<Hash> = inputs.iter().map(|b| digest(b)).collect();
        digests.sort();
        digests.dedup();
        assert_eq!(digests.len(), inputs.len());
    }

    #[test]
    fn test_digest_is_lowercase() {
        let hex = digest(b"case check").to_hex();
        assert_eq!(hex, hex.to_lowercase());
        assert_eq!(hex.len(), 64);
    }

    #[test]
    fn test_digest_empty_content() {
        assert_ne!(digest(b""), Hash::ZERO);
    }

    #[test]
    fn test_record_digest_determinism() {
        let h1 = digest_record([("message", "first"), ("parent", "")]);
        let h2 = digest_record([("message", "first"), ("parent", "")]);
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_record_digest_field_order_matters() {
        let h1 = digest_record([("a", "1"), ("b", "2")]);
        let h2 = digest_record([("b", "2"), ("a", "1")]);
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_record_digest_differs_from_raw() {
        // `name: value\n` framing keeps record digests distinct from a blob
        // of the bare value
        let h1 = digest_record([("message", "hello")]);
        let h2 = digest(b"hello");
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_hash_ordering() {
        let h1 =
            Hash::from_hex("0000000000000000000000000000000000000000000000000000000000000001")
                .unwrap();
        let h2 =
            Hash::from_hex("0000000000000000000000000000000000000000000000000000000000000002")
                .unwrap();
        assert!(h1 < h2);
    }

    #[test]
    fn test_hash_serde_json() {
        let h =
            Hash::from_hex("abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789")
                .unwrap();
        let json = serde_json::to_string(&h).unwrap();
        assert!(json.contains("abcdef"));
        let parsed: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, parsed);
    }
}

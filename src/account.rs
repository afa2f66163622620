// Account Addressing
// This module defines the opaque account value used throughout the registry.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Smallest currency unit used by the vending and personalization layers.
pub type Amount = u128;

/// Opaque 32-byte account address.
///
/// The all-zero value is the null account: it is never a valid owner,
/// approved spender, or role holder. Serializes as lowercase hex so it
/// can double as a map key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 32]);

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

impl Address {
    /// The null account.
    pub const ZERO: Address = Address([0u8; 32]);

    /// Create an address from raw bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Raw byte view.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Whether this is the null account.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form for logs and assertion output
        write!(f, "Address({}..)", hex::encode(&self.0[..4]))
    }
}

/// Error parsing an address from hex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid address hex: {0}")]
pub struct AddressParseError(String);

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = hex::decode(s).map_err(|e| AddressParseError(e.to_string()))?;
        let bytes: [u8; 32] = raw
            .try_into()
            .map_err(|_| AddressParseError("expected 32 bytes".to_string()))?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::new([1u8; 32]).is_zero());
    }

    #[test]
    fn test_hex_round_trip() {
        let addr = Address::new([0xabu8; 32]);
        let parsed: Address = addr.to_string().parse().unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("zz".parse::<Address>().is_err());
        assert!("abcd".parse::<Address>().is_err()); // too short
    }

    #[test]
    fn test_serde_as_hex_string() {
        let addr = Address::new([0x11u8; 32]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", "11".repeat(32)));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}

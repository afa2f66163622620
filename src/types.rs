// Registry Core Types
// This module defines protocol constants and the registry configuration.

use serde::{Deserialize, Serialize};

use crate::account::Address;
use crate::error::{RegistryError, RegistryResult};

/// Square identifier. Valid ids are `1..=universe_size`; 0 is never valid.
pub type SquareId = u64;

// ========================================
// Protocol Constants
// ========================================

/// Default number of squares in the registry universe
pub const DEFAULT_UNIVERSE_SIZE: u64 = 10_000;

/// Default promotional grant allotment
pub const DEFAULT_PROMO_ALLOTMENT: u64 = 2_500;

/// Maximum registry name length (bytes)
pub const MAX_NAME_LENGTH: usize = 64;

/// Maximum symbol length (bytes)
pub const MAX_SYMBOL_LENGTH: usize = 8;

/// Maximum base URI length (bytes)
pub const MAX_BASE_URI_LENGTH: usize = 256;

/// Maximum data length for safe transfers (4KB)
pub const MAX_SAFE_TRANSFER_DATA_LENGTH: usize = 4096;

// ========================================
// Capability Identifiers
// ========================================

/// 4-byte capability identifier for the capability probe
pub type CapabilityId = [u8; 4];

/// Capability probe itself (ERC-165 compatible)
pub const CAP_BASE: CapabilityId = [0x01, 0xff, 0xc9, 0xa7];

/// Base ownership operations (ERC-721 compatible)
pub const CAP_OWNERSHIP: CapabilityId = [0x80, 0xac, 0x58, 0xcd];

/// Descriptive metadata (name, symbol, per-square URI)
pub const CAP_METADATA: CapabilityId = [0x5b, 0x5e, 0x13, 0x9f];

/// Global and per-owner enumeration
pub const CAP_ENUMERATION: CapabilityId = [0x78, 0x0e, 0x9d, 0x63];

/// Acknowledgement token a receiving contract must echo back from the
/// safe-transfer hook (ERC-721 `onERC721Received` selector).
pub const RECEIPT_ACK: CapabilityId = [0x15, 0x0b, 0x7a, 0x02];

// ========================================
// Registry Configuration
// ========================================

/// Registry configuration, fixed at construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry display name (max 64 bytes)
    pub name: String,

    /// Symbol (max 8 bytes, uppercase ASCII)
    pub symbol: String,

    /// Base URI for per-square metadata (max 256 bytes)
    pub base_uri: String,

    /// Number of squares in the universe; valid ids are `1..=universe_size`
    pub universe_size: u64,

    /// Account that holds every square not yet minted out.
    /// Must not be the null account.
    pub registry_account: Address,

    /// Total number of promotional grants allowed over the registry lifetime
    pub promo_allotment: u64,
}

impl RegistryConfig {
    /// Configuration with the production defaults.
    pub fn new(registry_account: Address) -> Self {
        Self {
            name: "Su Squares".to_string(),
            symbol: "SU".to_string(),
            base_uri: "https://tenthousandsu.com/erc721/".to_string(),
            universe_size: DEFAULT_UNIVERSE_SIZE,
            registry_account,
            promo_allotment: DEFAULT_PROMO_ALLOTMENT,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> RegistryResult<()> {
        if self.universe_size == 0 {
            return Err(RegistryError::InvalidSquare);
        }
        if self.registry_account.is_zero() {
            return Err(RegistryError::InvalidAccount);
        }
        if self.name.is_empty() || self.name.len() > MAX_NAME_LENGTH {
            return Err(RegistryError::NameTooLong);
        }
        if self.symbol.is_empty()
            || self.symbol.len() > MAX_SYMBOL_LENGTH
            || !self
                .symbol
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(RegistryError::SymbolInvalid);
        }
        if self.base_uri.len() > MAX_BASE_URI_LENGTH {
            return Err(RegistryError::UriTooLong);
        }
        Ok(())
    }

    /// Whether an id falls inside the universe
    pub fn contains(&self, id: SquareId) -> bool {
        id >= 1 && id <= self.universe_size
    }
}

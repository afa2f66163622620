// Square Personalization
// Owners (or their delegates) attach a pixel image, a title, and a link
// to a square. The first few versions are free; later updates cost a
// fixed fee collected into the treasury.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::account::{Address, Amount};
use crate::error::{RegistryError, RegistryResult};
use crate::registry::SquareRegistry;
use crate::treasury::Treasury;
use crate::types::SquareId;

// ========================================
// Protocol Constants
// ========================================

/// Exact pixel blob size: 10x10 pixels, 3 bytes per pixel
pub const PIXEL_DATA_LEN: usize = 300;

/// Maximum title length (bytes)
pub const MAX_TITLE_LENGTH: usize = 64;

/// Maximum link length (bytes)
pub const MAX_HREF_LENGTH: usize = 96;

/// Versions that may be published without payment
pub const FREE_PERSONALIZATIONS: u64 = 3;

/// Fee for each version past the free allotment: 0.01 of the base
/// currency, in smallest units
pub const PERSONALIZE_FEE: Amount = 10_000_000_000_000_000;

/// Published state of one square.
///
/// The pixel blob itself is validated and logged but not retained; only
/// the reference data (title, link) and the version counter persist.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personalization {
    /// Number of versions published so far
    pub version: u64,
    pub title: String,
    pub href: String,
}

/// Per-square personalization records.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersonalizationBoard {
    squares: HashMap<SquareId, Personalization>,
}

impl PersonalizationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Published state for a square. A never-personalized square reads
    /// as version 0 with empty fields.
    pub fn personalization(&self, id: SquareId) -> Personalization {
        self.squares.get(&id).cloned().unwrap_or_default()
    }

    /// Publish a new version for a square.
    ///
    /// The caller must be authorized for the square (owner, approved
    /// spender, or operator — the same predicate transfers use). The
    /// first `FREE_PERSONALIZATIONS` versions must carry no payment;
    /// every later version requires exactly `PERSONALIZE_FEE`.
    pub fn personalize(
        &mut self,
        registry: &SquareRegistry,
        treasury: &mut Treasury,
        caller: &Address,
        id: SquareId,
        pixels: &[u8],
        title: &str,
        href: &str,
        payment: Amount,
    ) -> RegistryResult<()> {
        // Step 1: Input validation
        if pixels.len() != PIXEL_DATA_LEN {
            return Err(RegistryError::BadPixelData);
        }
        if title.len() > MAX_TITLE_LENGTH {
            return Err(RegistryError::TitleTooLong);
        }
        if href.len() > MAX_HREF_LENGTH {
            return Err(RegistryError::LinkTooLong);
        }

        // Step 2: Authorization (also bounds-checks the id)
        if !registry.is_authorized_for(caller, id)? {
            return Err(RegistryError::Unauthorized);
        }

        // Step 3: Fee schedule
        let version = self.squares.get(&id).map(|p| p.version).unwrap_or(0);
        let due = if version < FREE_PERSONALIZATIONS {
            0
        } else {
            PERSONALIZE_FEE
        };
        if payment != due {
            return Err(RegistryError::WrongPayment);
        }

        // Step 4: Commit
        if due > 0 {
            treasury.deposit(payment);
        }
        let entry = self.squares.entry(id).or_default();
        entry.version = version + 1;
        entry.title = title.to_string();
        entry.href = href.to_string();
        log::debug!(
            "square {} personalized, version {}, pixels {}",
            id,
            entry.version,
            hex::encode(pixels)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RegistryConfig;

    fn addr(byte: u8) -> Address {
        Address::new([byte; 32])
    }

    fn pixels() -> Vec<u8> {
        [0x07u8, 0x02, 0x01].repeat(100)
    }

    fn setup() -> (SquareRegistry, Treasury, PersonalizationBoard) {
        let config = RegistryConfig::new(addr(0xfe));
        let mut registry = SquareRegistry::new(config, addr(1)).unwrap();
        registry.mint(721, addr(5)).unwrap();
        (registry, Treasury::new(), PersonalizationBoard::new())
    }

    #[test]
    fn test_owner_personalizes() {
        let (registry, mut treasury, mut board) = setup();
        board
            .personalize(
                &registry,
                &mut treasury,
                &addr(5),
                721,
                &pixels(),
                "Cute squares you own and personalize",
                "https://tenthousandsu.com",
                0,
            )
            .unwrap();
        let state = board.personalization(721);
        assert_eq!(state.version, 1);
        assert_eq!(state.title, "Cute squares you own and personalize");
        assert_eq!(state.href, "https://tenthousandsu.com");
    }

    #[test]
    fn test_version_increments() {
        let (registry, mut treasury, mut board) = setup();
        assert_eq!(board.personalization(721).version, 0);
        for expected in 1..=2 {
            board
                .personalize(
                    &registry,
                    &mut treasury,
                    &addr(5),
                    721,
                    &pixels(),
                    "t",
                    "h",
                    0,
                )
                .unwrap();
            assert_eq!(board.personalization(721).version, expected);
        }
    }

    #[test]
    fn test_unauthorized_caller_rejected() {
        let (registry, mut treasury, mut board) = setup();
        assert_eq!(
            board.personalize(
                &registry,
                &mut treasury,
                &addr(9),
                721,
                &pixels(),
                "t",
                "h",
                0
            ),
            Err(RegistryError::Unauthorized)
        );
    }

    #[test]
    fn test_delegates_may_personalize() {
        let (mut registry, mut treasury, mut board) = setup();
        registry.approve(&addr(5), 721, addr(7)).unwrap();
        registry.set_operator(&addr(5), addr(8), true);

        for delegate in [addr(7), addr(8)] {
            board
                .personalize(
                    &registry,
                    &mut treasury,
                    &delegate,
                    721,
                    &pixels(),
                    "t",
                    "h",
                    0,
                )
                .unwrap();
        }
        assert_eq!(board.personalization(721).version, 2);
    }

    #[test]
    fn test_pixel_blob_must_be_exact() {
        let (registry, mut treasury, mut board) = setup();
        let short = [0u8; PIXEL_DATA_LEN - 3];
        let long = [0u8; PIXEL_DATA_LEN + 1];
        for bad in [&short[..], &long[..]] {
            assert_eq!(
                board.personalize(&registry, &mut treasury, &addr(5), 721, bad, "t", "h", 0),
                Err(RegistryError::BadPixelData)
            );
        }
    }

    #[test]
    fn test_title_and_href_limits() {
        let (registry, mut treasury, mut board) = setup();
        let long_title = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert_eq!(
            board.personalize(
                &registry,
                &mut treasury,
                &addr(5),
                721,
                &pixels(),
                &long_title,
                "h",
                0
            ),
            Err(RegistryError::TitleTooLong)
        );
        let long_href = "x".repeat(MAX_HREF_LENGTH + 1);
        assert_eq!(
            board.personalize(
                &registry,
                &mut treasury,
                &addr(5),
                721,
                &pixels(),
                "t",
                &long_href,
                0
            ),
            Err(RegistryError::LinkTooLong)
        );
    }

    #[test]
    fn test_fee_schedule() {
        let (registry, mut treasury, mut board) = setup();
        // Three free versions
        for _ in 0..FREE_PERSONALIZATIONS {
            board
                .personalize(
                    &registry,
                    &mut treasury,
                    &addr(5),
                    721,
                    &pixels(),
                    "t",
                    "h",
                    0,
                )
                .unwrap();
        }
        // Fourth without payment fails
        assert_eq!(
            board.personalize(
                &registry,
                &mut treasury,
                &addr(5),
                721,
                &pixels(),
                "t",
                "h",
                0
            ),
            Err(RegistryError::WrongPayment)
        );
        // With the exact fee it succeeds and the fee is collected
        board
            .personalize(
                &registry,
                &mut treasury,
                &addr(5),
                721,
                &pixels(),
                "t",
                "h",
                PERSONALIZE_FEE,
            )
            .unwrap();
        assert_eq!(board.personalization(721).version, 4);
        assert_eq!(treasury.balance(), PERSONALIZE_FEE);
    }

    #[test]
    fn test_free_version_rejects_payment() {
        let (registry, mut treasury, mut board) = setup();
        assert_eq!(
            board.personalize(
                &registry,
                &mut treasury,
                &addr(5),
                721,
                &pixels(),
                "t",
                "h",
                PERSONALIZE_FEE
            ),
            Err(RegistryError::WrongPayment)
        );
    }
}

// Promotional Grants
// Operations-officer gated giveaway of squares, capped by a fixed
// lifetime allotment.

use serde::{Deserialize, Serialize};

use crate::account::Address;
use crate::error::{RegistryError, RegistryResult};
use crate::registry::SquareRegistry;
use crate::types::SquareId;

/// Counter for promotional grants. The allotment comes from
/// `RegistryConfig::promo_allotment`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PromoDesk {
    granted: u64,
}

impl PromoDesk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of grants handed out so far.
    pub fn granted_count(&self) -> u64 {
        self.granted
    }

    /// Grant a square free of charge. Operations-officer only; fails
    /// once the allotment is used up. A square that already left the
    /// registry account cannot be granted.
    pub fn grant(
        &mut self,
        registry: &mut SquareRegistry,
        caller: &Address,
        id: SquareId,
        to: Address,
    ) -> RegistryResult<()> {
        registry.roles().require_operations(caller)?;
        if self.granted >= registry.config().promo_allotment {
            return Err(RegistryError::PromoExhausted);
        }
        registry.mint(id, to)?;
        self.granted += 1;
        log::debug!(
            "square {} granted to {} ({} of {} used)",
            id,
            to,
            self.granted,
            registry.config().promo_allotment
        );
        Ok(())
    }
}

// Vending
// Fixed-price first sale of squares out of the registry account.

use serde::{Deserialize, Serialize};

use crate::account::{Address, Amount};
use crate::error::{RegistryError, RegistryResult};
use crate::registry::SquareRegistry;
use crate::treasury::Treasury;
use crate::types::SquareId;

/// Fixed sale price: 0.5 of the base currency, in smallest units
pub const DEFAULT_SALE_PRICE: Amount = 500_000_000_000_000_000;

/// First-sale counter. Any account may buy a not-yet-minted square at
/// the fixed price.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VendingMachine {
    sale_price: Amount,
}

impl Default for VendingMachine {
    fn default() -> Self {
        Self {
            sale_price: DEFAULT_SALE_PRICE,
        }
    }
}

impl VendingMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(sale_price: Amount) -> Self {
        Self { sale_price }
    }

    /// Current sale price.
    pub fn sale_price(&self) -> Amount {
        self.sale_price
    }

    /// Buy a square for the caller. The payment must match the sale
    /// price exactly; a square that already left the registry account is
    /// not for sale.
    pub fn purchase(
        &self,
        registry: &mut SquareRegistry,
        treasury: &mut Treasury,
        caller: &Address,
        id: SquareId,
        payment: Amount,
    ) -> RegistryResult<()> {
        if payment != self.sale_price {
            return Err(RegistryError::WrongPayment);
        }
        // Bounds and already-owned checks come from the mint path
        registry.mint(id, *caller)?;
        treasury.deposit(payment);
        log::debug!("square {} sold to {}", id, caller);
        Ok(())
    }
}

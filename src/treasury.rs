// Treasury
// Payment accumulator shared by the vending and personalization layers.
// Withdrawal is finance-officer gated.

use serde::{Deserialize, Serialize};

use crate::account::{Address, Amount};
use crate::error::RegistryResult;
use crate::roles::RoleRegistry;

/// Collected sale and personalization fees.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Treasury {
    balance: Amount,
}

impl Treasury {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a received payment.
    pub fn deposit(&mut self, amount: Amount) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Current balance.
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Drain the balance. Finance-officer only.
    pub fn withdraw(&mut self, roles: &RoleRegistry, caller: &Address) -> RegistryResult<Amount> {
        roles.require_finance(caller)?;
        let drained = self.balance;
        self.balance = 0;
        log::debug!("treasury drained: {}", drained);
        Ok(drained)
    }
}

// Square Registry
// Access-controlled ownership registry for a fixed universe of uniquely
// numbered squares.
//
// Features:
// - Square-to-owner mapping with O(1) swap-and-pop enumeration indices
// - Per-square approvals and blanket operator approvals (ERC721-style)
// - Safe transfers with a post-commit recipient capability probe
// - Three-tier privileged role hierarchy (chief / operations / finance)
// - Business-rule collaborators: fixed-price vending, promotional
//   grants, per-square personalization with a free-tier counter
//
// Module Structure:
// - account: opaque 32-byte account addresses
// - error: error codes and result type
// - types: protocol constants and registry configuration
// - roles: privileged role slots and authorization predicates
// - index: ownership map plus global and per-owner enumeration
// - approvals: per-square and blanket delegation
// - registry: the transfer engine composing the above
// - treasury, vending, promo, personalize: business-rule layers

pub mod account;
pub mod approvals;
pub mod error;
pub mod index;
pub mod personalize;
pub mod promo;
pub mod registry;
pub mod roles;
pub mod treasury;
pub mod types;
pub mod vending;

pub use account::{Address, Amount};
pub use approvals::ApprovalRegistry;
pub use error::{RegistryError, RegistryResult};
pub use index::OwnershipIndex;
pub use personalize::{Personalization, PersonalizationBoard};
pub use promo::PromoDesk;
pub use registry::{NoReceiver, SquareRegistry, SquareReceiver};
pub use roles::RoleRegistry;
pub use treasury::Treasury;
pub use types::{CapabilityId, RegistryConfig, SquareId, RECEIPT_ACK};
pub use vending::VendingMachine;

//! Balance reconciliation for groups sharing vehicles.
//!
//! Members of a [`Space`] record [`Journey`]s (fuel charged to the travelers)
//! and [`Refill`]s (fuel paid by a single member). Balances are never stored:
//! [`Engine::space_balances`] folds the whole ledger on every read.

pub use balances::{MemberBalance, SpaceBalances, raw_balances};
pub use cars::{Car, Fuel};
pub use cost::{journey_cost, share};
pub use error::EngineError;
pub use journeys::Journey;
pub use ledger::LedgerItem;
pub use members::Member;
pub use membership_diff::MembershipDiff;
pub use ops::{Engine, EngineBuilder, SpaceOverview};
pub use refills::Refill;
pub use spaces::Space;
pub use validation::{JourneyInput, MIN_DISTANCE, MIN_FUEL_COST, MIN_REFILL_COST, RefillInput};

mod balances;
mod cars;
mod cost;
mod error;
mod journey_members;
mod journeys;
mod ledger;
mod members;
mod membership_diff;
mod ops;
mod refills;
mod spaces;
mod validation;

pub type ResultEngine<T> = Result<T, EngineError>;

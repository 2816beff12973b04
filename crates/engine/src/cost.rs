//! Cost model.
//!
//! Amounts are plain `f64` currency units. Nothing here rounds: rounding to
//! two decimals is left to whoever displays the numbers, so that many small
//! journeys do not accumulate rounding errors.

use crate::{Journey, LedgerItem, Refill};

/// Fuel cost of a trip: `(fuel_cost / 100) * distance * consumption`.
pub fn journey_cost(fuel_cost: f64, distance: i32, consumption: f64) -> f64 {
    (fuel_cost / 100.0) * f64::from(distance) * consumption
}

/// Splits `total` evenly across `members`. An empty member list is treated as
/// a single member, so the share is never a division by zero.
pub fn share(total: f64, members: usize) -> f64 {
    total / members.max(1) as f64
}

impl Journey {
    /// What the group spent on this trip. Never negative.
    pub fn cost(&self) -> f64 {
        journey_cost(self.fuel_cost, self.distance, self.car.consumption)
    }
}

impl Refill {
    /// What the payer spent for the group. Never negative.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Liters bought, when the price per liter is known. Display only.
    pub fn fuel_volume(&self) -> Option<f64> {
        self.fuel_cost
            .filter(|fuel_cost| *fuel_cost > 0.0)
            .map(|fuel_cost| self.cost / fuel_cost)
    }
}

impl LedgerItem {
    /// Total with the ledger sign: journeys are debits of their travelers,
    /// refills are credits of their payer.
    pub fn signed_cost(&self) -> f64 {
        match self {
            Self::Journey(journey) => -journey.cost(),
            Self::Refill(refill) => refill.cost(),
        }
    }

    /// Amount applied to each member of the item.
    pub fn share(&self) -> f64 {
        share(self.signed_cost(), self.members().len())
    }
}

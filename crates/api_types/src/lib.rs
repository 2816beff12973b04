use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fuel {
    Petrol,
    Diesel,
}

/// Response of every create endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
    pub id: Uuid,
}

pub mod space {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SpaceNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberNew {
        pub name: String,
        #[serde(default)]
        pub is_guest: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberUpdate {
        pub is_guest: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CarNew {
        pub name: String,
        pub fuel: Fuel,
        /// Liters per 100 distance units.
        pub consumption: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MemberView {
        pub id: Uuid,
        pub name: String,
        pub is_guest: bool,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CarView {
        pub id: Uuid,
        pub name: String,
        pub fuel: Fuel,
        pub consumption: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SpaceView {
        pub id: Uuid,
        pub name: String,
        /// Ordered by name.
        pub members: Vec<MemberView>,
        /// Ordered by name.
        pub cars: Vec<CarView>,
    }
}

pub mod journey {
    use super::*;
    use crate::space::{CarView, MemberView};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct JourneyNew {
        pub date: NaiveDate,
        pub name: Option<String>,
        pub distance: i32,
        /// Price of the fuel, per liter.
        pub fuel_cost: f64,
        pub member_ids: Vec<Uuid>,
        pub car_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct JourneyView {
        pub id: Uuid,
        pub date: NaiveDate,
        pub name: Option<String>,
        pub distance: i32,
        pub fuel_cost: f64,
        /// Total fuel cost of the trip, unrounded.
        pub cost: f64,
        pub car: CarView,
        pub members: Vec<MemberView>,
    }

    /// Travelers removed from and added to a journey by an update.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct MembershipChanges {
        pub removed: Vec<Uuid>,
        pub added: Vec<Uuid>,
    }
}

pub mod refill {
    use super::*;
    use crate::space::{CarView, MemberView};

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RefillNew {
        pub date: NaiveDate,
        pub cost: f64,
        /// Price of the fuel, per liter.
        pub fuel_cost: f64,
        pub member_id: Uuid,
        pub car_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RefillView {
        pub id: Uuid,
        pub date: NaiveDate,
        pub cost: f64,
        pub fuel_cost: Option<f64>,
        /// Liters bought, when the fuel price is known.
        pub volume: Option<f64>,
        pub car: CarView,
        pub member: MemberView,
    }
}

pub mod ledger {
    use super::*;
    use crate::{journey::JourneyView, refill::RefillView};

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    pub enum LedgerEntry {
        Journey(JourneyView),
        Refill(RefillView),
    }
}

pub mod balances {
    use std::collections::BTreeMap;

    use super::*;
    use crate::space::CarView;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberBalanceView {
        pub member_id: Uuid,
        pub name: String,
        pub is_guest: bool,
        pub balance: f64,
        pub deviation: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Balances {
        pub space_id: Uuid,
        pub name: String,
        pub members: Vec<MemberBalanceView>,
        /// Average balance of the regular members, absent when there is none.
        pub average: Option<f64>,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        pub unattributed: BTreeMap<Uuid, f64>,
        pub cars: Vec<CarView>,
    }
}

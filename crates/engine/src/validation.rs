//! Input contract for journey and refill submissions.
//!
//! Submissions are checked here, before they reach the store or the cost
//! model; the rest of the engine assumes these bounds hold.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

pub const MIN_DISTANCE: i32 = 1;
pub const MIN_FUEL_COST: f64 = 0.01;
pub const MIN_REFILL_COST: f64 = 1.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JourneyInput {
    pub date: NaiveDate,
    pub name: Option<String>,
    pub distance: i32,
    pub fuel_cost: f64,
    pub member_ids: Vec<Uuid>,
    pub car_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefillInput {
    pub date: NaiveDate,
    pub cost: f64,
    pub fuel_cost: f64,
    pub member_id: Uuid,
    pub car_id: Uuid,
}

/// A journey submission that passed validation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ValidJourney {
    pub date: NaiveDate,
    pub name: Option<String>,
    pub distance: i32,
    pub fuel_cost: f64,
    pub member_ids: BTreeSet<Uuid>,
    pub car_id: Uuid,
}

impl JourneyInput {
    pub(crate) fn validate(self) -> ResultEngine<ValidJourney> {
        if self.distance < MIN_DISTANCE {
            return Err(EngineError::Validation(format!(
                "distance must be >= {MIN_DISTANCE}"
            )));
        }
        ensure_at_least("fuel_cost", self.fuel_cost, MIN_FUEL_COST)?;
        let member_ids: BTreeSet<Uuid> = self.member_ids.into_iter().collect();
        if member_ids.is_empty() {
            return Err(EngineError::Validation(
                "a journey needs at least one member".to_string(),
            ));
        }

        Ok(ValidJourney {
            date: self.date,
            name: self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ToString::to_string),
            distance: self.distance,
            fuel_cost: self.fuel_cost,
            member_ids,
            car_id: self.car_id,
        })
    }
}

impl RefillInput {
    pub(crate) fn validate(&self) -> ResultEngine<()> {
        ensure_at_least("cost", self.cost, MIN_REFILL_COST)?;
        ensure_at_least("fuel_cost", self.fuel_cost, MIN_FUEL_COST)
    }
}

fn ensure_at_least(field: &str, value: f64, min: f64) -> ResultEngine<()> {
    if !value.is_finite() {
        return Err(EngineError::Validation(format!("{field} must be a number")));
    }
    if value < min {
        return Err(EngineError::Validation(format!("{field} must be >= {min}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn journey_input() -> JourneyInput {
        JourneyInput {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            name: Some("  Ski trip ".to_string()),
            distance: 320,
            fuel_cost: 1.89,
            member_ids: vec![Uuid::new_v4()],
            car_id: Uuid::new_v4(),
        }
    }

    fn refill_input() -> RefillInput {
        RefillInput {
            date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            cost: 80.0,
            fuel_cost: 1.85,
            member_id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn valid_journey_trims_name() {
        let valid = journey_input().validate().unwrap();
        assert_eq!(valid.name.as_deref(), Some("Ski trip"));
    }

    #[test]
    fn blank_journey_name_becomes_none() {
        let mut input = journey_input();
        input.name = Some("   ".to_string());
        assert_eq!(input.validate().unwrap().name, None);
    }

    #[test]
    fn duplicate_members_collapse() {
        let mut input = journey_input();
        let id = input.member_ids[0];
        input.member_ids.push(id);
        assert_eq!(input.validate().unwrap().member_ids.len(), 1);
    }

    #[test]
    fn journey_without_members_is_rejected() {
        let mut input = journey_input();
        input.member_ids.clear();
        assert_eq!(
            input.validate().unwrap_err(),
            EngineError::Validation("a journey needs at least one member".to_string())
        );
    }

    #[test]
    fn journey_bounds() {
        let mut input = journey_input();
        input.distance = 0;
        assert!(input.validate().is_err());

        let mut input = journey_input();
        input.fuel_cost = 0.0;
        assert!(input.validate().is_err());

        let mut input = journey_input();
        input.fuel_cost = f64::NAN;
        assert!(input.validate().is_err());
    }

    #[test]
    fn refill_bounds() {
        assert!(refill_input().validate().is_ok());

        let mut input = refill_input();
        input.cost = 0.5;
        assert!(input.validate().is_err());

        let mut input = refill_input();
        input.fuel_cost = 0.001;
        assert!(input.validate().is_err());

        let mut input = refill_input();
        input.cost = f64::INFINITY;
        assert!(input.validate().is_err());
    }
}

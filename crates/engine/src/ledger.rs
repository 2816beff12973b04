//! The ledger of a space: journeys and refills in a single list.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Journey, Member, Refill};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerItem {
    Journey(Journey),
    Refill(Refill),
}

impl LedgerItem {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Journey(journey) => journey.id,
            Self::Refill(refill) => refill.id,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Journey(journey) => journey.date,
            Self::Refill(refill) => refill.date,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Self::Journey(journey) => journey.created_at,
            Self::Refill(refill) => refill.created_at,
        }
    }

    /// Members the item is attributed to: the travelers of a journey, or the
    /// payer of a refill.
    pub fn members(&self) -> &[Member] {
        match self {
            Self::Journey(journey) => &journey.members,
            Self::Refill(refill) => std::slice::from_ref(&refill.member),
        }
    }
}

/// Sorts items newest first: by date, then by creation time.
pub(crate) fn sort_newest_first(items: &mut [LedgerItem]) {
    items.sort_by(|a, b| {
        b.date()
            .cmp(&a.date())
            .then_with(|| b.created_at().cmp(&a.created_at()))
    });
}

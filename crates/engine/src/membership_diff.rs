//! Reconciliation of a journey's stored travelers with a submitted list.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rows to remove from and add to `journey_members` for one journey.
///
/// Members found in both the stored and the submitted set appear in neither
/// list: they are left untouched instead of being deleted and re-inserted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipDiff {
    pub to_delete: BTreeSet<Uuid>,
    pub to_insert: BTreeSet<Uuid>,
}

impl MembershipDiff {
    pub fn compute(current: &BTreeSet<Uuid>, submitted: &BTreeSet<Uuid>) -> Self {
        Self {
            to_delete: current.difference(submitted).copied().collect(),
            to_insert: submitted.difference(current).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_insert.is_empty()
    }
}

//! Balance aggregation.
//!
//! Balances are never stored: every read folds the whole ledger of a space
//! again, so they cannot drift from the journeys and refills they come from.
//!
//! The fold adds each item's per-member share to all the members the item is
//! attributed to, guests included. Once the ledger is consumed, members are
//! split with their *current* guest flag: toggling the flag reclassifies the
//! whole history of that member.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerItem, Member};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberBalance {
    pub member_id: Uuid,
    pub name: String,
    pub is_guest: bool,
    /// Positive: the group owes the member. Negative: the member owes the
    /// group.
    pub balance: f64,
    /// `balance - average`. Always `None` for guests, and for everybody when
    /// the space has no regular member.
    pub deviation: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceBalances {
    /// One entry per member of the space, in the order of the member list.
    pub members: Vec<MemberBalance>,
    /// Average balance of the regular members.
    pub average: Option<f64>,
    /// Amounts attributed to member ids missing from the member list.
    pub unattributed: BTreeMap<Uuid, f64>,
}

impl SpaceBalances {
    /// Aggregates `items` for the space whose members are `members`.
    ///
    /// The order of `items` does not matter.
    pub fn compute(members: &[Member], items: &[LedgerItem]) -> Self {
        let mut raw = raw_balances(items);

        let regular: Vec<f64> = members
            .iter()
            .filter(|member| !member.is_guest)
            .map(|member| raw.get(&member.id).copied().unwrap_or(0.0))
            .collect();
        let average = average(&regular);

        let balances = members
            .iter()
            .map(|member| {
                let balance = raw.remove(&member.id).unwrap_or(0.0);
                let deviation = match (member.is_guest, average) {
                    (false, Some(average)) => Some(balance - average),
                    _ => None,
                };
                MemberBalance {
                    member_id: member.id,
                    name: member.name.clone(),
                    is_guest: member.is_guest,
                    balance,
                    deviation,
                }
            })
            .collect();

        let unattributed: BTreeMap<Uuid, f64> = raw.into_iter().collect();
        if !unattributed.is_empty() {
            tracing::warn!(
                "ledger references {} member(s) outside the space member list",
                unattributed.len()
            );
        }

        Self {
            members: balances,
            average,
            unattributed,
        }
    }

    pub fn member(&self, member_id: Uuid) -> Option<&MemberBalance> {
        self.members
            .iter()
            .find(|balance| balance.member_id == member_id)
    }
}

/// Folds `items` into the raw balance of every member they mention.
pub fn raw_balances<'a, I>(items: I) -> HashMap<Uuid, f64>
where
    I: IntoIterator<Item = &'a LedgerItem>,
{
    items.into_iter().fold(HashMap::new(), |mut balances, item| {
        let share = item.share();
        for member in item.members() {
            *balances.entry(member.id).or_insert(0.0) += share;
        }
        balances
    })
}

fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

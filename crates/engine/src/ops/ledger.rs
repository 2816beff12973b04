use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerItem, ResultEngine, Space, SpaceBalances, ledger::sort_newest_first};

use super::{Engine, with_tx};

/// A space read together with the balances of its members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpaceOverview {
    pub space: Space,
    pub balances: SpaceBalances,
}

impl Engine {
    /// Journeys and refills of a space, newest first.
    pub async fn ledger(&self, space_id: Uuid) -> ResultEngine<Vec<LedgerItem>> {
        with_tx!(self, |db_tx| {
            self.require_space(&db_tx, space_id).await?;
            self.load_ledger(&db_tx, space_id).await
        })
    }

    /// Fold the whole ledger of a space into per-member balances.
    ///
    /// Space and ledger are read in the same transaction.
    pub async fn space_balances(&self, space_id: Uuid) -> ResultEngine<SpaceOverview> {
        with_tx!(self, |db_tx| {
            let space = self.load_space(&db_tx, space_id).await?;
            let items = self.load_ledger(&db_tx, space_id).await?;
            let balances = SpaceBalances::compute(&space.members, &items);
            Ok(SpaceOverview { space, balances })
        })
    }

    async fn load_ledger<C: ConnectionTrait>(
        &self,
        db: &C,
        space_id: Uuid,
    ) -> ResultEngine<Vec<LedgerItem>> {
        let journeys = self.load_journeys(db, space_id, None).await?;
        let refills = self.load_refills(db, space_id, None).await?;

        let mut items: Vec<LedgerItem> = journeys
            .into_iter()
            .map(LedgerItem::Journey)
            .chain(refills.into_iter().map(LedgerItem::Refill))
            .collect();
        sort_newest_first(&mut items);
        Ok(items)
    }
}

use sea_orm::{
    ActiveModelTrait, ActiveValue, PaginatorTrait, QueryFilter, TransactionTrait, prelude::*,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::{EngineError, Member, ResultEngine, journey_members, members, refills};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Add a member to a space. Member names are unique inside a space
    /// (case-insensitive).
    pub async fn new_member(
        &self,
        space_id: Uuid,
        name: &str,
        is_guest: bool,
    ) -> ResultEngine<Uuid> {
        let name = normalize_required_name(name, "member")?;
        with_tx!(self, |db_tx| {
            self.require_space(&db_tx, space_id).await?;

            let exists = members::Entity::find()
                .filter(members::Column::SpaceId.eq(space_id))
                .filter(Expr::cust("LOWER(name)").eq(name.to_lowercase()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(name));
            }

            let member = Member::new(space_id, name, is_guest);
            members::ActiveModel::from(&member).insert(&db_tx).await?;
            tracing::debug!("added member {} to space {space_id}", member.id);
            Ok(member.id)
        })
    }

    /// Flip the guest flag of a member.
    ///
    /// Balances always use the current flag, so the member's whole history
    /// moves in or out of the average.
    pub async fn set_member_guest(
        &self,
        space_id: Uuid,
        member_id: Uuid,
        is_guest: bool,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_member_in_space(&db_tx, space_id, member_id)
                .await?;
            let active = members::ActiveModel {
                id: ActiveValue::Set(member_id),
                is_guest: ActiveValue::Set(is_guest),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    /// Remove a member that never travelled nor paid.
    pub async fn delete_member(&self, space_id: Uuid, member_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_member_in_space(&db_tx, space_id, member_id)
                .await?;

            let journeys = journey_members::Entity::find()
                .filter(journey_members::Column::MemberId.eq(member_id))
                .count(&db_tx)
                .await?;
            let refills = refills::Entity::find()
                .filter(refills::Column::MemberId.eq(member_id))
                .count(&db_tx)
                .await?;
            if journeys + refills > 0 {
                return Err(EngineError::InUse(format!(
                    "member has {journeys} journey(s) and {refills} refill(s)"
                )));
            }

            members::Entity::delete_by_id(member_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}

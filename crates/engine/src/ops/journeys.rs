use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, QueryFilter, TransactionTrait, prelude::*, sea_query::Query,
};
use uuid::Uuid;

use crate::{
    Car, EngineError, Journey, JourneyInput, Member, MembershipDiff, ResultEngine, cars,
    journey_members, journeys, members,
};

use super::{Engine, with_tx};

impl Engine {
    /// Record a journey and link its travelers.
    pub async fn new_journey(&self, space_id: Uuid, input: JourneyInput) -> ResultEngine<Uuid> {
        let input = input.validate()?;
        with_tx!(self, |db_tx| {
            self.require_space(&db_tx, space_id).await?;
            self.require_car_in_space(&db_tx, space_id, input.car_id)
                .await?;
            self.require_members_in_space(&db_tx, space_id, &input.member_ids)
                .await?;

            let journey_id = Uuid::new_v4();
            let active = journeys::ActiveModel {
                id: ActiveValue::Set(journey_id),
                space_id: ActiveValue::Set(space_id),
                car_id: ActiveValue::Set(input.car_id),
                date: ActiveValue::Set(input.date),
                name: ActiveValue::Set(input.name),
                distance: ActiveValue::Set(input.distance),
                fuel_cost: ActiveValue::Set(input.fuel_cost),
                created_at: ActiveValue::Set(Utc::now()),
            };
            active.insert(&db_tx).await?;

            let diff = MembershipDiff::compute(&BTreeSet::new(), &input.member_ids);
            apply_membership_diff(&db_tx, journey_id, &diff).await?;

            tracing::debug!(
                "created journey {journey_id} in space {space_id} with {} member(s)",
                diff.to_insert.len()
            );
            Ok(journey_id)
        })
    }

    /// Return a journey with its car and travelers.
    pub async fn journey(&self, space_id: Uuid, journey_id: Uuid) -> ResultEngine<Journey> {
        self.load_journeys(&self.database, space_id, Some(journey_id))
            .await?
            .pop()
            .ok_or_else(|| EngineError::KeyNotFound("journey not exists".to_string()))
    }

    /// Overwrite a journey and reconcile its travelers with the submitted
    /// ones.
    ///
    /// Returns the membership changes that were written. Travelers present
    /// before and after the update are not touched.
    pub async fn update_journey(
        &self,
        space_id: Uuid,
        journey_id: Uuid,
        input: JourneyInput,
    ) -> ResultEngine<MembershipDiff> {
        let input = input.validate()?;
        with_tx!(self, |db_tx| {
            self.require_journey_in_space(&db_tx, space_id, journey_id)
                .await?;
            self.require_car_in_space(&db_tx, space_id, input.car_id)
                .await?;
            self.require_members_in_space(&db_tx, space_id, &input.member_ids)
                .await?;

            let active = journeys::ActiveModel {
                id: ActiveValue::Set(journey_id),
                car_id: ActiveValue::Set(input.car_id),
                date: ActiveValue::Set(input.date),
                name: ActiveValue::Set(input.name),
                distance: ActiveValue::Set(input.distance),
                fuel_cost: ActiveValue::Set(input.fuel_cost),
                ..Default::default()
            };
            active.update(&db_tx).await?;

            let current: BTreeSet<Uuid> = journey_members::Entity::find()
                .filter(journey_members::Column::JourneyId.eq(journey_id))
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|link| link.member_id)
                .collect();
            let diff = MembershipDiff::compute(&current, &input.member_ids);
            apply_membership_diff(&db_tx, journey_id, &diff).await?;

            tracing::debug!(
                "updated journey {journey_id}: {} member(s) removed, {} added",
                diff.to_delete.len(),
                diff.to_insert.len()
            );
            Ok(diff)
        })
    }

    /// Delete a journey and its traveler links.
    pub async fn delete_journey(&self, space_id: Uuid, journey_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_journey_in_space(&db_tx, space_id, journey_id)
                .await?;
            journey_members::Entity::delete_many()
                .filter(journey_members::Column::JourneyId.eq(journey_id))
                .exec(&db_tx)
                .await?;
            journeys::Entity::delete_by_id(journey_id)
                .exec(&db_tx)
                .await?;
            tracing::debug!("deleted journey {journey_id}");
            Ok(())
        })
    }

    /// Load the journeys of a space (or a single one) joined with their car
    /// and travelers.
    pub(super) async fn load_journeys<C: ConnectionTrait>(
        &self,
        db: &C,
        space_id: Uuid,
        journey_id: Option<Uuid>,
    ) -> ResultEngine<Vec<Journey>> {
        let mut query = journeys::Entity::find().filter(journeys::Column::SpaceId.eq(space_id));
        if let Some(journey_id) = journey_id {
            query = query.filter(journeys::Column::Id.eq(journey_id));
        }
        let rows: Vec<(journeys::Model, Option<cars::Model>)> =
            query.find_also_related(cars::Entity).all(db).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let space_journeys = Query::select()
            .column(journeys::Column::Id)
            .from(journeys::Entity)
            .and_where(journeys::Column::SpaceId.eq(space_id))
            .to_owned();
        let mut links_query = journey_members::Entity::find()
            .filter(journey_members::Column::JourneyId.in_subquery(space_journeys));
        if let Some(journey_id) = journey_id {
            links_query = links_query.filter(journey_members::Column::JourneyId.eq(journey_id));
        }
        let links: Vec<(journey_members::Model, Option<members::Model>)> = links_query
            .find_also_related(members::Entity)
            .all(db)
            .await?;

        let mut travelers: HashMap<Uuid, Vec<Member>> = HashMap::new();
        for (link, member) in links {
            let Some(member) = member else { continue };
            travelers
                .entry(link.journey_id)
                .or_default()
                .push(Member::from(member));
        }

        rows.into_iter()
            .map(|(model, car)| {
                let car = car.ok_or_else(|| {
                    EngineError::InvalidData(format!("journey {} has no car", model.id))
                })?;
                let members = travelers.remove(&model.id).unwrap_or_default();
                Ok(Journey::from_parts(model, Car::try_from(car)?, members))
            })
            .collect()
    }
}

/// Write a membership diff for one journey.
async fn apply_membership_diff<C: ConnectionTrait>(
    db: &C,
    journey_id: Uuid,
    diff: &MembershipDiff,
) -> ResultEngine<()> {
    if !diff.to_delete.is_empty() {
        journey_members::Entity::delete_many()
            .filter(journey_members::Column::JourneyId.eq(journey_id))
            .filter(journey_members::Column::MemberId.is_in(diff.to_delete.iter().copied()))
            .exec(db)
            .await?;
    }
    if !diff.to_insert.is_empty() {
        journey_members::Entity::insert_many(
            diff.to_insert
                .iter()
                .map(|member_id| journey_members::ActiveModel::link(journey_id, *member_id)),
        )
        .exec_without_returning(db)
        .await?;
    }
    Ok(())
}

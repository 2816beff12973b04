use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Car, EngineError, Member, Refill, RefillInput, ResultEngine, cars, members, refills,
};

use super::{Engine, with_tx};

impl Engine {
    /// Record a refill paid by a single member.
    pub async fn new_refill(&self, space_id: Uuid, input: RefillInput) -> ResultEngine<Uuid> {
        input.validate()?;
        with_tx!(self, |db_tx| {
            self.require_space(&db_tx, space_id).await?;
            self.require_car_in_space(&db_tx, space_id, input.car_id)
                .await?;
            self.require_member_in_space(&db_tx, space_id, input.member_id)
                .await?;

            let refill_id = Uuid::new_v4();
            let active = refills::ActiveModel {
                id: ActiveValue::Set(refill_id),
                space_id: ActiveValue::Set(space_id),
                car_id: ActiveValue::Set(input.car_id),
                member_id: ActiveValue::Set(input.member_id),
                date: ActiveValue::Set(input.date),
                cost: ActiveValue::Set(input.cost),
                fuel_cost: ActiveValue::Set(Some(input.fuel_cost)),
                created_at: ActiveValue::Set(Utc::now()),
            };
            active.insert(&db_tx).await?;

            tracing::debug!("created refill {refill_id} in space {space_id}");
            Ok(refill_id)
        })
    }

    /// Return a refill with its car and payer.
    pub async fn refill(&self, space_id: Uuid, refill_id: Uuid) -> ResultEngine<Refill> {
        self.load_refills(&self.database, space_id, Some(refill_id))
            .await?
            .pop()
            .ok_or_else(|| EngineError::KeyNotFound("refill not exists".to_string()))
    }

    /// Overwrite a refill. The payer is a plain column, so it is replaced
    /// as-is.
    pub async fn update_refill(
        &self,
        space_id: Uuid,
        refill_id: Uuid,
        input: RefillInput,
    ) -> ResultEngine<()> {
        input.validate()?;
        with_tx!(self, |db_tx| {
            self.require_refill_in_space(&db_tx, space_id, refill_id)
                .await?;
            self.require_car_in_space(&db_tx, space_id, input.car_id)
                .await?;
            self.require_member_in_space(&db_tx, space_id, input.member_id)
                .await?;

            let active = refills::ActiveModel {
                id: ActiveValue::Set(refill_id),
                car_id: ActiveValue::Set(input.car_id),
                member_id: ActiveValue::Set(input.member_id),
                date: ActiveValue::Set(input.date),
                cost: ActiveValue::Set(input.cost),
                fuel_cost: ActiveValue::Set(Some(input.fuel_cost)),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            tracing::debug!("updated refill {refill_id}");
            Ok(())
        })
    }

    pub async fn delete_refill(&self, space_id: Uuid, refill_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_refill_in_space(&db_tx, space_id, refill_id)
                .await?;
            refills::Entity::delete_by_id(refill_id)
                .exec(&db_tx)
                .await?;
            tracing::debug!("deleted refill {refill_id}");
            Ok(())
        })
    }

    /// Load the refills of a space (or a single one) joined with their car
    /// and payer.
    pub(super) async fn load_refills<C: ConnectionTrait>(
        &self,
        db: &C,
        space_id: Uuid,
        refill_id: Option<Uuid>,
    ) -> ResultEngine<Vec<Refill>> {
        let mut query = refills::Entity::find().filter(refills::Column::SpaceId.eq(space_id));
        if let Some(refill_id) = refill_id {
            query = query.filter(refills::Column::Id.eq(refill_id));
        }
        let rows: Vec<(refills::Model, Option<cars::Model>)> =
            query.find_also_related(cars::Entity).all(db).await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let payers: HashMap<Uuid, Member> = members::Entity::find()
            .filter(members::Column::SpaceId.eq(space_id))
            .all(db)
            .await?
            .into_iter()
            .map(|model| (model.id, Member::from(model)))
            .collect();

        rows.into_iter()
            .map(|(model, car)| {
                let car = car.ok_or_else(|| {
                    EngineError::InvalidData(format!("refill {} has no car", model.id))
                })?;
                let member = payers.get(&model.member_id).cloned().ok_or_else(|| {
                    EngineError::InvalidData(format!("refill {} has no payer", model.id))
                })?;
                Ok(Refill::from_parts(model, Car::try_from(car)?, member))
            })
            .collect()
    }
}

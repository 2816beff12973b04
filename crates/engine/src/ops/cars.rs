use sea_orm::{
    ActiveModelTrait, PaginatorTrait, QueryFilter, TransactionTrait, prelude::*, sea_query::Expr,
};
use uuid::Uuid;

use crate::{Car, EngineError, Fuel, ResultEngine, cars, journeys, refills};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Add a car to a space. `consumption` is in liters per 100 distance
    /// units.
    pub async fn new_car(
        &self,
        space_id: Uuid,
        name: &str,
        fuel: Fuel,
        consumption: f64,
    ) -> ResultEngine<Uuid> {
        let name = normalize_required_name(name, "car")?;
        if !consumption.is_finite() || consumption <= 0.0 {
            return Err(EngineError::Validation(
                "consumption must be > 0".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            self.require_space(&db_tx, space_id).await?;

            let exists = cars::Entity::find()
                .filter(cars::Column::SpaceId.eq(space_id))
                .filter(Expr::cust("LOWER(name)").eq(name.to_lowercase()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(name));
            }

            let car = Car::new(space_id, name, fuel, consumption);
            cars::ActiveModel::from(&car).insert(&db_tx).await?;
            tracing::debug!("added car {} to space {space_id}", car.id);
            Ok(car.id)
        })
    }

    /// Remove a car that no journey or refill refers to.
    pub async fn delete_car(&self, space_id: Uuid, car_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_car_in_space(&db_tx, space_id, car_id).await?;

            let journeys = journeys::Entity::find()
                .filter(journeys::Column::CarId.eq(car_id))
                .count(&db_tx)
                .await?;
            let refills = refills::Entity::find()
                .filter(refills::Column::CarId.eq(car_id))
                .count(&db_tx)
                .await?;
            if journeys + refills > 0 {
                return Err(EngineError::InUse(format!(
                    "car has {journeys} journey(s) and {refills} refill(s)"
                )));
            }

            cars::Entity::delete_by_id(car_id).exec(&db_tx).await?;
            Ok(())
        })
    }
}

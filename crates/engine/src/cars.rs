//! Cars shared inside a space.

use chrono::Utc;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fuel {
    Petrol,
    Diesel,
}

impl Fuel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Petrol => "petrol",
            Self::Diesel => "diesel",
        }
    }
}

impl TryFrom<&str> for Fuel {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "petrol" => Ok(Self::Petrol),
            "diesel" => Ok(Self::Diesel),
            other => Err(EngineError::InvalidData(format!("invalid fuel: {other}"))),
        }
    }
}

/// A car and its average consumption, expressed in liters per 100 distance
/// units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: Uuid,
    pub space_id: Uuid,
    pub name: String,
    pub fuel: Fuel,
    pub consumption: f64,
}

impl Car {
    pub fn new(space_id: Uuid, name: String, fuel: Fuel, consumption: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            space_id,
            name,
            fuel,
            consumption,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub space_id: Uuid,
    pub name: String,
    pub fuel: String,
    pub consumption: f64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::spaces::Entity",
        from = "Column::SpaceId",
        to = "super::spaces::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Spaces,
    #[sea_orm(has_many = "super::journeys::Entity")]
    Journeys,
    #[sea_orm(has_many = "super::refills::Entity")]
    Refills,
}

impl Related<super::spaces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Spaces.def()
    }
}

impl Related<super::journeys::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Journeys.def()
    }
}

impl Related<super::refills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Refills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Car> for ActiveModel {
    fn from(car: &Car) -> Self {
        Self {
            id: ActiveValue::Set(car.id),
            space_id: ActiveValue::Set(car.space_id),
            name: ActiveValue::Set(car.name.clone()),
            fuel: ActiveValue::Set(car.fuel.as_str().to_string()),
            consumption: ActiveValue::Set(car.consumption),
            created_at: ActiveValue::Set(Utc::now()),
        }
    }
}

impl TryFrom<Model> for Car {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            space_id: model.space_id,
            name: model.name,
            fuel: Fuel::try_from(model.fuel.as_str())?,
            consumption: model.consumption,
        })
    }
}

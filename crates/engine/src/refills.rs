//! Refills: fuel bought by a single member on behalf of the group.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Car, Member};

/// A refill joined with its car and its payer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Refill {
    pub id: Uuid,
    pub space_id: Uuid,
    pub date: NaiveDate,
    /// Total amount paid.
    pub cost: f64,
    /// Price of the fuel, per liter. Older refills may not have it.
    pub fuel_cost: Option<f64>,
    pub car: Car,
    pub member: Member,
    pub created_at: DateTime<Utc>,
}

impl Refill {
    pub(crate) fn from_parts(model: Model, car: Car, member: Member) -> Self {
        Self {
            id: model.id,
            space_id: model.space_id,
            date: model.date,
            cost: model.cost,
            fuel_cost: model.fuel_cost,
            car,
            member,
            created_at: model.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "refills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub space_id: Uuid,
    pub car_id: Uuid,
    pub member_id: Uuid,
    pub date: Date,
    pub cost: f64,
    pub fuel_cost: Option<f64>,
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
    #[sea_orm(
        belongs_to = "super::cars::Entity",
        from = "Column::CarId",
        to = "super::cars::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Cars,
    #[sea_orm(
        belongs_to = "super::members::Entity",
        from = "Column::MemberId",
        to = "super::members::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Members,
}

impl Related<super::spaces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Spaces.def()
    }
}

impl Related<super::cars::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cars.def()
    }
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Journeys: trips whose fuel is paid by the group and charged to the
//! travelers.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Car, Member};

/// A journey joined with its car and its travelers (ordered by name ignoring
/// case).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    pub id: Uuid,
    pub space_id: Uuid,
    pub date: NaiveDate,
    pub name: Option<String>,
    pub distance: i32,
    /// Price of the fuel, per liter.
    pub fuel_cost: f64,
    pub car: Car,
    pub members: Vec<Member>,
    pub created_at: DateTime<Utc>,
}

impl Journey {
    pub(crate) fn from_parts(model: Model, car: Car, mut members: Vec<Member>) -> Self {
        members.sort_by_cached_key(|member| member.name.to_lowercase());
        Self {
            id: model.id,
            space_id: model.space_id,
            date: model.date,
            name: model.name,
            distance: model.distance,
            fuel_cost: model.fuel_cost,
            car,
            members,
            created_at: model.created_at,
        }
    }

    pub fn member_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.members.iter().map(|member| member.id)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "journeys")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub space_id: Uuid,
    pub car_id: Uuid,
    pub date: Date,
    pub name: Option<String>,
    pub distance: i32,
    pub fuel_cost: f64,
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
    #[sea_orm(has_many = "super::journey_members::Entity")]
    JourneyMembers,
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

impl Related<super::journey_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JourneyMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! A `Space` is the group of people sharing vehicles. It owns the members and
//! the cars; journeys and refills are recorded inside a space.

use chrono::Utc;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Car, Member};

/// A space with its members and cars, both ordered by name ignoring case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<Member>,
    pub cars: Vec<Car>,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "spaces")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::members::Entity")]
    Members,
    #[sea_orm(has_many = "super::cars::Entity")]
    Cars,
    #[sea_orm(has_many = "super::journeys::Entity")]
    Journeys,
    #[sea_orm(has_many = "super::refills::Entity")]
    Refills,
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::cars::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cars.def()
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

impl ActiveModel {
    pub(crate) fn with_name(name: String) -> Self {
        Self {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(name),
            created_at: ActiveValue::Set(Utc::now()),
        }
    }
}

//! Members of a space.
//!
//! A member flagged as guest takes part in journeys and refills, but it is
//! not expected to reach parity with the group: guests are left out of the
//! average balance and have no deviation.

use chrono::Utc;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub space_id: Uuid,
    pub name: String,
    pub is_guest: bool,
}

impl Member {
    pub fn new(space_id: Uuid, name: String, is_guest: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            space_id,
            name,
            is_guest,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub space_id: Uuid,
    pub name: String,
    pub is_guest: bool,
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
    #[sea_orm(has_many = "super::journey_members::Entity")]
    JourneyMembers,
    #[sea_orm(has_many = "super::refills::Entity")]
    Refills,
}

impl Related<super::spaces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Spaces.def()
    }
}

impl Related<super::journey_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JourneyMembers.def()
    }
}

impl Related<super::refills::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Refills.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Member> for ActiveModel {
    fn from(member: &Member) -> Self {
        Self {
            id: ActiveValue::Set(member.id),
            space_id: ActiveValue::Set(member.space_id),
            name: ActiveValue::Set(member.name.clone()),
            is_guest: ActiveValue::Set(member.is_guest),
            created_at: ActiveValue::Set(Utc::now()),
        }
    }
}

impl From<Model> for Member {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            space_id: model.space_id,
            name: model.name,
            is_guest: model.is_guest,
        }
    }
}

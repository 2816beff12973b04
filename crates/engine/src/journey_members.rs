//! Association between a journey and its travelers.
//!
//! Rows are only created and removed through the membership diff computed
//! when a journey is created, updated or deleted.

use chrono::Utc;
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "journey_members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub journey_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub member_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::journeys::Entity",
        from = "Column::JourneyId",
        to = "super::journeys::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Journeys,
    #[sea_orm(
        belongs_to = "super::members::Entity",
        from = "Column::MemberId",
        to = "super::members::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Members,
}

impl Related<super::journeys::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Journeys.def()
    }
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub(crate) fn link(journey_id: Uuid, member_id: Uuid) -> Self {
        Self {
            journey_id: ActiveValue::Set(journey_id),
            member_id: ActiveValue::Set(member_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
    }
}

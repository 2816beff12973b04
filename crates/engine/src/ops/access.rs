use std::collections::BTreeSet;

use sea_orm::{ConnectionTrait, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, cars, journeys, members, refills, spaces};

use super::Engine;

/// Generates a `require_*_in_space` method loading a row that must belong to
/// the given space.
macro_rules! impl_require_in_space {
    ($require_fn:ident, $entity:path, $model:path, $space_col:expr, $err_msg:literal) => {
        pub(super) async fn $require_fn<C: ConnectionTrait>(
            &self,
            db: &C,
            space_id: Uuid,
            target_id: Uuid,
        ) -> ResultEngine<$model> {
            <$entity>::find_by_id(target_id)
                .filter($space_col.eq(space_id))
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($err_msg.to_string()))
        }
    };
}

impl Engine {
    impl_require_in_space!(
        require_car_in_space,
        cars::Entity,
        cars::Model,
        cars::Column::SpaceId,
        "car not exists"
    );

    impl_require_in_space!(
        require_member_in_space,
        members::Entity,
        members::Model,
        members::Column::SpaceId,
        "member not exists"
    );

    impl_require_in_space!(
        require_journey_in_space,
        journeys::Entity,
        journeys::Model,
        journeys::Column::SpaceId,
        "journey not exists"
    );

    impl_require_in_space!(
        require_refill_in_space,
        refills::Entity,
        refills::Model,
        refills::Column::SpaceId,
        "refill not exists"
    );

    pub(super) async fn require_space<C: ConnectionTrait>(
        &self,
        db: &C,
        space_id: Uuid,
    ) -> ResultEngine<spaces::Model> {
        spaces::Entity::find_by_id(space_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("space not exists".to_string()))
    }

    /// Every id in `member_ids` must be a member of the space.
    pub(super) async fn require_members_in_space<C: ConnectionTrait>(
        &self,
        db: &C,
        space_id: Uuid,
        member_ids: &BTreeSet<Uuid>,
    ) -> ResultEngine<Vec<members::Model>> {
        let models = members::Entity::find()
            .filter(members::Column::SpaceId.eq(space_id))
            .filter(members::Column::Id.is_in(member_ids.iter().copied()))
            .all(db)
            .await?;
        if models.len() != member_ids.len() {
            return Err(EngineError::KeyNotFound("member not exists".to_string()));
        }
        Ok(models)
    }
}

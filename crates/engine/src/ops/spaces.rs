use sea_orm::{
    ActiveModelTrait, QueryFilter, QueryOrder, Statement, TransactionTrait, prelude::*,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::{Car, Member, ResultEngine, Space, cars, members, spaces};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Add a new space.
    pub async fn new_space(&self, name: &str) -> ResultEngine<Uuid> {
        let name = normalize_required_name(name, "space")?;
        let model = spaces::ActiveModel::with_name(name).insert(&self.database).await?;
        tracing::debug!("created space {}", model.id);
        Ok(model.id)
    }

    /// Return a space with its members and cars, both ordered by name.
    pub async fn space(&self, space_id: Uuid) -> ResultEngine<Space> {
        with_tx!(self, |db_tx| { self.load_space(&db_tx, space_id).await })
    }

    pub(super) async fn load_space<C: ConnectionTrait>(
        &self,
        db: &C,
        space_id: Uuid,
    ) -> ResultEngine<Space> {
        let model = self.require_space(db, space_id).await?;

        let members = members::Entity::find()
            .filter(members::Column::SpaceId.eq(space_id))
            .order_by_asc(Expr::cust("LOWER(name)"))
            .all(db)
            .await?
            .into_iter()
            .map(Member::from)
            .collect();

        let cars = cars::Entity::find()
            .filter(cars::Column::SpaceId.eq(space_id))
            .order_by_asc(Expr::cust("LOWER(name)"))
            .all(db)
            .await?
            .into_iter()
            .map(Car::try_from)
            .collect::<ResultEngine<Vec<Car>>>()?;

        Ok(Space {
            id: model.id,
            name: model.name,
            members,
            cars,
        })
    }

    /// Delete a space together with everything it owns.
    pub async fn delete_space(&self, space_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_space(&db_tx, space_id).await?;

            // Journeys and refills restrict deleting their car and payer, so
            // they go before cars and members.
            let backend = self.database.get_database_backend();
            for sql in [
                "DELETE FROM journey_members WHERE journey_id IN (SELECT id FROM journeys WHERE space_id = ?);",
                "DELETE FROM journeys WHERE space_id = ?;",
                "DELETE FROM refills WHERE space_id = ?;",
                "DELETE FROM cars WHERE space_id = ?;",
                "DELETE FROM members WHERE space_id = ?;",
                "DELETE FROM spaces WHERE id = ?;",
            ] {
                db_tx
                    .execute(Statement::from_sql_and_values(
                        backend,
                        sql,
                        vec![space_id.into()],
                    ))
                    .await?;
            }

            tracing::debug!("deleted space {space_id}");
            Ok(())
        })
    }
}

//! Initial schema.
//!
//! - `spaces`: groups sharing vehicles
//! - `members`: people of a space, optionally flagged as guests
//! - `cars`: vehicles of a space with their consumption
//! - `journeys`: trips charged to their travelers
//! - `journey_members`: travelers of each journey
//! - `refills`: fuel paid by a single member

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Spaces {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Members {
    Table,
    Id,
    SpaceId,
    Name,
    IsGuest,
    CreatedAt,
}

#[derive(Iden)]
enum Cars {
    Table,
    Id,
    SpaceId,
    Name,
    Fuel,
    Consumption,
    CreatedAt,
}

#[derive(Iden)]
enum Journeys {
    Table,
    Id,
    SpaceId,
    CarId,
    Date,
    Name,
    Distance,
    FuelCost,
    CreatedAt,
}

#[derive(Iden)]
enum JourneyMembers {
    Table,
    JourneyId,
    MemberId,
    CreatedAt,
}

#[derive(Iden)]
enum Refills {
    Table,
    Id,
    SpaceId,
    CarId,
    MemberId,
    Date,
    Cost,
    FuelCost,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Spaces
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Spaces::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Spaces::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Spaces::Name).string().not_null())
                    .col(
                        ColumnDef::new(Spaces::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Members
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Members::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Members::SpaceId).uuid().not_null())
                    .col(ColumnDef::new(Members::Name).string().not_null())
                    .col(
                        ColumnDef::new(Members::IsGuest)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Members::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-members-space_id")
                            .from(Members::Table, Members::SpaceId)
                            .to(Spaces::Table, Spaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-members-space_id-name-unique")
                    .table(Members::Table)
                    .col(Members::SpaceId)
                    .col(Members::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Cars
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cars::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cars::SpaceId).uuid().not_null())
                    .col(ColumnDef::new(Cars::Name).string().not_null())
                    .col(ColumnDef::new(Cars::Fuel).string().not_null())
                    .col(ColumnDef::new(Cars::Consumption).double().not_null())
                    .col(
                        ColumnDef::new(Cars::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cars-space_id")
                            .from(Cars::Table, Cars::SpaceId)
                            .to(Spaces::Table, Spaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cars-space_id-name-unique")
                    .table(Cars::Table)
                    .col(Cars::SpaceId)
                    .col(Cars::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Journeys
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Journeys::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Journeys::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Journeys::SpaceId).uuid().not_null())
                    .col(ColumnDef::new(Journeys::CarId).uuid().not_null())
                    .col(ColumnDef::new(Journeys::Date).date().not_null())
                    .col(ColumnDef::new(Journeys::Name).string())
                    .col(ColumnDef::new(Journeys::Distance).integer().not_null())
                    .col(ColumnDef::new(Journeys::FuelCost).double().not_null())
                    .col(
                        ColumnDef::new(Journeys::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-journeys-space_id")
                            .from(Journeys::Table, Journeys::SpaceId)
                            .to(Spaces::Table, Spaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-journeys-car_id")
                            .from(Journeys::Table, Journeys::CarId)
                            .to(Cars::Table, Cars::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-journeys-space_id-date")
                    .table(Journeys::Table)
                    .col(Journeys::SpaceId)
                    .col(Journeys::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Journey members
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(JourneyMembers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(JourneyMembers::JourneyId).uuid().not_null())
                    .col(ColumnDef::new(JourneyMembers::MemberId).uuid().not_null())
                    .col(
                        ColumnDef::new(JourneyMembers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(JourneyMembers::JourneyId)
                            .col(JourneyMembers::MemberId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-journey_members-journey_id")
                            .from(JourneyMembers::Table, JourneyMembers::JourneyId)
                            .to(Journeys::Table, Journeys::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-journey_members-member_id")
                            .from(JourneyMembers::Table, JourneyMembers::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-journey_members-member_id")
                    .table(JourneyMembers::Table)
                    .col(JourneyMembers::MemberId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Refills
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Refills::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Refills::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Refills::SpaceId).uuid().not_null())
                    .col(ColumnDef::new(Refills::CarId).uuid().not_null())
                    .col(ColumnDef::new(Refills::MemberId).uuid().not_null())
                    .col(ColumnDef::new(Refills::Date).date().not_null())
                    .col(ColumnDef::new(Refills::Cost).double().not_null())
                    .col(ColumnDef::new(Refills::FuelCost).double())
                    .col(
                        ColumnDef::new(Refills::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-refills-space_id")
                            .from(Refills::Table, Refills::SpaceId)
                            .to(Spaces::Table, Spaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-refills-car_id")
                            .from(Refills::Table, Refills::CarId)
                            .to(Cars::Table, Cars::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-refills-member_id")
                            .from(Refills::Table, Refills::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-refills-space_id-date")
                    .table(Refills::Table)
                    .col(Refills::SpaceId)
                    .col(Refills::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Refills::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JourneyMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Journeys::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Spaces::Table).to_owned())
            .await?;
        Ok(())
    }
}

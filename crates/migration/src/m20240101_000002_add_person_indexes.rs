use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Name lookups filter on both columns
        manager
            .create_index(
                Index::create()
                    .name("idx_person_name")
                    .table(Person::Table)
                    .col(Person::FirstName)
                    .col(Person::LastName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_person_name").table(Person::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Person { Table, FirstName, LastName }

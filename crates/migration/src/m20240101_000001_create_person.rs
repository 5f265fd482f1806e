//! Create `person` table.
//!
//! `email` carries a unique key so concurrent creates cannot both succeed.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Person::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Person::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Person::FirstName).string_len(80).not_null())
                    .col(ColumnDef::new(Person::LastName).string_len(80).not_null())
                    .col(ColumnDef::new(Person::Address).string_len(100).not_null())
                    .col(ColumnDef::new(Person::Gender).string_len(6).not_null())
                    .col(ColumnDef::new(Person::Email).string_len(255).not_null().unique_key())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Person::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Person { Table, Id, FirstName, LastName, Address, Gender, Email }

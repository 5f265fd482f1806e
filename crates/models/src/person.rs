use sea_orm::{entity::prelude::*, sea_query::Expr, QueryOrder, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub gender: String,
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values of a person row, everything except the key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonFields {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub gender: String,
    pub email: String,
}

/// Insert a row; the database assigns `id`.
pub async fn create(db: &DatabaseConnection, fields: PersonFields) -> Result<Model, ModelError> {
    let am = ActiveModel {
        first_name: Set(fields.first_name),
        last_name: Set(fields.last_name),
        address: Set(fields.address),
        gender: Set(fields.gender),
        email: Set(fields.email),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await?)
}

pub async fn find_by_name(db: &DatabaseConnection, first_name: &str, last_name: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::FirstName.eq(first_name))
        .filter(Column::LastName.eq(last_name))
        .order_by_asc(Column::Id)
        .one(db)
        .await?)
}

/// Overwrite every column of row `id` in one statement.
/// Returns `None` when no row has that id.
pub async fn update_by_id(db: &DatabaseConnection, id: i64, fields: PersonFields) -> Result<Option<Model>, ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::FirstName, Expr::value(fields.first_name.clone()))
        .col_expr(Column::LastName, Expr::value(fields.last_name.clone()))
        .col_expr(Column::Address, Expr::value(fields.address.clone()))
        .col_expr(Column::Gender, Expr::value(fields.gender.clone()))
        .col_expr(Column::Email, Expr::value(fields.email.clone()))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;
    if res.rows_affected == 0 {
        return Ok(None);
    }
    Ok(Some(Model {
        id,
        first_name: fields.first_name,
        last_name: fields.last_name,
        address: fields.address,
        gender: fields.gender,
        email: fields.email,
    }))
}

/// Delete row `id`; unknown ids are not an error.
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<(), ModelError> {
    Entity::delete_by_id(id).exec(db).await?;
    Ok(())
}

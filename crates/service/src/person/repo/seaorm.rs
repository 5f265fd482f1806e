use sea_orm::DatabaseConnection;
use tracing::debug;

use models::errors::ModelError;
use models::person;

use crate::person::domain::{NewPerson, Person};
use crate::person::errors::PersonError;
use crate::person::repository::PersonRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmPersonRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPersonRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// The only unique key on `person` is `email`.
fn map_write_err(e: ModelError, email: &str) -> PersonError {
    match e {
        ModelError::UniqueViolation(_) => PersonError::duplicate_email(email),
        other => PersonError::Repository(other.to_string()),
    }
}

/// Update rejected by the email key: the row for `id` keeps its old values,
/// so the caller sees the same outcome as a missing id.
fn map_update_err(e: ModelError, id: i64) -> PersonError {
    match e {
        ModelError::UniqueViolation(msg) => {
            debug!(person_id = id, reason = %msg, "update blocked by email unique key");
            PersonError::id_does_not_exist(id)
        }
        other => PersonError::Repository(other.to_string()),
    }
}

fn map_read_err(e: ModelError) -> PersonError {
    PersonError::Repository(e.to_string())
}

#[async_trait::async_trait]
impl PersonRepository for SeaOrmPersonRepository {
    async fn save(&self, p: NewPerson) -> Result<Person, PersonError> {
        let email = p.email.clone();
        let created = person::create(&self.db, p.into())
            .await
            .map_err(|e| map_write_err(e, &email))?;
        Ok(created.into())
    }

    async fn find_all(&self) -> Result<Vec<Person>, PersonError> {
        let rows = person::list(&self.db).await.map_err(map_read_err)?;
        Ok(rows.into_iter().map(Person::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Person>, PersonError> {
        let res = person::find_by_id(&self.db, id).await.map_err(map_read_err)?;
        Ok(res.map(Person::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Person>, PersonError> {
        let res = person::find_by_email(&self.db, email).await.map_err(map_read_err)?;
        Ok(res.map(Person::from))
    }

    async fn find_by_name(&self, first_name: &str, last_name: &str) -> Result<Option<Person>, PersonError> {
        let res = person::find_by_name(&self.db, first_name, last_name)
            .await
            .map_err(map_read_err)?;
        Ok(res.map(Person::from))
    }

    async fn update(&self, p: Person) -> Result<Option<Person>, PersonError> {
        let id = p.id;
        let res = person::update_by_id(&self.db, id, NewPerson::from(p).into())
            .await
            .map_err(|e| map_update_err(e, id))?;
        Ok(res.map(Person::from))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), PersonError> {
        person::delete(&self.db, id).await.map_err(map_read_err)
    }
}

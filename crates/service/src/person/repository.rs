use async_trait::async_trait;

use super::domain::{NewPerson, Person};
use super::errors::PersonError;

/// Storage capability for person records.
///
/// Implementations enforce email uniqueness themselves and report a clash as
/// `PersonError::DuplicateEmail`, so the service check is not the only guard.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert and return the record with its assigned id.
    async fn save(&self, person: NewPerson) -> Result<Person, PersonError>;
    /// All records ordered by id.
    async fn find_all(&self) -> Result<Vec<Person>, PersonError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Person>, PersonError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Person>, PersonError>;
    async fn find_by_name(&self, first_name: &str, last_name: &str) -> Result<Option<Person>, PersonError>;
    /// Overwrite the record with `person.id` in a single write. `None` if no such record.
    /// A new email already held by another record leaves the row untouched and fails
    /// with `PersonError::NotFound` for `person.id`.
    async fn update(&self, person: Person) -> Result<Option<Person>, PersonError>;
    /// Remove by id. Unknown ids are not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), PersonError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Rows {
        last_id: i64,
        by_id: BTreeMap<i64, Person>,
    }

    impl Rows {
        fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
            self.by_id
                .values()
                .any(|p| p.email == email && Some(p.id) != except)
        }
    }

    #[derive(Default)]
    pub struct InMemoryPersonRepository {
        rows: Mutex<Rows>,
    }

    impl InMemoryPersonRepository {
        fn lock(&self) -> Result<std::sync::MutexGuard<'_, Rows>, PersonError> {
            self.rows
                .lock()
                .map_err(|e| PersonError::Repository(e.to_string()))
        }
    }

    #[async_trait]
    impl PersonRepository for InMemoryPersonRepository {
        async fn save(&self, person: NewPerson) -> Result<Person, PersonError> {
            let mut rows = self.lock()?;
            if rows.email_taken(&person.email, None) {
                return Err(PersonError::duplicate_email(&person.email));
            }
            rows.last_id += 1;
            let stored = person.with_id(rows.last_id);
            rows.by_id.insert(stored.id, stored.clone());
            Ok(stored)
        }

        async fn find_all(&self) -> Result<Vec<Person>, PersonError> {
            Ok(self.lock()?.by_id.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Person>, PersonError> {
            Ok(self.lock()?.by_id.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Person>, PersonError> {
            Ok(self.lock()?.by_id.values().find(|p| p.email == email).cloned())
        }

        async fn find_by_name(&self, first_name: &str, last_name: &str) -> Result<Option<Person>, PersonError> {
            Ok(self
                .lock()?
                .by_id
                .values()
                .find(|p| p.first_name == first_name && p.last_name == last_name)
                .cloned())
        }

        async fn update(&self, person: Person) -> Result<Option<Person>, PersonError> {
            let mut rows = self.lock()?;
            if !rows.by_id.contains_key(&person.id) {
                return Ok(None);
            }
            if rows.email_taken(&person.email, Some(person.id)) {
                return Err(PersonError::id_does_not_exist(person.id));
            }
            rows.by_id.insert(person.id, person.clone());
            Ok(Some(person))
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), PersonError> {
            self.lock()?.by_id.remove(&id);
            Ok(())
        }
    }
}

use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{NewPerson, Person};
use super::errors::PersonError;
use super::repository::PersonRepository;

/// Person business service independent of web framework.
///
/// Holds the injected store; cheap to share behind an `Arc`.
pub struct PersonService {
    repo: Arc<dyn PersonRepository>,
}

impl PersonService {
    pub fn new(repo: Arc<dyn PersonRepository>) -> Self { Self { repo } }

    /// Create a person unless another record already uses the email.
    ///
    /// # Examples
    /// ```
    /// use service::person::{NewPerson, PersonService, repository::mock::InMemoryPersonRepository};
    /// use std::sync::Arc;
    /// let svc = PersonService::new(Arc::new(InMemoryPersonRepository::default()));
    /// let input = NewPerson { first_name: "Vilma".into(), last_name: "Cleide".into(), address: "Rua das Flores, 123".into(), gender: "F".into(), email: "vilma.cleide@email.com".into() };
    /// let created = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(created.first_name, "Vilma");
    /// assert!(created.id > 0);
    /// ```
    #[instrument(skip(self, person), fields(email = %person.email))]
    pub async fn create(&self, person: NewPerson) -> Result<Person, PersonError> {
        if let Some(existing) = self.repo.find_by_email(&person.email).await? {
            debug!(person_id = existing.id, "email already registered");
            return Err(PersonError::duplicate_email(&person.email));
        }
        // The store's unique key still rejects a concurrent insert that passed the check above.
        let created = self.repo.save(person).await?;
        info!(person_id = created.id, email = %created.email, "person_created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Person>, PersonError> {
        self.repo.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<Person, PersonError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| PersonError::id_not_found(id))
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, first_name: &str, last_name: &str) -> Result<Person, PersonError> {
        self.repo
            .find_by_name(first_name, last_name)
            .await?
            .ok_or_else(|| PersonError::name_not_found(first_name, last_name))
    }

    /// Replace every field of an existing person.
    ///
    /// # Examples
    /// ```
    /// use service::person::{NewPerson, PersonError, PersonService, repository::mock::InMemoryPersonRepository};
    /// use std::sync::Arc;
    /// let svc = PersonService::new(Arc::new(InMemoryPersonRepository::default()));
    /// let input = NewPerson { first_name: "X".into(), last_name: "Y".into(), address: "Z".into(), gender: "M".into(), email: "x.y@email.com".into() };
    /// let err = tokio_test::block_on(svc.update(input.with_id(999))).unwrap_err();
    /// assert_eq!(err, PersonError::NotFound("Person with id 999 does not exist.".into()));
    /// ```
    #[instrument(skip(self, person), fields(person_id = person.id))]
    pub async fn update(&self, person: Person) -> Result<Person, PersonError> {
        let id = person.id;
        let updated = self
            .repo
            .update(person)
            .await?
            .ok_or_else(|| PersonError::id_does_not_exist(id))?;
        info!(person_id = updated.id, "person_updated");
        Ok(updated)
    }

    /// Delete without an existence check; unknown ids succeed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), PersonError> {
        self.repo.delete_by_id(id).await?;
        info!(person_id = id, "person_deleted");
        Ok(())
    }
}

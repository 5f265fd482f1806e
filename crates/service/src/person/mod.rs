//! Person module: three-layer architecture (domain, repository, service).

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{NewPerson, Person};
pub use errors::PersonError;
pub use repository::PersonRepository;
pub use service::PersonService;

//! Service layer for person records.
//! - Separates business rules (unique email, existing id) from data access.
//! - Storage sits behind the `PersonRepository` trait and is injected at construction.

pub mod person;
#[cfg(test)]
pub mod test_support;

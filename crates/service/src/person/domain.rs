use serde::{Deserialize, Serialize};

/// A stored contact record. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    pub gender: String,
    pub email: String,
}

/// Create input. An `id` in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub address: String,
    pub gender: String,
    pub email: String,
}

impl NewPerson {
    pub fn with_id(self, id: i64) -> Person {
        Person {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            gender: self.gender,
            email: self.email,
        }
    }
}

impl From<Person> for NewPerson {
    fn from(p: Person) -> Self {
        Self {
            first_name: p.first_name,
            last_name: p.last_name,
            address: p.address,
            gender: p.gender,
            email: p.email,
        }
    }
}

impl From<models::person::Model> for Person {
    fn from(m: models::person::Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            address: m.address,
            gender: m.gender,
            email: m.email,
        }
    }
}

impl From<NewPerson> for models::person::PersonFields {
    fn from(p: NewPerson) -> Self {
        Self {
            first_name: p.first_name,
            last_name: p.last_name,
            address: p.address,
            gender: p.gender,
            email: p.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_camel_case_field_names() {
        let p = Person {
            id: 7,
            first_name: "Vilma".into(),
            last_name: "Cleide".into(),
            address: "Rua das Flores, 123".into(),
            gender: "F".into(),
            email: "vilma.cleide@email.com".into(),
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["firstName"], "Vilma");
        assert_eq!(v["lastName"], "Cleide");
        assert!(v.get("first_name").is_none());
    }

    #[test]
    fn create_input_ignores_id_and_defaults_address() {
        let input: NewPerson = serde_json::from_str(
            r#"{"id": 42, "firstName": "Emily", "lastName": "Pereira", "gender": "F", "email": "emily@gmail.com"}"#,
        )
        .unwrap();
        assert_eq!(input.address, "");
        assert_eq!(input.clone().with_id(3).id, 3);
    }
}

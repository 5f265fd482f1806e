use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use models::db::{connect_with_config, DatabaseConfig};
use server::routes::{self, AppState};
use service::person::{NewPerson, Person, PersonError, PersonRepository, PersonService};

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

/// Router over a freshly migrated in-memory database.
async fn build_app() -> anyhow::Result<Router> {
    let db = connect_with_config(&DatabaseConfig::in_memory_sqlite()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(routes::build_router(AppState::from_db(db), cors()))
}

fn json_request(method: &str, uri: &str, body: &Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?)
}

fn empty_request(method: &str, uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().method(method).uri(uri).body(Body::empty())?)
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

fn vilma() -> Value {
    json!({
        "firstName": "Vilma",
        "lastName": "Cleide",
        "address": "Rua das Flores, 123",
        "gender": "F",
        "email": "vilma.cleide@email.com"
    })
}

fn giordanni() -> Value {
    json!({
        "firstName": "Giordanni",
        "lastName": "Formiga",
        "address": "123 Main St",
        "gender": "M",
        "email": "giordanni@gmail.com"
    })
}

async fn create(app: &Router, body: &Value) -> anyhow::Result<Value> {
    let (status, bytes) = send(app, json_request("POST", "/person", body)?).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn create_returns_201_with_assigned_id() -> anyhow::Result<()> {
    let app = build_app().await?;

    let created = create(&app, &vilma()).await?;

    assert!(created["id"].as_i64().is_some_and(|id| id > 0));
    assert_eq!(created["firstName"], "Vilma");
    assert_eq!(created["email"], "vilma.cleide@email.com");
    Ok(())
}

#[tokio::test]
async fn create_ignores_client_supplied_id() -> anyhow::Result<()> {
    let app = build_app().await?;
    let mut body = vilma();
    body["id"] = json!(777);

    let created = create(&app, &body).await?;

    assert_ne!(created["id"], 777);
    Ok(())
}

#[tokio::test]
async fn create_with_existing_email_returns_400() -> anyhow::Result<()> {
    let app = build_app().await?;
    create(&app, &json!({
        "firstName": "Dup", "lastName": "Licado", "address": "Rua A", "gender": "M", "email": "duplicado@email.com"
    })).await?;

    let (status, body) = send(&app, json_request("POST", "/person", &json!({
        "firstName": "Outra", "lastName": "Pessoa", "address": "Rua B", "gender": "F", "email": "duplicado@email.com"
    }))?).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());
    let (_, all) = send(&app, empty_request("GET", "/person/all")?).await?;
    assert_eq!(serde_json::from_slice::<Value>(&all)?.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn list_all_is_empty_array_then_grows() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = send(&app, empty_request("GET", "/person/all")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!([]));

    create(&app, &giordanni()).await?;
    create(&app, &vilma()).await?;

    let (status, body) = send(&app, empty_request("GET", "/person/all")?).await?;
    assert_eq!(status, StatusCode::OK);
    let list: Value = serde_json::from_slice(&body)?;
    let names: Vec<&str> = list
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|p| p["firstName"].as_str())
        .collect();
    assert_eq!(names, vec!["Giordanni", "Vilma"]);
    Ok(())
}

#[tokio::test]
async fn get_by_id_returns_person() -> anyhow::Result<()> {
    let app = build_app().await?;
    let created = create(&app, &giordanni()).await?;

    let (status, body) = send(&app, empty_request("GET", &format!("/person/{}", created["id"]))?).await?;

    assert_eq!(status, StatusCode::OK);
    let found: Value = serde_json::from_slice(&body)?;
    assert_eq!(found, created);
    Ok(())
}

#[tokio::test]
async fn get_unknown_id_returns_404_with_empty_body() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = send(&app, empty_request("GET", "/person/999")?).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_replaces_record() -> anyhow::Result<()> {
    let app = build_app().await?;
    let created = create(&app, &giordanni()).await?;

    let mut changed = created.clone();
    changed["address"] = json!("Novo Endereço");
    let (status, body) = send(&app, json_request("PUT", "/person", &changed)?).await?;

    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_slice(&body)?;
    assert_eq!(updated, changed);
    assert_eq!(updated["lastName"], "Formiga");

    let (_, body) = send(&app, empty_request("GET", &format!("/person/{}", created["id"]))?).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?["address"], "Novo Endereço");
    Ok(())
}

#[tokio::test]
async fn update_unknown_id_returns_404() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, _) = send(&app, json_request("PUT", "/person", &json!({
        "id": 999, "firstName": "X", "lastName": "Y", "address": "Z", "gender": "M", "email": "x.y@email.com"
    }))?).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, all) = send(&app, empty_request("GET", "/person/all")?).await?;
    assert_eq!(serde_json::from_slice::<Value>(&all)?, json!([]));
    Ok(())
}

#[tokio::test]
async fn update_onto_taken_email_returns_404_and_keeps_record() -> anyhow::Result<()> {
    let app = build_app().await?;
    let owner = create(&app, &vilma()).await?;
    let mover = create(&app, &giordanni()).await?;

    let mut clash = mover.clone();
    clash["email"] = owner["email"].clone();
    let (status, body) = send(&app, json_request("PUT", "/person", &clash)?).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
    let (_, body) = send(&app, empty_request("GET", &format!("/person/{}", mover["id"]))?).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?, mover);
    Ok(())
}

#[tokio::test]
async fn delete_returns_204_and_removes_person() -> anyhow::Result<()> {
    let app = build_app().await?;
    let created = create(&app, &giordanni()).await?;
    let uri = format!("/person/{}", created["id"]);

    let (status, body) = send(&app, empty_request("DELETE", &uri)?).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, empty_request("GET", &uri)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_unknown_id_is_still_204() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, _) = send(&app, empty_request("DELETE", "/person/424242")?).await?;

    assert_eq!(status, StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn search_by_name() -> anyhow::Result<()> {
    let app = build_app().await?;
    let created = create(&app, &vilma()).await?;

    let (status, body) = send(&app, empty_request("GET", "/person/search?firstName=Vilma&lastName=Cleide")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, created);

    let (status, _) = send(&app, empty_request("GET", "/person/search?firstName=Vilma&lastName=Nobody")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn health_metrics_and_docs_are_served() -> anyhow::Result<()> {
    let app = build_app().await?;
    create(&app, &vilma()).await?;

    let (status, body) = send(&app, empty_request("GET", "/health")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?["status"], "ok");

    let (status, body) = send(&app, empty_request("GET", "/metrics")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body)?.contains("person_api_requests_total"));

    let (status, body) = send(&app, empty_request("GET", "/api-docs/openapi.json")?).await?;
    assert_eq!(status, StatusCode::OK);
    let doc: Value = serde_json::from_slice(&body)?;
    assert!(doc["paths"]["/person/{id}"].is_object());
    Ok(())
}

/// Store whose every call fails, for the 5xx path.
struct UnavailableRepository;

#[async_trait]
impl PersonRepository for UnavailableRepository {
    async fn save(&self, _: NewPerson) -> Result<Person, PersonError> {
        Err(PersonError::Repository("pool timed out".into()))
    }
    async fn find_all(&self) -> Result<Vec<Person>, PersonError> {
        Err(PersonError::Repository("pool timed out".into()))
    }
    async fn find_by_id(&self, _: i64) -> Result<Option<Person>, PersonError> {
        Err(PersonError::Repository("pool timed out".into()))
    }
    async fn find_by_email(&self, _: &str) -> Result<Option<Person>, PersonError> {
        Err(PersonError::Repository("pool timed out".into()))
    }
    async fn find_by_name(&self, _: &str, _: &str) -> Result<Option<Person>, PersonError> {
        Err(PersonError::Repository("pool timed out".into()))
    }
    async fn update(&self, _: Person) -> Result<Option<Person>, PersonError> {
        Err(PersonError::Repository("pool timed out".into()))
    }
    async fn delete_by_id(&self, _: i64) -> Result<(), PersonError> {
        Err(PersonError::Repository("pool timed out".into()))
    }
}

#[tokio::test]
async fn store_failure_maps_to_500() -> anyhow::Result<()> {
    let svc = Arc::new(PersonService::new(Arc::new(UnavailableRepository)));
    let app = routes::build_router(AppState::new(svc), cors());

    let (status, _) = send(&app, empty_request("GET", "/person/all")?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, json_request("POST", "/person", &vilma())?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, empty_request("DELETE", "/person/1")?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn update_without_id_is_rejected_before_the_service() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, _) = send(&app, json_request("PUT", "/person", &vilma())?).await?;

    assert!(status.is_client_error());
    Ok(())
}

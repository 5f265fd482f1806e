use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use common::metrics;
use service::person::{NewPerson, Person, PersonError};

use crate::errors::ApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
}

/// Count the request under `operation` and hand the result back unchanged.
fn observe<T>(operation: &str, res: Result<T, PersonError>) -> Result<T, ApiError> {
    let outcome = match &res {
        Ok(_) => "ok",
        Err(PersonError::DuplicateEmail(_)) => "duplicate_email",
        Err(PersonError::NotFound(_)) => "not_found",
        Err(PersonError::Repository(_)) => "error",
    };
    metrics::record(operation, outcome);
    res.map_err(ApiError::from)
}

#[utoipa::path(
    get, path = "/person/all", tag = "person",
    responses((status = 200, description = "All persons, possibly empty", body = [crate::openapi::PersonDoc]))
)]
pub async fn find_all(State(state): State<AppState>) -> Result<Json<Vec<Person>>, ApiError> {
    let list = observe("find_all", state.persons.find_all().await)?;
    info!(count = list.len(), "list persons");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/person/{id}", tag = "person",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PersonDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn find_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Person>, ApiError> {
    observe("find_by_id", state.persons.find_by_id(id).await).map(Json)
}

#[utoipa::path(
    get, path = "/person/search", tag = "person",
    params(NameQuery),
    responses(
        (status = 200, description = "OK", body = crate::openapi::PersonDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn search(State(state): State<AppState>, Query(q): Query<NameQuery>) -> Result<Json<Person>, ApiError> {
    observe("search", state.persons.find_by_name(&q.first_name, &q.last_name).await).map(Json)
}

#[utoipa::path(
    post, path = "/person", tag = "person",
    request_body = crate::openapi::NewPersonDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::PersonDoc),
        (status = 400, description = "Email already exists")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewPerson>,
) -> Result<(StatusCode, Json<Person>), ApiError> {
    let created = observe("create", state.persons.create(input).await)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/person", tag = "person",
    request_body = crate::openapi::PersonDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::PersonDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(State(state): State<AppState>, Json(person): Json<Person>) -> Result<Json<Person>, ApiError> {
    observe("update", state.persons.update(person).await).map(Json)
}

#[utoipa::path(
    delete, path = "/person/{id}", tag = "person",
    params(("id" = i64, Path, description = "Person id")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    observe("delete", state.persons.delete(id).await)?;
    Ok(StatusCode::NO_CONTENT)
}

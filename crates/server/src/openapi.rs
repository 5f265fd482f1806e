use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Stored person as returned by every read and write.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonDoc {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub gender: String,
    pub email: String,
}

/// Create payload; `id` is assigned by the server.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPersonDoc {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub gender: String,
    pub email: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::person::find_all,
        crate::routes::person::find_by_id,
        crate::routes::person::search,
        crate::routes::person::create,
        crate::routes::person::update,
        crate::routes::person::delete,
    ),
    components(
        schemas(
            HealthResponse,
            PersonDoc,
            NewPersonDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "person")
    )
)]
pub struct ApiDoc;

// Generic CRUD handlers shared by the pass-through resources: leads, pets,
// products and carousel slides. The collection name and the noun used in
// error messages travel as a request extension.

use crate::api::AppState;
use crate::error::Error;
use crate::records::Record;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy)]
pub struct Resource {
    pub collection: &'static str,
    pub noun: &'static str,
}

impl Resource {
    pub fn new(collection: &'static str, noun: &'static str) -> Self {
        Self { collection, noun }
    }
}

pub fn routes(resource: Resource) -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(fetch).put(update).delete(remove))
        .layer(Extension(resource))
}

async fn list(
    State(state): State<AppState>,
    Extension(resource): Extension<Resource>,
) -> Json<Vec<Record>> {
    Json(state.store.get_all(resource.collection))
}

async fn fetch(
    State(state): State<AppState>,
    Extension(resource): Extension<Resource>,
    Path(id): Path<u64>,
) -> Result<Json<Record>, Error> {
    state
        .store
        .get_by_id(resource.collection, id)
        .map(Json)
        .ok_or(Error::NotFound(resource.noun))
}

async fn create(
    State(state): State<AppState>,
    Extension(resource): Extension<Resource>,
    Json(fields): Json<Record>,
) -> Result<(StatusCode, Json<Record>), Error> {
    let record = state.store.create(resource.collection, fields)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update(
    State(state): State<AppState>,
    Extension(resource): Extension<Resource>,
    Path(id): Path<u64>,
    Json(updates): Json<Record>,
) -> Result<Json<Record>, Error> {
    state
        .store
        .update(resource.collection, id, updates)?
        .map(Json)
        .ok_or(Error::NotFound(resource.noun))
}

async fn remove(
    State(state): State<AppState>,
    Extension(resource): Extension<Resource>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, Error> {
    if state.store.delete(resource.collection, id)? {
        Ok(Json(json!({
            "message": format!("{} deleted successfully", resource.noun)
        })))
    } else {
        Err(Error::NotFound(resource.noun))
    }
}

// Blog endpoints. The domain rules live in `crate::blog`; these handlers
// parse the request and pick the response code.

use crate::api::AppState;
use crate::blog::{self, BlogQuery};
use crate::error::Error;
use crate::models::{BlogPost, PostPage};
use crate::records::Record;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/import", post(import))
        .route("/{id}", get(fetch).put(update).delete(remove))
}

async fn list(State(state): State<AppState>, Query(query): Query<BlogQuery>) -> Json<PostPage> {
    Json(blog::list(&state.store, &query))
}

async fn create(
    State(state): State<AppState>,
    Json(post): Json<BlogPost>,
) -> Result<(StatusCode, Json<BlogPost>), Error> {
    let created = blog::create(&state.store, post)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Detail lookup by numeric id, falling back to slug. Public reads bump the
/// view counter; reads referred from the admin area do not. The referrer
/// check is a heuristic, not an access-control boundary.
async fn fetch(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Result<Json<BlogPost>, Error> {
    let mut post = blog::find(&state.store, &key).ok_or(Error::NotFound("Blog post"))?;

    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok());
    if let Some(referer) = referer {
        if !referer.contains("/admin") {
            blog::record_view(&state.store, &mut post)?;
        }
    }

    Ok(Json(post))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(updates): Json<Record>,
) -> Result<Json<BlogPost>, Error> {
    blog::update(&state.store, id, updates).map(Json)
}

async fn remove(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, Error> {
    if state.store.delete(blog::COLLECTION, id)? {
        Ok(Json(json!({ "message": "Blog post deleted successfully" })))
    } else {
        Err(Error::NotFound("Blog post"))
    }
}

async fn import(
    State(state): State<AppState>,
    Json(posts): Json<Vec<BlogPost>>,
) -> Result<Json<Value>, Error> {
    let imported = blog::import(&state.store, posts)?;
    Ok(Json(json!({ "imported": imported })))
}

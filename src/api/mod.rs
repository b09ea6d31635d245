// HTTP surface: one route family per resource over the collection store.
// Everything responds with JSON; CORS is wide open because this serves a
// trusted single-tenant admin UI.

pub mod activity;
pub mod blog;
pub mod credentials;
pub mod images;
pub mod resources;
pub mod settings;

use crate::config::Config;
use crate::store::Store;
use axum::Router;
use axum::routing::{delete, get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use resources::Resource;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/leads", resources::routes(Resource::new("leads", "Lead")))
        .nest("/api/pets", resources::routes(Resource::new("pets", "Pet")))
        .nest(
            "/api/products",
            resources::routes(Resource::new("products", "Product")),
        )
        .nest(
            "/api/carousel",
            resources::routes(Resource::new("carousel", "Carousel slide")),
        )
        .nest("/api/blog", blog::routes())
        .route("/api/activity", get(activity::list))
        .route("/api/settings", get(settings::fetch).post(settings::save))
        .route(
            "/api/admin/credentials",
            get(credentials::fetch).post(credentials::save),
        )
        .route("/api/images", delete(images::remove))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

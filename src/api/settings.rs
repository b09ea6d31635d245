// Site settings: a singleton collection. Reads fall back to the built-in
// defaults; writes update the sole record or create it.

use crate::api::AppState;
use crate::error::Error;
use crate::models::Settings;
use crate::records::{Record, record_id};
use axum::Json;
use axum::extract::State;
use serde_json::Value;

pub const COLLECTION: &str = "settings";

pub async fn fetch(State(state): State<AppState>) -> Json<Value> {
    match state.store.get_all(COLLECTION).into_iter().next() {
        Some(record) => Json(Value::Object(record)),
        None => Json(serde_json::to_value(Settings::default()).unwrap_or_default()),
    }
}

pub async fn save(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<Json<Record>, Error> {
    if settings.general.store_name.trim().is_empty() {
        return Err(Error::validation("Store name is required"));
    }

    let record = match serde_json::to_value(settings) {
        Ok(Value::Object(map)) => map,
        _ => Record::new(),
    };

    let existing = state.store.get_all(COLLECTION);
    let saved = match existing.first().and_then(record_id) {
        Some(id) => state
            .store
            .update(COLLECTION, id, record)?
            .ok_or(Error::NotFound("Settings"))?,
        None => state.store.create(COLLECTION, record)?,
    };

    Ok(Json(saved))
}

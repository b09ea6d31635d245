// Admin credentials: a singleton like settings. The stored password hash is
// never echoed back; authentication itself lives elsewhere.

use crate::api::AppState;
use crate::error::Error;
use crate::models::CredentialsUpdate;
use crate::records::{Record, record_id};
use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

pub const COLLECTION: &str = "admin_credentials";

fn sanitize(mut record: Record) -> Record {
    record.remove("passwordHash");
    record
}

pub async fn fetch(State(state): State<AppState>) -> Json<Value> {
    match state.store.get_all(COLLECTION).into_iter().next() {
        Some(record) => Json(Value::Object(sanitize(record))),
        None => Json(json!({
            "username": "admin",
            "email": "admin@woofnwhiskers.com"
        })),
    }
}

pub async fn save(
    State(state): State<AppState>,
    Json(update): Json<CredentialsUpdate>,
) -> Result<Json<Record>, Error> {
    if update.username.trim().is_empty() {
        return Err(Error::validation("Username is required"));
    }
    if update.email.trim().is_empty() {
        return Err(Error::validation("Email is required"));
    }

    let existing = state.store.get_all(COLLECTION);
    let current_hash = existing
        .first()
        .and_then(|record| record.get("passwordHash"))
        .and_then(Value::as_str)
        .map(str::to_string);

    // Keep the old hash unless a new password was supplied
    let password_hash = update
        .new_password
        .or(current_hash)
        .unwrap_or_else(|| "password".to_string());

    let mut record = Record::new();
    record.insert("username".to_string(), Value::from(update.username));
    record.insert("email".to_string(), Value::from(update.email));
    record.insert("passwordHash".to_string(), Value::from(password_hash));

    let saved = match existing.first().and_then(record_id) {
        Some(id) => state
            .store
            .update(COLLECTION, id, record)?
            .ok_or(Error::NotFound("Credentials"))?,
        None => state.store.create(COLLECTION, record)?,
    };

    Ok(Json(sanitize(saved)))
}

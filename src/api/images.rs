// Image cleanup. Deleting an image file cascades into whichever collections
// reference it: carousel slides are removed outright, pets and products fall
// back to a default image.

use crate::api::AppState;
use crate::error::Error;
use crate::records::{Record, record_id};
use crate::store::Store;
use axum::Json;
use axum::extract::State;
use eyre::Context;
use serde::Deserialize;
use serde_json::{Value, json};
use std::fs;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteImage {
    pub image_path: String,
    pub category: Option<String>,
}

pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<DeleteImage>,
) -> Result<Json<Value>, Error> {
    if request.image_path.trim().is_empty() {
        return Err(Error::validation("Image path is required"));
    }

    let relative = request.image_path.trim_start_matches('/');
    if relative.split('/').any(|segment| segment == "..") {
        return Err(Error::validation("Invalid image path"));
    }

    let full_path = state.config.images_dir.join(relative);
    if !full_path.exists() {
        return Err(Error::NotFound("Image file"));
    }
    fs::remove_file(&full_path).context("Failed to delete image file")?;

    match request.category.as_deref() {
        Some("carousel") => {
            let removed = delete_referencing(&state.store, "carousel", &request.image_path)?;
            info!(removed, "Deleted carousel slides using removed image");
        }
        Some("pets") => {
            let reset = reset_image(
                &state.store,
                "pets",
                &request.image_path,
                "/images/pets/default.jpg",
            )?;
            info!(reset, "Reset pet images to default");
        }
        Some("products") => {
            let reset = reset_image(
                &state.store,
                "products",
                &request.image_path,
                "/images/products/default.jpg",
            )?;
            info!(reset, "Reset product images to default");
        }
        _ => {}
    }

    let filename = full_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("")
        .to_string();
    Ok(Json(json!({
        "success": true,
        "message": format!("Image {} deleted successfully", filename)
    })))
}

fn uses_image(record: &Record, image_path: &str) -> bool {
    record.get("imageUrl").and_then(Value::as_str) == Some(image_path)
}

fn delete_referencing(store: &Store, collection: &str, image_path: &str) -> eyre::Result<usize> {
    let mut removed = 0;
    for record in store.get_all(collection) {
        if uses_image(&record, image_path) {
            if let Some(id) = record_id(&record) {
                if store.delete(collection, id)? {
                    removed += 1;
                }
            }
        }
    }
    Ok(removed)
}

fn reset_image(
    store: &Store,
    collection: &str,
    image_path: &str,
    default_path: &str,
) -> eyre::Result<usize> {
    let mut reset = 0;
    for record in store.get_all(collection) {
        if uses_image(&record, image_path) {
            if let Some(id) = record_id(&record) {
                let mut updates = Record::new();
                updates.insert("imageUrl".to_string(), Value::from(default_path));
                if store.update(collection, id, updates)?.is_some() {
                    reset += 1;
                }
            }
        }
    }
    Ok(reset)
}

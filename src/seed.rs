// Demonstration fixture data. The production activity feed returns nothing
// when the collections are empty; anyone who wants a populated dashboard
// runs `whiskers seed` instead.

use crate::records::Record;
use crate::store::Store;
use eyre::Result;
use serde_json::{Value, json};
use tracing::info;

fn to_record(value: Value) -> Record {
    value.as_object().cloned().unwrap_or_default()
}

/// Populate empty collections with sample content. Collections that already
/// hold data are left alone.
pub fn seed(store: &Store) -> Result<()> {
    seed_collection(
        store,
        "pets",
        vec![
            json!({"name": "Max", "breed": "Golden Retriever", "species": "dog", "age": "2 years", "price": 25000, "adopted": false, "imageUrl": "/images/pets/default.jpg"}),
            json!({"name": "Luna", "breed": "Persian Cat", "species": "cat", "age": "1 year", "price": 18000, "adopted": false, "imageUrl": "/images/pets/default.jpg"}),
            json!({"name": "Rocky", "breed": "Labrador", "species": "dog", "age": "3 years", "price": 22000, "adopted": true, "imageUrl": "/images/pets/default.jpg"}),
        ],
    )?;

    seed_collection(
        store,
        "products",
        vec![
            json!({"name": "Premium Dog Food - 5kg", "category": "food", "price": 1800, "stock": 40, "imageUrl": "/images/products/default.jpg"}),
            json!({"name": "Cat Litter Box - Medium", "category": "accessories", "price": 950, "stock": 15, "imageUrl": "/images/products/default.jpg"}),
            json!({"name": "Dog Collar - Large", "category": "accessories", "price": 450, "stock": 60, "imageUrl": "/images/products/default.jpg"}),
        ],
    )?;

    seed_collection(
        store,
        "carousel",
        vec![
            json!({"title": "Find your new best friend", "subtitle": "Puppies and kittens looking for a home", "imageUrl": "/images/carousel/slide1.jpg", "link": "/pets"}),
            json!({"title": "Everything they need", "subtitle": "Food, toys and accessories", "imageUrl": "/images/carousel/slide2.jpg", "link": "/accessories"}),
        ],
    )?;

    seed_collection(
        store,
        "leads",
        vec![
            json!({"name": "Rahul Sharma", "email": "rahul@example.com", "phone": "+91 98100 00000", "message": "Interested in the Golden Retriever", "status": "new", "petId": 1}),
        ],
    )?;

    seed_collection(
        store,
        "blog_posts",
        vec![
            json!({"title": "Bringing your puppy home", "slug": "bringing-your-puppy-home", "excerpt": "The first week matters most.", "content": "Set up a quiet corner before the big day...", "category": "care", "tags": ["dogs", "adoption"], "published": true, "publishedAt": crate::records::now_iso(), "views": 0}),
        ],
    )?;

    Ok(())
}

fn seed_collection(store: &Store, collection: &str, samples: Vec<Value>) -> Result<()> {
    if !store.get_all(collection).is_empty() {
        info!(collection, "Collection already has data, skipping seed");
        return Ok(());
    }

    let count = samples.len();
    for sample in samples {
        store.create(collection, to_record(sample))?;
    }
    info!(collection, count, "Seeded collection");
    Ok(())
}

// Blog post operations on top of the collection store: slug handling,
// publish stamping, filtered/paginated listing and the view counter.

use crate::error::Error;
use crate::models::{BlogPost, PostPage, paginate};
use crate::records::{Record, now_iso, record_id};
use crate::store::Store;
use chrono::{DateTime, Utc};
use eyre::eyre;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

pub const COLLECTION: &str = "blog_posts";

/// Listing filters, deserialized straight from the query string.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub published: Option<bool>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    10
}

impl Default for BlogQuery {
    fn default() -> Self {
        Self {
            category: None,
            tag: None,
            search: None,
            published: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// Derive a URL slug from a title: lowercase, punctuation stripped,
/// whitespace runs collapsed to single hyphens.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn load_posts(store: &Store) -> Vec<BlogPost> {
    store
        .get_all(COLLECTION)
        .into_iter()
        .filter_map(|record| {
            let id = record_id(&record);
            BlogPost::from_record(record).or_else(|| {
                warn!(?id, "Skipping blog record with unexpected shape");
                None
            })
        })
        .collect()
}

/// Effective publish date used for ordering: `publishedAt` when present,
/// otherwise `createdAt`.
fn effective_date(post: &BlogPost) -> DateTime<Utc> {
    post.published_at
        .as_deref()
        .or(post.created_at.as_deref())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Filtered, sorted and paginated listing. Sort order is effective publish
/// date descending.
pub fn list(store: &Store, query: &BlogQuery) -> PostPage {
    let mut posts = load_posts(store);
    posts.sort_by(|a, b| effective_date(b).cmp(&effective_date(a)));

    if let Some(published) = query.published {
        posts.retain(|post| post.published == published);
    }
    if let Some(category) = &query.category {
        posts.retain(|post| post.category.as_deref() == Some(category.as_str()));
    }
    if let Some(tag) = &query.tag {
        posts.retain(|post| post.tags.iter().any(|t| t == tag));
    }
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        posts.retain(|post| {
            post.title.to_lowercase().contains(&needle)
                || post.excerpt.to_lowercase().contains(&needle)
                || post.content.to_lowercase().contains(&needle)
        });
    }

    let (posts, pagination) = paginate(posts, query.page, query.limit);
    PostPage { posts, pagination }
}

/// Resolve a post by numeric id first, slug second.
pub fn find(store: &Store, key: &str) -> Option<BlogPost> {
    if let Ok(id) = key.parse::<u64>() {
        if let Some(record) = store.get_by_id(COLLECTION, id) {
            return BlogPost::from_record(record);
        }
    }
    load_posts(store).into_iter().find(|post| post.slug == key)
}

/// Create a post: title/content are required, the slug is derived from the
/// title when absent and must be unique, and `publishedAt` is set only when
/// the post is born published.
pub fn create(store: &Store, mut post: BlogPost) -> Result<BlogPost, Error> {
    if post.title.trim().is_empty() {
        return Err(Error::validation("Title is required"));
    }
    if post.content.trim().is_empty() {
        return Err(Error::validation("Content is required"));
    }

    if post.slug.is_empty() {
        post.slug = slugify(&post.title);
    }
    if load_posts(store).iter().any(|p| p.slug == post.slug) {
        return Err(Error::validation("A post with this slug already exists"));
    }

    post.id = None;
    post.views = 0;
    post.published_at = post.published.then(now_iso);

    let created = store.create(COLLECTION, post.into_record())?;
    BlogPost::from_record(created)
        .ok_or_else(|| Error::Storage(eyre!("Created post has an unreadable shape")))
}

/// Apply a partial update. A slug change is checked for uniqueness against
/// every other post, and the first draft-to-published transition stamps
/// `publishedAt`; republishing an already-published post does not restamp it.
pub fn update(store: &Store, id: u64, mut updates: Record) -> Result<BlogPost, Error> {
    let Some(existing) = store.get_by_id(COLLECTION, id) else {
        return Err(Error::NotFound("Blog post"));
    };

    let current_slug = existing.get("slug").and_then(Value::as_str).unwrap_or("");
    if let Some(new_slug) = updates.get("slug").and_then(Value::as_str) {
        let taken = new_slug != current_slug
            && store.get_all(COLLECTION).iter().any(|r| {
                record_id(r) != Some(id)
                    && r.get("slug").and_then(Value::as_str) == Some(new_slug)
            });
        if taken {
            return Err(Error::validation("A post with this slug already exists"));
        }
    }

    let was_published = existing
        .get("published")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let wants_published = updates
        .get("published")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if wants_published && !was_published {
        updates.insert("publishedAt".to_string(), Value::from(now_iso()));
    }

    let updated = store
        .update(COLLECTION, id, updates)?
        .ok_or(Error::NotFound("Blog post"))?;
    BlogPost::from_record(updated)
        .ok_or_else(|| Error::Storage(eyre!("Updated post has an unreadable shape")))
}

/// Bump the view counter. Used for public reads only; the caller decides
/// whether the request came from the admin area.
pub fn record_view(store: &Store, post: &mut BlogPost) -> eyre::Result<()> {
    let Some(id) = post.id else {
        return Ok(());
    };
    post.views += 1;
    let mut updates = Record::new();
    updates.insert("views".to_string(), Value::from(post.views));
    store.update(COLLECTION, id, updates)?;
    Ok(())
}

/// Bulk replace of the whole collection, the consumer of `save_all`. Posts
/// get fresh sequential ids; missing slugs and timestamps are filled in.
pub fn import(store: &Store, posts: Vec<BlogPost>) -> Result<usize, Error> {
    let now = now_iso();
    let records: Vec<Record> = posts
        .into_iter()
        .enumerate()
        .map(|(index, mut post)| {
            post.id = Some(index as u64 + 1);
            if post.slug.is_empty() {
                post.slug = slugify(&post.title);
            }
            if post.created_at.is_none() {
                post.created_at = Some(now.clone());
            }
            post.into_record()
        })
        .collect();

    let count = records.len();
    store.save_all(COLLECTION, &records)?;
    Ok(count)
}

// Admin activity feed, synthesized on demand from the other collections.
// No data means an empty feed; demonstration records live in the seed
// fixture, not here.

use crate::models::ActivityEntry;
use crate::records::Record;
use crate::store::Store;
use chrono::{DateTime, Utc};
use serde_json::Value;

fn field<'a>(record: &'a Record, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or("")
}

fn created_at(record: &Record) -> String {
    field(record, "createdAt").to_string()
}

/// Project every collection into the common feed shape, newest first.
pub fn collect(store: &Store) -> Vec<ActivityEntry> {
    let mut entries = Vec::new();
    let mut next_id = 1u64;
    let mut push = |entries: &mut Vec<ActivityEntry>,
                    kind: &str,
                    description: String,
                    name: String,
                    timestamp: String,
                    link: String| {
        entries.push(ActivityEntry {
            id: next_id,
            kind: kind.to_string(),
            description,
            name,
            time: format_time_ago(&timestamp),
            timestamp,
            link,
        });
        next_id += 1;
    };

    for lead in store.get_all("leads") {
        let id = lead.get("id").and_then(Value::as_u64).unwrap_or(0);
        push(
            &mut entries,
            "lead",
            "New lead collected".to_string(),
            field(&lead, "name").to_string(),
            created_at(&lead),
            format!("/admin/leads/{}", id),
        );
    }

    for pet in store.get_all("pets") {
        let id = pet.get("id").and_then(Value::as_u64).unwrap_or(0);
        let adopted = pet.get("adopted").and_then(Value::as_bool).unwrap_or(false);
        let description = if adopted {
            "Pet marked as adopted"
        } else {
            "New pet added"
        };
        push(
            &mut entries,
            "pet",
            description.to_string(),
            format!("{} - {}", field(&pet, "breed"), field(&pet, "name")),
            created_at(&pet),
            format!("/admin/pets/{}", id),
        );
    }

    for product in store.get_all("products") {
        let id = product.get("id").and_then(Value::as_u64).unwrap_or(0);
        push(
            &mut entries,
            "product",
            "Product added".to_string(),
            field(&product, "name").to_string(),
            created_at(&product),
            format!("/admin/products/{}", id),
        );
    }

    for post in store.get_all("blog_posts") {
        let published = post.get("published").and_then(Value::as_bool).unwrap_or(false);
        if !published {
            continue;
        }
        let id = post.get("id").and_then(Value::as_u64).unwrap_or(0);
        let timestamp = post
            .get("publishedAt")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| created_at(&post));
        push(
            &mut entries,
            "blog",
            "Blog post published".to_string(),
            field(&post, "title").to_string(),
            timestamp,
            format!("/admin/blog/{}", id),
        );
    }

    entries.sort_by(|a, b| parse_ts(&b.timestamp).cmp(&parse_ts(&a.timestamp)));
    entries
}

fn parse_ts(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Human-readable relative time, matching the admin dashboard wording.
pub fn format_time_ago(timestamp: &str) -> String {
    let Ok(then) = DateTime::parse_from_rfc3339(timestamp) else {
        return String::new();
    };
    let then = then.with_timezone(&Utc);
    let elapsed = Utc::now().signed_duration_since(then);

    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{} minute{} ago", minutes, if minutes > 1 { "s" } else { "" })
    } else if hours < 24 {
        format!("{} hour{} ago", hours, if hours > 1 { "s" } else { "" })
    } else if days < 7 {
        format!("{} day{} ago", days, if days > 1 { "s" } else { "" })
    } else if days < 30 {
        let weeks = days / 7;
        format!("{} week{} ago", weeks, if weeks > 1 { "s" } else { "" })
    } else {
        then.format("%b %-d, %Y").to_string()
    }
}

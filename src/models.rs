// Typed models for the resources that carry real behavior. Leads, pets,
// products and carousel slides stay opaque records; only blog posts, the
// settings singleton and the activity feed need field access.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::records::Record;

/// Blog post as stored in the `blog_posts` collection.
///
/// Unknown fields (inline author data, hero images, ...) are carried in
/// `extra` so admin-supplied content round-trips untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
    pub published_at: Option<String>,
    pub views: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BlogPost {
    pub fn from_record(record: Record) -> Option<Self> {
        serde_json::from_value(Value::Object(record)).ok()
    }

    pub fn into_record(self) -> Record {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Record::new(),
        }
    }
}

/// Site settings singleton.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub social: SocialSettings,
    pub notifications: NotificationSettings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    pub store_name: String,
    pub store_address: String,
    pub store_phones: Vec<String>,
    pub store_email: String,
    pub business_hours: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            store_name: "WoofnWhiskers".to_string(),
            store_address: "Sector 12, Dwarka, New Delhi".to_string(),
            store_phones: vec![
                "+91 123 456 7890".to_string(),
                String::new(),
                String::new(),
            ],
            store_email: "info@woofnwhiskers.com".to_string(),
            business_hours: "Monday - Friday: 10:00 AM - 8:00 PM\nSaturday: 10:00 AM - 6:00 PM\nSunday: 11:00 AM - 5:00 PM".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialSettings {
    pub facebook: String,
    pub instagram: String,
    pub twitter: String,
    pub youtube: String,
}

impl Default for SocialSettings {
    fn default() -> Self {
        Self {
            facebook: "https://facebook.com/woofnwhiskers".to_string(),
            instagram: "https://instagram.com/woofnwhiskers".to_string(),
            twitter: String::new(),
            youtube: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub new_lead_notifications: bool,
    pub order_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            sms_notifications: false,
            new_lead_notifications: true,
            order_notifications: true,
        }
    }
}

/// Payload for updating the admin credentials singleton. The password is only
/// rotated when `newPassword` is supplied; the stored hash is never echoed
/// back to clients.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CredentialsUpdate {
    pub username: String,
    pub email: String,
    pub new_password: Option<String>,
}

/// One entry in the admin activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub name: String,
    pub time: String,
    pub timestamp: String,
    pub link: String,
}

/// Pagination metadata returned alongside paged listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

/// Slice one page out of a sorted result set.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> (Vec<T>, Pagination) {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = items.len();

    let pagination = Pagination {
        total,
        page,
        limit,
        total_pages: total.div_ceil(limit),
    };

    let page_items = items
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();

    (page_items, pagination)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostPage {
    pub posts: Vec<BlogPost>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityPage {
    pub activities: Vec<ActivityEntry>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blog_post_round_trips_extra_fields() {
        let record = json!({
            "id": 3,
            "title": "Hello",
            "content": "body",
            "author": "Priya",
            "heroImage": "/images/blog/hello.jpg"
        });

        let post = BlogPost::from_record(record.as_object().unwrap().clone()).unwrap();
        assert_eq!(post.id, Some(3));
        assert_eq!(post.title, "Hello");
        assert!(!post.published);
        assert_eq!(post.extra.get("author"), Some(&json!("Priya")));

        let back = post.into_record();
        assert_eq!(back.get("heroImage"), Some(&json!("/images/blog/hello.jpg")));
        assert_eq!(back.get("publishedAt"), Some(&Value::Null));
    }

    #[test]
    fn test_settings_default_shape() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(value["general"]["storeName"], json!("WoofnWhiskers"));
        assert_eq!(value["notifications"]["emailNotifications"], json!(true));
        assert_eq!(value["notifications"]["smsNotifications"], json!(false));
        assert_eq!(value["general"]["storePhones"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_paginate_full_coverage() {
        let items: Vec<u32> = (1..=7).collect();

        let mut seen = Vec::new();
        for page in 1..=3 {
            let (chunk, meta) = paginate(items.clone(), page, 3);
            assert_eq!(meta.total, 7);
            assert_eq!(meta.total_pages, 3);
            seen.extend(chunk);
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn test_paginate_empty() {
        let (chunk, meta) = paginate(Vec::<u32>::new(), 1, 10);
        assert!(chunk.is_empty());
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn test_activity_entry_type_field_name() {
        let entry = ActivityEntry {
            id: 1,
            kind: "lead".to_string(),
            description: "New lead collected".to_string(),
            name: "A".to_string(),
            time: "Just now".to_string(),
            timestamp: "2026-08-25T00:00:00.000Z".to_string(),
            link: "/admin/leads/1".to_string(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], json!("lead"));
    }
}

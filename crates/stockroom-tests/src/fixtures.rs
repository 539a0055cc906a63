//! Wire-format fixtures.

use serde_json::{Value, json};
use uuid::Uuid;

pub fn category_json(id: Uuid, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "parent_id": null,
    })
}

pub fn product_json(id: Uuid, name: &str, sku: &str, category_id: Uuid) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "sku": sku,
        "price": 9.99,
        "quantity": 3,
        "in_stock": true,
        "image_url": null,
        "is_active": true,
        "category_id": category_id,
        "created_at": "2026-01-10T12:00:00Z",
        "updated_at": "2026-01-10T12:00:00Z",
    })
}

/// The backend's `{data, count}` list envelope.
pub fn list_json(data: Vec<Value>, count: u64) -> Value {
    json!({ "data": data, "count": count })
}

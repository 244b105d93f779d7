//! Shallow merge of page documents
//!
//! Top-level keys in the patch replace the stored ones wholesale (nested
//! objects included); keys the patch does not mention survive.

use serde_json::{Map, Value};
use shared::models::Page;

use crate::BoxError;
use crate::db::PageStore;

/// Union of the stored document's top-level keys with `patch`, patch winning
pub fn shallow_merge(current: Option<&Value>, patch: Map<String, Value>) -> Value {
    let mut merged = current
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    merged.extend(patch);
    Value::Object(merged)
}

/// Read the stored document, merge `patch` over it and write the result
pub async fn merge_into<S>(store: &S, slug: &str, patch: Map<String, Value>) -> Result<Page, BoxError>
where
    S: PageStore + ?Sized,
{
    let current = store.get_page(slug).await?;
    let merged = shallow_merge(current.as_ref().map(|p| &p.data), patch);
    store.put_page(slug, &merged).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use serde_json::json;

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_shallow_merge_keeps_unmentioned_keys() {
        let current = json!({"title": "Pizze", "items": [1, 2], "order": 1});
        let merged = shallow_merge(Some(&current), object(json!({"title": "Pizze rosse"})));
        assert_eq!(merged, json!({"title": "Pizze rosse", "items": [1, 2], "order": 1}));
    }

    #[test]
    fn test_shallow_merge_replaces_nested_objects() {
        let current = json!({"hero": {"title": "Ciao", "subtitle": "Benvenuti"}});
        let merged = shallow_merge(Some(&current), object(json!({"hero": {"title": "Salve"}})));
        assert_eq!(merged, json!({"hero": {"title": "Salve"}}));
    }

    #[test]
    fn test_shallow_merge_without_current() {
        assert_eq!(shallow_merge(None, object(json!({"a": 1}))), json!({"a": 1}));
        assert_eq!(
            shallow_merge(Some(&json!([1, 2])), object(json!({"a": 1}))),
            json!({"a": 1})
        );
    }

    #[tokio::test]
    async fn test_merge_into_store() {
        let store = MemoryStore::new();
        merge_into(&store, "storia", object(json!({"title": "Storia", "body": "..."})))
            .await
            .unwrap();
        let page = merge_into(&store, "storia", object(json!({"body": "Dal 1990"})))
            .await
            .unwrap();
        assert_eq!(page.slug, "storia");
        assert_eq!(page.data, json!({"title": "Storia", "body": "Dal 1990"}));
        assert!(page.updated_at.is_some());
    }
}

use scraper::{Html, Selector};
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::debug;

static LD_JSON: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid selector")
});

/// `@type` values that describe the listed residence
const RESIDENCE_TYPES: &[&str] = &["SingleFamilyResidence", "House", "Apartment"];

/// Find the listing entity in the page's first JSON-LD block.
///
/// Pages embed either one object or an array of typed entities. For an array
/// the first residence-typed entry wins; a bare object is taken as is.
/// Returns `None` when there is no block, it is not valid JSON, or nothing
/// object-shaped is selected.
pub fn listing_entity(document: &Html) -> Option<Map<String, Value>> {
    let script = document.select(&LD_JSON).next()?;
    let text: String = script.text().collect();

    let data: Value = match serde_json::from_str(text.trim()) {
        Ok(data) => data,
        Err(e) => {
            debug!(error = %e, "Ignoring malformed JSON-LD block");
            return None;
        }
    };

    let entity = match data {
        Value::Array(items) => items.into_iter().find(is_residence),
        other => Some(other),
    };

    match entity {
        Some(Value::Object(map)) => Some(map),
        Some(other) => {
            debug!(kind = json_kind(&other), "JSON-LD entity is not an object");
            None
        }
        None => {
            debug!("No residence entity in JSON-LD array");
            None
        }
    }
}

fn is_residence(item: &Value) -> bool {
    item.get("@type")
        .and_then(Value::as_str)
        .is_some_and(|t| RESIDENCE_TYPES.contains(&t))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(json: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><head><script type="application/ld+json">{json}</script></head><body></body></html>"#
        ))
    }

    #[test]
    fn test_single_object_is_used_directly() {
        let entity = listing_entity(&page(r#"{"@type": "Product", "name": "x"}"#)).unwrap();
        assert_eq!(entity["name"], "x");
    }

    #[test]
    fn test_array_selects_first_residence() {
        let doc = page(
            r#"[{"@type": "BreadcrumbList"}, {"@type": "Apartment", "name": "a"}, {"@type": "House", "name": "h"}]"#,
        );
        let entity = listing_entity(&doc).unwrap();
        assert_eq!(entity["name"], "a");
    }

    #[test]
    fn test_array_without_residence() {
        assert!(listing_entity(&page(r#"[{"@type": "Organization"}]"#)).is_none());
    }

    #[test]
    fn test_malformed_json() {
        assert!(listing_entity(&page("{not json")).is_none());
    }

    #[test]
    fn test_non_object_value() {
        assert!(listing_entity(&page(r#""just a string""#)).is_none());
    }

    #[test]
    fn test_only_first_block_is_read() {
        let doc = Html::parse_document(
            r#"<script type="application/ld+json">{"name": "first"}</script>
               <script type="application/ld+json">{"name": "second"}</script>"#,
        );
        assert_eq!(listing_entity(&doc).unwrap()["name"], "first");
    }

    #[test]
    fn test_no_block() {
        assert!(listing_entity(&Html::parse_document("<p>hi</p>")).is_none());
    }
}

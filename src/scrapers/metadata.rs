use crate::models::PropertyInfo;
use crate::scrapers::jsonld;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use std::sync::LazyLock;

static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:title"]"#).expect("valid selector"));
static OG_DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:description"]"#).expect("valid selector")
});
static META_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).expect("valid selector"));

static PRICE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$[\d,]+").expect("valid regex"));
static BEDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:bed|bd|bedroom)").expect("valid regex"));
static BATHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([\d.]+)\s*(?:bath|ba|bathroom)").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Extract address, price, beds, baths and description from a listing page.
///
/// Every source is optional; whatever is found is returned.
pub fn extract_property_info(html: &str, document: &Html) -> PropertyInfo {
    let mut info = PropertyInfo::default();

    if let Some(entity) = jsonld::listing_entity(document) {
        info.address = entity.get("address").and_then(compose_address);
        info.description = entity
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string);
    }

    if info.address.is_none() {
        info.address = meta_content(document, &OG_TITLE).map(str::to_string);
    }

    if info.description.is_none() {
        info.description = meta_content(document, &OG_DESCRIPTION)
            .or_else(|| meta_content(document, &META_DESCRIPTION))
            .map(|text| WHITESPACE.replace_all(text, " ").trim().to_string())
            .filter(|text| !text.is_empty());
    }

    info.price = PRICE.find(html).map(|m| m.as_str().to_string());
    info.beds = first_group(&BEDS, html);
    info.baths = first_group(&BATHS, html);

    info
}

/// "street, locality, region postalCode" with missing parts left blank
fn compose_address(address: &Value) -> Option<String> {
    let address = address.as_object()?;
    Some(format!(
        "{}, {}, {} {}",
        component(address, "streetAddress"),
        component(address, "addressLocality"),
        component(address, "addressRegion"),
        component(address, "postalCode"),
    ))
}

fn component(address: &Map<String, Value>, key: &str) -> String {
    match address.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn meta_content<'a>(document: &'a Html, selector: &Selector) -> Option<&'a str> {
    document
        .select(selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
}

fn first_group(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> PropertyInfo {
        extract_property_info(html, &Html::parse_document(html))
    }

    #[test]
    fn test_json_ld_address_and_description() {
        let html = r#"<html><head>
            <script type="application/ld+json">
            {"@type": "SingleFamilyResidence",
             "address": {"streetAddress": "12 Oak Ln", "addressLocality": "Austin",
                         "addressRegion": "TX", "postalCode": "78701"},
             "description": "Bright  corner lot"}
            </script>
            <meta property="og:title" content="Ignored title">
            </head><body></body></html>"#;
        let info = extract(html);
        assert_eq!(info.address.as_deref(), Some("12 Oak Ln, Austin, TX 78701"));
        assert_eq!(info.description.as_deref(), Some("Bright  corner lot"));
    }

    #[test]
    fn test_partial_address_keeps_commas() {
        let html = r#"<script type="application/ld+json">
            {"address": {"streetAddress": "5 Elm St", "postalCode": 10001}}
            </script>"#;
        assert_eq!(extract(html).address.as_deref(), Some("5 Elm St, ,  10001"));
    }

    #[test]
    fn test_og_title_fallback() {
        let html = r#"<html><head>
            <meta property="og:title" content="77 Pine Rd, Denver, CO 80202">
            </head></html>"#;
        assert_eq!(
            extract(html).address.as_deref(),
            Some("77 Pine Rd, Denver, CO 80202")
        );
    }

    #[test]
    fn test_malformed_json_ld_degrades_to_meta() {
        let html = r#"<script type="application/ld+json">{"address": </script>
            <meta property="og:title" content="Fallback Address">"#;
        assert_eq!(extract(html).address.as_deref(), Some("Fallback Address"));
    }

    #[test]
    fn test_meta_description_fallback_collapses_whitespace() {
        let html = r#"<meta name="description" content="  Cozy
            home   near park ">"#;
        assert_eq!(
            extract(html).description.as_deref(),
            Some("Cozy home near park")
        );
    }

    #[test]
    fn test_og_description_preferred_over_meta_description() {
        let html = r#"<meta name="description" content="plain">
            <meta property="og:description" content="open graph">"#;
        assert_eq!(extract(html).description.as_deref(), Some("open graph"));
    }

    #[test]
    fn test_price_beds_baths() {
        let html = "<div>Listed at $1,250,000 and then $9</div><p>4 Beds, 2.5 BA</p>";
        let info = extract(html);
        assert_eq!(info.price.as_deref(), Some("$1,250,000"));
        assert_eq!(info.beds.as_deref(), Some("4"));
        assert_eq!(info.baths.as_deref(), Some("2.5"));
    }

    #[test]
    fn test_abbreviated_counts() {
        let info = extract("<span>3bd</span><span>2 bathroom</span>");
        assert_eq!(info.beds.as_deref(), Some("3"));
        assert_eq!(info.baths.as_deref(), Some("2"));
    }

    #[test]
    fn test_nothing_found() {
        assert!(extract("<html><body><p>hello</p></body></html>").is_empty());
    }
}

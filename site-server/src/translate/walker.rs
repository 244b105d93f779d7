//! Auto-translate walker
//!
//! Depth-first pass over a JSON document that adds `<key>_en` siblings for
//! human-readable Italian strings. Existing non-blank translations are never
//! overwritten, so running it twice changes nothing.

use std::collections::HashSet;
use std::sync::LazyLock;

use futures::future::BoxFuture;
use regex::Regex;
use serde_json::{Map, Value};

use super::{TranslateError, Translator};

static ABSOLUTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid regex"));
static ABSOLUTE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^/[a-z0-9/_-]*$").expect("valid regex"));

/// Which keys and values the walker leaves alone
pub struct WalkRules {
    /// Suffix marking an English sibling key
    pub suffix: String,
    /// Structural keys that are never translated or descended into
    pub ignore_keys: HashSet<String>,
    /// Values that look like identifiers rather than text
    pub skip_value: fn(&str) -> bool,
}

impl Default for WalkRules {
    fn default() -> Self {
        Self {
            suffix: "_en".to_string(),
            ignore_keys: [
                "href", "url", "image", "image_url", "images", "phone", "whatsapp", "enabled", "id",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            skip_value: looks_like_link,
        }
    }
}

impl WalkRules {
    fn skips_key(&self, key: &str) -> bool {
        key.ends_with(self.suffix.as_str()) || self.ignore_keys.contains(key)
    }
}

/// Absolute URLs (`http(s)://...`) and site paths (`/menu/`)
pub fn looks_like_link(s: &str) -> bool {
    ABSOLUTE_URL.is_match(s) || ABSOLUTE_PATH.is_match(s)
}

/// An existing sibling that still needs a translation
fn is_blank(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(v) => renders_blank(v),
    }
}

/// Whether the value's text form is whitespace only. Arrays join their
/// elements with commas, so only `[]` or a single blank element qualify.
fn renders_blank(v: &Value) -> bool {
    match v {
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => match items.as_slice() {
            [] => true,
            [only] => only.is_null() || renders_blank(only),
            _ => false,
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Object(_) => false,
    }
}

/// Walker bound to a translator
pub struct AutoTranslate<'a> {
    rules: &'a WalkRules,
    translator: &'a dyn Translator,
}

impl<'a> AutoTranslate<'a> {
    pub fn new(rules: &'a WalkRules, translator: &'a dyn Translator) -> Self {
        Self { rules, translator }
    }

    /// Enriched copy of `doc`. The first translation failure aborts the walk.
    pub async fn enrich(&self, doc: &Value) -> Result<Value, TranslateError> {
        self.walk(doc).await
    }

    /// Enriched copy of a top-level object
    pub async fn enrich_object(
        &self,
        doc: &Map<String, Value>,
    ) -> Result<Map<String, Value>, TranslateError> {
        self.walk_object(doc).await
    }

    fn walk<'s>(&'s self, value: &'s Value) -> BoxFuture<'s, Result<Value, TranslateError>> {
        Box::pin(async move {
            match value {
                Value::Array(items) => {
                    let mut out = Vec::with_capacity(items.len());
                    for item in items {
                        out.push(self.walk(item).await?);
                    }
                    Ok(Value::Array(out))
                }
                Value::Object(map) => Ok(Value::Object(self.walk_object(map).await?)),
                other => Ok(other.clone()),
            }
        })
    }

    async fn walk_object(&self, map: &Map<String, Value>) -> Result<Map<String, Value>, TranslateError> {
        let mut out = map.clone();

        for (key, value) in map {
            if self.rules.skips_key(key) {
                continue;
            }

            match value {
                Value::Array(_) | Value::Object(_) => {
                    let enriched = self.walk(value).await?;
                    out.insert(key.clone(), enriched);
                }
                Value::String(s) => {
                    let text = s.trim();
                    if text.is_empty() || (self.rules.skip_value)(text) {
                        continue;
                    }
                    let en_key = format!("{key}{}", self.rules.suffix);
                    if is_blank(out.get(&en_key)) {
                        let translated = self.translator.translate(text).await?;
                        out.insert(en_key, Value::String(translated));
                    }
                }
                _ => {}
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;

    /// Prefixes "EN:" and records every input
    #[derive(Default)]
    struct Recording {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Translator for Recording {
        async fn translate(&self, text: &str) -> Result<String, TranslateError> {
            self.seen.lock().push(text.to_string());
            Ok(format!("EN:{text}"))
        }
    }

    struct Failing;

    #[async_trait]
    impl Translator for Failing {
        async fn translate(&self, _text: &str) -> Result<String, TranslateError> {
            Err(TranslateError::Upstream("model unavailable".into()))
        }
    }

    fn sample() -> Value {
        json!({
            "title": " Chi siamo ",
            "title_en": "",
            "subtitle": "La nostra storia",
            "subtitle_en": "Our story",
            "href": "Prenota ora",
            "phone": "+39 333",
            "enabled": true,
            "count": 3,
            "link": "https://example.com/menu",
            "path": "/menu/",
            "blank": "   ",
            "sections": [
                {"id": "intro", "text": "Benvenuti", "image": "foto"},
                "loose string",
                {"nested": {"label": "Orari"}}
            ],
            "images": ["Pizza margherita"]
        })
    }

    #[tokio::test]
    async fn test_enrich_adds_missing_translations() {
        let rules = WalkRules::default();
        let translator = Recording::default();
        let out = AutoTranslate::new(&rules, &translator)
            .enrich(&sample())
            .await
            .unwrap();

        assert_eq!(out["title_en"], "EN:Chi siamo");
        assert_eq!(out["title"], " Chi siamo ");
        assert_eq!(out["subtitle_en"], "Our story");
        assert_eq!(out["sections"][0]["text_en"], "EN:Benvenuti");
        assert_eq!(out["sections"][1], "loose string");
        assert_eq!(out["sections"][2]["nested"]["label_en"], "EN:Orari");
        assert!(out.get("href_en").is_none());
        assert!(out.get("link_en").is_none());
        assert!(out.get("path_en").is_none());
        assert!(out.get("blank_en").is_none());
        assert!(out.get("count_en").is_none());
        assert!(out["sections"][0].get("image_en").is_none());
        assert_eq!(out["sections"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_ignored_keys_never_reach_translator() {
        let rules = WalkRules::default();
        let translator = Recording::default();
        AutoTranslate::new(&rules, &translator)
            .enrich(&sample())
            .await
            .unwrap();

        let mut seen = translator.seen.lock().clone();
        seen.sort();
        for forbidden in ["Prenota ora", "+39 333", "intro", "foto", "Pizza margherita", "Our story"] {
            assert!(!seen.iter().any(|s| s == forbidden), "{forbidden} was translated");
        }
        assert_eq!(seen, vec!["Benvenuti", "Chi siamo", "Orari"]);
    }

    #[tokio::test]
    async fn test_enrich_is_idempotent() {
        let rules = WalkRules::default();
        let translator = Recording::default();
        let walker = AutoTranslate::new(&rules, &translator);

        let once = walker.enrich(&sample()).await.unwrap();
        let calls = translator.seen.lock().len();
        let twice = walker.enrich(&once).await.unwrap();

        assert_eq!(once, twice);
        assert_eq!(translator.seen.lock().len(), calls);
    }

    #[tokio::test]
    async fn test_failure_propagates() {
        let rules = WalkRules::default();
        let err = AutoTranslate::new(&rules, &Failing)
            .enrich(&json!({"title": "Ciao"}))
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_scalar_document_is_untouched() {
        let rules = WalkRules::default();
        let out = AutoTranslate::new(&rules, &Failing)
            .enrich(&json!("testo"))
            .await
            .unwrap();
        assert_eq!(out, json!("testo"));
    }

    #[tokio::test]
    async fn test_empty_array_siblings_are_filled() {
        let rules = WalkRules::default();
        let translator = Recording::default();
        let out = AutoTranslate::new(&rules, &translator)
            .enrich(&json!({
                "a": "Uno", "a_en": [],
                "b": "Due", "b_en": [" "],
                "c": "Tre", "c_en": [null],
                "d": "Quattro", "d_en": ["", ""],
                "e": "Cinque", "e_en": 0
            }))
            .await
            .unwrap();

        assert_eq!(out["a_en"], "EN:Uno");
        assert_eq!(out["b_en"], "EN:Due");
        assert_eq!(out["c_en"], "EN:Tre");
        assert_eq!(out["d_en"], json!(["", ""]));
        assert_eq!(out["e_en"], 0);
    }

    #[test]
    fn test_looks_like_link() {
        assert!(looks_like_link("https://x.it"));
        assert!(looks_like_link("HTTP://x.it"));
        assert!(looks_like_link("/menu/"));
        assert!(looks_like_link("/"));
        assert!(!looks_like_link("/menu del giorno"));
        assert!(!looks_like_link("Menu"));
    }
}

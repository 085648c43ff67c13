//! Taxonomy lookup: tag identifier → localized display title.
//!
//! The taxonomy resource comes in two envelope shapes:
//! - multi-sheet: `{":type": "multi-sheet", <lang>: {data: [...]},
//!   default: {...}, en: {...}}`, one sheet per language;
//! - flat: `{data: [{tag, title}]}`.
//!
//! Sheet selection is page language → `default` → `en`. Any fetch or
//! parse failure yields `None`; callers treat that as "no tag
//! available" and render nothing.
//!
//! Deliberately not memoized: a failed taxonomy fetch must stay
//! un-cached so a later decoration can succeed, unlike placeholders
//! where the empty table is pinned for the page lifetime.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::config;
use crate::fetch::ResourceFetcher;

/// Envelope marker for language-partitioned taxonomies.
const MULTI_SHEET: &str = "multi-sheet";

/// Row shape of a taxonomy sheet.
#[derive(Debug, Deserialize)]
struct TaxonomyRow {
    #[serde(default)]
    tag: String,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct TaxonomySheet {
    #[serde(default)]
    data: Vec<TaxonomyRow>,
}

/// A resolved taxonomy: tag identifier → display title.
#[derive(Debug, Default)]
pub struct TaxonomyTable {
    titles: HashMap<String, String>,
}

impl TaxonomyTable {
    /// Localized display title for a tag, if the taxonomy knows it.
    pub fn title_for(&self, tag: &str) -> Option<&str> {
        self.titles.get(tag).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Fetch and resolve the taxonomy for a page language.
/// `None` on any fetch or parse failure.
pub async fn fetch_taxonomy(
    fetcher: &dyn ResourceFetcher,
    lang: Option<&str>,
) -> Option<TaxonomyTable> {
    let json = match fetcher.fetch_json(config::TAXONOMY_PATH).await {
        Ok(json) => json,
        Err(err) => {
            tracing::debug!(error = %err, "Taxonomy fetch failed; no tags this decoration");
            return None;
        }
    };

    let sheet_json = select_sheet(&json, lang)?;
    let sheet: TaxonomySheet = match serde_json::from_value(sheet_json.clone()) {
        Ok(sheet) => sheet,
        Err(err) => {
            tracing::debug!(error = %err, "Taxonomy resource malformed; no tags this decoration");
            return None;
        }
    };

    let titles = sheet
        .data
        .into_iter()
        .filter(|row| !row.tag.is_empty())
        .map(|row| (row.tag, row.title))
        .collect();
    Some(TaxonomyTable { titles })
}

/// Pick the sheet for a language out of a multi-sheet envelope, or the
/// whole payload when the envelope is flat.
fn select_sheet<'a>(json: &'a Value, lang: Option<&str>) -> Option<&'a Value> {
    if json.get(":type").and_then(Value::as_str) != Some(MULTI_SHEET) {
        return Some(json);
    }
    lang.and_then(|l| json.get(l))
        .or_else(|| json.get("default"))
        .or_else(|| json.get("en"))
}

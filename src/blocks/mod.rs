//! Block decorators and the page-level context they share.
//!
//! A decorator receives one block's pre-parsed fragment and rewrites
//! it in place into presentational markup. The host invokes each
//! decorator once per block instance and awaits it; decorators never
//! return errors — every failure degrades to rendering less (see the
//! individual block modules).

pub mod quote;

use std::sync::Arc;

use crate::config;
use crate::fetch::ResourceFetcher;
use crate::placeholders::PlaceholderCache;

/// Page-level collaborators injected into every decorator call.
///
/// Construct one per page/process so the placeholder cache actually
/// caches across blocks. `lang` mirrors the host page's
/// `<html lang>`; `placeholder_prefix` is the locale root the page is
/// served under.
pub struct DecorateContext {
    fetcher: Arc<dyn ResourceFetcher>,
    placeholders: PlaceholderCache,
    lang: Option<String>,
    placeholder_prefix: String,
}

impl DecorateContext {
    /// Context with no page language and the site-root placeholder
    /// prefix.
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self {
            placeholders: PlaceholderCache::new(fetcher.clone()),
            fetcher,
            lang: None,
            placeholder_prefix: config::DEFAULT_PREFIX.to_string(),
        }
    }

    /// Builder: set the page language used for taxonomy sheet
    /// selection.
    pub fn with_lang(mut self, lang: &str) -> Self {
        self.lang = Some(lang.to_string());
        self
    }

    /// Builder: set the locale root placeholders are fetched under.
    pub fn with_placeholder_prefix(mut self, prefix: &str) -> Self {
        self.placeholder_prefix = prefix.to_string();
        self
    }

    pub fn fetcher(&self) -> &Arc<dyn ResourceFetcher> {
        &self.fetcher
    }

    pub fn placeholders(&self) -> &PlaceholderCache {
        &self.placeholders
    }

    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    pub fn placeholder_prefix(&self) -> &str {
        &self.placeholder_prefix
    }
}

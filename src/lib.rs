//! blockdecor — block decorators for content-managed pages.
//!
//! A host rendering framework parses authored content into per-block
//! DOM fragments and hands each one to its decorator exactly once.
//! The decorator rewrites the fragment in place into presentational
//! markup, pulling localized labels from two site resources: a
//! taxonomy (tag → display title) and per-locale placeholder tables.
//!
//! ```no_run
//! use std::sync::Arc;
//! use blockdecor::blocks::{quote, DecorateContext};
//! use blockdecor::dom::Element;
//! use blockdecor::fetch::HttpFetcher;
//!
//! # async fn render(mut block: Element) {
//! let ctx = DecorateContext::new(Arc::new(HttpFetcher::new("https://example.com")))
//!     .with_lang("fr")
//!     .with_placeholder_prefix("fr");
//! quote::decorate(&mut block, &ctx).await;
//! let html = block.to_html();
//! # }
//! ```

pub mod blocks;
pub mod config;
pub mod dom;
pub mod fetch;
pub mod placeholders;
pub mod taxonomy;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for hosts that don't bring their own
/// subscriber. Honors `RUST_LOG`, falling back to the crate default.
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}

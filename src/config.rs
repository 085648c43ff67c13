//! Shared constants for block decoration: resource paths, locale
//! defaults, and the class names decorators emit.

/// Application-level constants
pub const APP_NAME: &str = "blockdecor";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path of the taxonomy resource, relative to the site root.
pub const TAXONOMY_PATH: &str = "/taxonomy.json";

/// File name of a placeholders resource under a locale prefix.
pub const PLACEHOLDERS_FILE: &str = "placeholders.json";

/// Prefix selecting the site-root placeholders resource.
pub const DEFAULT_PREFIX: &str = "default";

/// Placeholder key for the quote block's suffix line.
pub const QUOTE_OF_THE_DAY_KEY: &str = "quote-of-the-day";

/// Heading level used when no configuration channel supplies one.
pub const DEFAULT_HEADING_LEVEL: &str = "h5";

/// Recognized heading levels.
pub const HEADING_LEVELS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Class on the rendered author paragraph.
pub const QUOTE_AUTHOR_CLASS: &str = "quote-author";

/// Class on the rendered tag span.
pub const QUOTE_TAG_CLASS: &str = "quote-tag";

/// Class on the rendered suffix paragraph.
pub const QUOTE_SUFFIX_CLASS: &str = "quote-suffix";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{APP_NAME}=debug,info")
}

/// Resolve the placeholders resource path for a locale prefix.
/// The `default` prefix maps to the site-root resource.
pub fn placeholders_path(prefix: &str) -> String {
    if prefix == DEFAULT_PREFIX {
        format!("/{PLACEHOLDERS_FILE}")
    } else {
        format!("{}/{}", prefix.trim_end_matches('/'), PLACEHOLDERS_FILE)
    }
}

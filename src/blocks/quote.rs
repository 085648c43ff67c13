//! Quote block decorator.
//!
//! Authored input is a container whose child slots carry raw field
//! values: slot 0 the quote text, slot 1 an optional author, and
//! optionally a tag identifier plus two presentation fields
//! (show-as-heading flag, heading level). Older authored content
//! encodes the presentation fields as container classes instead of
//! slots; both channels are read, explicit slots first, classes as
//! legacy fallback — never merged.
//!
//! Output, in order: the rewritten quote container (`<hN>` or
//! `<blockquote>` inside the retained wrapper), an optional
//! `p.quote-author`, an optional localized `span.quote-tag`, and an
//! optional `p.quote-suffix` from the `quote-of-the-day` placeholder.
//!
//! The structural rewrite is fully synchronous; only the tag and
//! suffix augmentations await the network, and both absorb every
//! failure by rendering nothing.

use crate::config::{
    DEFAULT_HEADING_LEVEL, HEADING_LEVELS, QUOTE_AUTHOR_CLASS, QUOTE_OF_THE_DAY_KEY,
    QUOTE_SUFFIX_CLASS, QUOTE_TAG_CLASS,
};
use crate::dom::{Element, Node};
use crate::taxonomy;

use super::DecorateContext;

/// A slot carrying a raw presentation field value instead of content.
enum FieldValue {
    ShowAsHeading(bool),
    HeadingLevel(&'static str),
}

/// Decorate a quote block in place.
///
/// A block without a quote slot is left untouched. No error ever
/// escapes: taxonomy or placeholder trouble just omits the tag span
/// or suffix paragraph.
pub async fn decorate(block: &mut Element, ctx: &DecorateContext) {
    let has_content = block
        .child_elements()
        .any(|el| classify_field_value(el).is_none());
    if !has_content {
        tracing::debug!("Quote block has no quote slot; leaving it untouched");
        return;
    }

    // Partition slots. Field-value slots are consumed here and never
    // return to the tree; stray text between slots goes with them.
    let mut content: Vec<Element> = Vec::new();
    let mut slot_flag: Option<bool> = None;
    let mut slot_level: Option<&'static str> = None;
    for node in block.take_children() {
        let Node::Element(el) = node else { continue };
        match classify_field_value(&el) {
            Some(FieldValue::ShowAsHeading(value)) => slot_flag = Some(value),
            Some(FieldValue::HeadingLevel(level)) => slot_level = Some(level),
            None => content.push(el),
        }
    }

    // Third content slot is the explicit tag identifier.
    let mut slot_tag: Option<String> = None;
    if content.len() > 2 {
        let tag_text = content.remove(2).text_content();
        let tag_text = tag_text.trim();
        if !tag_text.is_empty() {
            slot_tag = Some(tag_text.to_string());
        }
    }

    // Resolve each field from the first channel that supplies it.
    let show_as_heading = slot_flag.unwrap_or_else(|| block.has_class("show-as-heading"));
    let heading_level = slot_level
        .or_else(|| heading_level_from_classes(block))
        .unwrap_or(DEFAULT_HEADING_LEVEL);
    let tag = slot_tag.or_else(|| tag_from_classes(block));

    // Structural rewrite — completes before any suspension point.
    let mut slots = content.into_iter();
    if let Some(mut quote_wrapper) = slots.next() {
        let quote_text = quote_wrapper.text_content();
        let tag_name = if show_as_heading { heading_level } else { "blockquote" };
        quote_wrapper.replace_children_with(Element::new(tag_name).with_text(quote_text.trim()));
        block.append_element(quote_wrapper);
    }
    if let Some(mut author_wrapper) = slots.next() {
        let author_text = author_wrapper.text_content();
        author_wrapper.replace_children_with(
            Element::new("p")
                .with_class(QUOTE_AUTHOR_CLASS)
                .with_text(author_text.trim()),
        );
        block.append_element(author_wrapper);
    }
    // Content past the known slots is preserved untouched.
    for extra in slots {
        block.append_element(extra);
    }

    // Optional augmentations: both degrade to "render nothing".
    if let Some(tag) = tag {
        if let Some(title) = resolve_tag_title(ctx, &tag).await {
            block.append_element(
                Element::new("span")
                    .with_class(QUOTE_TAG_CLASS)
                    .with_text(&title),
            );
        }
    }

    let suffix = ctx
        .placeholders()
        .get(QUOTE_OF_THE_DAY_KEY, ctx.placeholder_prefix())
        .await;
    if !suffix.is_empty() {
        block.append_element(
            Element::new("p")
                .with_class(QUOTE_SUFFIX_CLASS)
                .with_text(&suffix),
        );
    }
}

/// Recognize a slot whose text is a raw field value: a literal
/// `true`/`false` show-as-heading flag or a bare heading level name.
fn classify_field_value(el: &Element) -> Option<FieldValue> {
    let text = el.text_content();
    match text.trim() {
        "true" => Some(FieldValue::ShowAsHeading(true)),
        "false" => Some(FieldValue::ShowAsHeading(false)),
        trimmed => HEADING_LEVELS
            .iter()
            .find(|level| **level == trimmed)
            .copied()
            .map(FieldValue::HeadingLevel),
    }
}

/// Legacy heading-level channel. Pattern precedence:
/// `show-as-heading-type-<h>` > bare `<h>` > `heading-type-<h>`.
fn heading_level_from_classes(block: &Element) -> Option<&'static str> {
    HEADING_LEVELS
        .iter()
        .find(|level| block.has_class(&format!("show-as-heading-type-{level}")))
        .or_else(|| HEADING_LEVELS.iter().find(|level| block.has_class(level)))
        .or_else(|| {
            HEADING_LEVELS
                .iter()
                .find(|level| block.has_class(&format!("heading-type-{level}")))
        })
        .copied()
}

/// Legacy tag channel: first `tag-<segments>` class, dash-separated
/// segments converted to the colon-separated taxonomy form.
fn tag_from_classes(block: &Element) -> Option<String> {
    block
        .classes()
        .find_map(|class| class.strip_prefix("tag-"))
        .filter(|rest| !rest.is_empty())
        .map(|rest| rest.replace('-', ":"))
}

/// Look up the localized display title for a tag. `None` on any
/// taxonomy trouble or an unknown tag.
async fn resolve_tag_title(ctx: &DecorateContext, tag: &str) -> Option<String> {
    let table = taxonomy::fetch_taxonomy(ctx.fetcher().as_ref(), ctx.lang()).await?;
    let title = table.title_for(tag);
    if title.is_none() {
        tracing::debug!(tag, "Tag missing from taxonomy; omitting label");
    }
    title.map(str::to_string)
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

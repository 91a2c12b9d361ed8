//! Search engine and UI binding validation.

use crate::schema::SiteConfig;

use super::helpers::{validate_ident, validate_range, validate_range_f64, validate_tag};

/// Validate search constraints.
pub(crate) fn validate_search(errors: &mut Vec<String>, config: &SiteConfig) {
    let search = &config.search;
    validate_range(errors, "search.min_query_chars", search.min_query_chars, 1, 32);
    validate_range(errors, "search.reveal_delay_ms", search.reveal_delay_ms, 0, 5000);
    validate_range(errors, "search.summary_excerpts", search.summary_excerpts, 1, 10);
    validate_range_f64(
        errors,
        "search.header_fallback_height",
        search.header_fallback_height,
        0.0,
        400.0,
    );
    validate_range_f64(errors, "search.scroll_margin", search.scroll_margin, 0.0, 200.0);

    validate_tag(errors, "search.highlight_tag", &search.highlight_tag);
    validate_ident(errors, "search.highlight_class", &search.highlight_class);
    validate_ident(errors, "search.active_class", &search.active_class);
    if search.highlight_class == search.active_class {
        errors.push("search.active_class must differ from search.highlight_class".into());
    }

    if search.searchable_tags.is_empty() {
        errors.push("search.searchable_tags must not be empty".into());
    }
    for tag in &search.searchable_tags {
        validate_tag(errors, "search.searchable_tags", tag);
    }
}

/// Validate element ids the search UI binds to.
pub(crate) fn validate_bindings(errors: &mut Vec<String>, config: &SiteConfig) {
    let bindings = &config.bindings;
    if bindings.inputs.is_empty() {
        errors.push("bindings.inputs must name at least one input".into());
    }
    for input in &bindings.inputs {
        validate_ident(errors, "bindings.inputs", input);
    }
    if bindings.buttons.len() > bindings.inputs.len() {
        errors.push(format!(
            "bindings.buttons has {} ids but only {} inputs to submit",
            bindings.buttons.len(),
            bindings.inputs.len()
        ));
    }
    for button in &bindings.buttons {
        validate_ident(errors, "bindings.buttons", button);
    }
    validate_ident(errors, "bindings.results", &bindings.results);
    validate_ident(errors, "bindings.previous", &bindings.previous);
    validate_ident(errors, "bindings.next", &bindings.next);
    validate_ident(errors, "bindings.position", &bindings.position);
}

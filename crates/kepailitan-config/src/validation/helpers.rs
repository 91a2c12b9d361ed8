//! Shared validation helpers used by all domain validators.

use regex::Regex;
use std::sync::LazyLock;

/// CSS class names and element ids: letters, digits, `-` and `_`.
static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*$").unwrap());

/// HTML tag names.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9]*$").unwrap());

/// Push an error if `value` is outside `[min, max]` (integer).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is outside `[min, max]` (float).
pub(crate) fn validate_range_f64(
    errors: &mut Vec<String>,
    name: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if !(min..=max).contains(&value) {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error unless `value` is a usable class name or element id.
pub(crate) fn validate_ident(errors: &mut Vec<String>, name: &str, value: &str) {
    if !IDENT_RE.is_match(value) {
        errors.push(format!("{name} = '{value}' is not a valid identifier"));
    }
}

/// Push an error unless `value` is a lowercase tag name.
pub(crate) fn validate_tag(errors: &mut Vec<String>, name: &str, value: &str) {
    if !TAG_RE.is_match(value) {
        errors.push(format!("{name} = '{value}' is not a valid tag name"));
    }
}

pub(crate) fn validate_non_empty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

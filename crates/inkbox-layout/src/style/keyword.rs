//! Lenient keyword parsing shared by the style enums.

use std::str::FromStr;

use inkbox_common::warning::warn_once;

/// Parse a CSS keyword, falling back to the property's initial value.
///
/// Styles arrive already resolved, so an unknown keyword is a producer
/// bug we can survive: it is reported once and replaced by `T::default()`.
pub(crate) fn parse_keyword<T: FromStr + Default>(property: &str, keyword: &str) -> T {
    keyword
        .trim()
        .to_ascii_lowercase()
        .parse()
        .unwrap_or_else(|_| {
            let _ = warn_once(
                "Style",
                &format!("unknown {property} keyword '{keyword}', using the initial value"),
            );
            T::default()
        })
}

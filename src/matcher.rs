//! Short-name normalization and template lookup
//!
//! Short names are the compact keys shown in the catalog listing and used for
//! matching user queries, e.g. "Y U No" becomes "yuno".

use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

use crate::data::Template;

/// Lowercases `name` and drops every Unicode whitespace or punctuation character.
pub fn short_name(name: &str) -> String {
    name.chars()
        .filter(|c| !is_separator(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c.general_category_group() == GeneralCategoryGroup::Punctuation
}

/// Returns the first template whose short name contains `needle`.
///
/// The needle is used as-is; no normalization is applied to it, so an empty
/// needle matches the first template.
pub fn choose<'a>(templates: &'a [Template], needle: &str) -> Option<&'a Template> {
    templates
        .iter()
        .find(|template| short_name(&template.name).contains(needle))
}

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `?`, optionally followed by one type letter.
    pub(super) static ref PLACEHOLDER_RE: Regex =
        Regex::new(r"\?[dfa#]?").expect("placeholder pattern is valid");
    /// One level of `{...}`; the inner text cannot contain braces.
    pub(super) static ref BLOCK_RE: Regex =
        Regex::new(r"\{([^{}]*)\}").expect("block pattern is valid");
}

/// Number of placeholder tokens in `sql`.
#[must_use]
pub fn count_placeholders(sql: &str) -> usize {
    PLACEHOLDER_RE.find_iter(sql).count()
}

//! Key filtering and display styles for object listings

use std::str::FromStr;

use glob::Pattern;

use crate::error::{Error, Result};
use crate::traits::ObjectInfo;

/// Width of the name column in compact style
const NAME_WIDTH: usize = 70;

/// Selects keys by a Unix shell-style pattern matched against the whole key
///
/// Matching is case-sensitive. `*` also matches `/`.
#[derive(Debug, Clone, Default)]
pub struct KeyFilter {
    pattern: Option<Pattern>,
}

impl KeyFilter {
    /// Build a filter from the `search` and `match` options
    ///
    /// `search = "foo"` is shorthand for `match = "*foo*"` and takes
    /// precedence when both are given.
    pub fn new(search: Option<&str>, pattern: Option<&str>) -> Result<Self> {
        let source = match (search, pattern) {
            (Some(s), _) if !s.is_empty() => Some(format!("*{s}*")),
            (_, Some(p)) if !p.is_empty() => Some(p.to_string()),
            _ => None,
        };

        let pattern = source.map(|s| Pattern::new(&s)).transpose()?;
        Ok(Self { pattern })
    }

    /// A filter letting everything through
    pub fn all() -> Self {
        Self::default()
    }

    /// The effective pattern, if any
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Pattern::as_str)
    }

    pub fn matches(&self, key: &str) -> bool {
        self.pattern.as_ref().is_none_or(|p| p.matches(key))
    }
}

/// How listed objects are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListStyle {
    /// One aligned row per object, under a header
    #[default]
    Compact,
    /// One block of `field: value` lines per object
    Verbose,
    /// Keys only
    NameOnly,
}

impl ListStyle {
    pub const NAMES: [&'static str; 3] = ["compact", "verbose", "nameonly"];

    /// Header line printed before the rows, if the style has one
    pub fn header(self) -> Option<String> {
        match self {
            ListStyle::Compact => Some(compact_row(
                "NAME",
                "SIZE",
                "LAST MODIFIED",
                "STORAGE CLASS",
            )),
            ListStyle::Verbose | ListStyle::NameOnly => None,
        }
    }

    /// Render one listed item
    pub fn render(self, item: &ObjectInfo) -> String {
        let size = item.size_bytes.map(|s| s.to_string()).unwrap_or_default();
        let last_modified = item
            .last_modified
            .map(|t| t.to_string())
            .unwrap_or_default();
        let storage_class = item.storage_class.as_deref().unwrap_or_default();

        match self {
            ListStyle::Compact => compact_row(&item.key, &size, &last_modified, storage_class),
            ListStyle::Verbose => [
                format!("name: {}", item.key),
                format!("    size: {size}"),
                format!("    last_modified: {last_modified}"),
                format!("    storage_class: {storage_class}"),
            ]
            .join("\n"),
            ListStyle::NameOnly => item.key.clone(),
        }
    }
}

fn compact_row(name: &str, size: &str, last_modified: &str, storage_class: &str) -> String {
    format!("{name:<NAME_WIDTH$} {size:<10} {last_modified:<25} {storage_class}")
        .trim_end()
        .to_string()
}

impl FromStr for ListStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "compact" => Ok(ListStyle::Compact),
            "verbose" => Ok(ListStyle::Verbose),
            "nameonly" => Ok(ListStyle::NameOnly),
            other => Err(Error::InvalidStyle(other.to_string())),
        }
    }
}

impl std::fmt::Display for ListStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ListStyle::Compact => "compact",
            ListStyle::Verbose => "verbose",
            ListStyle::NameOnly => "nameonly",
        };
        f.write_str(name)
    }
}

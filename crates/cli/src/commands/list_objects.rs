//! list-objects command - List objects in a bucket
//!
//! Supports a key prefix, shell-style filtering on the whole key, and three
//! display styles.

use clap::Args;
use s3t_core::{KeyFilter, ListStyle, ObjectInfo, RemotePath, tasks};
use serde::Serialize;

use super::{connect, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// List objects in a bucket
#[derive(Args, Debug)]
pub struct ListObjectsArgs {
    /// Bucket name
    pub bucket: String,

    /// Only list keys starting with this prefix
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Only list keys containing this string (shorthand for --match '*STRING*')
    #[arg(long)]
    pub search: Option<String>,

    /// Only list keys matching this shell-style pattern
    #[arg(long = "match", value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Output style: compact, verbose, or nameonly
    #[arg(long, default_value = "compact")]
    pub style: String,

    /// Group keys sharing a prefix up to this delimiter (config default: "/")
    #[arg(long)]
    pub delimiter: Option<String>,

    /// List every key below the prefix instead of grouping by delimiter
    #[arg(short, long)]
    pub recursive: bool,
}

/// Output structure for list-objects (JSON format)
#[derive(Debug, Serialize)]
struct ListObjectsOutput {
    bucket: String,
    prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    items: Vec<ObjectInfo>,
    total: usize,
}

/// Execute the list-objects command
pub async fn execute(
    args: ListObjectsArgs,
    default_delimiter: &str,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let style = match args.style.parse::<ListStyle>() {
        Ok(s) => s,
        Err(e) => return fail(&formatter, "Invalid arguments", e),
    };

    let filter = match KeyFilter::new(args.search.as_deref(), args.pattern.as_deref()) {
        Ok(f) => f,
        Err(e) => return fail(&formatter, "Invalid arguments", e),
    };

    let client = match connect(&args.bucket).await {
        Ok(c) => c,
        Err(e) => return fail(&formatter, "Failed to connect", e),
    };

    let path = RemotePath::new(&args.bucket, &args.prefix);
    let delimiter = args.delimiter.as_deref().unwrap_or(default_delimiter);

    let items = match tasks::list_objects(
        client.as_ref(),
        &path,
        &filter,
        Some(delimiter),
        args.recursive,
    )
    .await
    {
        Ok(items) => items,
        Err(e) => return fail(&formatter, "Failed to list objects", e),
    };

    if formatter.is_json() {
        let output = ListObjectsOutput {
            bucket: args.bucket,
            prefix: args.prefix,
            pattern: filter.pattern().map(str::to_string),
            total: items.len(),
            items,
        };
        formatter.json(&output);
    } else {
        for line in render(style, &items) {
            formatter.println(&line);
        }
    }

    ExitCode::Success
}

/// Lines printed for `items` in human mode
fn render(style: ListStyle, items: &[ObjectInfo]) -> Vec<String> {
    style
        .header()
        .into_iter()
        .chain(items.iter().map(|item| style.render(item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<ObjectInfo> {
        vec![
            ObjectInfo::dir("2024/"),
            ObjectInfo::file("readme.txt", 12),
        ]
    }

    #[test]
    fn test_render_compact_has_header() {
        let lines = render(ListStyle::Compact, &items());
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("NAME"));
        assert_eq!(lines[1], "2024/");
        assert!(lines[2].starts_with("readme.txt"));
        assert!(lines[2].ends_with(" 12"));
    }

    #[test]
    fn test_render_nameonly() {
        let lines = render(ListStyle::NameOnly, &items());
        assert_eq!(lines, vec!["2024/", "readme.txt"]);
    }

    #[test]
    fn test_render_empty_compact_prints_header_only() {
        let lines = render(ListStyle::Compact, &[]);
        assert_eq!(lines.len(), 1);
    }
}

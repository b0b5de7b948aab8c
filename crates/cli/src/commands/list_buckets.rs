//! list-buckets command - List buckets with location and access logging

use comfy_table::{Table, presets};
use s3t_core::{BucketInfo, tasks};
use serde::Serialize;

use super::{connect_default, fail};
use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

#[derive(Debug, Serialize)]
struct ListBucketsOutput {
    buckets: Vec<BucketInfo>,
    total: usize,
}

/// Execute the list-buckets command
pub async fn execute(output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let client = match connect_default().await {
        Ok(c) => c,
        Err(e) => return fail(&formatter, "Failed to connect", e),
    };

    let buckets = match tasks::list_buckets(client.as_ref()).await {
        Ok(b) => b,
        Err(e) => return fail(&formatter, "Failed to list buckets", e),
    };

    if formatter.is_json() {
        formatter.json(&ListBucketsOutput {
            total: buckets.len(),
            buckets,
        });
    } else if buckets.is_empty() {
        formatter.println("No buckets found.");
    } else {
        formatter.println(&bucket_table(&buckets).to_string());
    }

    ExitCode::Success
}

fn bucket_table(buckets: &[BucketInfo]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec![
        "NAME", "CREATED", "LOCATION", "LOGGING", "TARGET", "PREFIX", "GRANTS",
    ]);

    for bucket in buckets {
        let logging = &bucket.logging;
        table.add_row(vec![
            bucket.name.clone(),
            bucket
                .created
                .map(|t| t.strftime("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
            bucket.location.clone().unwrap_or_default(),
            if logging.enabled() { "enabled" } else { "disabled" }.to_string(),
            logging.target_bucket.clone().unwrap_or_default(),
            logging.target_prefix.clone().unwrap_or_default(),
            logging.grants.join(", "),
        ]);
    }

    table
}

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::pcs::tools::error::Result;
use crate::pcs::tools::io::api::ApiClient;
use crate::pcs::tools::io::excel_write;
use crate::pcs::tools::merge;
use crate::pcs::tools::model::{GOAL_NUMBERS, IndicatorRecord};

/// File the workbook is written to, relative to the working directory.
pub const OUTPUT_FILE: &str = "indicadores_organizados.xlsx";

/// Fetches every goal, reshapes the responses into records, and writes the
/// final workbook.
#[instrument(level = "info", skip_all, fields(output = %output.display()))]
pub async fn export_indicators(client: &ApiClient, output: &Path) -> Result<()> {
    let dataset = collect_dataset(client).await;
    info!(record_count = dataset.len(), "dataset assembled");
    excel_write::write_workbook(output, &dataset)
}

/// Collects the records of all seventeen goals, ordered by goal number and
/// numeric target number.
///
/// Goals are processed one after another; the paired window fetches inside
/// each goal are the only concurrent requests against the platform.
pub async fn collect_dataset(client: &ApiClient) -> Vec<IndicatorRecord> {
    let mut dataset = Vec::new();
    for goal in GOAL_NUMBERS {
        info!(goal, "collecting goal");
        let records = merge::collect_goal(client, goal).await;
        debug!(goal, record_count = records.len(), "goal records merged");
        dataset.extend(records);
    }
    sort_dataset(&mut dataset);
    dataset
}

/// Sorts records by goal number, then by target number compared as a float.
///
/// Records whose target number does not parse sort after the numeric ones of
/// the same goal (`NaN` is largest under IEEE total ordering); ties keep
/// their insertion order.
pub fn sort_dataset(dataset: &mut [IndicatorRecord]) {
    dataset.sort_by(|lhs, rhs| {
        lhs.goal
            .cmp(&rhs.goal)
            .then_with(|| lhs.target_sort_value().total_cmp(&rhs.target_sort_value()))
    });
}

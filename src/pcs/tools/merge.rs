use std::collections::HashSet;

use futures::future;
use tracing::debug;

use crate::pcs::tools::io::api::ApiClient;
use crate::pcs::tools::model::{
    DATA_SOURCE, EARLY_WINDOW, FIRST_YEAR, IndicatorRecord, LATE_WINDOW, SeriesItem, TargetInfo,
    YearWindow,
};

/// Collects the export records of a single goal.
///
/// The two year windows are fetched concurrently; metadata lookups then run
/// one at a time so the goal-scoped dedup set is consulted in row order,
/// first window first. An indicator that already produced a record is
/// skipped when its id reappears, so each id yields exactly one record per
/// goal.
pub async fn collect_goal(client: &ApiClient, goal: u8) -> Vec<IndicatorRecord> {
    let (early, late) = future::join(
        client.fetch_goal_series(goal, EARLY_WINDOW),
        client.fetch_goal_series(goal, LATE_WINDOW),
    )
    .await;

    let mut seen = HashSet::new();
    let mut selected = select_window_items(early, EARLY_WINDOW, &mut seen);
    selected.extend(select_window_items(late, LATE_WINDOW, &mut seen));
    debug!(goal, indicator_count = selected.len(), "unique indicators selected");

    let mut records = Vec::with_capacity(selected.len());
    for entry in selected {
        let meta = client.fetch_target_meta(&entry.key).await;
        let target = TargetInfo::parse(&meta);
        records.push(build_record(goal, &entry.item, entry.window, target));
    }
    records
}

/// A series row that passed deduplication, waiting for its metadata fetch.
struct SelectedItem {
    key: String,
    item: SeriesItem,
    window: YearWindow,
}

/// Keeps the rows of one window whose indicator id is not in `seen` yet,
/// registering every kept id. A missing window (failed fetch) and rows
/// without a usable id contribute nothing.
fn select_window_items(
    series: Option<Vec<SeriesItem>>,
    window: YearWindow,
    seen: &mut HashSet<String>,
) -> Vec<SelectedItem> {
    let Some(items) = series else {
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| {
            let key = item.indicator_key()?;
            seen.insert(key.clone())
                .then(|| SelectedItem { key, item, window })
        })
        .collect()
}

/// Builds the flat export record for one indicator row. Year cells inside
/// the originating window copy the row's positional value; years outside it
/// stay empty.
fn build_record(
    goal: u8,
    item: &SeriesItem,
    window: YearWindow,
    target: TargetInfo,
) -> IndicatorRecord {
    let years = std::array::from_fn(|offset| {
        let year = FIRST_YEAR + offset as u16;
        item.year_value(window, year)
    });

    IndicatorRecord {
        goal,
        target_number: target.number,
        target_description: target.description,
        discrimination: item.discrimination(),
        source: DATA_SOURCE.to_string(),
        years,
    }
}

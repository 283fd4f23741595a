use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// First calendar year covered by the exported spreadsheet.
pub const FIRST_YEAR: u16 = 2017;
/// Last calendar year covered by the exported spreadsheet.
pub const LAST_YEAR: u16 = 2024;
/// Number of year columns carried by every record.
pub const YEAR_COUNT: usize = (LAST_YEAR - FIRST_YEAR + 1) as usize;

/// First half of the reporting period, queried as one window.
pub const EARLY_WINDOW: YearWindow = YearWindow { start: 2017, end: 2020 };
/// Second half of the reporting period.
pub const LATE_WINDOW: YearWindow = YearWindow { start: 2021, end: 2024 };

/// The seventeen UN Sustainable Development Goals tracked by the platform.
pub const GOAL_NUMBERS: RangeInclusive<u8> = 1..=17;

/// Attribution recorded in the `Fonte` column of every exported row.
pub const DATA_SOURCE: &str = "Cidades Sustentáveis";

static TARGET_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\d+").unwrap());

/// Inclusive span of years requested from the data endpoint in one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    pub start: u16,
    pub end: u16,
}

impl YearWindow {
    /// Returns true when `year` falls inside the window.
    pub fn contains(self, year: u16) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// Position of `year` within the window, or `None` when it falls outside.
    pub fn offset(self, year: u16) -> Option<usize> {
        self.contains(year).then(|| usize::from(year - self.start))
    }
}

/// One positional row from the data endpoint: indicator id, discrimination
/// label, then one value per year of the queried window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesItem(Vec<Value>);

impl SeriesItem {
    // Slots 0 and 1 hold the id and the label; values start after them.
    const VALUE_START: usize = 2;

    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    /// Identifier used for metadata lookups and per-goal deduplication.
    ///
    /// The platform encodes ids as bare numbers, but the value is treated as
    /// opaque, so string ids are accepted too. Rows without a usable id
    /// yield `None`.
    pub fn indicator_key(&self) -> Option<String> {
        match self.0.first() {
            Some(Value::Number(number)) => Some(number.to_string()),
            Some(Value::String(text)) => Some(text.clone()),
            _ => None,
        }
    }

    /// Free-text label distinguishing the indicator row.
    pub fn discrimination(&self) -> String {
        match self.0.get(1) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    /// Value reported for `year`, or `Value::Null` when the year falls
    /// outside the window or the row carries no entry for it.
    pub fn year_value(&self, window: YearWindow, year: u16) -> Value {
        window
            .offset(year)
            .and_then(|offset| self.0.get(Self::VALUE_START + offset))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

/// Target number and description parsed from an indicator's metadata string.
///
/// The endpoint formats the field as `"<number> : <description>"`. Metadata
/// without the separator carries no number and is kept verbatim as the
/// description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetInfo {
    pub number: String,
    pub description: String,
}

impl TargetInfo {
    pub fn parse(meta: &str) -> Self {
        match meta.split_once(" : ") {
            Some((head, rest)) => Self {
                number: TARGET_NUMBER
                    .find(head)
                    .map(|token| token.as_str().to_string())
                    .unwrap_or_default(),
                description: rest.trim().to_string(),
            },
            None => Self {
                number: String::new(),
                description: meta.to_string(),
            },
        }
    }
}

/// One exported spreadsheet row: a unique indicator within a goal together
/// with its values for every year of the reporting period.
///
/// Records are built once during the merge step and never mutated afterward.
/// `Value::Null` year cells stand for years the record carries no value for.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRecord {
    pub goal: u8,
    pub target_number: String,
    pub target_description: String,
    pub discrimination: String,
    pub source: String,
    pub years: [Value; YEAR_COUNT],
}

impl IndicatorRecord {
    /// Cell value for `year`, or `None` when the year lies outside the
    /// reporting period.
    pub fn year_cell(&self, year: u16) -> Option<&Value> {
        year.checked_sub(FIRST_YEAR)
            .map(usize::from)
            .and_then(|index| self.years.get(index))
    }

    /// Numeric form of the target number used as the secondary sort key.
    /// Unparsable numbers, including the empty string, map to `NaN`.
    pub fn target_sort_value(&self) -> f64 {
        self.target_number.parse().unwrap_or(f64::NAN)
    }
}

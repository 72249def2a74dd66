use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stored status of a week. `Unknown` absorbs any value on disk that
/// this version does not recognize; stats treat it like `NothingDone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekStatus {
    Complete,
    Partial,
    None,
    NothingDone,
    Unknown,
}

impl<'de> Deserialize<'de> for WeekStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(WeekStatus::parse(&value).unwrap_or(WeekStatus::Unknown))
    }
}

impl WeekStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "complete" => Some(WeekStatus::Complete),
            "partial" => Some(WeekStatus::Partial),
            "none" => Some(WeekStatus::None),
            "nothing-done" => Some(WeekStatus::NothingDone),
            _ => Option::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeekStatus::Complete => "complete",
            WeekStatus::Partial => "partial",
            WeekStatus::None => "none",
            WeekStatus::NothingDone => "nothing-done",
            WeekStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekRecord {
    pub status: WeekStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_credit: Option<u8>,
}

/// The tracker store. Keys are ISO dates of week-start Mondays, so the
/// BTreeMap iterates chronologically.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackerData {
    pub weeks: BTreeMap<String, WeekRecord>,
}

#[derive(Debug, Deserialize)]
pub struct OpenRequest {
    pub week_start: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct MarkerRequest {
    pub value: u8,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub direction: String,
}

/// One slot of the five-week window. `status` is a display value and
/// may be the synthetic "unmarked", which is never written to the store.
#[derive(Debug, Serialize)]
pub struct WeekView {
    pub week_number: i64,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct CalendarView {
    pub month_label: String,
    pub prev_enabled: bool,
    pub weeks: Vec<WeekView>,
}

#[derive(Debug, Serialize)]
pub struct StatsView {
    pub total_credit: f64,
    pub milestone_count: u64,
    pub current_streak: u64,
}

#[derive(Debug, Serialize)]
pub struct OverlayView {
    pub state: String,
    pub title: Option<String>,
    pub week_start: Option<String>,
    pub active_status: Option<String>,
    pub markers: [bool; 5],
}

#[derive(Debug, Serialize)]
pub struct TrackerView {
    pub calendar: CalendarView,
    pub stats: StatsView,
    pub overlay: OverlayView,
}

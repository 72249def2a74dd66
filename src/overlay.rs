use crate::calendar::{date_key, epoch, week_index_of, week_start_of};
use crate::models::{OverlayView, TrackerData, WeekRecord, WeekStatus};
use chrono::NaiveDate;

pub const MARKER_COUNT: u8 = 5;

/// Selection overlay for one week. Bonus markers are always a contiguous
/// prefix of the five slots, so a count is enough to hold them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Closed,
    Selecting {
        week_start: String,
        week_number: i64,
        active: Option<WeekStatus>,
    },
    AwaitingBonus {
        week_start: String,
        week_number: i64,
        markers: u8,
    },
}

#[derive(Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// No overlay is open; nothing to select against.
    NotOpen,
    /// The already-active status was re-selected: record deleted, overlay closed.
    Cleared,
    /// A status was written to the store and the overlay closed.
    Recorded,
    /// "Complete" was selected; waiting for bonus confirmation, no write yet.
    AwaitingBonus,
}

/// Opens the overlay for the week containing `reference`. A week already
/// stored as complete opens straight into the bonus picker, pre-filled
/// with its stored bonus.
pub fn open(data: &TrackerData, reference: NaiveDate) -> Overlay {
    let start = week_start_of(reference);
    let week_start = date_key(start);
    let week_number = week_index_of(start, epoch());
    match data.weeks.get(&week_start) {
        Some(record) if record.status == WeekStatus::Complete => Overlay::AwaitingBonus {
            week_start,
            week_number,
            markers: record.bonus_credit.unwrap_or(0).min(MARKER_COUNT),
        },
        Some(record) => Overlay::Selecting {
            week_start,
            week_number,
            active: Some(record.status),
        },
        None => Overlay::Selecting {
            week_start,
            week_number,
            active: None,
        },
    }
}

pub fn select_status(
    overlay: &mut Overlay,
    data: &mut TrackerData,
    status: WeekStatus,
) -> SelectOutcome {
    let state = std::mem::replace(overlay, Overlay::Closed);
    let (week_start, week_number, active) = match state {
        Overlay::Closed => return SelectOutcome::NotOpen,
        Overlay::Selecting {
            week_start,
            week_number,
            active,
        } => (week_start, week_number, active),
        Overlay::AwaitingBonus {
            week_start,
            week_number,
            ..
        } => (week_start, week_number, Some(WeekStatus::Complete)),
    };

    if active == Some(status) {
        // Toggle-off: the record is removed entirely, not zeroed out.
        data.weeks.remove(&week_start);
        SelectOutcome::Cleared
    } else if status == WeekStatus::Complete {
        *overlay = Overlay::AwaitingBonus {
            week_start,
            week_number,
            markers: 0,
        };
        SelectOutcome::AwaitingBonus
    } else {
        data.weeks.insert(
            week_start,
            WeekRecord {
                status,
                bonus_credit: None,
            },
        );
        SelectOutcome::Recorded
    }
}

/// Clicking marker `value` (1..=5) selects the prefix 1..=value, unless
/// that prefix is already exactly the active set, which clears it.
pub fn toggle_marker(overlay: &mut Overlay, value: u8) -> bool {
    match overlay {
        Overlay::AwaitingBonus { markers, .. } => {
            *markers = if *markers == value { 0 } else { value };
            true
        }
        _ => false,
    }
}

pub fn confirm_bonus(overlay: &mut Overlay, data: &mut TrackerData) -> bool {
    match std::mem::replace(overlay, Overlay::Closed) {
        Overlay::AwaitingBonus {
            week_start, markers, ..
        } => {
            data.weeks.insert(
                week_start,
                WeekRecord {
                    status: WeekStatus::Complete,
                    bonus_credit: Some(markers),
                },
            );
            true
        }
        other => {
            *overlay = other;
            false
        }
    }
}

/// Unconditional close; any unconfirmed bonus selection is discarded.
pub fn close(overlay: &mut Overlay) {
    *overlay = Overlay::Closed;
}

pub fn view(overlay: &Overlay) -> OverlayView {
    match overlay {
        Overlay::Closed => OverlayView {
            state: "closed".to_string(),
            title: None,
            week_start: None,
            active_status: None,
            markers: [false; 5],
        },
        Overlay::Selecting {
            week_start,
            week_number,
            active,
        } => OverlayView {
            state: "selecting".to_string(),
            title: Some(format!("Week #{week_number}")),
            week_start: Some(week_start.clone()),
            active_status: active.map(|status| status.as_str().to_string()),
            markers: [false; 5],
        },
        Overlay::AwaitingBonus {
            week_start,
            week_number,
            markers,
        } => OverlayView {
            state: "awaiting-bonus".to_string(),
            title: Some(format!("Week #{week_number}")),
            week_start: Some(week_start.clone()),
            active_status: Some(WeekStatus::Complete.as_str().to_string()),
            markers: marker_flags(*markers),
        },
    }
}

fn marker_flags(count: u8) -> [bool; 5] {
    let mut flags = [false; 5];
    for slot in flags.iter_mut().take(count.min(MARKER_COUNT) as usize) {
        *slot = true;
    }
    flags
}

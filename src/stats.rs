use crate::models::{StatsView, TrackerData, WeekStatus};

const CREDITS_PER_MILESTONE: f64 = 4.0;

/// Single chronological pass over the store. Keys are ISO dates, so the
/// BTreeMap order is already oldest-first.
pub fn build_stats(data: &TrackerData) -> StatsView {
    let mut total_credit = 0.0f64;
    let mut streak = 0u64;

    for record in data.weeks.values() {
        match record.status {
            WeekStatus::Complete => {
                total_credit += 1.0;
                if let Some(bonus) = record.bonus_credit {
                    total_credit += f64::from(bonus);
                }
                streak += 1;
            }
            WeekStatus::Partial => {
                total_credit += 0.5;
                streak += 1;
            }
            // An explicit "none" neither earns credit nor breaks the streak.
            WeekStatus::None => {}
            WeekStatus::NothingDone | WeekStatus::Unknown => streak = 0,
        }
    }

    StatsView {
        total_credit,
        milestone_count: (total_credit / CREDITS_PER_MILESTONE).floor() as u64,
        current_streak: streak,
    }
}

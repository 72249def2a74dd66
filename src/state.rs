use crate::calendar;
use crate::models::TrackerData;
use crate::overlay::Overlay;
use chrono::NaiveDate;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Everything the running session owns: the authoritative store, the
/// currently viewed date, and the selection overlay. The reference date
/// is not persisted and starts at the epoch.
#[derive(Debug)]
pub struct Session {
    pub weeks: TrackerData,
    pub reference: NaiveDate,
    pub overlay: Overlay,
}

impl Session {
    pub fn new(weeks: TrackerData) -> Self {
        Self {
            weeks,
            reference: calendar::epoch(),
            overlay: Overlay::Closed,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, weeks: TrackerData) -> Self {
        Self {
            data_path,
            session: Arc::new(Mutex::new(Session::new(weeks))),
        }
    }
}

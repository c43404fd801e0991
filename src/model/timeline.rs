//! Timeline types: the reduced star history.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::StarAction;

/// The star count right after one event.
///
/// Field names match the JSON files earlier runs produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub timestamp: String,
    pub count: u64,
    pub action: StarAction,
    #[serde(rename = "user")]
    pub actor: String,
}

/// One UTC day of a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: Date,

    /// Count after the day's last event.
    pub count: u64,

    /// Stars added that day.
    pub started: u64,

    /// Stars removed that day.
    pub deleted: u64,
}

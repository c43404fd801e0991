//! Timeline reduction: turn an unordered batch of star events into a
//! running count.
//!
//! The input must already be filtered to a single repository. Nothing here
//! filters, fetches, or logs; both functions are pure.

use jiff::{Timestamp, tz::TimeZone};

use crate::model::{DailyPoint, MalformedEventError, RawEvent, StarAction, TimelinePoint};

/// Order events by time and emit the star count after each one.
///
/// Ordering compares timestamp strings, which matches chronological order
/// only for zero-padded UTC instants as GitHub Archive writes them. The sort
/// is stable: events sharing a timestamp keep their input order.
///
/// `deleted` never takes the count below zero. Actions other than `started`
/// and `deleted` leave the count unchanged.
pub fn reduce(mut events: Vec<RawEvent>) -> Vec<TimelinePoint> {
    events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let mut count: u64 = 0;
    events
        .into_iter()
        .map(|event| {
            match event.action {
                StarAction::Started => count += 1,
                StarAction::Deleted => count = count.saturating_sub(1),
                StarAction::Other(_) => {}
            }
            TimelinePoint {
                timestamp: event.timestamp,
                count,
                action: event.action,
                actor: event.actor,
            }
        })
        .collect()
}

/// Collapse a timeline into one point per UTC day that has events.
///
/// Expects the output of [`reduce`], so points are already in time order.
pub fn daily(points: &[TimelinePoint]) -> Result<Vec<DailyPoint>, MalformedEventError> {
    let mut days: Vec<DailyPoint> = Vec::new();

    for point in points {
        let date = utc_date(&point.timestamp)?;

        if days.last().is_none_or(|day| day.date != date) {
            days.push(DailyPoint {
                date,
                count: 0,
                started: 0,
                deleted: 0,
            });
        }

        if let Some(day) = days.last_mut() {
            day.count = point.count;
            match point.action {
                StarAction::Started => day.started += 1,
                StarAction::Deleted => day.deleted += 1,
                StarAction::Other(_) => {}
            }
        }
    }

    Ok(days)
}

fn utc_date(timestamp: &str) -> Result<jiff::civil::Date, MalformedEventError> {
    let instant: Timestamp =
        timestamp
            .parse()
            .map_err(|e: jiff::Error| MalformedEventError::InvalidTimestamp {
                value: timestamp.to_string(),
                reason: e.to_string(),
            })?;
    Ok(instant.to_zoned(TimeZone::UTC).date())
}

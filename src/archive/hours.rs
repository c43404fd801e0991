//! Archive hours: which hourly files a date range covers.

use std::fmt;

use jiff::civil::Date;

/// A date range that ends before it starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("start date {start} is after end date {end}")]
pub struct DateRangeError {
    pub start: Date,
    pub end: Date,
}

/// An inclusive range of UTC dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    pub fn new(start: Date, end: Date) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// Every archive hour in the range, oldest first.
    pub fn hours(&self) -> impl Iterator<Item = ArchiveHour> + use<> {
        let end = self.end;
        self.start
            .series(jiff::Span::new().days(1))
            .take_while(move |date| *date <= end)
            .flat_map(|date| (0..24).map(move |hour| ArchiveHour { date, hour }))
    }
}

/// One hourly dump of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHour {
    pub date: Date,
    /// `0..=23`, UTC.
    pub hour: u8,
}

impl ArchiveHour {
    /// File name on the archive server, e.g. `2023-04-28-9.json.gz`.
    ///
    /// Hours are not zero-padded.
    pub fn file_name(&self) -> String {
        format!("{self}.json.gz")
    }
}

impl fmt::Display for ArchiveHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.date, self.hour)
    }
}

use chrono::{
    DateTime,
    Duration,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("Window start {start} must be before end {end}")]
    Empty {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

/// Half-open query window `[start, end)` shared by every metric source.
///
/// The only way to build one is through [`TimeWindow::new`] (or the helpers
/// built on it), so `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, WindowError> {
        if start >= end {
            return Err(WindowError::Empty { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window ending at `now` and spanning the previous `hours` hours.
    pub fn last_hours(now: DateTime<Utc>, hours: u32) -> Result<Self, WindowError> {
        Self::new(now - Duration::hours(i64::from(hours)), now)
    }

    /// Builds a window from optional RFC3339 bounds.
    ///
    /// A missing `end` means `now`; a missing `start` means `default_hours`
    /// before the end.
    pub fn from_rfc3339(
        start: Option<&str>, end: Option<&str>, now: DateTime<Utc>, default_hours: u32,
    ) -> Result<Self, WindowError> {
        let end = match end {
            Some(raw) => parse_rfc3339(raw)?,
            None => now,
        };
        let start = match start {
            Some(raw) => parse_rfc3339(raw)?,
            None => end - Duration::hours(i64::from(default_hours)),
        };
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Length of the window in fractional days.
    pub fn days(&self) -> f64 {
        self.duration().num_seconds() as f64 / 86_400.0
    }

    /// Short human label such as `24h`, `7d` or `90m`.
    pub fn label(&self) -> String {
        let minutes = self.duration().num_minutes();
        if minutes > 0 && minutes % (24 * 60) == 0 {
            format!("{}d", minutes / (24 * 60))
        } else if minutes > 0 && minutes % 60 == 0 {
            format!("{}h", minutes / 60)
        } else if minutes > 0 {
            format!("{}m", minutes)
        } else {
            format!("{}s", self.duration().num_seconds())
        }
    }

    /// CloudWatch period (seconds) covering the window in a single datapoint.
    ///
    /// CloudWatch requires a multiple of 60.
    pub fn single_period_secs(&self) -> i32 {
        let secs = self.duration().num_seconds().max(60);
        let rounded = (secs + 59) / 60 * 60;
        i32::try_from(rounded).unwrap_or(i32::MAX / 60 * 60)
    }
}

impl<'de> Deserialize<'de> for TimeWindow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        }

        let raw = Raw::deserialize(deserializer)?;
        TimeWindow::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

fn parse_rfc3339(raw: &str) -> Result<DateTime<Utc>, WindowError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| WindowError::InvalidTimestamp {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

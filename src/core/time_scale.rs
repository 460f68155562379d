use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::core::LinearScale;
use crate::error::{ChartError, ChartResult};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Calendar unit used when snapping an inverted pixel to a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Day,
    Year,
}

/// Time axis mapped linearly through epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    start: NaiveDateTime,
    end: NaiveDateTime,
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, range: (f64, f64)) -> ChartResult<Self> {
        let linear = LinearScale::new((to_millis(start), to_millis(end)), range)?;
        Ok(Self { start, end, linear })
    }

    /// Fits the scale to the extent of `times`.
    pub fn from_times<I>(times: I, range: (f64, f64)) -> ChartResult<Self>
    where
        I: IntoIterator<Item = NaiveDateTime>,
    {
        let extent = times.into_iter().fold(None, |acc, time| match acc {
            None => Some((time, time)),
            Some((min, max)) => Some((min.min(time), max.max(time))),
        });
        let Some((start, end)) = extent else {
            return Err(ChartError::InvalidData(
                "time scale cannot be built from empty data".to_owned(),
            ));
        };
        Self::new(start, end, range)
    }

    #[must_use]
    pub fn domain(self) -> (NaiveDateTime, NaiveDateTime) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    pub fn map(self, time: NaiveDateTime) -> ChartResult<f64> {
        self.linear.map(to_millis(time))
    }

    pub fn invert(self, pixel: f64) -> ChartResult<NaiveDateTime> {
        let millis = self.linear.invert(pixel)?;
        from_millis(millis.round())
    }

    /// Inverts `pixel` and snaps the result to the nearest `unit` boundary.
    pub fn invert_rounded(self, pixel: f64, unit: TimeUnit) -> ChartResult<NaiveDateTime> {
        let millis = self.linear.invert(pixel)?;
        match unit {
            TimeUnit::Day => from_millis((millis / MILLIS_PER_DAY).round() * MILLIS_PER_DAY),
            TimeUnit::Year => {
                let time = from_millis(millis.round())?;
                let this_year = year_start(time.year())?;
                let next_year = year_start(time.year() + 1)?;
                if millis - to_millis(this_year) < to_millis(next_year) - millis {
                    Ok(this_year)
                } else {
                    Ok(next_year)
                }
            }
        }
    }

    /// January 1 ticks inside the domain, thinned to at most `max_count`.
    pub fn year_ticks(self, max_count: usize) -> ChartResult<Vec<NaiveDateTime>> {
        if max_count == 0 {
            return Ok(Vec::new());
        }
        let (lo, hi) = if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };

        let mut first_year = lo.year();
        if year_start(first_year)? < lo {
            first_year += 1;
        }
        let last_year = hi.year();
        if last_year < first_year {
            return Ok(Vec::new());
        }

        let span = (last_year - first_year + 1) as usize;
        let stride = span.div_ceil(max_count).max(1);
        (first_year..=last_year)
            .step_by(stride)
            .map(year_start)
            .collect()
    }
}

/// January 1, 00:00 of `year`.
pub fn year_start(year: i32) -> ChartResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ChartError::InvalidData(format!("year {year} is out of range")))
}

#[must_use]
pub fn to_millis(time: NaiveDateTime) -> f64 {
    time.and_utc().timestamp_millis() as f64
}

pub fn from_millis(millis: f64) -> ChartResult<NaiveDateTime> {
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return Err(ChartError::InvalidData(
            "time value is out of range".to_owned(),
        ));
    }
    DateTime::from_timestamp_millis(millis as i64)
        .map(|time| time.naive_utc())
        .ok_or_else(|| ChartError::InvalidData("time value is out of range".to_owned()))
}

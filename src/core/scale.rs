use serde::{Deserialize, Serialize};

use crate::core::nice::{nice_domain, ticks};
use crate::error::{ChartError, ChartResult};

/// Continuous linear mapping from a data domain to a pixel range.
///
/// A y axis uses `range = (inner_height, 0.0)` so larger values plot higher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    #[serde(default)]
    clamp: bool,
}

impl LinearScale {
    /// Builds a scale. A zero-width domain is widened by half a unit per side.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        let (domain_start, domain_end) = if domain_start == domain_end {
            (domain_start - 0.5, domain_end + 0.5)
        } else {
            (domain_start, domain_end)
        };

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
            clamp: false,
        })
    }

    /// Clamps mapped output to the range ends.
    #[must_use]
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Rounds the domain outward to tick boundaries.
    #[must_use]
    pub fn nice(mut self, count: usize) -> Self {
        let (start, end) = nice_domain(self.domain_start, self.domain_end, count);
        self.domain_start = start;
        self.domain_end = end;
        self
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn map(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let mut normalized = (value - self.domain_start) / span;
        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Err(ChartError::InvalidData(
                "scale range must be non-zero to invert".to_owned(),
            ));
        }

        let mut normalized = (pixel - self.range_start) / range_span;
        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain_start, self.domain_end, count)
    }
}

/// Square-root scale over `[0, max]`, used for bubble radii so area tracks value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SqrtScale {
    linear: LinearScale,
}

impl SqrtScale {
    pub fn new(domain_max: f64, range_max: f64) -> ChartResult<Self> {
        if !domain_max.is_finite() || domain_max < 0.0 {
            return Err(ChartError::InvalidData(
                "sqrt scale domain max must be finite and >= 0".to_owned(),
            ));
        }
        let linear = LinearScale::new((0.0, domain_max.sqrt()), (0.0, range_max))?;
        Ok(Self {
            linear: linear.with_clamp(true),
        })
    }

    /// Maps a value; negative input maps to zero.
    pub fn map(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        self.linear.map(value.max(0.0).sqrt())
    }
}

use indexmap::IndexSet;

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Ten-color categorical palette.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

pub fn default_palette() -> ChartResult<Vec<Color>> {
    CATEGORY10.iter().map(|hex| Color::from_hex(hex)).collect()
}

/// Assigns palette colors to keys in order, cycling when keys outnumber colors.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalColorScale {
    keys: IndexSet<String>,
    palette: Vec<Color>,
}

impl OrdinalColorScale {
    pub fn new<I, S>(keys: I, palette: Vec<Color>) -> ChartResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if palette.is_empty() {
            return Err(ChartError::InvalidData(
                "color palette must not be empty".to_owned(),
            ));
        }
        for color in &palette {
            color.validate()?;
        }
        Ok(Self {
            keys: keys.into_iter().map(Into::into).collect(),
            palette,
        })
    }

    /// Color for a known key; unknown keys get `None`.
    #[must_use]
    pub fn color(&self, key: &str) -> Option<Color> {
        self.keys.get_index_of(key).map(|index| self.color_at(index))
    }

    #[must_use]
    pub fn color_at(&self, index: usize) -> Color {
        self.palette[index % self.palette.len()]
    }
}

/// Maps a continuous domain onto equal-width buckets of a discrete range.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizeScale<T> {
    domain_min: f64,
    domain_max: f64,
    range: Vec<T>,
}

impl<T: Clone> QuantizeScale<T> {
    pub fn new(domain: (f64, f64), range: Vec<T>) -> ChartResult<Self> {
        let (domain_min, domain_max) = domain;
        if !domain_min.is_finite() || !domain_max.is_finite() || domain_max < domain_min {
            return Err(ChartError::InvalidData(
                "quantize domain must be finite and ordered".to_owned(),
            ));
        }
        if range.is_empty() {
            return Err(ChartError::InvalidData(
                "quantize range must not be empty".to_owned(),
            ));
        }
        Ok(Self {
            domain_min,
            domain_max,
            range,
        })
    }

    /// Bucket index for `value`, clamped to the first and last bucket.
    #[must_use]
    pub fn bucket(&self, value: f64) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }
        let count = self.range.len();
        let span = self.domain_max - self.domain_min;
        if span == 0.0 {
            return Some(0);
        }
        let position = ((value - self.domain_min) / span * count as f64).floor();
        Some((position.max(0.0) as usize).min(count - 1))
    }

    #[must_use]
    pub fn map(&self, value: f64) -> Option<T> {
        self.bucket(value).map(|index| self.range[index].clone())
    }

    /// Lower and upper domain bound of each bucket.
    #[must_use]
    pub fn thresholds(&self) -> Vec<(f64, f64)> {
        let count = self.range.len() as f64;
        let span = self.domain_max - self.domain_min;
        (0..self.range.len())
            .map(|index| {
                let lo = self.domain_min + span * index as f64 / count;
                let hi = self.domain_min + span * (index + 1) as f64 / count;
                (lo, hi)
            })
            .collect()
    }
}

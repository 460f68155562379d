use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Categorical scale dividing a pixel range into equal bands.
///
/// Padding ratios are fractions of the step: `padding_inner` separates bands,
/// `padding_outer` is added before the first and after the last band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    categories: IndexSet<String>,
    range_start: f64,
    range_end: f64,
    padding_inner: f64,
    padding_outer: f64,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    pub fn new(categories: IndexSet<String>, range: (f64, f64)) -> ChartResult<Self> {
        Self::with_padding(categories, range, 0.0, 0.0)
    }

    pub fn with_padding(
        categories: IndexSet<String>,
        range: (f64, f64),
        padding_inner: f64,
        padding_outer: f64,
    ) -> ChartResult<Self> {
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "band scale range must be finite".to_owned(),
            ));
        }
        if !padding_inner.is_finite() || !(0.0..1.0).contains(&padding_inner) {
            return Err(ChartError::InvalidData(
                "band inner padding must be in [0, 1)".to_owned(),
            ));
        }
        if !padding_outer.is_finite() || padding_outer < 0.0 {
            return Err(ChartError::InvalidData(
                "band outer padding must be finite and >= 0".to_owned(),
            ));
        }

        let mut scale = Self {
            categories,
            range_start,
            range_end,
            padding_inner,
            padding_outer,
            start: range_start,
            step: 0.0,
            bandwidth: 0.0,
        };
        scale.rescale();
        Ok(scale)
    }

    fn rescale(&mut self) {
        let n = self.categories.len() as f64;
        let (lo, hi) = if self.range_end < self.range_start {
            (self.range_end, self.range_start)
        } else {
            (self.range_start, self.range_end)
        };
        let slots = (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        self.step = (hi - lo) / slots;
        // Centered alignment.
        self.start = lo + (hi - lo - self.step * (n - self.padding_inner)) * 0.5;
        self.bandwidth = self.step * (1.0 - self.padding_inner);
    }

    fn reversed(&self) -> bool {
        self.range_end < self.range_start
    }

    #[must_use]
    pub fn categories(&self) -> &IndexSet<String> {
        &self.categories
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    #[must_use]
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.get_index_of(category)
    }

    /// Left edge of the band at `index`.
    #[must_use]
    pub fn position_at(&self, index: usize) -> Option<f64> {
        if index >= self.categories.len() {
            return None;
        }
        let slot = if self.reversed() {
            self.categories.len() - 1 - index
        } else {
            index
        };
        Some(self.start + self.step * slot as f64)
    }

    /// Left edge of the band for `category`.
    #[must_use]
    pub fn position(&self, category: &str) -> Option<f64> {
        self.position_at(self.index_of(category)?)
    }

    #[must_use]
    pub fn center_at(&self, index: usize) -> Option<f64> {
        self.position_at(index)
            .map(|left| left + self.bandwidth * 0.5)
    }

    /// Index of the band whose `[left, left + bandwidth]` contains `pixel`.
    ///
    /// Pixels in the padding between bands resolve to `None`.
    #[must_use]
    pub fn band_at(&self, pixel: f64) -> Option<usize> {
        if !pixel.is_finite() {
            return None;
        }
        (0..self.categories.len()).find(|&index| {
            self.position_at(index)
                .is_some_and(|left| pixel >= left && pixel <= left + self.bandwidth)
        })
    }

    /// Index of the band whose center is closest to `pixel`.
    #[must_use]
    pub fn nearest_band(&self, pixel: f64) -> Option<usize> {
        if !pixel.is_finite() {
            return None;
        }
        (0..self.categories.len())
            .filter_map(|index| Some((index, (self.center_at(index)? - pixel).abs())))
            .min_by(|left, right| left.1.total_cmp(&right.1))
            .map(|(index, _)| index)
    }

    /// Splits one band into `count` equal sub-bands, used for grouped bars.
    pub fn sub_band(&self, index: usize, slot: usize, count: usize) -> ChartResult<(f64, f64)> {
        if count == 0 || slot >= count {
            return Err(ChartError::InvalidData(format!(
                "sub-band slot {slot} is out of range for {count} slots"
            )));
        }
        let left = self.position_at(index).ok_or_else(|| {
            ChartError::InvalidData(format!("band index {index} is out of range"))
        })?;
        let width = self.bandwidth / count as f64;
        let sub_left = left + width * slot as f64;
        Ok((sub_left, sub_left + width))
    }
}

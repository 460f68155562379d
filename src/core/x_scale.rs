use serde::{Deserialize, Serialize};

use crate::core::{BandScale, LinearScale, RowKey, TimeScale};
use crate::error::ChartResult;

/// Horizontal scale of a chart, chosen from the kind of row key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XScale {
    Band(BandScale),
    Time(TimeScale),
    Linear(LinearScale),
}

impl XScale {
    /// Pixel x for a row key: band center, mapped time, or mapped number.
    ///
    /// Returns `Ok(None)` when the key kind does not match the scale or the
    /// category is unknown.
    pub fn key_position(&self, key: &RowKey, date_format: &str) -> ChartResult<Option<f64>> {
        match self {
            Self::Band(scale) => {
                let label = key.label(date_format);
                Ok(scale
                    .index_of(&label)
                    .and_then(|index| scale.center_at(index)))
            }
            Self::Time(scale) => key.as_time().map(|time| scale.map(time)).transpose(),
            Self::Linear(scale) => key.as_number().map(|value| scale.map(value)).transpose(),
        }
    }

    #[must_use]
    pub fn as_band(&self) -> Option<&BandScale> {
        match self {
            Self::Band(scale) => Some(scale),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_time(&self) -> Option<&TimeScale> {
        match self {
            Self::Time(scale) => Some(scale),
            _ => None,
        }
    }
}

//! Tooltip and axis text formatting.

use serde::{Deserialize, Serialize};

use crate::core::{Measure, MeasureState};

/// Label shown instead of a value for a missing cell.
pub const MISSING_LABEL: &str = "No data";

/// How a measure is rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueStyle {
    /// Grouped thousands with fixed decimals, e.g. `12,345.6`.
    Thousands { decimals: u8 },
    /// Ratio rendered as a percentage, e.g. `0.125` -> `12.5%`.
    Percent { decimals: u8 },
    /// Plain fixed decimals without grouping.
    Fixed { decimals: u8 },
}

impl Default for ValueStyle {
    fn default() -> Self {
        Self::Thousands { decimals: 0 }
    }
}

/// Fixed decimals with `,` thousands separators.
#[must_use]
pub fn format_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }

    let text = format!("{:.decimals$}", value.abs());
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3 + 1);
    let negative = value < 0.0 && text.bytes().any(|byte| matches!(byte, b'1'..=b'9'));
    if negative {
        grouped.push('-');
    }
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Ratio as a percentage with fixed decimals.
#[must_use]
pub fn format_percent(ratio: f64, decimals: usize) -> String {
    if !ratio.is_finite() {
        return "nan".to_owned();
    }
    format!("{}%", format_thousands(ratio * 100.0, decimals))
}

#[must_use]
pub fn format_value(value: f64, style: ValueStyle) -> String {
    match style {
        ValueStyle::Thousands { decimals } => format_thousands(value, usize::from(decimals)),
        ValueStyle::Percent { decimals } => format_percent(value, usize::from(decimals)),
        ValueStyle::Fixed { decimals } => {
            if value.is_finite() {
                format!("{value:.prec$}", prec = usize::from(decimals))
            } else {
                "nan".to_owned()
            }
        }
    }
}

/// Formats a cell, keeping "missing" distinct from a real zero.
#[must_use]
pub fn format_measure(measure: Measure, style: ValueStyle) -> String {
    match measure.state() {
        MeasureState::Missing => MISSING_LABEL.to_owned(),
        MeasureState::Zero => format_value(0.0, style),
        MeasureState::Present => format_value(measure.or_zero(), style),
    }
}

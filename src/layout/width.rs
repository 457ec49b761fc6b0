use std::{fmt, sync::Arc};

use serde::Serialize;
use tracing::trace;
use unicode_width::UnicodeWidthStr;

use crate::domain::{Chip, ChipField};

pub const KEY_MIN_WIDTH: u32 = 25;
pub const VALUE_MIN_WIDTH: u32 = 35;
/// Space left between the widest field and the container edge.
pub const FIELD_MAX_INSET: u32 = 50;
pub const DEFAULT_FIELD_MAX_WIDTH: u32 = 200;
pub const FIELD_WIDTH_MARGIN: u32 = 2;

/// Measures rendered text width in pixels.
pub trait TextMetrics: Send + Sync {
    fn measure(&self, text: &str) -> u32;
}

impl<F> TextMetrics for F
where
    F: Fn(&str) -> u32 + Send + Sync,
{
    fn measure(&self, text: &str) -> u32 {
        self(text)
    }
}

/// Monospace metrics: terminal display columns times a fixed cell width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub cell_width: u32,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self { cell_width: 8 }
    }
}

impl TextMetrics for CellMetrics {
    fn measure(&self, text: &str) -> u32 {
        let columns = u32::try_from(text.width()).unwrap_or(u32::MAX);
        columns.saturating_mul(self.cell_width)
    }
}

pub fn estimate_width(text: &str, measured_width: u32, min_width: u32, max_width: u32) -> u32 {
    let max_width = max_width.max(min_width);
    if text.chars().count() <= 1 {
        return min_width;
    }
    if measured_width >= max_width {
        max_width
    } else if measured_width > min_width {
        measured_width
            .saturating_add(FIELD_WIDTH_MARGIN)
            .min(max_width)
    } else {
        min_width
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldWidths {
    pub key: u32,
    pub value: u32,
}

impl FieldWidths {
    pub fn get(&self, field: ChipField) -> u32 {
        match field {
            ChipField::Key => self.key,
            ChipField::Value => self.value,
        }
    }

    pub fn set(&mut self, field: ChipField, width: u32) {
        match field {
            ChipField::Key => self.key = width,
            ChipField::Value => self.value = width,
        }
    }
}

#[derive(Clone)]
pub struct ChipFieldWidthEstimator {
    metrics: Arc<dyn TextMetrics>,
    key_min: u32,
    value_min: u32,
    max: u32,
}

impl fmt::Debug for ChipFieldWidthEstimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChipFieldWidthEstimator")
            .field("key_min", &self.key_min)
            .field("value_min", &self.value_min)
            .field("max", &self.max)
            .finish_non_exhaustive()
    }
}

impl Default for ChipFieldWidthEstimator {
    fn default() -> Self {
        Self::new(Arc::new(CellMetrics::default()))
    }
}

impl ChipFieldWidthEstimator {
    pub fn new(metrics: Arc<dyn TextMetrics>) -> Self {
        Self {
            metrics,
            key_min: KEY_MIN_WIDTH,
            value_min: VALUE_MIN_WIDTH,
            max: DEFAULT_FIELD_MAX_WIDTH,
        }
    }

    pub fn with_min_widths(mut self, key_min: u32, value_min: u32) -> Self {
        self.key_min = key_min;
        self.value_min = value_min;
        self
    }

    pub fn with_max_width(mut self, max: u32) -> Self {
        self.max = max;
        self
    }

    /// Fields may grow up to the container width minus [`FIELD_MAX_INSET`].
    pub fn fit_container(&mut self, container_width: u32) {
        self.max = container_width.saturating_sub(FIELD_MAX_INSET);
    }

    pub fn min_width(&self, field: ChipField) -> u32 {
        match field {
            ChipField::Key => self.key_min,
            ChipField::Value => self.value_min,
        }
    }

    pub fn max_width(&self) -> u32 {
        self.max
    }

    pub fn estimate(&self, field: ChipField, text: &str) -> u32 {
        let measured = self.metrics.measure(text);
        let width = estimate_width(text, measured, self.min_width(field), self.max);
        trace!(%field, measured, width, "field width estimated");
        width
    }

    pub fn estimate_chip(&self, chip: &Chip) -> FieldWidths {
        FieldWidths {
            key: self.estimate(ChipField::Key, &chip.key),
            value: self.estimate(ChipField::Value, &chip.value),
        }
    }
}

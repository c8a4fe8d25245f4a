//! # Coverage Chart
//!
//! Projects the uncovered percentage onto a two-slice pie and rasterizes it.
//!
//! The pie is drawn starting at 12 o'clock, clockwise: first the `NO` slice
//! (records not pointing at the provider), then the `YES` slice.

use std::f64::consts::TAU;
use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use serde::Serialize;

use crate::error::{Error, Result};

pub const NOT_COVERED_LABEL: &str = "NO";
pub const COVERED_LABEL: &str = "YES";

/// Edge length of the chart bitmap, in pixels.
pub const DEFAULT_SIZE: u32 = 200;

pub const NOT_COVERED_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const COVERED_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// A labelled pie slice; `value` is a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slice {
    pub label: &'static str,
    pub value: f64,
}

/// The covered / not covered split handed to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartDistribution {
    not_covered: Slice,
    covered: Slice,
}

impl ChartDistribution {
    pub fn not_covered(&self) -> Slice {
        self.not_covered
    }

    pub fn covered(&self) -> Slice {
        self.covered
    }

    /// Both slices in drawing order.
    pub fn slices(&self) -> [Slice; 2] {
        [self.not_covered, self.covered]
    }
}

/// Splits `percent` into the `NO` and `YES` slices.
///
/// Anything outside `0..=100` (including NaN) is rejected rather than clamped.
pub fn project(percent: f64) -> Result<ChartDistribution> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(Error::InvalidPercentage(percent));
    }

    Ok(ChartDistribution {
        not_covered: Slice {
            label: NOT_COVERED_LABEL,
            value: percent,
        },
        covered: Slice {
            label: COVERED_LABEL,
            value: 100.0 - percent,
        },
    })
}

/// Draws the distribution as a `size`×`size` pie on a white background.
pub fn rasterize(distribution: &ChartDistribution, size: u32) -> RgbImage {
    let center = f64::from(size) / 2.0;
    let radius = (center - 1.0).max(0.0);
    let boundary = distribution.not_covered.value / 100.0;

    RgbImage::from_fn(size, size, |x, y| {
        let dx = f64::from(x) + 0.5 - center;
        let dy = f64::from(y) + 0.5 - center;
        if dx * dx + dy * dy > radius * radius {
            return BACKGROUND;
        }

        // clockwise from 12 o'clock, in 0..1
        let turn = dx.atan2(-dy).rem_euclid(TAU) / TAU;
        if turn < boundary {
            NOT_COVERED_COLOR
        } else {
            COVERED_COLOR
        }
    })
}

/// Encodes a chart bitmap as PNG.
pub fn encode_png(chart: &RgbImage) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    chart.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

//! Gauge model for the result panel.
//!
//! Describes the dial shown next to a result: a fixed axis, five shaded
//! bands that line up with the category thresholds, and a bar in the
//! category color. Drawing it is left to the front end.

use crate::BmiResult;
use serde::Serialize;

/// Lower end of the gauge axis
pub const AXIS_MIN: f64 = 10.0;
/// Upper end of the gauge axis
pub const AXIS_MAX: f64 = 45.0;

/// One shaded step of the gauge
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GaugeBand {
    pub from: f64,
    pub to: f64,
    pub color: &'static str,
}

/// The last band covers both obesity II and III up to the axis end.
pub static GAUGE_BANDS: [GaugeBand; 5] = [
    GaugeBand { from: 10.0, to: 18.5, color: "#bae6fd" },
    GaugeBand { from: 18.5, to: 25.0, color: "#bbf7d0" },
    GaugeBand { from: 25.0, to: 30.0, color: "#ffe8a1" },
    GaugeBand { from: 30.0, to: 35.0, color: "#ffd1b2" },
    GaugeBand { from: 35.0, to: 45.0, color: "#ffc4c4" },
];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Gauge {
    pub value: f64,
    pub bar_color: &'static str,
    pub bands: &'static [GaugeBand],
}

impl Gauge {
    pub fn for_result(result: &BmiResult) -> Self {
        Self {
            value: result.bmi,
            bar_color: result.color,
            bands: &GAUGE_BANDS,
        }
    }

    /// Value pinned to the axis range
    pub fn clamped_value(&self) -> f64 {
        self.value.clamp(AXIS_MIN, AXIS_MAX)
    }

    /// Fraction of the axis covered by the bar, in `[0, 1]`
    pub fn fill_ratio(&self) -> f64 {
        (self.clamped_value() - AXIS_MIN) / (AXIS_MAX - AXIS_MIN)
    }

    /// Cell index of the value on a track `width` cells wide
    pub fn position(&self, width: usize) -> usize {
        if width == 0 {
            return 0;
        }
        let idx = (self.fill_ratio() * width as f64).floor() as usize;
        idx.min(width - 1)
    }

    /// Band color at a given cell of a track `width` cells wide
    pub fn band_color_at(&self, cell: usize, width: usize) -> &'static str {
        let value = AXIS_MIN + (cell as f64 + 0.5) / width.max(1) as f64 * (AXIS_MAX - AXIS_MIN);
        self.bands
            .iter()
            .find(|band| value < band.to)
            .or(self.bands.last())
            .map_or("#ffffff", |band| band.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify, CATEGORY_THRESHOLDS};

    #[test]
    fn test_bands_cover_axis() {
        assert_eq!(GAUGE_BANDS[0].from, AXIS_MIN);
        assert_eq!(GAUGE_BANDS[4].to, AXIS_MAX);
        for pair in GAUGE_BANDS.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
    }

    #[test]
    fn test_bands_follow_thresholds() {
        // Band edges are the first four category thresholds
        let edges: Vec<f64> = GAUGE_BANDS.iter().skip(1).map(|b| b.from).collect();
        assert_eq!(edges, CATEGORY_THRESHOLDS[..4].to_vec());
    }

    #[test]
    fn test_gauge_for_result() {
        let gauge = Gauge::for_result(&classify(70.0, 1.75).unwrap());
        assert_eq!(gauge.value, 22.9);
        assert_eq!(gauge.bar_color, "#34d399");
        assert_eq!(gauge.position(35), 12);
    }

    #[test]
    fn test_position_clamps_to_axis() {
        let low = Gauge::for_result(&classify(10.0, 2.0).unwrap());
        assert_eq!(low.value, 2.5);
        assert_eq!(low.position(20), 0);

        let high = Gauge::for_result(&classify(250.0, 1.5).unwrap());
        assert_eq!(high.fill_ratio(), 1.0);
        assert_eq!(high.position(20), 19);
        assert_eq!(high.position(0), 0);
    }

    #[test]
    fn test_band_color_at() {
        let gauge = Gauge::for_result(&classify(70.0, 1.75).unwrap());
        assert_eq!(gauge.band_color_at(0, 35), "#bae6fd");
        assert_eq!(gauge.band_color_at(10, 35), "#bbf7d0");
        assert_eq!(gauge.band_color_at(34, 35), "#ffc4c4");
    }
}

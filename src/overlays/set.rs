//! Output containers of an overlay pass.

use serde::Serialize;

use crate::core::{DerivedSeries, Price};
use crate::indicators::TrendSegment;

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OverlayStyle {
    /// Continuous line on the price axis.
    Line,
    /// Point markers on the price axis.
    Scatter,
    /// Line on its own secondary axis.
    SecondaryAxis,
}

/// One named derived series.
#[derive(Debug, Clone)]
pub struct Overlay {
    pub label: String,
    pub style: OverlayStyle,
    /// Aligned 1:1 with the source series.
    pub values: DerivedSeries,
}

/// Role of a horizontal level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LevelKind {
    /// Last significant low.
    Support,
    /// Last significant peak.
    Resistance,
}

/// A horizontal line across the whole chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HorizontalLevel {
    pub price: Price,
    pub kind: LevelKind,
}

/// Everything computed by one overlay pass.
#[derive(Debug, Clone, Default)]
pub struct OverlaySet {
    /// Named series in drawing order, trendline paths included.
    pub series: Vec<Overlay>,
    /// Anchors of each emitted trendline, in the order their paths appear
    /// in `series`.
    pub trend_segments: Vec<TrendSegment>,
    /// Support first, then resistance.
    pub levels: Vec<HorizontalLevel>,
}

impl OverlaySet {
    /// True when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty() && self.levels.is_empty()
    }

    /// First series with the given label.
    pub fn lookup(&self, label: &str) -> Option<&Overlay> {
        self.series.iter().find(|o| o.label == label)
    }

    /// Every series with the given label (trendlines share theirs).
    pub fn lookup_all<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Overlay> + 'a {
        self.series.iter().filter(move |o| o.label == label)
    }

    /// Labels in drawing order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|o| o.label.as_str())
    }

    pub(crate) fn push(&mut self, label: impl Into<String>, style: OverlayStyle, values: DerivedSeries) {
        self.series.push(Overlay {
            label: label.into(),
            style,
            values,
        });
    }
}

//! Overlay assembly: runs every enabled calculator and collects the named
//! series a chart draws on top of the price plot.

pub mod engine;
pub mod set;

pub use engine::{compute_overlays, OverlayEngine};
pub use set::{HorizontalLevel, LevelKind, Overlay, OverlaySet, OverlayStyle};

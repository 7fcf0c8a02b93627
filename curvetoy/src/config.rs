//! Settings for the editor, its previews and the gallery.

use std::path::Path;

use cubic_bezier::{CubicBezier, Padding, PlotStyle, Thumbnails};
use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::error::ToyError;

/// Everything about the toy that is not the curve itself.
///
/// Loaded from JSON; any field that is left out takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToyConfig {
    /// Size of the main editing canvas, in pixels.
    pub editor_size: Size,
    /// Room around the editing box; the default leaves a quarter of the
    /// height above and below for overshooting curves.
    pub editor_padding: Padding,
    pub editor_style: PlotStyle,
    /// Size of the "current" and "compare" animation previews.
    pub preview_size: Size,
    pub preview_padding: Padding,
    pub preview_style: PlotStyle,
    pub thumbnails: Thumbnails,
    /// Pixels moved per arrow key press.
    pub nudge_step: f64,
    /// Multiplier applied to `nudge_step` while shift is held.
    pub nudge_boost: f64,
    /// Preview animation length, in seconds.
    pub duration: Option<f64>,
    /// The curve shown when nothing else is asked for.
    pub initial_curve: CubicBezier,
}

impl Default for ToyConfig {
    fn default() -> Self {
        ToyConfig {
            editor_size: Size::new(300.0, 600.0),
            editor_padding: Padding {
                top: 0.25,
                right: 0.0,
                bottom: 0.25,
                left: 0.0,
            },
            editor_style: PlotStyle::default(),
            preview_size: Size::new(100.0, 100.0),
            preview_padding: Padding::uniform(0.15),
            preview_style: PlotStyle::default()
                .with_handle_thickness(0.03)
                .with_bezier_thickness(0.06),
            thumbnails: Thumbnails::default(),
            nudge_step: 3.0,
            nudge_boost: 10.0,
            duration: Some(1.0),
            initial_curve: CubicBezier::EASE,
        }
    }
}

impl ToyConfig {
    pub fn from_json(json: &str) -> Result<ToyConfig, ToyError> {
        serde_json::from_str(json).map_err(Into::into)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<ToyConfig, ToyError> {
        let json = std::fs::read_to_string(path)?;
        ToyConfig::from_json(&json)
    }
}

//! How a curve and its handles look when plotted.

#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

/// Colors are CSS color strings; thicknesses are in curve units, so a
/// thickness of `.02` is two percent of the drawable box.
///
/// With the `serde` feature every field is optional when deserializing and
/// falls back to the default style.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_", default, rename_all = "camelCase")
)]
pub struct PlotStyle {
    pub handle_color: String,
    pub handle_thickness: f64,
    pub bezier_color: String,
    pub bezier_thickness: f64,
}

impl PlotStyle {
    pub fn with_handle_color(mut self, color: impl Into<String>) -> PlotStyle {
        self.handle_color = color.into();
        self
    }

    pub fn with_handle_thickness(mut self, thickness: f64) -> PlotStyle {
        self.handle_thickness = thickness;
        self
    }

    pub fn with_bezier_color(mut self, color: impl Into<String>) -> PlotStyle {
        self.bezier_color = color.into();
        self
    }

    pub fn with_bezier_thickness(mut self, thickness: f64) -> PlotStyle {
        self.bezier_thickness = thickness;
        self
    }

    /// Radius of the dot drawn on each control point.
    pub fn handle_radius(&self) -> f64 {
        1.5 * self.handle_thickness
    }
}

impl Default for PlotStyle {
    fn default() -> Self {
        PlotStyle {
            handle_color: "rgba(0,0,0,.6)".into(),
            handle_thickness: 0.008,
            bezier_color: "black".into(),
            bezier_thickness: 0.02,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_are_independent() {
        let style = PlotStyle::default().with_bezier_color("red");
        assert_eq!(style.bezier_color, "red");
        assert_eq!(style.handle_color, PlotStyle::default().handle_color);
        assert_eq!(style.bezier_thickness, 0.02);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config() {
        let style: PlotStyle = serde_json::from_str(r#"{"handleThickness": 0.01}"#).unwrap();
        assert_eq!(style.handle_thickness, 0.01);
        assert_eq!(style.bezier_color, "black");
        assert_eq!(style.handle_radius(), 1.5 * 0.01);
    }
}

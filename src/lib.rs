//! Cubic Bézier timing functions, for designing animation easing.
//!
//! A [`CubicBezier`] is the curve behind a CSS `cubic-bezier()` timing
//! function: it runs from (0, 0) to (1, 1) and is shaped by two control
//! points. This crate parses and formats these curves, maps them onto a
//! padded canvas so their control points can be dragged around
//! ([`BezierCanvas`]), plots them onto any [`Surface`], and keeps a named
//! [`Library`] of them for a thumbnail gallery.
//!
//! ```
//! use cubic_bezier::{BezierCanvas, CubicBezier, PlotStyle, SvgSurface};
//!
//! let ease: CubicBezier = ".25,.1,.25,1".parse().unwrap();
//! assert_eq!(ease.to_string(), "cubic-bezier(.25,.1,.25,1)");
//!
//! let canvas = BezierCanvas::new((100.0, 100.0), 0.15).unwrap();
//! let mut svg = SvgSurface::new(canvas.size());
//! canvas.render(&mut svg, &ease, &PlotStyle::default()).unwrap();
//! assert!(svg.to_svg().contains("<path"));
//! ```

mod canvas;
mod curve;
mod error;
mod library;
mod padding;
mod style;
pub mod surface;

pub use canvas::BezierCanvas;
pub use curve::{CubicBezier, PREDEFINED};
pub use error::{Error, Result};
pub use library::{Library, Thumbnails};
pub use padding::Padding;
pub use style::PlotStyle;
pub use surface::{Recording, Surface, SvgSurface};

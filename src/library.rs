//! A named collection of curves, shown as a gallery of thumbnails.

use indexmap::IndexMap;
use kurbo::Size;
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::canvas::BezierCanvas;
use crate::curve::{CubicBezier, PREDEFINED};
use crate::error::{Error, Result};
use crate::padding::Padding;
use crate::style::PlotStyle;
use crate::surface::Surface;

/// Size, padding and styles of gallery thumbnails.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_", default, rename_all = "camelCase")
)]
pub struct Thumbnails {
    pub size: Size,
    pub padding: Padding,
    pub style: PlotStyle,
    pub selected_style: PlotStyle,
}

impl Default for Thumbnails {
    fn default() -> Self {
        Thumbnails {
            size: Size::new(100.0, 100.0),
            padding: Padding::uniform(0.15),
            style: PlotStyle::default()
                .with_handle_thickness(0.03)
                .with_bezier_thickness(0.06),
            selected_style: PlotStyle::default()
                .with_handle_color("rgba(255,255,255,.6)")
                .with_handle_thickness(0.03)
                .with_bezier_color("white")
                .with_bezier_thickness(0.06),
        }
    }
}

/// Curves by name, in insertion order.
///
/// At most one entry is selected at a time. With the `serde` feature the
/// library (de)serializes as a map from name to `a,b,c,d` string; the
/// selection is not saved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Library {
    curves: IndexMap<String, CubicBezier>,
    selected: Option<String>,
}

#[cfg(feature = "serde")]
impl Serialize for Library {
    fn serialize<S: serde_::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.curves.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Library {
    fn deserialize<D: serde_::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let curves = IndexMap::deserialize(deserializer)?;
        Ok(Library {
            curves,
            selected: None,
        })
    }
}

impl Library {
    pub fn new() -> Library {
        Library::default()
    }

    /// A library holding just the [`PREDEFINED`] curves.
    pub fn with_predefined() -> Library {
        let mut library = Library::new();
        library.reset();
        library
    }

    /// Replace everything in the library with `entries`.
    ///
    /// Entries that do not parse are skipped, logged, and returned; the rest
    /// are still loaded.
    pub fn load<'a, I>(&mut self, entries: I) -> Vec<(String, Error)>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.curves.clear();
        self.selected = None;
        let mut rejected = Vec::new();
        for (name, value) in entries {
            match value.parse::<CubicBezier>() {
                Ok(curve) => {
                    self.curves.insert(name.to_owned(), curve);
                }
                Err(e) => {
                    log::warn!("skipping curve {:?}: {}", name, e);
                    rejected.push((name.to_owned(), e));
                }
            }
        }
        rejected
    }

    /// Go back to the predefined curves, dropping any saved ones.
    pub fn reset(&mut self) {
        // the predefined table is known to parse
        self.load(PREDEFINED.iter().copied());
    }

    /// Save a curve under `name`, returning the curve it replaced.
    ///
    /// A replaced entry keeps its position in the gallery.
    pub fn insert(&mut self, name: impl Into<String>, curve: CubicBezier) -> Option<CubicBezier> {
        self.curves.insert(name.into(), curve)
    }

    pub fn remove(&mut self, name: &str) -> Option<CubicBezier> {
        if self.selected.as_deref() == Some(name) {
            self.selected = None;
        }
        self.curves.shift_remove(name)
    }

    pub fn get(&self, name: &str) -> Option<CubicBezier> {
        self.curves.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CubicBezier)> + '_ {
        self.curves.iter().map(|(name, curve)| (name.as_str(), *curve))
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Make `name` the selected entry and return its curve.
    ///
    /// Selecting an unknown name is an error and leaves the current
    /// selection alone.
    pub fn select(&mut self, name: &str) -> Result<CubicBezier> {
        let curve = self
            .get(name)
            .ok_or_else(|| Error::UnknownCurve(name.to_owned()))?;
        log::debug!("selected {:?} ({})", name, curve);
        self.selected = Some(name.to_owned());
        Ok(curve)
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<(&str, CubicBezier)> {
        let name = self.selected.as_deref()?;
        self.get(name).map(|curve| (name, curve))
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.as_deref() == Some(name)
    }

    /// Draw a single thumbnail onto `surface`.
    pub fn render_entry<S>(&self, name: &str, thumbs: &Thumbnails, surface: &mut S) -> Result<()>
    where
        S: Surface + ?Sized,
    {
        let curve = self
            .get(name)
            .ok_or_else(|| Error::UnknownCurve(name.to_owned()))?;
        let canvas = BezierCanvas::new(thumbs.size, thumbs.padding)?;
        let style = if self.is_selected(name) {
            &thumbs.selected_style
        } else {
            &thumbs.style
        };
        canvas.render(surface, &curve, style)
    }

    /// Render every entry, each onto a fresh surface from `make_surface`.
    ///
    /// Returns one result per entry, in gallery order. A failure is logged
    /// and does not stop the remaining entries from rendering.
    pub fn render<S, F>(&self, thumbs: &Thumbnails, mut make_surface: F) -> Vec<(String, Result<S>)>
    where
        S: Surface,
        F: FnMut(&str, Size) -> Result<S>,
    {
        self.curves
            .keys()
            .map(|name| {
                let result = make_surface(name, thumbs.size).and_then(|mut surface| {
                    self.render_entry(name, thumbs, &mut surface)?;
                    Ok(surface)
                });
                if let Err(e) = &result {
                    log::error!("error rendering curve {:?}: {}", name, e);
                }
                (name.clone(), result)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Recording, SvgSurface};

    #[test]
    fn predefined_order() {
        let library = Library::with_predefined();
        let names: Vec<_> = library.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["ease", "linear", "ease-in", "ease-out", "ease-in-out"]);
        assert_eq!(library.get("linear"), CubicBezier::new(0.0, 0.0, 1.0, 1.0).ok());
    }

    #[test]
    fn load_skips_bad_entries() {
        let mut library = Library::with_predefined();
        let rejected = library.load(vec![
            ("ok", ".1,.2,.3,.4"),
            ("bad", "1.5,2,3,4"),
            ("short", "0,1"),
            ("also-ok", "0,0,1,1"),
        ]);
        assert_eq!(library.len(), 2);
        assert!(library.get("ease").is_none());
        let names: Vec<_> = rejected.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["bad", "short"]);
        assert_eq!(rejected[1].1, Error::Count(2));
    }

    #[test]
    fn selection_state() {
        let mut library = Library::with_predefined();
        assert!(library.selected().is_none());

        let ease = library.select("ease").unwrap();
        assert_eq!(Some(ease), CubicBezier::predefined("ease"));
        assert!(library.is_selected("ease"));

        library.select("linear").unwrap();
        assert!(!library.is_selected("ease"));
        assert_eq!(library.selected().map(|(n, _)| n), Some("linear"));

        assert_eq!(
            library.select("nope"),
            Err(Error::UnknownCurve("nope".into()))
        );
        assert_eq!(library.selected().map(|(n, _)| n), Some("linear"));

        library.remove("linear");
        assert!(library.selected().is_none());
    }

    #[test]
    fn insert_keeps_position() {
        let mut library = Library::with_predefined();
        let bounce = CubicBezier::new(0.5, -0.5, 0.5, 1.5).unwrap();
        assert!(library.insert("bounce", bounce).is_none());
        let old = library.insert("linear", bounce);
        assert_eq!(old, CubicBezier::predefined("linear"));
        let names: Vec<_> = library.iter().map(|(name, _)| name).collect();
        assert_eq!(names[1], "linear");
        assert_eq!(names.last(), Some(&"bounce"));
        library.reset();
        assert!(library.get("bounce").is_none());
    }

    #[test]
    fn render_every_entry() {
        let mut library = Library::with_predefined();
        library.select("ease-in").unwrap();
        let thumbs = Thumbnails::default();
        let results = library.render(&thumbs, |_, size| Ok(Recording::new(size)));
        assert_eq!(results.len(), 5);
        for (_, result) in &results {
            assert_eq!(result.as_ref().unwrap().ops.len(), 6);
        }
    }

    #[test]
    fn render_failures_are_isolated() {
        let mut library = Library::with_predefined();
        library.select("linear").unwrap();
        // a selected style the svg surface refuses to write
        let thumbs = Thumbnails {
            selected_style: PlotStyle::default().with_bezier_color("\"broken"),
            ..Thumbnails::default()
        };
        let results = library.render(&thumbs, |name, size| {
            if name == "ease-out" {
                Err(Error::Surface("no canvas".into()))
            } else {
                Ok(SvgSurface::new(size))
            }
        });
        let failed: Vec<_> = results
            .iter()
            .filter(|(_, r)| r.is_err())
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(failed, ["linear", "ease-out"]);
        assert!(results[4].1.as_ref().unwrap().to_svg().contains("<path"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip() {
        let mut library = Library::with_predefined();
        library.insert("snap", CubicBezier::new(0.9, 0.0, 0.1, 1.0).unwrap());
        library.select("snap").unwrap();
        let json = serde_json::to_string(&library).unwrap();
        assert!(json.contains(r#""snap":".9,0,.1,1""#));
        let back: Library = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 6);
        assert!(back.selected().is_none());
        assert_eq!(back.get("snap"), library.get("snap"));
    }
}

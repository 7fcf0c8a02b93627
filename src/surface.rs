//! The drawing surfaces a [`BezierCanvas`](crate::BezierCanvas) can plot on.
//!
//! The canvas only needs a handful of primitives: an affine transform, a
//! clear, path stroking (move, line and cubic segments) and filled circles.
//! Everything in this module is a plain implementation of that contract; the
//! browser canvas lives in the `curvetoy` crate.

use std::fmt::Write;

use kurbo::{Affine, BezPath, Circle, PathEl, Point, Rect, Size};

use crate::error::{Error, Result};

/// A raster or vector target that draws in a transformed coordinate space.
pub trait Surface {
    /// The size of the surface in pixels.
    fn size(&self) -> Size;

    /// Replace the current transform; later calls draw through it.
    fn set_transform(&mut self, transform: Affine) -> Result<()>;

    /// Clear `rect`, given in the current coordinate space.
    fn clear(&mut self, rect: Rect) -> Result<()>;

    fn stroke(&mut self, path: &BezPath, color: &str, width: f64) -> Result<()>;

    fn fill_circle(&mut self, circle: Circle, color: &str) -> Result<()>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn set_transform(&mut self, transform: Affine) -> Result<()> {
        (**self).set_transform(transform)
    }

    fn clear(&mut self, rect: Rect) -> Result<()> {
        (**self).clear(rect)
    }

    fn stroke(&mut self, path: &BezPath, color: &str, width: f64) -> Result<()> {
        (**self).stroke(path, color, width)
    }

    fn fill_circle(&mut self, circle: Circle, color: &str) -> Result<()> {
        (**self).fill_circle(circle, color)
    }
}

/// One call made on a [`Recording`].
///
/// Stroked paths are kept as their elements so ops can be compared.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    SetTransform(Affine),
    Clear(Rect),
    Stroke {
        path: Vec<PathEl>,
        color: String,
        width: f64,
    },
    FillCircle {
        circle: Circle,
        color: String,
    },
}

/// A surface that remembers what was drawn on it instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct Recording {
    size: Size,
    pub ops: Vec<DrawOp>,
}

impl Recording {
    pub fn new(size: impl Into<Size>) -> Recording {
        Recording {
            size: size.into(),
            ops: Vec::new(),
        }
    }
}

impl Surface for Recording {
    fn size(&self) -> Size {
        self.size
    }

    fn set_transform(&mut self, transform: Affine) -> Result<()> {
        self.ops.push(DrawOp::SetTransform(transform));
        Ok(())
    }

    fn clear(&mut self, rect: Rect) -> Result<()> {
        self.ops.push(DrawOp::Clear(rect));
        Ok(())
    }

    fn stroke(&mut self, path: &BezPath, color: &str, width: f64) -> Result<()> {
        self.ops.push(DrawOp::Stroke {
            path: path.elements().to_vec(),
            color: color.to_owned(),
            width,
        });
        Ok(())
    }

    fn fill_circle(&mut self, circle: Circle, color: &str) -> Result<()> {
        self.ops.push(DrawOp::FillCircle {
            circle,
            color: color.to_owned(),
        });
        Ok(())
    }
}

/// A surface that produces a standalone SVG document.
///
/// The transform is written out on every element, so line widths are
/// scaled along with the geometry just as they are on a 2D canvas.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    size: Size,
    transform: Affine,
    body: String,
}

impl SvgSurface {
    pub fn new(size: impl Into<Size>) -> SvgSurface {
        SvgSurface {
            size: size.into(),
            transform: Affine::scale(1.0),
            body: String::new(),
        }
    }

    /// The finished SVG document.
    pub fn to_svg(&self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{}</svg>"#,
            self.body,
            w = self.size.width,
            h = self.size.height,
        )
    }

    fn matrix(&self) -> String {
        let [a, b, c, d, e, f] = self.transform.as_coeffs();
        format!("matrix({} {} {} {} {} {})", a, b, c, d, e, f)
    }
}

/// Colors end up inside an XML attribute, so anything that could close it is
/// refused rather than escaped.
fn check_color(color: &str) -> Result<&str> {
    if color.is_empty() || color.contains(|c| matches!(c, '"' | '<' | '>' | '&')) {
        Err(Error::Surface(format!("unusable color {:?}", color)))
    } else {
        Ok(color)
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn set_transform(&mut self, transform: Affine) -> Result<()> {
        if transform.determinant() == 0.0 {
            return Err(Error::Surface("singular transform".into()));
        }
        self.transform = transform;
        Ok(())
    }

    /// An SVG has no pixels to clear; any clear that covers the whole
    /// surface starts the document over.
    fn clear(&mut self, rect: Rect) -> Result<()> {
        let p0 = self.transform * Point::new(rect.x0, rect.y0);
        let p1 = self.transform * Point::new(rect.x1, rect.y1);
        const SLOP: f64 = 1e-6;
        if p0.x.min(p1.x) <= SLOP
            && p0.y.min(p1.y) <= SLOP
            && p0.x.max(p1.x) >= self.size.width - SLOP
            && p0.y.max(p1.y) >= self.size.height - SLOP
        {
            self.body.clear();
        }
        Ok(())
    }

    fn stroke(&mut self, path: &BezPath, color: &str, width: f64) -> Result<()> {
        let color = check_color(color)?;
        let matrix = self.matrix();
        let _ = write!(
            self.body,
            r#"<path d="{}" transform="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            path.to_svg(),
            matrix,
            color,
            width
        );
        Ok(())
    }

    fn fill_circle(&mut self, circle: Circle, color: &str) -> Result<()> {
        let color = check_color(color)?;
        let matrix = self.matrix();
        let _ = write!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}" transform="{}" fill="{}"/>"#,
            circle.center.x, circle.center.y, circle.radius, matrix, color
        );
        Ok(())
    }
}

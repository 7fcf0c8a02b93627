//! Mapping between canvas pixels and curve space, and plotting.

use kurbo::{Affine, BezPath, Circle, Point, Rect, Size};

use crate::curve::CubicBezier;
use crate::error::{Error, Result};
use crate::padding::Padding;
use crate::style::PlotStyle;
use crate::surface::Surface;

/// A canvas of a given pixel size that a timing curve is drawn into.
///
/// Pixels have their origin at the top left with y growing downwards. Curve
/// space has (0, 0) at the bottom left and (1, 1) at the top right of the
/// padded box, with y growing upwards. Control points outside the unit square
/// land in the padding (or beyond it).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierCanvas {
    size: Size,
    padding: Padding,
}

impl BezierCanvas {
    pub fn new(size: impl Into<Size>, padding: impl Into<Padding>) -> Result<BezierCanvas> {
        let size = size.into();
        let padding = padding.into().validate()?;
        if !(size.width > 0.0 && size.height > 0.0) {
            return Err(Error::Surface(format!("empty canvas {:?}", size)));
        }
        Ok(BezierCanvas { size, padding })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// The transform from curve space to pixels.
    ///
    /// This is a scale, flipping y, followed by a translation to the bottom
    /// left corner of the padded box.
    pub fn transform(&self) -> Affine {
        let p = &self.padding;
        let sx = self.size.width * p.width_span();
        let sy = -self.size.height * p.height_span();
        let tx = p.left / p.width_span();
        let ty = -1.0 - p.top / p.height_span();
        Affine::new([sx, 0.0, 0.0, sy, sx * tx, sy * ty])
    }

    /// The pixel position of a point given in curve space.
    pub fn to_pixel(&self, point: Point) -> Point {
        let p = &self.padding;
        let (w, h) = (self.size.width, self.size.height);
        Point::new(
            w * (p.left + point.x * p.width_span()),
            h * (1.0 - p.bottom - point.y * p.height_span()),
        )
    }

    /// Pixel positions (`left`, `top`) of the two control points.
    pub fn offsets(&self, curve: &CubicBezier) -> [Point; 2] {
        [self.to_pixel(curve.P1()), self.to_pixel(curve.P2())]
    }

    /// The curve-space coordinates of a pixel position.
    ///
    /// This is the inverse of [`offsets`](BezierCanvas::offsets). Results
    /// within rounding error of 0 or 1 are snapped to it, so the edges of
    /// the box map back to valid control points.
    pub fn pixel_to_coordinate(&self, pixel: Point) -> Point {
        let (w, h) = (self.size.width, self.size.height);
        // padding in pixels
        let top = self.padding.top * h;
        let right = self.padding.right * w;
        let bottom = self.padding.bottom * h;
        let left = self.padding.left * w;
        Point::new(
            snap((pixel.x - left) / (w - left - right)),
            snap((h - pixel.y - bottom) / (h - top - bottom)),
        )
    }

    /// The pixel range of x values that lie inside the padded box.
    pub fn x_range(&self) -> (f64, f64) {
        let w = self.size.width;
        (self.padding.left * w, (1.0 - self.padding.right) * w)
    }

    /// The whole canvas, in curve space.
    fn bounds(&self) -> Rect {
        let inv = self.transform().inverse();
        let p0 = inv * Point::ORIGIN;
        let p1 = inv * Point::new(self.size.width, self.size.height);
        Rect::new(
            p0.x.min(p1.x),
            p0.y.min(p1.y),
            p0.x.max(p1.x),
            p0.y.max(p1.y),
        )
    }

    /// Clear `surface` and plot `curve` on it.
    ///
    /// The guide lines from each endpoint to its control point are drawn
    /// first, then a dot on each control point, then the curve itself.
    pub fn render<S>(&self, surface: &mut S, curve: &CubicBezier, style: &PlotStyle) -> Result<()>
    where
        S: Surface + ?Sized,
    {
        let (p1, p2) = (curve.P1(), curve.P2());
        surface.set_transform(self.transform())?;
        surface.clear(self.bounds())?;

        let mut handles = BezPath::new();
        handles.move_to(Point::ORIGIN);
        handles.line_to(p1);
        handles.move_to(Point::new(1.0, 1.0));
        handles.line_to(p2);
        surface.stroke(&handles, &style.handle_color, style.handle_thickness)?;

        let radius = style.handle_radius();
        surface.fill_circle(Circle::new(p1, radius), &style.handle_color)?;
        surface.fill_circle(Circle::new(p2, radius), &style.handle_color)?;

        let mut bezier = BezPath::new();
        bezier.move_to(Point::ORIGIN);
        bezier.curve_to(p1, p2, Point::new(1.0, 1.0));
        surface.stroke(&bezier, &style.bezier_color, style.bezier_thickness)
    }
}

fn snap(v: f64) -> f64 {
    const SNAP: f64 = 1e-9;
    if v.abs() < SNAP {
        0.0
    } else if (v - 1.0).abs() < SNAP {
        1.0
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, Recording};
    use approx::assert_abs_diff_eq;
    use rand::distributions::{Distribution, Uniform};

    fn curve(s: &str) -> CubicBezier {
        s.parse().unwrap()
    }

    fn assert_points_eq(a: Point, b: Point) {
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
    }

    #[test]
    fn corners_without_padding() {
        let canvas = BezierCanvas::new((200.0, 100.0), 0.0).unwrap();
        let [p1, p2] = canvas.offsets(&curve("0,0,1,1"));
        assert_points_eq(p1, Point::new(0.0, 100.0));
        assert_points_eq(p2, Point::new(200.0, 0.0));
    }

    #[test]
    fn editor_padding() {
        // the editor canvas pads a quarter of the height for overshoot
        let padding = Padding::from_shorthand(&[0.25, 0.0]).unwrap();
        let canvas = BezierCanvas::new((300.0, 600.0), padding).unwrap();
        let [p1, p2] = canvas.offsets(&curve("0,0,1,1"));
        assert_points_eq(p1, Point::new(0.0, 450.0));
        assert_points_eq(p2, Point::new(300.0, 150.0));
        let [over, under] = canvas.offsets(&curve(".5,1.5,.5,-.5"));
        assert_points_eq(over, Point::new(150.0, 0.0));
        assert_points_eq(under, Point::new(150.0, 600.0));
    }

    #[test]
    fn asymmetric_padding() {
        let padding = Padding::from_shorthand(&[0.1, 0.2, 0.3, 0.05]).unwrap();
        let canvas = BezierCanvas::new((100.0, 100.0), padding).unwrap();
        assert_points_eq(canvas.to_pixel(Point::ORIGIN), Point::new(5.0, 70.0));
        assert_points_eq(canvas.to_pixel(Point::new(1.0, 1.0)), Point::new(80.0, 10.0));
    }

    #[test]
    fn transform_agrees_with_offsets() {
        let padding = Padding::from_shorthand(&[0.1, 0.2, 0.3]).unwrap();
        let canvas = BezierCanvas::new((320.0, 240.0), padding).unwrap();
        let a = canvas.transform();
        for &pt in &[Point::ORIGIN, Point::new(1.0, 1.0), Point::new(0.3, -0.7)] {
            assert_points_eq(a * pt, canvas.to_pixel(pt));
        }
    }

    #[test]
    fn offsets_and_pixels_are_inverse() {
        let mut rng = rand::thread_rng();
        let unit = Uniform::from(0.0..1.0);
        let pad = Uniform::from(0.0..0.45);
        let dim = Uniform::from(10.0..1000.0);
        for _ in 0..500 {
            let padding = Padding::from_shorthand(&[
                pad.sample(&mut rng),
                pad.sample(&mut rng),
                pad.sample(&mut rng),
                pad.sample(&mut rng),
            ])
            .unwrap();
            let size = (dim.sample(&mut rng), dim.sample(&mut rng));
            let canvas = BezierCanvas::new(size, padding).unwrap();
            let c = CubicBezier::new(
                unit.sample(&mut rng),
                unit.sample(&mut rng),
                unit.sample(&mut rng),
                unit.sample(&mut rng),
            )
            .unwrap();
            let [o1, o2] = canvas.offsets(&c);
            assert_points_eq(canvas.pixel_to_coordinate(o1), c.P1());
            assert_points_eq(canvas.pixel_to_coordinate(o2), c.P2());

            let px = Point::new(
                unit.sample(&mut rng) * size.0,
                unit.sample(&mut rng) * size.1,
            );
            assert_points_eq(canvas.to_pixel(canvas.pixel_to_coordinate(px)), px);
        }
    }

    #[test]
    fn box_edges_map_to_valid_curves() {
        let mut rng = rand::thread_rng();
        let pad = Uniform::from(0.0..0.45);
        let dim = Uniform::from(10.0..1000.0);
        for _ in 0..500 {
            let padding = Padding::from_shorthand(&[
                pad.sample(&mut rng),
                pad.sample(&mut rng),
                pad.sample(&mut rng),
                pad.sample(&mut rng),
            ])
            .unwrap();
            let size = (dim.sample(&mut rng), dim.sample(&mut rng));
            let canvas = BezierCanvas::new(size, padding).unwrap();
            for (name, _) in crate::PREDEFINED.iter() {
                let c = CubicBezier::predefined(name).unwrap();
                let [o1, o2] = canvas.offsets(&c);
                let (p1, p2) = (canvas.pixel_to_coordinate(o1), canvas.pixel_to_coordinate(o2));
                let back = CubicBezier::new(p1.x, p1.y, p2.x, p2.y).unwrap();
                assert_points_eq(back.P1(), c.P1());
                assert_points_eq(back.P2(), c.P2());
            }
        }
    }

    #[test]
    fn x_range_is_the_padded_box() {
        let padding = Padding::from_shorthand(&[0.25, 0.1, 0.25, 0.2]).unwrap();
        let canvas = BezierCanvas::new((300.0, 600.0), padding).unwrap();
        let (x0, x1) = canvas.x_range();
        assert_abs_diff_eq!(x0, 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(x1, 270.0, epsilon = 1e-9);
        assert_eq!(canvas.pixel_to_coordinate(Point::new(x1, 150.0)).x, 1.0);
        assert_eq!(canvas.pixel_to_coordinate(Point::new(x0, 450.0)).x, 0.0);
    }

    #[test]
    fn rejects_unusable_padding() {
        assert!(BezierCanvas::new((100.0, 100.0), 0.5).is_err());
        assert!(BezierCanvas::new((0.0, 100.0), 0.1).is_err());
    }

    #[test]
    fn render_draw_order() {
        let canvas = BezierCanvas::new((100.0, 100.0), 0.15).unwrap();
        let c = curve(".25,.1,.25,1");
        let style = PlotStyle::default().with_bezier_color("red");
        let mut rec = Recording::new(canvas.size());
        canvas.render(&mut rec, &c, &style).unwrap();

        assert_eq!(rec.ops.len(), 6);
        assert_eq!(rec.ops[0], DrawOp::SetTransform(canvas.transform()));
        match &rec.ops[1] {
            DrawOp::Clear(rect) => {
                assert_abs_diff_eq!(rect.x0, -0.15 / 0.7, epsilon = 1e-9);
                assert_abs_diff_eq!(rect.x1, 1.0 + 0.15 / 0.7, epsilon = 1e-9);
            }
            op => panic!("expected clear, got {:?}", op),
        }
        match &rec.ops[2] {
            DrawOp::Stroke { path, color, width } => {
                assert_eq!(path.len(), 4);
                assert_eq!(color, "rgba(0,0,0,.6)");
                assert_eq!(*width, 0.008);
            }
            op => panic!("expected handles, got {:?}", op),
        }
        assert_eq!(
            rec.ops[3],
            DrawOp::FillCircle {
                circle: Circle::new(c.P1(), 1.5 * 0.008),
                color: "rgba(0,0,0,.6)".into()
            }
        );
        match &rec.ops[5] {
            DrawOp::Stroke { path, color, .. } => {
                assert_eq!(color, "red");
                assert_eq!(path.len(), 2);
            }
            op => panic!("expected curve, got {:?}", op),
        }
    }

    #[test]
    fn render_to_svg() {
        let canvas = BezierCanvas::new((100.0, 100.0), 0.15).unwrap();
        let mut svg = crate::surface::SvgSurface::new(canvas.size());
        canvas
            .render(&mut svg, &curve("0,0,1,1"), &PlotStyle::default())
            .unwrap();
        // render twice; the clear must drop the first plot
        canvas
            .render(&mut svg, &curve(".42,0,.58,1"), &PlotStyle::default())
            .unwrap();
        let doc = svg.to_svg();
        assert_eq!(doc.matches("<circle").count(), 2);
        assert_eq!(doc.matches("<path").count(), 2);
    }
}

//! Draws a handful of random timing curves and prints them as an HTML page.
//!
//! Each curve is listed with the progression it reaches at a few points in
//! time, which is handy for eyeballing `progress_at` against the plot.

use rand::distributions::{Distribution, Uniform};

use cubic_bezier::{BezierCanvas, CubicBezier, Padding, PlotStyle, SvgSurface};

fn main() {
    let mut rng = rand::thread_rng();
    let x = Uniform::from(0.0..1.0);
    let y = Uniform::from(-0.5..1.5);
    const N: usize = 8;
    let padding = Padding::from_shorthand(&[0.25, 0.1]).unwrap();
    let canvas = BezierCanvas::new((200.0, 200.0), padding).unwrap();
    let style = PlotStyle::default();
    println!("<!DOCTYPE html>\n<html>\n<body>");
    for _ in 0..N {
        let curve = CubicBezier::new(
            x.sample(&mut rng),
            y.sample(&mut rng),
            x.sample(&mut rng),
            y.sample(&mut rng),
        )
        .unwrap();
        let mut svg = SvgSurface::new(canvas.size());
        canvas.render(&mut svg, &curve, &style).unwrap();
        let samples = [0.25, 0.5, 0.75]
            .iter()
            .map(|&t| format!("{:.2}", curve.progress_at(t)))
            .collect::<Vec<_>>();
        println!(
            "  <figure>{}<figcaption>{} [{}]</figcaption></figure>",
            svg.to_svg(),
            curve,
            samples.join(" ")
        );
    }
    println!("</body>\n</html>");
}

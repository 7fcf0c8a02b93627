//! The cubic Bézier timing function.

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use kurbo::{CubicBez, Point};

use crate::error::{Error, Result};

/// The timing functions every CSS engine knows by name.
pub const PREDEFINED: [(&str, &str); 5] = [
    ("ease", ".25,.1,.25,1"),
    ("linear", "0,0,1,1"),
    ("ease-in", ".42,0,1,1"),
    ("ease-out", "0,0,.58,1"),
    ("ease-in-out", ".42,0,.58,1"),
];

/// A cubic Bézier from (0, 0) to (1, 1), described by its two control points.
///
/// The x coordinates are always in `0..=1`, which keeps the curve a function
/// of time. The y coordinates may leave that range; this is how overshoot
/// and bounce easings are expressed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    coordinates: [f64; 4],
}

impl CubicBezier {
    pub const EASE: CubicBezier = CubicBezier::from_raw([0.25, 0.1, 0.25, 1.0]);
    pub const LINEAR: CubicBezier = CubicBezier::from_raw([0.0, 0.0, 1.0, 1.0]);
    pub const EASE_IN: CubicBezier = CubicBezier::from_raw([0.42, 0.0, 1.0, 1.0]);
    pub const EASE_OUT: CubicBezier = CubicBezier::from_raw([0.0, 0.0, 0.58, 1.0]);
    pub const EASE_IN_OUT: CubicBezier = CubicBezier::from_raw([0.42, 0.0, 0.58, 1.0]);

    /// Unchecked; only for the constants above.
    const fn from_raw(coordinates: [f64; 4]) -> CubicBezier {
        CubicBezier { coordinates }
    }

    /// Create a curve from the control points `(x1, y1)` and `(x2, y2)`.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<CubicBezier> {
        CubicBezier::try_from([x1, y1, x2, y2])
    }

    /// Look up one of the [`PREDEFINED`] curves by name.
    pub fn predefined(name: &str) -> Option<CubicBezier> {
        PREDEFINED
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, s)| s.parse().ok())
    }

    pub fn coordinates(&self) -> [f64; 4] {
        self.coordinates
    }

    /// The first control point.
    #[allow(non_snake_case)]
    pub fn P1(&self) -> Point {
        Point::new(self.coordinates[0], self.coordinates[1])
    }

    /// The second control point.
    #[allow(non_snake_case)]
    pub fn P2(&self) -> Point {
        Point::new(self.coordinates[2], self.coordinates[3])
    }

    /// A copy of this curve with every coordinate clamped to `0..=1`.
    ///
    /// Only useful for previews that must stay inside their box.
    pub fn clipped(&self) -> CubicBezier {
        let mut coordinates = self.coordinates;
        for c in coordinates.iter_mut() {
            *c = c.max(0.0).min(1.0);
        }
        CubicBezier { coordinates }
    }

    /// `true` if neither control point overshoots vertically.
    pub fn in_range(&self) -> bool {
        (self.coordinates[1] - 0.5).abs() <= 0.5 && (self.coordinates[3] - 0.5).abs() <= 0.5
    }

    /// The canonical `a,b,c,d` serialization, as used in URL fragments.
    ///
    /// Numbers are rounded to two decimals and lose their leading zero.
    pub fn fragment(&self) -> String {
        let parts: Vec<String> = self.coordinates.iter().map(|&c| prettify(c)).collect();
        parts.join(",")
    }

    /// The curve as a kurbo cubic, from (0, 0) to (1, 1).
    pub fn to_cubic(&self) -> CubicBez {
        CubicBez::new(Point::ORIGIN, self.P1(), self.P2(), Point::new(1.0, 1.0))
    }

    /// The eased progression at `time`, which is clamped to `0..=1`.
    ///
    /// This finds the curve parameter whose x equals `time` and returns the y
    /// at that parameter.
    pub fn progress_at(&self, time: f64) -> f64 {
        let time = time.max(0.0).min(1.0);
        let [x1, y1, x2, y2] = self.coordinates;
        let xs = Poly::new(x1, x2);
        let ys = Poly::new(y1, y2);
        ys.sample(xs.solve(time))
    }
}

/// Power-basis coefficients of one axis of a timing curve.
struct Poly {
    a: f64,
    b: f64,
    c: f64,
}

impl Poly {
    fn new(p1: f64, p2: f64) -> Poly {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        Poly { a, b, c }
    }

    fn sample(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn derivative(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }

    /// Find `t` in `0..=1` with `sample(t) == x`.
    ///
    /// The curve is monotonic in x, so bisection always converges; Newton is
    /// tried first since it usually gets there in a few steps.
    fn solve(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;
        let mut t = x;
        for _ in 0..8 {
            let err = self.sample(t) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let d = self.derivative(t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
            if !(0.0..=1.0).contains(&t) {
                break;
            }
        }
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while lo < hi {
            let err = self.sample(t) - x;
            if err.abs() < EPSILON {
                break;
            }
            if err > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            let mid = 0.5 * (lo + hi);
            if mid == t {
                break;
            }
            t = mid;
        }
        t
    }
}

/// Round to two decimals, dropping the zero in front of the decimal point.
fn prettify(val: f64) -> String {
    let rounded = (val * 100.0).round() / 100.0;
    // avoid printing "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let s = rounded.to_string();
    if let Some(rest) = s.strip_prefix("0.") {
        format!(".{}", rest)
    } else if let Some(rest) = s.strip_prefix("-0.") {
        format!("-.{}", rest)
    } else {
        s
    }
}

impl TryFrom<[f64; 4]> for CubicBezier {
    type Error = Error;

    fn try_from(coordinates: [f64; 4]) -> Result<CubicBezier> {
        for (index, &value) in coordinates.iter().enumerate() {
            if !value.is_finite() {
                return Err(Error::NotANumber {
                    index,
                    token: value.to_string(),
                });
            }
            if index % 2 == 0 && !(0.0..=1.0).contains(&value) {
                return Err(Error::OutOfRange { index, value });
            }
        }
        Ok(CubicBezier { coordinates })
    }
}

impl TryFrom<&[f64]> for CubicBezier {
    type Error = Error;

    fn try_from(coordinates: &[f64]) -> Result<CubicBezier> {
        match *coordinates {
            [x1, y1, x2, y2] => CubicBezier::try_from([x1, y1, x2, y2]),
            _ => Err(Error::Count(coordinates.len())),
        }
    }
}

impl FromStr for CubicBezier {
    type Err = Error;

    /// Accepts `a,b,c,d`, `#a,b,c,d` and `cubic-bezier(a,b,c,d)`.
    fn from_str(s: &str) -> Result<CubicBezier> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        let s = s
            .strip_prefix("cubic-bezier(")
            .and_then(|inner| inner.strip_suffix(')'))
            .unwrap_or(s);
        let tokens: Vec<&str> = s.split(',').collect();
        if tokens.len() != 4 {
            return Err(Error::Count(tokens.len()));
        }
        let mut coordinates = [0.0; 4];
        for (index, token) in tokens.iter().enumerate() {
            coordinates[index] = match token.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    return Err(Error::NotANumber {
                        index,
                        token: token.to_string(),
                    })
                }
            };
        }
        CubicBezier::try_from(coordinates)
    }
}

impl fmt::Display for CubicBezier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cubic-bezier({})", self.fragment())
    }
}

#[cfg(feature = "serde")]
impl serde_::Serialize for CubicBezier {
    fn serialize<S: serde_::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.fragment())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde_::Deserialize<'de> for CubicBezier {
    fn deserialize<D: serde_::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde_::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde_::de::Error::custom)
    }
}

//! Margins around the drawable part of a canvas.

use crate::error::{Error, Result};

/// Padding as fractions of the canvas size, in CSS order.
///
/// `top` and `bottom` are fractions of the canvas height, `left` and `right`
/// of its width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub const ZERO: Padding = Padding::uniform(0.0);

    pub const fn uniform(p: f64) -> Padding {
        Padding {
            top: p,
            right: p,
            bottom: p,
            left: p,
        }
    }

    /// Expand one to four values the way CSS expands its `padding` shorthand.
    ///
    /// One value applies to every side; two are vertical then horizontal;
    /// with three, the left side copies the right.
    pub fn from_shorthand(values: &[f64]) -> Result<Padding> {
        let [top, right, bottom, left] = match *values {
            [p] => [p, p, p, p],
            [v, h] => [v, h, v, h],
            [t, h, b] => [t, h, b, h],
            [t, r, b, l] => [t, r, b, l],
            _ => return Err(Error::BadPadding(values.to_vec())),
        };
        Ok(Padding {
            top,
            right,
            bottom,
            left,
        })
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    /// The fraction of the width left for drawing.
    pub fn width_span(&self) -> f64 {
        1.0 - self.left - self.right
    }

    /// The fraction of the height left for drawing.
    pub fn height_span(&self) -> f64 {
        1.0 - self.top - self.bottom
    }

    /// Check that every side is finite and something is left to draw in.
    pub fn validate(self) -> Result<Padding> {
        let values = self.to_array();
        if values.iter().all(|p| p.is_finite())
            && self.width_span() > 0.0
            && self.height_span() > 0.0
        {
            Ok(self)
        } else {
            Err(Error::BadPadding(values.to_vec()))
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Padding::ZERO
    }
}

impl From<f64> for Padding {
    fn from(p: f64) -> Padding {
        Padding::uniform(p)
    }
}

#[cfg(feature = "serde")]
impl serde_::Serialize for Padding {
    fn serialize<S: serde_::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_::Serialize::serialize(&self.to_array(), serializer)
    }
}

/// Deserializes from a number or a list of one to four numbers.
#[cfg(feature = "serde")]
impl<'de> serde_::Deserialize<'de> for Padding {
    fn deserialize<D: serde_::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde_::Deserialize)]
        #[serde(crate = "serde_", untagged)]
        enum Shorthand {
            One(f64),
            Many(Vec<f64>),
        }

        match <Shorthand as serde_::Deserialize>::deserialize(deserializer)? {
            Shorthand::One(p) => Ok(Padding::uniform(p)),
            Shorthand::Many(values) => {
                Padding::from_shorthand(&values).map_err(serde_::de::Error::custom)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_expansion() {
        let expand = |v: &[f64]| Padding::from_shorthand(v).unwrap().to_array();
        assert_eq!(expand(&[5.0]), [5.0, 5.0, 5.0, 5.0]);
        assert_eq!(expand(&[5.0, 10.0]), [5.0, 10.0, 5.0, 10.0]);
        assert_eq!(expand(&[5.0, 10.0, 15.0]), [5.0, 10.0, 15.0, 10.0]);
        assert_eq!(expand(&[1.0, 2.0, 3.0, 4.0]), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(Padding::from(5.0).to_array(), expand(&[5.0]));
    }

    #[test]
    fn shorthand_rejects_bad_lengths() {
        assert!(Padding::from_shorthand(&[]).is_err());
        assert!(Padding::from_shorthand(&[0.1; 5]).is_err());
    }

    #[test]
    fn validation() {
        assert!(Padding::from(0.15).validate().is_ok());
        assert!(Padding::from_shorthand(&[0.25, 0.0]).unwrap().validate().is_ok());
        assert!(Padding::from(0.5).validate().is_err());
        assert!(Padding::from_shorthand(&[0.0, 0.6, 0.0, 0.4])
            .unwrap()
            .validate()
            .is_err());
        assert!(Padding::from(f64::NAN).validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_shorthand() {
        let p: Padding = serde_json::from_str("0.15").unwrap();
        assert_eq!(p, Padding::uniform(0.15));
        let p: Padding = serde_json::from_str("[0.25, 0]").unwrap();
        assert_eq!(p.to_array(), [0.25, 0.0, 0.25, 0.0]);
        assert!(serde_json::from_str::<Padding>("[]").is_err());
    }
}

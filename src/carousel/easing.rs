//! Named easing curves, spelled the way animation configs name them
//! (`power1.inOut`, `sine.out`, `none`).

use super::CarouselError;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    Linear,
    Power1In,
    Power1Out,
    #[default]
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    SineInOut,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Power1In => t * t,
            Easing::Power1Out => 1.0 - (1.0 - t).powi(2),
            Easing::Power1InOut => quad_in_out(t),
            Easing::Power2In => t * t * t,
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Easing::Linear => "none",
            Easing::Power1In => "power1.in",
            Easing::Power1Out => "power1.out",
            Easing::Power1InOut => "power1.inOut",
            Easing::Power2In => "power2.in",
            Easing::Power2Out => "power2.out",
            Easing::Power2InOut => "power2.inOut",
            Easing::SineInOut => "sine.inOut",
        }
    }
}

/// Quadratic ease-in-out.
pub fn quad_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

impl FromStr for Easing {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "none" | "linear" => Easing::Linear,
            "power1.in" => Easing::Power1In,
            "power1.out" | "power1" => Easing::Power1Out,
            "power1.inOut" => Easing::Power1InOut,
            "power2.in" => Easing::Power2In,
            "power2.out" | "power2" => Easing::Power2Out,
            "power2.inOut" => Easing::Power2InOut,
            "sine.inOut" => Easing::SineInOut,
            other => return Err(CarouselError::UnknownEasing(other.to_string())),
        })
    }
}

impl TryFrom<String> for Easing {
    type Error = CarouselError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.name().to_string()
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

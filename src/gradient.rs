//! CSS gradient strings from a color list.
//!
//! ```text
//! ["blue", "red"]                    -> linear-gradient(135deg, blue 0%, red 100%)
//! ["#0000FF"] with opacity 0.5       -> rgba(0, 0, 255, 0.5)
//! ["green", "darkGreen"] [0.5, 1.0]  -> linear-gradient(135deg, green 0%, darkGreen 50%)
//! ```
//!
//! Percentages are cumulative stops in [0, 1], one per color. The first color
//! always starts at 0%, and color `i` stops at `percentages[i - 1]`, so the
//! last percentage only takes part in validation.
//!
//! Opacity is folded into hex (`#rgb`, `#rrggbb`) and `rgba(...)` colors.
//! Any other color form passes through unchanged.

use thiserror::Error;

pub const DEFAULT_DIRECTION: &str = "135deg";
pub const DEFAULT_RADIAL_SHAPE: &str = "circle at center";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradientError {
    #[error("a gradient needs at least one color")]
    NoColors,
    #[error("opacity must be between 0 and 1. Found: {0}")]
    OpacityOutOfRange(f64),
    #[error("opacity array length ({found}) must match colors array length ({expected})")]
    OpacityLength { found: usize, expected: usize },
    #[error("percentages array length ({found}) must match colors array length ({expected})")]
    PercentagesLength { found: usize, expected: usize },
    #[error("All percentages must be between 0 and 1. Found: {0}")]
    PercentageOutOfRange(f64),
    #[error("percentages must be in ascending order. Found: [{}]", join_numbers(.0))]
    NotAscending(Vec<f64>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Opacity {
    /// Same opacity for every color.
    Uniform(f64),
    /// One opacity per color.
    PerColor(Vec<f64>),
}

impl Default for Opacity {
    fn default() -> Self {
        Opacity::Uniform(1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientOptions {
    pub colors: Vec<String>,
    pub percentages: Option<Vec<f64>>,
    pub opacity: Opacity,
    /// Used by linear gradients, e.g. `135deg` or `to right`.
    pub direction: String,
    pub kind: GradientKind,
    /// Used by radial gradients.
    pub radial_shape: String,
}

impl GradientOptions {
    pub fn new<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            colors: colors.into_iter().map(Into::into).collect(),
            percentages: None,
            opacity: Opacity::default(),
            direction: DEFAULT_DIRECTION.to_string(),
            kind: GradientKind::Linear,
            radial_shape: DEFAULT_RADIAL_SHAPE.to_string(),
        }
    }

    pub fn percentages(mut self, percentages: Vec<f64>) -> Self {
        self.percentages = Some(percentages);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Opacity::Uniform(opacity);
        self
    }

    pub fn opacities(mut self, opacities: Vec<f64>) -> Self {
        self.opacity = Opacity::PerColor(opacities);
        self
    }

    pub fn direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = direction.into();
        self
    }

    /// Switch to a radial gradient with the given shape descriptor.
    pub fn radial(mut self, shape: impl Into<String>) -> Self {
        self.kind = GradientKind::Radial;
        self.radial_shape = shape.into();
        self
    }

    pub fn build(&self) -> Result<String, GradientError> {
        build_gradient(self)
    }
}

/// Build a CSS background value. A single color comes back as that color
/// (opacity applied) with no gradient syntax.
pub fn build_gradient(options: &GradientOptions) -> Result<String, GradientError> {
    let colors = &options.colors;
    if colors.is_empty() {
        return Err(GradientError::NoColors);
    }

    let opacities = normalize_opacity(&options.opacity, colors.len())?;
    if let Some(percentages) = &options.percentages {
        validate_percentages(percentages, colors.len())?;
    }

    if colors.len() == 1 {
        return Ok(apply_opacity(&colors[0], opacities[0]));
    }

    let colors: Vec<String> = colors
        .iter()
        .zip(&opacities)
        .map(|(color, opacity)| apply_opacity(color, *opacity))
        .collect();

    let stops = match &options.percentages {
        Some(percentages) => stops_at(&colors, percentages),
        None => stops_evenly(&colors),
    };

    Ok(match options.kind {
        GradientKind::Linear => format!("linear-gradient({}, {})", options.direction, stops.join(", ")),
        GradientKind::Radial => format!(
            "radial-gradient({}, {})",
            options.radial_shape,
            stops.join(", ")
        ),
    })
}

/// `#rgb` / `#rrggbb` to `rgba(r, g, b, opacity)`. Anything else is returned
/// unchanged.
pub fn hex_to_rgba(hex: &str, opacity: f64) -> String {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return hex.to_string();
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    let rgb = match digits.len() {
        3 => {
            let doubled: Vec<String> = digits.chars().map(|c| format!("{c}{c}")).collect();
            (channel(&doubled[0]), channel(&doubled[1]), channel(&doubled[2]))
        }
        6 => (
            channel(&digits[0..2]),
            channel(&digits[2..4]),
            channel(&digits[4..6]),
        ),
        _ => return hex.to_string(),
    };

    match rgb {
        (Some(r), Some(g), Some(b)) => format!("rgba({r}, {g}, {b}, {opacity})"),
        _ => hex.to_string(),
    }
}

fn apply_opacity(color: &str, opacity: f64) -> String {
    if opacity == 1.0 {
        return color.to_string();
    }
    if color.starts_with("rgba") {
        if let Some(replaced) = replace_alpha(color, opacity) {
            return replaced;
        }
    }
    if color.starts_with('#') {
        return hex_to_rgba(color, opacity);
    }
    color.to_string()
}

fn replace_alpha(color: &str, opacity: f64) -> Option<String> {
    let open = color.find('(')?;
    let close = open + color[open..].find(')')?;
    let values: Vec<&str> = color[open + 1..close].split(',').map(str::trim).collect();
    if values.len() < 3 {
        return None;
    }
    Some(format!(
        "rgba({}, {}, {}, {opacity})",
        values[0], values[1], values[2]
    ))
}

fn normalize_opacity(opacity: &Opacity, count: usize) -> Result<Vec<f64>, GradientError> {
    match opacity {
        Opacity::Uniform(value) => {
            if !in_unit_range(*value) {
                return Err(GradientError::OpacityOutOfRange(*value));
            }
            Ok(vec![*value; count])
        }
        Opacity::PerColor(values) => {
            if values.len() != count {
                return Err(GradientError::OpacityLength {
                    found: values.len(),
                    expected: count,
                });
            }
            if let Some(bad) = values.iter().find(|v| !in_unit_range(**v)) {
                return Err(GradientError::OpacityOutOfRange(*bad));
            }
            Ok(values.clone())
        }
    }
}

fn validate_percentages(percentages: &[f64], count: usize) -> Result<(), GradientError> {
    if percentages.len() != count {
        return Err(GradientError::PercentagesLength {
            found: percentages.len(),
            expected: count,
        });
    }
    if let Some(bad) = percentages.iter().find(|p| !in_unit_range(**p)) {
        return Err(GradientError::PercentageOutOfRange(*bad));
    }
    if percentages.windows(2).any(|w| w[1] <= w[0]) {
        return Err(GradientError::NotAscending(percentages.to_vec()));
    }
    Ok(())
}

fn stops_at(colors: &[String], percentages: &[f64]) -> Vec<String> {
    let mut stops = vec![format!("{} 0%", colors[0])];
    for (i, color) in colors.iter().enumerate().skip(1) {
        stops.push(format!("{color} {}%", percentages[i - 1] * 100.0));
    }
    stops
}

fn stops_evenly(colors: &[String]) -> Vec<String> {
    let last = colors.len() - 1;
    colors
        .iter()
        .enumerate()
        .map(|(i, color)| match i {
            0 => format!("{color} 0%"),
            i if i == last => format!("{color} 100%"),
            i => format!("{color} {}%", i as f64 / last as f64 * 100.0),
        })
        .collect()
}

fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(options: GradientOptions) -> String {
        build_gradient(&options).unwrap()
    }

    // =========================================================================
    // Stops
    // =========================================================================

    #[test]
    fn two_colors_split_evenly() {
        assert_eq!(
            build(GradientOptions::new(["blue", "red"])),
            "linear-gradient(135deg, blue 0%, red 100%)"
        );
    }

    #[test]
    fn three_colors_put_middle_at_half() {
        assert_eq!(
            build(GradientOptions::new(["#0000FF", "#FF0000", "#FFFFFF"])),
            "linear-gradient(135deg, #0000FF 0%, #FF0000 50%, #FFFFFF 100%)"
        );
    }

    #[test]
    fn four_colors_use_thirds() {
        assert_eq!(
            build(GradientOptions::new(["a", "b", "c", "d"])),
            "linear-gradient(135deg, a 0%, b 33.33333333333333%, c 66.66666666666666%, d 100%)"
        );
    }

    #[test]
    fn custom_percentages_shift_stops_by_one() {
        assert_eq!(
            build(GradientOptions::new(["green", "darkGreen"]).percentages(vec![0.5, 1.0])),
            "linear-gradient(135deg, green 0%, darkGreen 50%)"
        );
        assert_eq!(
            build(GradientOptions::new(["a", "b", "c"]).percentages(vec![0.25, 0.75, 1.0])),
            "linear-gradient(135deg, a 0%, b 25%, c 75%)"
        );
    }

    #[test]
    fn last_percentage_only_validates() {
        let a = build(GradientOptions::new(["a", "b"]).percentages(vec![0.5, 0.6]));
        let b = build(GradientOptions::new(["a", "b"]).percentages(vec![0.5, 1.0]));
        assert_eq!(a, b);
    }

    // =========================================================================
    // Kind and direction
    // =========================================================================

    #[test]
    fn custom_direction() {
        assert_eq!(
            build(GradientOptions::new(["blue", "red"]).direction("90deg")),
            "linear-gradient(90deg, blue 0%, red 100%)"
        );
    }

    #[test]
    fn radial_uses_shape_not_direction() {
        assert_eq!(
            build(
                GradientOptions::new(["blue", "red"])
                    .direction("90deg")
                    .radial(DEFAULT_RADIAL_SHAPE)
            ),
            "radial-gradient(circle at center, blue 0%, red 100%)"
        );
    }

    // =========================================================================
    // Opacity
    // =========================================================================

    #[test]
    fn single_color_is_returned_as_is() {
        assert_eq!(build(GradientOptions::new(["#0000FF"])), "#0000FF");
    }

    #[test]
    fn single_color_with_opacity() {
        assert_eq!(
            build(GradientOptions::new(["#0000FF"]).opacity(0.5)),
            "rgba(0, 0, 255, 0.5)"
        );
    }

    #[test]
    fn uniform_opacity_converts_hex() {
        assert_eq!(
            build(GradientOptions::new(["#0000FF", "#FF0000"]).opacity(0.5)),
            "linear-gradient(135deg, rgba(0, 0, 255, 0.5) 0%, rgba(255, 0, 0, 0.5) 100%)"
        );
    }

    #[test]
    fn per_color_opacity_skips_full_opacity() {
        assert_eq!(
            build(GradientOptions::new(["#0000FF", "#F00"]).opacities(vec![1.0, 0.25])),
            "linear-gradient(135deg, #0000FF 0%, rgba(255, 0, 0, 0.25) 100%)"
        );
    }

    #[test]
    fn rgba_alpha_is_replaced() {
        assert_eq!(
            build(GradientOptions::new(["rgba(10, 20, 30, 0.9)"]).opacity(0.3)),
            "rgba(10, 20, 30, 0.3)"
        );
    }

    #[test]
    fn named_colors_pass_through_opacity() {
        assert_eq!(build(GradientOptions::new(["blue"]).opacity(0.5)), "blue");
    }

    #[test]
    fn malformed_hex_passes_through() {
        assert_eq!(hex_to_rgba("#12345", 0.5), "#12345");
        assert_eq!(hex_to_rgba("#GGG", 0.5), "#GGG");
    }

    #[test]
    fn short_hex_doubles_digits() {
        assert_eq!(hex_to_rgba("#abc", 1.0), "rgba(170, 187, 204, 1)");
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn no_colors_fails() {
        let empty: [&str; 0] = [];
        assert_eq!(
            build_gradient(&GradientOptions::new(empty)),
            Err(GradientError::NoColors)
        );
    }

    #[test]
    fn opacity_out_of_range_fails() {
        assert_eq!(
            build_gradient(&GradientOptions::new(["blue", "red"]).opacity(1.5)),
            Err(GradientError::OpacityOutOfRange(1.5))
        );
        assert_eq!(
            build_gradient(&GradientOptions::new(["blue", "red"]).opacities(vec![0.5, -0.1])),
            Err(GradientError::OpacityOutOfRange(-0.1))
        );
    }

    #[test]
    fn opacity_length_mismatch_fails() {
        assert_eq!(
            build_gradient(&GradientOptions::new(["blue", "red"]).opacities(vec![0.5])),
            Err(GradientError::OpacityLength {
                found: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn percentages_length_mismatch_fails() {
        assert_eq!(
            build_gradient(&GradientOptions::new(["blue", "red"]).percentages(vec![0.5])),
            Err(GradientError::PercentagesLength {
                found: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn percentage_out_of_range_fails() {
        assert_eq!(
            build_gradient(&GradientOptions::new(["blue", "red"]).percentages(vec![0.5, 1.2])),
            Err(GradientError::PercentageOutOfRange(1.2))
        );
    }

    #[test]
    fn non_ascending_percentages_fail() {
        let err = build_gradient(&GradientOptions::new(["a", "b"]).percentages(vec![0.5, 0.5]))
            .unwrap_err();
        assert_eq!(err, GradientError::NotAscending(vec![0.5, 0.5]));
        assert_eq!(
            err.to_string(),
            "percentages must be in ascending order. Found: [0.5, 0.5]"
        );
    }

    #[test]
    fn percentages_are_checked_for_single_color() {
        assert!(build_gradient(&GradientOptions::new(["blue"]).percentages(vec![0.5, 1.0])).is_err());
    }
}

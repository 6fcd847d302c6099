//! Maps the latest readings to human-readable classifications.
//!
//! Everything here is pure and recomputed on every render.

use serde::{Deserialize, Serialize};

use crate::state::DisplayState;

/// Distances below this (cm) count as near.
pub const NEAR_DISTANCE: f32 = 5.0;
/// Illuminance below this (lux) is low light.
pub const LOW_LIGHT_LUX: f32 = 50.0;
/// Illuminance below this (lux) is moderate light.
pub const MODERATE_LIGHT_LUX: f32 = 200.0;
/// Axis acceleration (m/s²) beyond which gravity is considered aligned.
pub const ORIENTATION_THRESHOLD: f32 = 7.0;

/// Label language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::Es => Language::En,
            Language::En => Language::Es,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Proximity {
    Near,
    Far,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightLevel {
    Low,
    Moderate,
    Bright,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    TiltedLeft,
    TiltedRight,
    Upright,
    UpsideDown,
    FaceUp,
    FaceDown,
    Diagonal,
}

pub fn classify_proximity(distance: f32) -> Proximity {
    if distance < NEAR_DISTANCE {
        Proximity::Near
    } else {
        Proximity::Far
    }
}

pub fn classify_light(lux: f32) -> LightLevel {
    if lux < LOW_LIGHT_LUX {
        LightLevel::Low
    } else if lux < MODERATE_LIGHT_LUX {
        LightLevel::Moderate
    } else {
        LightLevel::Bright
    }
}

/// First matching test wins, in the order x+, x-, y+, y-, z+, z-.
pub fn classify_orientation([x, y, z]: [f32; 3]) -> Orientation {
    let t = ORIENTATION_THRESHOLD;
    if x > t {
        Orientation::TiltedLeft
    } else if x < -t {
        Orientation::TiltedRight
    } else if y > t {
        Orientation::Upright
    } else if y < -t {
        Orientation::UpsideDown
    } else if z > t {
        Orientation::FaceUp
    } else if z < -t {
        Orientation::FaceDown
    } else {
        Orientation::Diagonal
    }
}

impl Proximity {
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Proximity::Near, Language::Es) => "Cerca",
            (Proximity::Far, Language::Es) => "Lejos",
            (Proximity::Near, Language::En) => "Near",
            (Proximity::Far, Language::En) => "Far",
        }
    }
}

impl LightLevel {
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (LightLevel::Low, Language::Es) => "Poca Luz",
            (LightLevel::Moderate, Language::Es) => "Luz Moderada",
            (LightLevel::Bright, Language::Es) => "Mucha Luz",
            (LightLevel::Low, Language::En) => "Low Light",
            (LightLevel::Moderate, Language::En) => "Moderate Light",
            (LightLevel::Bright, Language::En) => "Bright Light",
        }
    }
}

impl Orientation {
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Orientation::TiltedLeft, Language::Es) => "Inclinado a la Izquierda",
            (Orientation::TiltedRight, Language::Es) => "Inclinado a la Derecha",
            (Orientation::Upright, Language::Es) => "Vertical",
            (Orientation::UpsideDown, Language::Es) => "Invertido",
            (Orientation::FaceUp, Language::Es) => "Horizontal (Pantalla Arriba)",
            (Orientation::FaceDown, Language::Es) => "Horizontal (Pantalla Abajo)",
            (Orientation::Diagonal, _) => "Diagonal",
            (Orientation::TiltedLeft, Language::En) => "Tilted Left",
            (Orientation::TiltedRight, Language::En) => "Tilted Right",
            (Orientation::Upright, Language::En) => "Upright",
            (Orientation::UpsideDown, Language::En) => "Upside Down",
            (Orientation::FaceUp, Language::En) => "Flat (Screen Up)",
            (Orientation::FaceDown, Language::En) => "Flat (Screen Down)",
        }
    }
}

/// Screen headings.
pub struct Headings {
    pub proximity: &'static str,
    pub light: &'static str,
    pub acceleration: &'static str,
    pub orientation: &'static str,
}

impl Headings {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Es => Self {
                proximity: "Valor de Proximidad",
                light: "Valor de Luz",
                acceleration: "Valores del Acelerómetro",
                orientation: "Posición del Teléfono",
            },
            Language::En => Self {
                proximity: "Proximity",
                light: "Light",
                acceleration: "Accelerometer",
                orientation: "Phone Position",
            },
        }
    }
}

/// Everything the readings panel shows, derived from one state snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub proximity: String,
    pub light: String,
    pub axes: [String; 3],
    pub orientation: &'static str,
}

impl Presentation {
    pub fn from_state(state: &DisplayState, language: Language) -> Self {
        let [x, y, z] = state.acceleration;
        Self {
            proximity: format!(
                "{} ({})",
                format_value(state.proximity),
                classify_proximity(state.proximity).label(language)
            ),
            light: format!(
                "{} ({})",
                format_value(state.light),
                classify_light(state.light).label(language)
            ),
            axes: [
                format!("X={}", format_value(x)),
                format!("Y={}", format_value(y)),
                format!("Z={}", format_value(z)),
            ],
            orientation: classify_orientation(state.acceleration).label(language),
        }
    }
}

/// Formats a reading the way Android shows a float: plain decimal with at
/// least one fractional digit for `1e-3 <= |v| < 1e7` (`0.0`, `9.81`),
/// otherwise scientific with a fractional mantissa (`1.0E-5`, `1.2E7`).
pub fn format_value(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{value:?}");
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proximity_threshold() {
        assert_eq!(classify_proximity(0.0), Proximity::Near);
        assert_eq!(classify_proximity(4.999), Proximity::Near);
        assert_eq!(classify_proximity(5.0), Proximity::Far);
        assert_eq!(classify_proximity(100.0), Proximity::Far);
        assert_eq!(classify_proximity(-1.0), Proximity::Near);
    }

    #[test]
    fn test_light_bands() {
        assert_eq!(classify_light(0.0), LightLevel::Low);
        assert_eq!(classify_light(49.9), LightLevel::Low);
        assert_eq!(classify_light(50.0), LightLevel::Moderate);
        assert_eq!(classify_light(199.9), LightLevel::Moderate);
        assert_eq!(classify_light(200.0), LightLevel::Bright);
        assert_eq!(classify_light(40_000.0), LightLevel::Bright);
    }

    #[test]
    fn test_orientation_single_axis() {
        assert_eq!(classify_orientation([9.8, 0.0, 0.0]), Orientation::TiltedLeft);
        assert_eq!(classify_orientation([-9.8, 0.0, 0.0]), Orientation::TiltedRight);
        assert_eq!(classify_orientation([0.0, 9.8, 0.0]), Orientation::Upright);
        assert_eq!(classify_orientation([0.0, -9.8, 0.0]), Orientation::UpsideDown);
        assert_eq!(classify_orientation([0.0, 0.0, 9.8]), Orientation::FaceUp);
        assert_eq!(classify_orientation([0.0, 0.0, -9.8]), Orientation::FaceDown);
    }

    #[test]
    fn test_orientation_first_match_wins() {
        assert_eq!(classify_orientation([8.0, 8.0, 0.0]), Orientation::TiltedLeft);
        assert_eq!(
            classify_orientation([8.0, 8.0, 0.0]).label(Language::Es),
            "Inclinado a la Izquierda"
        );
        assert_eq!(classify_orientation([-8.0, 8.0, 8.0]), Orientation::TiltedRight);
        assert_eq!(classify_orientation([0.0, -8.0, -8.0]), Orientation::UpsideDown);
    }

    #[test]
    fn test_orientation_threshold_is_exclusive() {
        assert_eq!(classify_orientation([7.0, -7.0, 7.0]), Orientation::Diagonal);
        assert_eq!(classify_orientation([5.5, 5.5, 5.5]), Orientation::Diagonal);
    }

    #[test]
    fn test_initial_state_artifact() {
        let presentation = Presentation::from_state(&DisplayState::default(), Language::Es);
        assert_eq!(presentation.proximity, "0.0 (Cerca)");
        assert_eq!(presentation.light, "0.0 (Poca Luz)");
        assert_eq!(presentation.axes, ["X=0.0", "Y=0.0", "Z=0.0"]);
        assert_eq!(presentation.orientation, "Diagonal");
    }

    #[test]
    fn test_format_value_plain_range() {
        assert_eq!(format_value(0.0), "0.0");
        assert_eq!(format_value(-0.0), "-0.0");
        assert_eq!(format_value(9.81), "9.81");
        assert_eq!(format_value(120.0), "120.0");
        assert_eq!(format_value(0.001), "0.001");
        assert_eq!(format_value(9_999_999.0), "9999999.0");
    }

    #[test]
    fn test_format_value_scientific_range() {
        assert_eq!(format_value(0.00001), "1.0E-5");
        assert_eq!(format_value(-0.00025), "-2.5E-4");
        assert_eq!(format_value(12_000_000.0), "1.2E7");
        assert_eq!(format_value(10_000_000.0), "1.0E7");
        assert_eq!(format_value(f32::NAN), "NaN");
        assert_eq!(format_value(f32::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_near_zero_axis_keeps_fraction() {
        let state = DisplayState {
            acceleration: [0.00001, 0.0, 9.81],
            ..DisplayState::default()
        };
        let presentation = Presentation::from_state(&state, Language::Es);
        assert_eq!(presentation.axes[0], "X=1.0E-5");
    }

    #[test]
    fn test_nan_fails_every_comparison() {
        assert_eq!(classify_proximity(f32::NAN), Proximity::Far);
        assert_eq!(classify_light(f32::NAN), LightLevel::Bright);
        assert_eq!(classify_orientation([f32::NAN; 3]), Orientation::Diagonal);
    }

    #[test]
    fn test_english_labels() {
        let state = DisplayState {
            proximity: 5.0,
            light: 120.0,
            acceleration: [0.0, 0.0, -9.81],
        };
        let presentation = Presentation::from_state(&state, Language::En);
        assert_eq!(presentation.proximity, "5.0 (Far)");
        assert_eq!(presentation.light, "120.0 (Moderate Light)");
        assert_eq!(presentation.axes[2], "Z=-9.81");
        assert_eq!(presentation.orientation, "Flat (Screen Down)");
    }

    #[test]
    fn test_language_toggle() {
        assert_eq!(Language::Es.toggled(), Language::En);
        assert_eq!(Language::En.toggled(), Language::Es);
    }
}

//! Distance → alarm classification and motion gating.
//!
//! Pure functions, no I/O.  The bands are closed on their upper bound:
//!
//! ```text
//!   distance (cm)   0 ──── 50 ──── 100 ──── 200 ──── 350 ────▶
//!   colour              Red   Violet   Blue     Cyan    Green
//! ```

use core::fmt;

use serde::Serialize;

/// Fixed gate level for raw motion magnitudes (16-bit scale).
pub const MOTION_THRESHOLD: u16 = 20_000;

const GREEN_ABOVE_CM: f32 = 350.0;
const CYAN_ABOVE_CM: f32 = 200.0;
const BLUE_ABOVE_CM: f32 = 100.0;
const VIOLET_ABOVE_CM: f32 = 50.0;

/// Indicator colour chosen for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColorState {
    Off,
    Green,
    Cyan,
    Blue,
    Violet,
    Red,
}

impl ColorState {
    /// Telemetry / log label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Green => "Green",
            Self::Cyan => "Cyan",
            Self::Blue => "Blue",
            Self::Violet => "Violet",
            Self::Red => "Red",
        }
    }

    /// Channel values `(r, g, b)` with every lit channel at `level`.
    pub const fn rgb(self, level: u8) -> (u8, u8, u8) {
        match self {
            Self::Off => (0, 0, 0),
            Self::Green => (0, level, 0),
            Self::Cyan => (0, level, level),
            Self::Blue => (0, 0, level),
            Self::Violet => (level, 0, level),
            Self::Red => (level, 0, 0),
        }
    }

    /// The buzzer state implied by this colour.  Only Red sounds.
    pub const fn sound(self) -> SoundState {
        match self {
            Self::Red => SoundState::On,
            _ => SoundState::Off,
        }
    }
}

impl fmt::Display for ColorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Buzzer state, functionally dependent on [`ColorState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SoundState {
    On,
    Off,
}

impl SoundState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::On => "On",
            Self::Off => "Off",
        }
    }
}

impl fmt::Display for SoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a distance in centimetres onto its colour band and buzzer state.
///
/// Callers only pass positive distances; anything at or below 50 cm,
/// including zero, lands in the Red band.
pub fn classify(distance_cm: f32) -> (ColorState, SoundState) {
    let color = if distance_cm > GREEN_ABOVE_CM {
        ColorState::Green
    } else if distance_cm > CYAN_ABOVE_CM {
        ColorState::Cyan
    } else if distance_cm > BLUE_ABOVE_CM {
        ColorState::Blue
    } else if distance_cm > VIOLET_ABOVE_CM {
        ColorState::Violet
    } else {
        ColorState::Red
    };
    (color, color.sound())
}

/// `true` iff `sample` is strictly above [`MOTION_THRESHOLD`].
pub fn gate_motion(sample: u16) -> bool {
    gate_motion_at(sample, MOTION_THRESHOLD)
}

/// [`gate_motion`] against a configured threshold.
pub fn gate_motion_at(sample: u16, threshold: u16) -> bool {
    sample > threshold
}

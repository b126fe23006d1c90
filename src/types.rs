//! Core types for spark-otp.
//!
//! These types define what the parallel arrays store and what the renderer
//! understands.

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const INVERSE = 1 << 5;
        const HIDDEN = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

// =============================================================================
// Component Types - For parallel arrays
// =============================================================================

/// Component types for the parallel arrays pattern.
///
/// Each component at index i has componentType[i] set to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ComponentType {
    #[default]
    None = 0,
    /// Container of the OTP fields. Not focusable.
    OtpGroup = 1,
    /// A single-character OTP field.
    OtpField = 2,
    /// A pressable control (the form's submit button).
    Button = 3,
}

// =============================================================================
// Input Mode
// =============================================================================

/// On-device keyboard hint for the OTP fields.
///
/// Only affects which keyboard a client shows. Validation is always done by
/// the accepted-character predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Number,
    Tel,
}

impl InputMode {
    /// Short label used in hints ("number" / "tel").
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Number => "number",
            InputMode::Tel => "tel",
        }
    }
}

impl std::str::FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "number" | "numeric" => Ok(InputMode::Number),
            "tel" | "telephone" => Ok(InputMode::Tel),
            other => Err(format!("unknown input mode '{other}' (expected number or tel)")),
        }
    }
}

use std::io::Write;

/// A colour, expressed in the RGB or grey device colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Emit the operator selecting this colour for fills (and text)
    #[allow(clippy::write_with_newline)]
    pub(crate) fn write_fill<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match *self {
            Colour::RGB { r, g, b } => write!(w, "{r} {g} {b} rg\n"),
            Colour::Grey { g } => write!(w, "{g} g\n"),
        }
    }

    /// Emit the operator selecting this colour for strokes
    #[allow(clippy::write_with_newline)]
    pub(crate) fn write_stroke<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match *self {
            Colour::RGB { r, g, b } => write!(w, "{r} {g} {b} RG\n"),
            Colour::Grey { g } => write!(w, "{g} G\n"),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// Fill used for the synthesized logo block
    pub const LOGO_BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.2,
        b: 0.6,
    };
}

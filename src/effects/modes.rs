//! Closed enumerations shared by filters and sources.

use serde::{Deserialize, Serialize};

/// Compositing operator combining a source color with a destination color.
///
/// The first 15 modes are Porter-Duff style coefficient modes, the modes up to
/// [`BlendMode::Multiply`] are separable, and the trailing four operate on the
/// color as a whole.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// `r = 0`
    Clear,
    /// `r = s`
    Src,
    /// `r = d`
    Dst,
    /// `r = s + (1 - sa) * d`
    #[default]
    SrcOver,
    /// `r = d + (1 - da) * s`
    DstOver,
    /// `r = s * da`
    SrcIn,
    /// `r = d * sa`
    DstIn,
    /// `r = s * (1 - da)`
    SrcOut,
    /// `r = d * (1 - sa)`
    DstOut,
    /// `r = s * da + d * (1 - sa)`
    SrcATop,
    /// `r = d * sa + s * (1 - da)`
    DstATop,
    /// `r = s * (1 - da) + d * (1 - sa)`
    Xor,
    /// `r = min(s + d, 1)`
    Plus,
    /// `r = s * d`
    Modulate,
    /// `r = s + d - s * d`
    Screen,
    /// Multiply or screen depending on the destination.
    Overlay,
    /// Darker of source and destination.
    Darken,
    /// Lighter of source and destination.
    Lighten,
    /// Brighten destination to reflect source.
    ColorDodge,
    /// Darken destination to reflect source.
    ColorBurn,
    /// Multiply or screen depending on the source.
    HardLight,
    /// Lighten or darken depending on the source.
    SoftLight,
    /// Difference of the two colors.
    Difference,
    /// Like difference with lower contrast.
    Exclusion,
    /// Product of the two colors with coverage.
    Multiply,
    /// Hue of source with saturation and luminosity of destination.
    Hue,
    /// Saturation of source with hue and luminosity of destination.
    Saturation,
    /// Hue and saturation of source with luminosity of destination.
    Color,
    /// Luminosity of source with hue and saturation of destination.
    Luminosity,
}

impl BlendMode {
    /// Every mode, in declaration order.
    pub const ALL: [BlendMode; 29] = [
        BlendMode::Clear,
        BlendMode::Src,
        BlendMode::Dst,
        BlendMode::SrcOver,
        BlendMode::DstOver,
        BlendMode::SrcIn,
        BlendMode::DstIn,
        BlendMode::SrcOut,
        BlendMode::DstOut,
        BlendMode::SrcATop,
        BlendMode::DstATop,
        BlendMode::Xor,
        BlendMode::Plus,
        BlendMode::Modulate,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Multiply,
        BlendMode::Hue,
        BlendMode::Saturation,
        BlendMode::Color,
        BlendMode::Luminosity,
    ];

    /// Last mode expressible as a pair of Porter-Duff coefficients.
    pub const LAST_COEFF_MODE: BlendMode = BlendMode::Screen;
    /// Last mode that blends each channel independently.
    pub const LAST_SEPARABLE_MODE: BlendMode = BlendMode::Multiply;
    /// Last declared mode.
    pub const LAST_MODE: BlendMode = BlendMode::Luminosity;

    /// Stable name used in logs and descriptors.
    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Clear => "clear",
            BlendMode::Src => "src",
            BlendMode::Dst => "dst",
            BlendMode::SrcOver => "src_over",
            BlendMode::DstOver => "dst_over",
            BlendMode::SrcIn => "src_in",
            BlendMode::DstIn => "dst_in",
            BlendMode::SrcOut => "src_out",
            BlendMode::DstOut => "dst_out",
            BlendMode::SrcATop => "src_a_top",
            BlendMode::DstATop => "dst_a_top",
            BlendMode::Xor => "xor",
            BlendMode::Plus => "plus",
            BlendMode::Modulate => "modulate",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::ColorDodge => "color_dodge",
            BlendMode::ColorBurn => "color_burn",
            BlendMode::HardLight => "hard_light",
            BlendMode::SoftLight => "soft_light",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
            BlendMode::Multiply => "multiply",
            BlendMode::Hue => "hue",
            BlendMode::Saturation => "saturation",
            BlendMode::Color => "color",
            BlendMode::Luminosity => "luminosity",
        }
    }

    /// Return `true` for the Porter-Duff coefficient modes (`Clear` through `Screen`).
    pub fn is_coefficient_mode(self) -> bool {
        self.index() <= Self::LAST_COEFF_MODE.index()
    }

    /// Return `true` when each channel blends independently of the others.
    pub fn is_separable(self) -> bool {
        self.index() <= Self::LAST_SEPARABLE_MODE.index()
    }

    pub(crate) fn index(self) -> u8 {
        self as u8
    }
}

/// How a gradient or image extends beyond its defined range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileMode {
    /// Repeat the edge color.
    #[default]
    Clamp,
    /// Repeat the content.
    Repeat,
    /// Repeat the content, mirroring every other tile.
    Mirror,
    /// Transparent outside the defined range.
    Decal,
}

impl TileMode {
    pub(crate) fn index(self) -> u8 {
        self as u8
    }
}

/// Filtering quality used when sampling an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSampling {
    /// Nearest texel.
    NearestNeighbor,
    /// Bilinear filtering.
    #[default]
    Linear,
    /// Bilinear filtering between mipmap levels.
    MipmapLinear,
    /// Bicubic filtering.
    Cubic,
}

impl ImageSampling {
    pub(crate) fn index(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/modes.rs"]
mod tests;

//! Per-pixel color filters.
//!
//! A [`ColorFilter`] is a fixed, context-free transform from one RGBA color to another.
//! Filters are only built through the `make_*` factories, which canonicalize requests
//! that reduce to "no filter" into `None`.

use std::mem;
use std::sync::{Arc, LazyLock};

use crate::effects::modes::BlendMode;
use crate::fingerprint::{EffectFingerprint, StableHasher};
use crate::foundation::core::{Color, f32_key};

static SRGB_TO_LINEAR_GAMMA: LazyLock<Arc<ColorFilter>> = LazyLock::new(|| {
    Arc::new(ColorFilter::SrgbToLinearGamma(SrgbToLinearGammaFilter {
        _private: (),
    }))
});

static LINEAR_TO_SRGB_GAMMA: LazyLock<Arc<ColorFilter>> = LazyLock::new(|| {
    Arc::new(ColorFilter::LinearToSrgbGamma(LinearToSrgbGammaFilter {
        _private: (),
    }))
});

/// Discriminant of a [`ColorFilter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFilterKind {
    /// [`BlendColorFilter`].
    Blend,
    /// [`MatrixColorFilter`].
    Matrix,
    /// [`SrgbToLinearGammaFilter`].
    SrgbToLinearGamma,
    /// [`LinearToSrgbGammaFilter`].
    LinearToSrgbGamma,
}

/// Immutable color filter.
///
/// Backends translating filters should match exhaustively (no `_` arm) so that adding a
/// variant here fails to compile until every translation handles it.
#[derive(Debug)]
pub enum ColorFilter {
    /// Blend a fixed color into each pixel.
    Blend(BlendColorFilter),
    /// Apply a 4x5 color matrix.
    Matrix(MatrixColorFilter),
    /// Convert sRGB-encoded colors to linear.
    SrgbToLinearGamma(SrgbToLinearGammaFilter),
    /// Convert linear colors to sRGB encoding.
    LinearToSrgbGamma(LinearToSrgbGammaFilter),
}

impl ColorFilter {
    /// Build a filter blending `color` into each pixel with `mode`.
    ///
    /// Returns `None` when the combination leaves every pixel unchanged. An opaque color
    /// under [`BlendMode::SrcOver`] is reported as [`BlendMode::Src`].
    pub fn make_blend(color: Color, mode: BlendMode) -> Option<Arc<ColorFilter>> {
        let mut mode = mode;
        match mode {
            BlendMode::Dst => {
                tracing::trace!(?mode, "blend color filter is the identity");
                return None;
            }
            BlendMode::SrcOver => {
                if color.is_transparent() {
                    tracing::trace!(?mode, "transparent blend color filter is the identity");
                    return None;
                }
                if color.is_opaque() {
                    mode = BlendMode::Src;
                }
            }
            BlendMode::DstOver
            | BlendMode::DstOut
            | BlendMode::SrcATop
            | BlendMode::Xor
            | BlendMode::Darken => {
                if color.is_transparent() {
                    tracing::trace!(?mode, "transparent blend color filter is the identity");
                    return None;
                }
            }
            BlendMode::DstIn => {
                if color.is_opaque() {
                    tracing::trace!(?mode, "opaque blend color filter is the identity");
                    return None;
                }
            }
            _ => {}
        }
        Some(Arc::new(ColorFilter::Blend(BlendColorFilter { color, mode })))
    }

    /// Build a filter applying a row-major 4x5 color matrix.
    ///
    /// The coefficients are copied; no canonicalization is applied.
    pub fn make_matrix(matrix: &[f32; 20]) -> Arc<ColorFilter> {
        Arc::new(ColorFilter::Matrix(MatrixColorFilter { matrix: *matrix }))
    }

    /// Shared sRGB-to-linear gamma filter.
    pub fn make_srgb_to_linear_gamma() -> Arc<ColorFilter> {
        Arc::clone(&SRGB_TO_LINEAR_GAMMA)
    }

    /// Shared linear-to-sRGB gamma filter.
    pub fn make_linear_to_srgb_gamma() -> Arc<ColorFilter> {
        Arc::clone(&LINEAR_TO_SRGB_GAMMA)
    }

    /// Discriminant of this filter.
    pub fn kind(&self) -> ColorFilterKind {
        match self {
            ColorFilter::Blend(_) => ColorFilterKind::Blend,
            ColorFilter::Matrix(_) => ColorFilterKind::Matrix,
            ColorFilter::SrgbToLinearGamma(_) => ColorFilterKind::SrgbToLinearGamma,
            ColorFilter::LinearToSrgbGamma(_) => ColorFilterKind::LinearToSrgbGamma,
        }
    }

    /// Size in bytes of the concrete filter value.
    ///
    /// The stateless gamma filters have no fields of their own and report the size of the
    /// enclosing [`ColorFilter`], so no filter is ever zero-sized.
    pub fn size(&self) -> usize {
        match self {
            ColorFilter::Blend(_) => mem::size_of::<BlendColorFilter>(),
            ColorFilter::Matrix(_) => mem::size_of::<MatrixColorFilter>(),
            ColorFilter::SrgbToLinearGamma(_) | ColorFilter::LinearToSrgbGamma(_) => {
                mem::size_of::<ColorFilter>()
            }
        }
    }

    /// Return a new shared handle to an equal filter.
    ///
    /// Gamma filters return their process-wide instance.
    pub fn shared(&self) -> Arc<ColorFilter> {
        match self {
            ColorFilter::Blend(f) => Arc::new(ColorFilter::Blend(f.clone())),
            ColorFilter::Matrix(f) => ColorFilter::make_matrix(&f.matrix),
            ColorFilter::SrgbToLinearGamma(_) => ColorFilter::make_srgb_to_linear_gamma(),
            ColorFilter::LinearToSrgbGamma(_) => ColorFilter::make_linear_to_srgb_gamma(),
        }
    }

    /// Return `true` when filtering transparent black yields a non-transparent color.
    ///
    /// Agrees with [`MatrixColorFilter::apply`]: non-finite channel results clamp to zero,
    /// so a matrix whose alpha translation is infinite or NaN leaves alpha at zero.
    pub fn modifies_transparent_black(&self) -> bool {
        match self {
            ColorFilter::Blend(f) => f.modifies_transparent_black(),
            ColorFilter::Matrix(f) => f.modifies_transparent_black(),
            ColorFilter::SrgbToLinearGamma(_) | ColorFilter::LinearToSrgbGamma(_) => false,
        }
    }

    /// Return `true` when `filter(c) * opacity == filter(c * opacity)` for every color.
    ///
    /// A compositor may then apply a group opacity before or after this filter.
    pub fn can_commute_with_opacity(&self) -> bool {
        match self {
            ColorFilter::Blend(f) => f.can_commute_with_opacity(),
            ColorFilter::Matrix(f) => f.can_commute_with_opacity(),
            ColorFilter::SrgbToLinearGamma(_) | ColorFilter::LinearToSrgbGamma(_) => true,
        }
    }

    /// Downcast to a blend filter.
    pub fn as_blend(&self) -> Option<&BlendColorFilter> {
        match self {
            ColorFilter::Blend(f) => Some(f),
            _ => None,
        }
    }

    /// Downcast to a matrix filter.
    pub fn as_matrix(&self) -> Option<&MatrixColorFilter> {
        match self {
            ColorFilter::Matrix(f) => Some(f),
            _ => None,
        }
    }

    /// Downcast to the sRGB-to-linear gamma filter.
    pub fn as_srgb_to_linear_gamma(&self) -> Option<&SrgbToLinearGammaFilter> {
        match self {
            ColorFilter::SrgbToLinearGamma(f) => Some(f),
            _ => None,
        }
    }

    /// Downcast to the linear-to-sRGB gamma filter.
    pub fn as_linear_to_srgb_gamma(&self) -> Option<&LinearToSrgbGammaFilter> {
        match self {
            ColorFilter::LinearToSrgbGamma(f) => Some(f),
            _ => None,
        }
    }

    /// Stable fingerprint consistent with `==`.
    pub fn fingerprint(&self) -> EffectFingerprint {
        let mut h = StableHasher::new();
        self.write_fingerprint(&mut h);
        h.finish()
    }

    fn write_fingerprint(&self, h: &mut StableHasher) {
        h.write_u8(self.kind() as u8);
        match self {
            ColorFilter::Blend(f) => {
                h.write_color(f.color);
                h.write_u8(f.mode.index());
            }
            ColorFilter::Matrix(f) => {
                for &c in &f.matrix {
                    h.write_f32(c);
                }
            }
            ColorFilter::SrgbToLinearGamma(_) | ColorFilter::LinearToSrgbGamma(_) => {}
        }
    }
}

impl PartialEq for ColorFilter {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.kind() != other.kind() {
            return false;
        }
        match (self, other) {
            (ColorFilter::Blend(a), ColorFilter::Blend(b)) => a == b,
            (ColorFilter::Matrix(a), ColorFilter::Matrix(b)) => a == b,
            (ColorFilter::SrgbToLinearGamma(_), ColorFilter::SrgbToLinearGamma(_))
            | (ColorFilter::LinearToSrgbGamma(_), ColorFilter::LinearToSrgbGamma(_)) => true,
            _ => false,
        }
    }
}

/// Compare two optional filters, treating `None` as "no filter".
pub fn filters_equal(a: Option<&ColorFilter>, b: Option<&ColorFilter>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Blend a fixed color into each pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct BlendColorFilter {
    color: Color,
    mode: BlendMode,
}

impl BlendColorFilter {
    /// Blend color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Blend mode, after canonicalization.
    pub fn mode(&self) -> BlendMode {
        self.mode
    }

    fn modifies_transparent_black(&self) -> bool {
        match self.mode {
            // Like `Src` on a zero destination: the result is the blend color.
            BlendMode::Src
            | BlendMode::SrcOver
            | BlendMode::DstOver
            | BlendMode::SrcOut
            | BlendMode::DstATop
            | BlendMode::Xor
            | BlendMode::Plus
            | BlendMode::Screen
            | BlendMode::Overlay
            | BlendMode::Darken
            | BlendMode::Lighten
            | BlendMode::ColorDodge
            | BlendMode::ColorBurn
            | BlendMode::HardLight
            | BlendMode::SoftLight
            | BlendMode::Difference
            | BlendMode::Exclusion
            | BlendMode::Multiply
            | BlendMode::Hue
            | BlendMode::Saturation
            | BlendMode::Color
            | BlendMode::Luminosity => !self.color.is_transparent(),

            // Like `Dst` on a zero destination: the result stays zero.
            BlendMode::Clear
            | BlendMode::Dst
            | BlendMode::SrcIn
            | BlendMode::DstIn
            | BlendMode::DstOut
            | BlendMode::SrcATop
            | BlendMode::Modulate => false,
        }
    }

    fn can_commute_with_opacity(&self) -> bool {
        match self.mode {
            BlendMode::Dst | BlendMode::DstIn | BlendMode::DstOut => true,

            BlendMode::Clear
            | BlendMode::Src
            | BlendMode::SrcOver
            | BlendMode::DstOver
            | BlendMode::SrcIn
            | BlendMode::SrcOut
            | BlendMode::SrcATop
            | BlendMode::DstATop
            | BlendMode::Xor
            | BlendMode::Plus
            | BlendMode::Modulate
            | BlendMode::Screen
            | BlendMode::Overlay
            | BlendMode::Darken
            | BlendMode::Lighten
            | BlendMode::ColorDodge
            | BlendMode::ColorBurn
            | BlendMode::HardLight
            | BlendMode::SoftLight
            | BlendMode::Difference
            | BlendMode::Exclusion
            | BlendMode::Multiply
            | BlendMode::Hue
            | BlendMode::Saturation
            | BlendMode::Color
            | BlendMode::Luminosity => false,
        }
    }
}

/// Row-major 4x5 color matrix applied to straight `(r, g, b, a, 1)`.
///
/// Coefficients compare like [`Color`] channels: NaN equals itself and `-0.0 == 0.0`.
#[derive(Clone, Debug)]
pub struct MatrixColorFilter {
    matrix: [f32; 20],
}

impl MatrixColorFilter {
    /// Copy of the 20 coefficients.
    pub fn matrix(&self) -> [f32; 20] {
        self.matrix
    }

    /// Apply the matrix to a straight color, clamping each channel to `[0, 1]`.
    ///
    /// Non-finite results clamp to zero.
    pub fn apply(&self, c: Color) -> Color {
        let input = [c.r, c.g, c.b, c.a, 1.0];
        let mut out = [0.0f32; 4];
        for (row, o) in out.iter_mut().enumerate() {
            let coeffs = &self.matrix[row * 5..row * 5 + 5];
            let v: f32 = coeffs.iter().zip(input).map(|(m, x)| m * x).sum();
            *o = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        }
        Color::new(out[0], out[1], out[2], out[3])
    }

    fn modifies_transparent_black(&self) -> bool {
        // For (0, 0, 0, 0, 1) the alpha row reduces to its translation term, which `apply`
        // zeroes when non-finite.
        let a = self.matrix[19];
        a.is_finite() && a > 0.0
    }

    fn can_commute_with_opacity(&self) -> bool {
        let m = &self.matrix;
        m[3] == 0.0
            && m[8] == 0.0
            && m[13] == 0.0
            && m[15] == 0.0
            && m[16] == 0.0
            && m[17] == 0.0
            && m[18] == 1.0
            && m[19] == 0.0
    }
}

impl PartialEq for MatrixColorFilter {
    fn eq(&self, other: &Self) -> bool {
        self.matrix
            .iter()
            .zip(&other.matrix)
            .all(|(&a, &b)| f32_key(a) == f32_key(b))
    }
}

/// Stateless sRGB-to-linear gamma filter.
#[derive(Debug)]
pub struct SrgbToLinearGammaFilter {
    _private: (),
}

/// Stateless linear-to-sRGB gamma filter.
#[derive(Debug)]
pub struct LinearToSrgbGammaFilter {
    _private: (),
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color_filter.rs"]
mod tests;

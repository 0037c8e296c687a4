pub use kurbo::{Affine, Point};

/// Straight (non-premultiplied) RGBA color with `f32` channels in `[0, 1]`.
///
/// Colors built from 8-bit channels or packed ARGB words are converted on the way in, so
/// both input forms compare equal when they describe the same value.
///
/// Channels compare by value identity (see [`f32_key`]): NaN equals itself and the two
/// zeroes are equal.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Build a color from floating-point channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: unit(r),
            g: unit(g),
            b: unit(b),
            a: unit(a),
        }
    }

    /// Build a color from a packed `0xAARRGGBB` word.
    pub fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_rgba8(r, g, b, a)
    }

    /// Quantize to 8-bit channels `[r, g, b, a]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    /// Quantize to a packed `0xAARRGGBB` word.
    pub fn to_argb(self) -> u32 {
        let [r, g, b, a] = self.to_rgba8();
        u32::from_be_bytes([a, r, g, b])
    }

    /// Alpha quantized to 8 bits.
    pub fn alpha8(self) -> u8 {
        quantize(self.a)
    }

    /// Return `true` when the alpha channel is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// Return `true` when the alpha channel is fully transparent.
    ///
    /// A NaN alpha counts as transparent; it clamps to zero when drawn.
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0 || self.a.is_nan()
    }

    /// Copy of this color with a replaced alpha channel.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        f32_key(self.r) == f32_key(other.r)
            && f32_key(self.g) == f32_key(other.g)
            && f32_key(self.b) == f32_key(other.b)
            && f32_key(self.a) == f32_key(other.a)
    }
}

impl From<u32> for Color {
    /// Interpret the word as packed `0xAARRGGBB`.
    fn from(argb: u32) -> Self {
        Self::from_argb(argb)
    }
}

impl From<[f32; 4]> for Color {
    /// Interpret the array as `[r, g, b, a]`.
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Bit pattern used for float equality and fingerprints.
///
/// `-0.0` maps to `0.0` and every NaN maps to the canonical NaN, so equality stays
/// reflexive and agrees with hashing.
pub(crate) fn f32_key(v: f32) -> u32 {
    if v.is_nan() {
        f32::NAN.to_bits()
    } else if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

/// [`f32_key`] for `f64`.
pub(crate) fn f64_key(v: f64) -> u64 {
    if v.is_nan() {
        f64::NAN.to_bits()
    } else if v == 0.0 {
        0
    } else {
        v.to_bits()
    }
}

pub(crate) fn points_same(a: Point, b: Point) -> bool {
    f64_key(a.x) == f64_key(b.x) && f64_key(a.y) == f64_key(b.y)
}

/// Compare optional local matrices coefficient by coefficient with [`f64_key`].
pub(crate) fn matrices_same(a: Option<&Affine>, b: Option<&Affine>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a
            .as_coeffs()
            .iter()
            .zip(b.as_coeffs())
            .all(|(&x, y)| f64_key(x) == f64_key(y)),
        _ => false,
    }
}

fn unit(c: u8) -> f32 {
    f32::from(c) / 255.0
}

fn quantize(c: f32) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

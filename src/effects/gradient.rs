//! Gradient color sources and their stop storage.

use std::mem;

use crate::effects::modes::TileMode;
use crate::fingerprint::StableHasher;
use crate::foundation::core::{Affine, Color, Point, f32_key, f64_key, matrices_same, points_same};
use crate::foundation::error::{DlfxError, DlfxResult};

/// Immutable gradient stops: parallel arrays of colors and offsets.
///
/// Always holds at least two stops. Offsets are finite, within `[0, 1]` and
/// non-decreasing. Colors are not range-checked; they compare like [`Color`], so a NaN
/// channel still equals itself.
#[derive(Clone, Debug)]
pub struct GradientStops {
    colors: Box<[Color]>,
    offsets: Box<[f32]>,
}

impl GradientStops {
    /// Validate and copy gradient stops.
    ///
    /// `colors` may be packed `0xAARRGGBB` words, `[r, g, b, a]` float arrays or
    /// [`Color`] values. When `offsets` is `None` the stops are spread evenly over
    /// `[0, 1]`.
    pub fn new<C>(colors: &[C], offsets: Option<&[f32]>) -> DlfxResult<Self>
    where
        C: Copy + Into<Color>,
    {
        let count = colors.len();
        if count < 2 {
            tracing::debug!(count, "rejecting gradient with too few stops");
            return Err(DlfxError::TooFewStops { count });
        }

        let offsets: Box<[f32]> = match offsets {
            Some(offsets) => {
                if offsets.len() != count {
                    tracing::debug!(
                        colors = count,
                        offsets = offsets.len(),
                        "rejecting gradient with mismatched stop arrays"
                    );
                    return Err(DlfxError::StopCountMismatch {
                        colors: count,
                        offsets: offsets.len(),
                    });
                }
                validate_offsets(offsets)?;
                offsets.into()
            }
            None => {
                let last = (count - 1) as f32;
                (0..count).map(|i| i as f32 / last).collect()
            }
        };

        Ok(Self {
            colors: colors.iter().map(|&c| c.into()).collect(),
            offsets,
        })
    }

    /// Validate and copy `(color, offset)` pairs.
    pub fn from_pairs(pairs: &[(Color, f32)]) -> DlfxResult<Self> {
        let colors: Vec<Color> = pairs.iter().map(|&(c, _)| c).collect();
        let offsets: Vec<f32> = pairs.iter().map(|&(_, o)| o).collect();
        Self::new(&colors, Some(&offsets))
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Return `true` when there are no stops, which validated stops never are.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Stop colors.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Stop offsets.
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    /// Bytes of per-stop data: `len * (size_of::<Color>() + size_of::<f32>())`.
    pub fn payload_size(&self) -> usize {
        self.len() * (mem::size_of::<Color>() + mem::size_of::<f32>())
    }

    /// Copy stops read back from an existing gradient; they were validated when it was
    /// built.
    pub(crate) fn copy_of(colors: &[Color], offsets: &[f32]) -> Self {
        Self {
            colors: colors.into(),
            offsets: offsets.into(),
        }
    }
}

impl PartialEq for GradientStops {
    fn eq(&self, other: &Self) -> bool {
        self.colors == other.colors
            && self.offsets.len() == other.offsets.len()
            && self
                .offsets
                .iter()
                .zip(other.offsets.iter())
                .all(|(&a, &b)| f32_key(a) == f32_key(b))
    }
}

fn validate_offsets(offsets: &[f32]) -> DlfxResult<()> {
    let mut prev = 0.0f32;
    for (i, &o) in offsets.iter().enumerate() {
        if !o.is_finite() || !(0.0..=1.0).contains(&o) {
            tracing::debug!(index = i, offset = o, "rejecting gradient stop offset");
            return Err(DlfxError::validation(format!(
                "gradient stop {i} offset {o} must be finite and within [0, 1]"
            )));
        }
        if o < prev {
            tracing::debug!(index = i, offset = o, "rejecting decreasing gradient stops");
            return Err(DlfxError::validation(format!(
                "gradient stop {i} offset {o} is less than the previous offset {prev}"
            )));
        }
        prev = o;
    }
    Ok(())
}

/// State shared by every gradient: local matrix, tile mode and stops.
#[derive(Clone, Debug)]
pub struct GradientBase {
    matrix: Option<Affine>,
    tile_mode: TileMode,
    stops: GradientStops,
}

impl GradientBase {
    pub(crate) fn new(stops: GradientStops, tile_mode: TileMode, matrix: Option<&Affine>) -> Self {
        Self {
            matrix: explicit_matrix(matrix),
            tile_mode,
            stops,
        }
    }

    /// Local matrix, identity when none was given.
    pub fn matrix(&self) -> Affine {
        self.matrix.unwrap_or(Affine::IDENTITY)
    }

    /// Local matrix, `None` when it is the identity.
    pub fn explicit_matrix(&self) -> Option<&Affine> {
        self.matrix.as_ref()
    }

    /// How the gradient extends beyond its range.
    pub fn tile_mode(&self) -> TileMode {
        self.tile_mode
    }

    /// Number of stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Stop colors.
    pub fn colors(&self) -> &[Color] {
        self.stops.colors()
    }

    /// Stop offsets.
    pub fn stops(&self) -> &[f32] {
        self.stops.offsets()
    }

    /// Return `true` when every stop is opaque and nothing is drawn as transparent
    /// outside the range.
    pub fn is_opaque(&self) -> bool {
        if self.tile_mode == TileMode::Decal {
            return false;
        }
        self.stops.colors().iter().all(|c| c.is_opaque())
    }

    /// Fresh copy of the stops, for rebuilding through a factory.
    pub(crate) fn copy_stops(&self) -> GradientStops {
        GradientStops::copy_of(self.colors(), self.stops())
    }

    pub(crate) fn payload_size(&self) -> usize {
        self.stops.payload_size()
    }

    pub(crate) fn write_fingerprint(&self, h: &mut StableHasher) {
        h.write_u8(self.tile_mode.index());
        h.write_matrix(self.explicit_matrix());
        h.write_len(self.stop_count());
        for &c in self.colors() {
            h.write_color(c);
        }
        for &o in self.stops() {
            h.write_f32(o);
        }
    }
}

impl PartialEq for GradientBase {
    fn eq(&self, other: &Self) -> bool {
        self.tile_mode == other.tile_mode
            && matrices_same(self.explicit_matrix(), other.explicit_matrix())
            && self.stops == other.stops
    }
}

/// Gradient along the line from `start` to `end`.
///
/// Geometry compares by value identity like [`Color`]: NaN equals itself and the two
/// zeroes are equal. The same holds for the other gradient kinds.
#[derive(Clone, Debug)]
pub struct LinearGradient {
    pub(crate) start: Point,
    pub(crate) end: Point,
    pub(crate) base: GradientBase,
}

impl LinearGradient {
    /// Point mapped to offset 0.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Point mapped to offset 1.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Matrix, tile mode and stops.
    pub fn base(&self) -> &GradientBase {
        &self.base
    }

    /// Header plus stop payload.
    pub fn size(&self) -> usize {
        mem::size_of::<Self>() + self.base.payload_size()
    }
}

/// Gradient radiating from `center` out to `radius`.
#[derive(Clone, Debug)]
pub struct RadialGradient {
    pub(crate) center: Point,
    pub(crate) radius: f64,
    pub(crate) base: GradientBase,
}

impl RadialGradient {
    /// Center mapped to offset 0.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Distance mapped to offset 1.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Matrix, tile mode and stops.
    pub fn base(&self) -> &GradientBase {
        &self.base
    }

    /// Header plus stop payload.
    pub fn size(&self) -> usize {
        mem::size_of::<Self>() + self.base.payload_size()
    }
}

/// Two-point conical gradient between a start circle and an end circle.
#[derive(Clone, Debug)]
pub struct ConicalGradient {
    pub(crate) start_center: Point,
    pub(crate) start_radius: f64,
    pub(crate) end_center: Point,
    pub(crate) end_radius: f64,
    pub(crate) base: GradientBase,
}

impl ConicalGradient {
    /// Center of the start circle.
    pub fn start_center(&self) -> Point {
        self.start_center
    }

    /// Radius of the start circle.
    pub fn start_radius(&self) -> f64 {
        self.start_radius
    }

    /// Center of the end circle.
    pub fn end_center(&self) -> Point {
        self.end_center
    }

    /// Radius of the end circle.
    pub fn end_radius(&self) -> f64 {
        self.end_radius
    }

    /// Matrix, tile mode and stops.
    pub fn base(&self) -> &GradientBase {
        &self.base
    }

    /// Header plus stop payload.
    pub fn size(&self) -> usize {
        mem::size_of::<Self>() + self.base.payload_size()
    }
}

/// Angular gradient around `center` between two angles in degrees.
#[derive(Clone, Debug)]
pub struct SweepGradient {
    pub(crate) center: Point,
    pub(crate) start_degrees: f64,
    pub(crate) end_degrees: f64,
    pub(crate) base: GradientBase,
}

impl SweepGradient {
    /// Center of rotation.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Angle mapped to offset 0.
    pub fn start_degrees(&self) -> f64 {
        self.start_degrees
    }

    /// Angle mapped to offset 1.
    pub fn end_degrees(&self) -> f64 {
        self.end_degrees
    }

    /// Matrix, tile mode and stops.
    pub fn base(&self) -> &GradientBase {
        &self.base
    }

    /// Header plus stop payload.
    pub fn size(&self) -> usize {
        mem::size_of::<Self>() + self.base.payload_size()
    }
}

impl PartialEq for LinearGradient {
    fn eq(&self, other: &Self) -> bool {
        points_same(self.start, other.start)
            && points_same(self.end, other.end)
            && self.base == other.base
    }
}

impl PartialEq for RadialGradient {
    fn eq(&self, other: &Self) -> bool {
        points_same(self.center, other.center)
            && f64_key(self.radius) == f64_key(other.radius)
            && self.base == other.base
    }
}

impl PartialEq for ConicalGradient {
    fn eq(&self, other: &Self) -> bool {
        points_same(self.start_center, other.start_center)
            && f64_key(self.start_radius) == f64_key(other.start_radius)
            && points_same(self.end_center, other.end_center)
            && f64_key(self.end_radius) == f64_key(other.end_radius)
            && self.base == other.base
    }
}

impl PartialEq for SweepGradient {
    fn eq(&self, other: &Self) -> bool {
        points_same(self.center, other.center)
            && f64_key(self.start_degrees) == f64_key(other.start_degrees)
            && f64_key(self.end_degrees) == f64_key(other.end_degrees)
            && self.base == other.base
    }
}

pub(crate) fn explicit_matrix(matrix: Option<&Affine>) -> Option<Affine> {
    matrix.copied().filter(|m| *m != Affine::IDENTITY)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/gradient.rs"]
mod tests;

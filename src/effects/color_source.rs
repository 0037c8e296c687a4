//! Color sources: what color to sample at each point of a filled shape.
//!
//! Sources are built only through the `ColorSource::make_*` factories and shared as
//! `Arc<ColorSource>`. Gradient and image sources carry an optional local matrix that is
//! stored only when it differs from the identity.

use std::mem;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::effects::gradient::{
    ConicalGradient, GradientBase, GradientStops, LinearGradient, RadialGradient,
    SweepGradient, explicit_matrix,
};
use crate::effects::modes::{ImageSampling, TileMode};
use crate::effects::resources::{ImageHandle, RuntimeEffectHandle, effects_equal, images_equal};
use crate::fingerprint::{EffectFingerprint, StableHasher};
use crate::foundation::core::{Affine, Point, matrices_same};

/// Child sources bound to a runtime effect, in shader order.
pub type Samplers = SmallVec<[Option<Arc<ColorSource>>; 4]>;

/// Discriminant of a [`ColorSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSourceKind {
    /// [`ImageColorSource`].
    Image,
    /// [`LinearGradient`].
    LinearGradient,
    /// [`RadialGradient`].
    RadialGradient,
    /// [`ConicalGradient`].
    ConicalGradient,
    /// [`SweepGradient`].
    SweepGradient,
    /// [`RuntimeEffectColorSource`].
    RuntimeEffect,
}

/// Immutable color source.
///
/// Backends translating sources should match exhaustively (no `_` arm) so that adding a
/// variant here fails to compile until every translation handles it.
#[derive(Debug)]
pub enum ColorSource {
    /// Sample a platform image.
    Image(ImageColorSource),
    /// Linear gradient.
    LinearGradient(LinearGradient),
    /// Radial gradient.
    RadialGradient(RadialGradient),
    /// Two-point conical gradient.
    ConicalGradient(ConicalGradient),
    /// Sweep gradient.
    SweepGradient(SweepGradient),
    /// Run a compiled shader effect.
    RuntimeEffect(RuntimeEffectColorSource),
}

impl ColorSource {
    /// Build a linear gradient from `start` (offset 0) to `end` (offset 1).
    pub fn make_linear(
        start: Point,
        end: Point,
        stops: GradientStops,
        tile_mode: TileMode,
        matrix: Option<&Affine>,
    ) -> Arc<ColorSource> {
        Arc::new(ColorSource::LinearGradient(LinearGradient {
            start,
            end,
            base: GradientBase::new(stops, tile_mode, matrix),
        }))
    }

    /// Build a radial gradient around `center`.
    pub fn make_radial(
        center: Point,
        radius: f64,
        stops: GradientStops,
        tile_mode: TileMode,
        matrix: Option<&Affine>,
    ) -> Arc<ColorSource> {
        Arc::new(ColorSource::RadialGradient(RadialGradient {
            center,
            radius,
            base: GradientBase::new(stops, tile_mode, matrix),
        }))
    }

    /// Build a two-point conical gradient.
    pub fn make_conical(
        start_center: Point,
        start_radius: f64,
        end_center: Point,
        end_radius: f64,
        stops: GradientStops,
        tile_mode: TileMode,
        matrix: Option<&Affine>,
    ) -> Arc<ColorSource> {
        Arc::new(ColorSource::ConicalGradient(ConicalGradient {
            start_center,
            start_radius,
            end_center,
            end_radius,
            base: GradientBase::new(stops, tile_mode, matrix),
        }))
    }

    /// Build a sweep gradient around `center` between two angles in degrees.
    pub fn make_sweep(
        center: Point,
        start_degrees: f64,
        end_degrees: f64,
        stops: GradientStops,
        tile_mode: TileMode,
        matrix: Option<&Affine>,
    ) -> Arc<ColorSource> {
        Arc::new(ColorSource::SweepGradient(SweepGradient {
            center,
            start_degrees,
            end_degrees,
            base: GradientBase::new(stops, tile_mode, matrix),
        }))
    }

    /// Build a source sampling `image`.
    pub fn make_image(
        image: Arc<dyn ImageHandle>,
        horizontal_tile_mode: TileMode,
        vertical_tile_mode: TileMode,
        sampling: ImageSampling,
        matrix: Option<&Affine>,
    ) -> Arc<ColorSource> {
        Arc::new(ColorSource::Image(ImageColorSource {
            image,
            horizontal_tile_mode,
            vertical_tile_mode,
            sampling,
            matrix: explicit_matrix(matrix),
        }))
    }

    /// Build a source running `effect` with bound child sources and uniform bytes.
    ///
    /// `None` samplers are unbound slots.
    pub fn make_runtime_effect(
        effect: Arc<dyn RuntimeEffectHandle>,
        samplers: impl IntoIterator<Item = Option<Arc<ColorSource>>>,
        uniform_data: Arc<[u8]>,
    ) -> Arc<ColorSource> {
        Arc::new(ColorSource::RuntimeEffect(RuntimeEffectColorSource {
            effect,
            samplers: samplers.into_iter().collect(),
            uniform_data,
        }))
    }

    /// Discriminant of this source.
    pub fn kind(&self) -> ColorSourceKind {
        match self {
            ColorSource::Image(_) => ColorSourceKind::Image,
            ColorSource::LinearGradient(_) => ColorSourceKind::LinearGradient,
            ColorSource::RadialGradient(_) => ColorSourceKind::RadialGradient,
            ColorSource::ConicalGradient(_) => ColorSourceKind::ConicalGradient,
            ColorSource::SweepGradient(_) => ColorSourceKind::SweepGradient,
            ColorSource::RuntimeEffect(_) => ColorSourceKind::RuntimeEffect,
        }
    }

    /// Size in bytes, including gradient stop payloads.
    pub fn size(&self) -> usize {
        match self {
            ColorSource::Image(_) => mem::size_of::<ImageColorSource>(),
            ColorSource::LinearGradient(g) => g.size(),
            ColorSource::RadialGradient(g) => g.size(),
            ColorSource::ConicalGradient(g) => g.size(),
            ColorSource::SweepGradient(g) => g.size(),
            ColorSource::RuntimeEffect(_) => mem::size_of::<RuntimeEffectColorSource>(),
        }
    }

    /// Rebuild an equal source in a new allocation through its factory.
    pub fn shared(&self) -> Arc<ColorSource> {
        match self {
            ColorSource::Image(s) => ColorSource::make_image(
                Arc::clone(&s.image),
                s.horizontal_tile_mode,
                s.vertical_tile_mode,
                s.sampling,
                s.explicit_matrix(),
            ),
            ColorSource::LinearGradient(g) => ColorSource::make_linear(
                g.start(),
                g.end(),
                g.base.copy_stops(),
                g.base.tile_mode(),
                g.base.explicit_matrix(),
            ),
            ColorSource::RadialGradient(g) => ColorSource::make_radial(
                g.center(),
                g.radius(),
                g.base.copy_stops(),
                g.base.tile_mode(),
                g.base.explicit_matrix(),
            ),
            ColorSource::ConicalGradient(g) => ColorSource::make_conical(
                g.start_center(),
                g.start_radius(),
                g.end_center(),
                g.end_radius(),
                g.base.copy_stops(),
                g.base.tile_mode(),
                g.base.explicit_matrix(),
            ),
            ColorSource::SweepGradient(g) => ColorSource::make_sweep(
                g.center(),
                g.start_degrees(),
                g.end_degrees(),
                g.base.copy_stops(),
                g.base.tile_mode(),
                g.base.explicit_matrix(),
            ),
            ColorSource::RuntimeEffect(s) => ColorSource::make_runtime_effect(
                Arc::clone(&s.effect),
                s.samplers.iter().cloned(),
                Arc::clone(&s.uniform_data),
            ),
        }
    }

    /// Return `true` when every sampled color is fully opaque.
    pub fn is_opaque(&self) -> bool {
        match self {
            ColorSource::Image(s) => s.is_opaque(),
            ColorSource::RuntimeEffect(_) => false,
            ColorSource::LinearGradient(_)
            | ColorSource::RadialGradient(_)
            | ColorSource::ConicalGradient(_)
            | ColorSource::SweepGradient(_) => {
                self.as_gradient().is_some_and(GradientBase::is_opaque)
            }
        }
    }

    /// Return `true` when the source may be read without moving to a render thread.
    pub fn is_ui_thread_safe(&self) -> bool {
        match self {
            ColorSource::Image(s) => s.image.is_ui_thread_safe(),
            ColorSource::RuntimeEffect(s) => s.is_ui_thread_safe(),
            ColorSource::LinearGradient(_)
            | ColorSource::RadialGradient(_)
            | ColorSource::ConicalGradient(_)
            | ColorSource::SweepGradient(_) => true,
        }
    }

    /// Return `true` for the four gradient kinds.
    pub fn is_gradient(&self) -> bool {
        self.as_gradient().is_some()
    }

    /// Matrix, tile mode and stops of a gradient source.
    pub fn as_gradient(&self) -> Option<&GradientBase> {
        match self {
            ColorSource::LinearGradient(g) => Some(&g.base),
            ColorSource::RadialGradient(g) => Some(&g.base),
            ColorSource::ConicalGradient(g) => Some(&g.base),
            ColorSource::SweepGradient(g) => Some(&g.base),
            ColorSource::Image(_) | ColorSource::RuntimeEffect(_) => None,
        }
    }

    /// Local matrix, identity for sources without one.
    pub fn matrix(&self) -> Affine {
        self.explicit_matrix().copied().unwrap_or(Affine::IDENTITY)
    }

    /// Local matrix, `None` when it is the identity or the source has none.
    pub fn explicit_matrix(&self) -> Option<&Affine> {
        match self {
            ColorSource::Image(s) => s.explicit_matrix(),
            ColorSource::RuntimeEffect(_) => None,
            ColorSource::LinearGradient(g) => g.base.explicit_matrix(),
            ColorSource::RadialGradient(g) => g.base.explicit_matrix(),
            ColorSource::ConicalGradient(g) => g.base.explicit_matrix(),
            ColorSource::SweepGradient(g) => g.base.explicit_matrix(),
        }
    }

    /// Downcast to an image source.
    pub fn as_image(&self) -> Option<&ImageColorSource> {
        match self {
            ColorSource::Image(s) => Some(s),
            _ => None,
        }
    }

    /// Downcast to a linear gradient.
    pub fn as_linear_gradient(&self) -> Option<&LinearGradient> {
        match self {
            ColorSource::LinearGradient(g) => Some(g),
            _ => None,
        }
    }

    /// Downcast to a radial gradient.
    pub fn as_radial_gradient(&self) -> Option<&RadialGradient> {
        match self {
            ColorSource::RadialGradient(g) => Some(g),
            _ => None,
        }
    }

    /// Downcast to a conical gradient.
    pub fn as_conical_gradient(&self) -> Option<&ConicalGradient> {
        match self {
            ColorSource::ConicalGradient(g) => Some(g),
            _ => None,
        }
    }

    /// Downcast to a sweep gradient.
    pub fn as_sweep_gradient(&self) -> Option<&SweepGradient> {
        match self {
            ColorSource::SweepGradient(g) => Some(g),
            _ => None,
        }
    }

    /// Downcast to a runtime-effect source.
    pub fn as_runtime_effect(&self) -> Option<&RuntimeEffectColorSource> {
        match self {
            ColorSource::RuntimeEffect(s) => Some(s),
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
            ColorSource::Image(s) => {
                h.write_u8(s.horizontal_tile_mode.index());
                h.write_u8(s.vertical_tile_mode.index());
                h.write_u8(s.sampling.index());
                h.write_matrix(s.explicit_matrix());
            }
            ColorSource::LinearGradient(g) => {
                h.write_point(g.start);
                h.write_point(g.end);
                g.base.write_fingerprint(h);
            }
            ColorSource::RadialGradient(g) => {
                h.write_point(g.center);
                h.write_f64(g.radius);
                g.base.write_fingerprint(h);
            }
            ColorSource::ConicalGradient(g) => {
                h.write_point(g.start_center);
                h.write_f64(g.start_radius);
                h.write_point(g.end_center);
                h.write_f64(g.end_radius);
                g.base.write_fingerprint(h);
            }
            ColorSource::SweepGradient(g) => {
                h.write_point(g.center);
                h.write_f64(g.start_degrees);
                h.write_f64(g.end_degrees);
                g.base.write_fingerprint(h);
            }
            ColorSource::RuntimeEffect(s) => {
                h.write_len(s.uniform_data.len());
                h.write_bytes(&s.uniform_data);
                h.write_len(s.samplers.len());
                for sampler in &s.samplers {
                    h.write_bool(sampler.is_some());
                    if let Some(sampler) = sampler {
                        sampler.write_fingerprint(h);
                    }
                }
            }
        }
    }
}

impl PartialEq for ColorSource {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.kind() != other.kind() {
            return false;
        }
        match (self, other) {
            (ColorSource::Image(a), ColorSource::Image(b)) => a == b,
            (ColorSource::LinearGradient(a), ColorSource::LinearGradient(b)) => a == b,
            (ColorSource::RadialGradient(a), ColorSource::RadialGradient(b)) => a == b,
            (ColorSource::ConicalGradient(a), ColorSource::ConicalGradient(b)) => a == b,
            (ColorSource::SweepGradient(a), ColorSource::SweepGradient(b)) => a == b,
            (ColorSource::RuntimeEffect(a), ColorSource::RuntimeEffect(b)) => a == b,
            _ => false,
        }
    }
}

/// Compare two optional sources, treating `None` as "no source".
pub fn sources_equal(a: Option<&ColorSource>, b: Option<&ColorSource>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Source sampling a platform image.
#[derive(Debug)]
pub struct ImageColorSource {
    image: Arc<dyn ImageHandle>,
    horizontal_tile_mode: TileMode,
    vertical_tile_mode: TileMode,
    sampling: ImageSampling,
    matrix: Option<Affine>,
}

impl ImageColorSource {
    /// Wrapped image.
    pub fn image(&self) -> &Arc<dyn ImageHandle> {
        &self.image
    }

    /// Tile mode along x.
    pub fn horizontal_tile_mode(&self) -> TileMode {
        self.horizontal_tile_mode
    }

    /// Tile mode along y.
    pub fn vertical_tile_mode(&self) -> TileMode {
        self.vertical_tile_mode
    }

    /// Sampling quality.
    pub fn sampling(&self) -> ImageSampling {
        self.sampling
    }

    /// Local matrix, identity when none was given.
    pub fn matrix(&self) -> Affine {
        self.matrix.unwrap_or(Affine::IDENTITY)
    }

    /// Local matrix, `None` when it is the identity.
    pub fn explicit_matrix(&self) -> Option<&Affine> {
        self.matrix.as_ref()
    }

    /// New source identical to this one except for `sampling`.
    pub fn with_sampling(&self, sampling: ImageSampling) -> Arc<ColorSource> {
        ColorSource::make_image(
            Arc::clone(&self.image),
            self.horizontal_tile_mode,
            self.vertical_tile_mode,
            sampling,
            self.explicit_matrix(),
        )
    }

    fn is_opaque(&self) -> bool {
        if self.horizontal_tile_mode == TileMode::Decal || self.vertical_tile_mode == TileMode::Decal
        {
            return false;
        }
        self.image.is_opaque()
    }
}

impl PartialEq for ImageColorSource {
    fn eq(&self, other: &Self) -> bool {
        images_equal(&self.image, &other.image)
            && matrices_same(self.explicit_matrix(), other.explicit_matrix())
            && self.horizontal_tile_mode == other.horizontal_tile_mode
            && self.vertical_tile_mode == other.vertical_tile_mode
            && self.sampling == other.sampling
    }
}

/// Source running a compiled shader effect.
#[derive(Debug)]
pub struct RuntimeEffectColorSource {
    effect: Arc<dyn RuntimeEffectHandle>,
    samplers: Samplers,
    uniform_data: Arc<[u8]>,
}

impl RuntimeEffectColorSource {
    /// Compiled effect.
    pub fn effect(&self) -> &Arc<dyn RuntimeEffectHandle> {
        &self.effect
    }

    /// Child sources in shader order; `None` marks an unbound slot.
    pub fn samplers(&self) -> &[Option<Arc<ColorSource>>] {
        &self.samplers
    }

    /// Uniform bytes passed to the effect.
    pub fn uniform_data(&self) -> &[u8] {
        &self.uniform_data
    }

    fn is_ui_thread_safe(&self) -> bool {
        self.samplers
            .iter()
            .flatten()
            .all(|sampler| sampler.is_ui_thread_safe())
    }
}

impl PartialEq for RuntimeEffectColorSource {
    fn eq(&self, other: &Self) -> bool {
        effects_equal(&self.effect, &other.effect)
            && self.uniform_data == other.uniform_data
            && self.samplers.len() == other.samplers.len()
            && self
                .samplers
                .iter()
                .zip(&other.samplers)
                .all(|(a, b)| sources_equal(a.as_deref(), b.as_deref()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/color_source.rs"]
mod tests;

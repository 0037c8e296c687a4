//! dlfx is the effect object model of a display list.
//!
//! It defines the immutable color filters and color sources that drawing operations
//! reference, together with the predicates a compositor consults before reordering or
//! folding them:
//!
//! - [`ColorFilter`]: blend, matrix and gamma filters, built with `ColorFilter::make_*`
//! - [`ColorSource`]: linear, radial, conical and sweep gradients, image sources and
//!   runtime-effect sources, built with `ColorSource::make_*`
//! - [`ColorFilterDesc`] / [`GradientDesc`]: serializable descriptors
//!
//! Every object is shared as an `Arc` and never changes after construction.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod effects;
mod fingerprint;
mod foundation;

pub use crate::effects::color_filter::{
    BlendColorFilter, ColorFilter, ColorFilterKind, LinearToSrgbGammaFilter, MatrixColorFilter,
    SrgbToLinearGammaFilter, filters_equal,
};
pub use crate::effects::color_source::{
    ColorSource, ColorSourceKind, ImageColorSource, RuntimeEffectColorSource, Samplers,
    sources_equal,
};
pub use crate::effects::desc::{ColorFilterDesc, GradientDesc, StopDesc};
pub use crate::effects::gradient::{
    ConicalGradient, GradientBase, GradientStops, LinearGradient, RadialGradient, SweepGradient,
};
pub use crate::effects::modes::{BlendMode, ImageSampling, TileMode};
pub use crate::effects::resources::{ImageHandle, RuntimeEffectHandle};
pub use crate::fingerprint::EffectFingerprint;
pub use crate::foundation::core::{Affine, Color, Point};
pub use crate::foundation::error::{DlfxError, DlfxResult};

//! Serializable descriptors for filters and gradients.
//!
//! Descriptors are plain data. Building one goes through the same factories as direct
//! construction, so a deserialized blend descriptor is canonicalized exactly like a
//! `make_blend` call.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::effects::color_filter::ColorFilter;
use crate::effects::color_source::ColorSource;
use crate::effects::gradient::{GradientBase, GradientStops};
use crate::effects::modes::{BlendMode, TileMode};
use crate::foundation::core::{Affine, Color, Point};
use crate::foundation::error::{DlfxError, DlfxResult};

/// Plain-data form of a [`ColorFilter`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorFilterDesc {
    /// See [`ColorFilter::make_blend`].
    Blend {
        /// Blend color.
        color: Color,
        /// Blend mode.
        mode: BlendMode,
    },
    /// See [`ColorFilter::make_matrix`].
    Matrix {
        /// Row-major 4x5 coefficients.
        matrix: [f32; 20],
    },
    /// See [`ColorFilter::make_srgb_to_linear_gamma`].
    SrgbToLinearGamma,
    /// See [`ColorFilter::make_linear_to_srgb_gamma`].
    LinearToSrgbGamma,
}

impl ColorFilterDesc {
    /// Build the filter; `None` when it canonicalizes to no filter.
    pub fn build(&self) -> Option<Arc<ColorFilter>> {
        match self {
            ColorFilterDesc::Blend { color, mode } => ColorFilter::make_blend(*color, *mode),
            ColorFilterDesc::Matrix { matrix } => Some(ColorFilter::make_matrix(matrix)),
            ColorFilterDesc::SrgbToLinearGamma => Some(ColorFilter::make_srgb_to_linear_gamma()),
            ColorFilterDesc::LinearToSrgbGamma => Some(ColorFilter::make_linear_to_srgb_gamma()),
        }
    }

    /// Parse a descriptor from JSON.
    pub fn from_json(s: &str) -> DlfxResult<Self> {
        serde_json::from_str(s).map_err(|e| DlfxError::serde(e.to_string()))
    }

    /// Serialize the descriptor to JSON.
    pub fn to_json(&self) -> DlfxResult<String> {
        serde_json::to_string(self).map_err(|e| DlfxError::serde(e.to_string()))
    }
}

impl ColorFilter {
    /// Plain-data form of this filter.
    pub fn to_desc(&self) -> ColorFilterDesc {
        match self {
            ColorFilter::Blend(f) => ColorFilterDesc::Blend {
                color: f.color(),
                mode: f.mode(),
            },
            ColorFilter::Matrix(f) => ColorFilterDesc::Matrix { matrix: f.matrix() },
            ColorFilter::SrgbToLinearGamma(_) => ColorFilterDesc::SrgbToLinearGamma,
            ColorFilter::LinearToSrgbGamma(_) => ColorFilterDesc::LinearToSrgbGamma,
        }
    }
}

/// One gradient stop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StopDesc {
    /// Stop color.
    pub color: Color,
    /// Stop offset in `[0, 1]`.
    pub offset: f32,
}

/// Plain-data form of a gradient [`ColorSource`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GradientDesc {
    /// See [`ColorSource::make_linear`].
    Linear {
        /// Point mapped to offset 0.
        start: Point,
        /// Point mapped to offset 1.
        end: Point,
        /// Stops, in order.
        stops: Vec<StopDesc>,
        /// Extension beyond the range.
        #[serde(default)]
        tile_mode: TileMode,
        /// Optional local matrix.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        matrix: Option<Affine>,
    },
    /// See [`ColorSource::make_radial`].
    Radial {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
        /// Stops, in order.
        stops: Vec<StopDesc>,
        /// Extension beyond the range.
        #[serde(default)]
        tile_mode: TileMode,
        /// Optional local matrix.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        matrix: Option<Affine>,
    },
    /// See [`ColorSource::make_conical`].
    Conical {
        /// Start circle center.
        start_center: Point,
        /// Start circle radius.
        start_radius: f64,
        /// End circle center.
        end_center: Point,
        /// End circle radius.
        end_radius: f64,
        /// Stops, in order.
        stops: Vec<StopDesc>,
        /// Extension beyond the range.
        #[serde(default)]
        tile_mode: TileMode,
        /// Optional local matrix.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        matrix: Option<Affine>,
    },
    /// See [`ColorSource::make_sweep`].
    Sweep {
        /// Center.
        center: Point,
        /// Start angle in degrees.
        start_degrees: f64,
        /// End angle in degrees.
        end_degrees: f64,
        /// Stops, in order.
        stops: Vec<StopDesc>,
        /// Extension beyond the range.
        #[serde(default)]
        tile_mode: TileMode,
        /// Optional local matrix.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        matrix: Option<Affine>,
    },
}

impl GradientDesc {
    /// Validate the stops and build the gradient.
    pub fn build(&self) -> DlfxResult<Arc<ColorSource>> {
        let source = match self {
            GradientDesc::Linear {
                start,
                end,
                stops,
                tile_mode,
                matrix,
            } => ColorSource::make_linear(
                *start,
                *end,
                to_stops(stops)?,
                *tile_mode,
                matrix.as_ref(),
            ),
            GradientDesc::Radial {
                center,
                radius,
                stops,
                tile_mode,
                matrix,
            } => ColorSource::make_radial(
                *center,
                *radius,
                to_stops(stops)?,
                *tile_mode,
                matrix.as_ref(),
            ),
            GradientDesc::Conical {
                start_center,
                start_radius,
                end_center,
                end_radius,
                stops,
                tile_mode,
                matrix,
            } => ColorSource::make_conical(
                *start_center,
                *start_radius,
                *end_center,
                *end_radius,
                to_stops(stops)?,
                *tile_mode,
                matrix.as_ref(),
            ),
            GradientDesc::Sweep {
                center,
                start_degrees,
                end_degrees,
                stops,
                tile_mode,
                matrix,
            } => ColorSource::make_sweep(
                *center,
                *start_degrees,
                *end_degrees,
                to_stops(stops)?,
                *tile_mode,
                matrix.as_ref(),
            ),
        };
        Ok(source)
    }

    /// Parse a descriptor from JSON.
    pub fn from_json(s: &str) -> DlfxResult<Self> {
        serde_json::from_str(s).map_err(|e| DlfxError::serde(e.to_string()))
    }

    /// Serialize the descriptor to JSON.
    pub fn to_json(&self) -> DlfxResult<String> {
        serde_json::to_string(self).map_err(|e| DlfxError::serde(e.to_string()))
    }
}

impl ColorSource {
    /// Plain-data form of a gradient source; `None` for image and runtime-effect sources.
    pub fn to_gradient_desc(&self) -> Option<GradientDesc> {
        let desc = match self {
            ColorSource::LinearGradient(g) => GradientDesc::Linear {
                start: g.start(),
                end: g.end(),
                stops: from_stops(g.base()),
                tile_mode: g.base().tile_mode(),
                matrix: g.base().explicit_matrix().copied(),
            },
            ColorSource::RadialGradient(g) => GradientDesc::Radial {
                center: g.center(),
                radius: g.radius(),
                stops: from_stops(g.base()),
                tile_mode: g.base().tile_mode(),
                matrix: g.base().explicit_matrix().copied(),
            },
            ColorSource::ConicalGradient(g) => GradientDesc::Conical {
                start_center: g.start_center(),
                start_radius: g.start_radius(),
                end_center: g.end_center(),
                end_radius: g.end_radius(),
                stops: from_stops(g.base()),
                tile_mode: g.base().tile_mode(),
                matrix: g.base().explicit_matrix().copied(),
            },
            ColorSource::SweepGradient(g) => GradientDesc::Sweep {
                center: g.center(),
                start_degrees: g.start_degrees(),
                end_degrees: g.end_degrees(),
                stops: from_stops(g.base()),
                tile_mode: g.base().tile_mode(),
                matrix: g.base().explicit_matrix().copied(),
            },
            ColorSource::Image(_) | ColorSource::RuntimeEffect(_) => return None,
        };
        Some(desc)
    }
}

fn to_stops(stops: &[StopDesc]) -> DlfxResult<GradientStops> {
    let colors: Vec<Color> = stops.iter().map(|s| s.color).collect();
    let offsets: Vec<f32> = stops.iter().map(|s| s.offset).collect();
    GradientStops::new(&colors, Some(&offsets))
}

fn from_stops(base: &GradientBase) -> Vec<StopDesc> {
    base.colors()
        .iter()
        .zip(base.stops())
        .map(|(&color, &offset)| StopDesc { color, offset })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/effects/desc.rs"]
mod tests;

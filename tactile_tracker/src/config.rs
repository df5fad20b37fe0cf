// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracker configuration and its validation errors.

use core::fmt;

use kurbo::{Size, Vec2};

/// Default lower zoom bound.
pub const DEFAULT_MIN_SCALE: f64 = 0.9;
/// Default upper zoom bound.
pub const DEFAULT_MAX_SCALE: f64 = 12.0;
/// Default per-tick inertia decay for both pan and zoom.
pub const DEFAULT_DECAY_RATE: f64 = 0.95;
/// Default speed below which inertia comes to rest.
pub const DEFAULT_REST_EPSILON: f64 = 0.01;
/// Default inertia tick length (60 Hz).
pub const DEFAULT_FRAME_INTERVAL: f64 = 1.0 / 60.0;

/// Pan range as a multiple of the view size used by [`ManipulationConfig::for_view_size`].
const VIEW_SIZE_PAN_FACTOR: f64 = 10.0;

/// A position axis, used in error reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// Which inertia channel a decay rate belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecayChannel {
    /// Pan inertia.
    Position,
    /// Zoom inertia.
    Scale,
}

impl fmt::Display for DecayChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Position => "position",
            Self::Scale => "scale",
        })
    }
}

/// Rejected tracker configuration.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `min_scale` is greater than `max_scale`.
    #[error("min_scale {min} exceeds max_scale {max}")]
    InvertedScaleRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// A position minimum is greater than its maximum.
    #[error("min_position.{axis} {min} exceeds max_position.{axis} {max}")]
    InvertedPositionRange {
        /// Offending axis.
        axis: Axis,
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
    /// A scale bound is zero, negative, or not finite.
    #[error("scale bounds must be finite and positive")]
    NonPositiveScale,
    /// A decay rate lies outside `[0, 1)`.
    #[error("{channel} inertia decay rate {rate} is outside [0, 1)")]
    DecayRateOutOfRange {
        /// Offending channel.
        channel: DecayChannel,
        /// Configured rate.
        rate: f64,
    },
    /// A field is NaN.
    #[error("{0} is NaN")]
    NotANumber(&'static str),
    /// The rest epsilon is zero, negative, or not finite.
    #[error("rest epsilon must be finite and positive")]
    NonPositiveEpsilon,
    /// The frame interval is zero, negative, or not finite.
    #[error("frame interval must be finite and positive")]
    NonPositiveFrameInterval,
}

/// Bounds and inertia parameters of an [`InertialTracker`](crate::InertialTracker).
///
/// Position bounds may be infinite; every other value must be finite.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManipulationConfig {
    /// Smallest allowed zoom.
    pub min_scale: f64,
    /// Largest allowed zoom.
    pub max_scale: f64,
    /// Component-wise lower pan bound.
    pub min_position: Vec2,
    /// Component-wise upper pan bound.
    pub max_position: Vec2,
    /// Per-tick multiplier applied to pan velocity during inertia.
    pub position_inertia_decay_rate: f64,
    /// Per-tick multiplier applied to zoom velocity during inertia.
    pub scale_inertia_decay_rate: f64,
    /// Inertia ends once both speeds drop below this.
    pub rest_epsilon: f64,
    /// Seconds per inertia tick.
    pub frame_interval: f64,
}

impl Default for ManipulationConfig {
    /// Zoom in `[0.9, 12]`, unbounded pan, decay `0.95`, 60 Hz ticks.
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            min_position: Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            max_position: Vec2::new(f64::INFINITY, f64::INFINITY),
            position_inertia_decay_rate: DEFAULT_DECAY_RATE,
            scale_inertia_decay_rate: DEFAULT_DECAY_RATE,
            rest_epsilon: DEFAULT_REST_EPSILON,
            frame_interval: DEFAULT_FRAME_INTERVAL,
        }
    }
}

impl ManipulationConfig {
    /// Defaults with pan limited to ten view sizes in either direction.
    #[must_use]
    pub fn for_view_size(size: Size) -> Self {
        let max = Vec2::new(size.width, size.height) * VIEW_SIZE_PAN_FACTOR;
        Self::default().with_position_range(-max, max)
    }

    /// Sets the zoom range.
    #[must_use]
    pub fn with_scale_range(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    /// Sets the pan range.
    #[must_use]
    pub fn with_position_range(mut self, min_position: Vec2, max_position: Vec2) -> Self {
        self.min_position = min_position;
        self.max_position = max_position;
        self
    }

    /// Sets the same decay rate on pan and zoom.
    #[must_use]
    pub fn with_decay_rate(mut self, rate: f64) -> Self {
        self.position_inertia_decay_rate = rate;
        self.scale_inertia_decay_rate = rate;
        self
    }

    /// Sets the zoom decay rate only.
    #[must_use]
    pub fn with_scale_decay_rate(mut self, rate: f64) -> Self {
        self.scale_inertia_decay_rate = rate;
        self
    }

    /// Sets the rest threshold.
    #[must_use]
    pub fn with_rest_epsilon(mut self, epsilon: f64) -> Self {
        self.rest_epsilon = epsilon;
        self
    }

    /// Sets the tick length in seconds.
    #[must_use]
    pub fn with_frame_interval(mut self, seconds: f64) -> Self {
        self.frame_interval = seconds;
        self
    }

    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("min_position.x", self.min_position.x),
            ("min_position.y", self.min_position.y),
            ("max_position.x", self.max_position.x),
            ("max_position.y", self.max_position.y),
            ("position_inertia_decay_rate", self.position_inertia_decay_rate),
            ("scale_inertia_decay_rate", self.scale_inertia_decay_rate),
            ("rest_epsilon", self.rest_epsilon),
            ("frame_interval", self.frame_interval),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| v.is_nan()) {
            return Err(ConfigError::NotANumber(*name));
        }

        if !self.min_scale.is_finite()
            || !self.max_scale.is_finite()
            || self.min_scale <= 0.0
            || self.max_scale <= 0.0
        {
            return Err(ConfigError::NonPositiveScale);
        }
        if self.min_scale > self.max_scale {
            return Err(ConfigError::InvertedScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        for (axis, min, max) in [
            (Axis::X, self.min_position.x, self.max_position.x),
            (Axis::Y, self.min_position.y, self.max_position.y),
        ] {
            if min > max {
                return Err(ConfigError::InvertedPositionRange { axis, min, max });
            }
        }
        for (channel, rate) in [
            (DecayChannel::Position, self.position_inertia_decay_rate),
            (DecayChannel::Scale, self.scale_inertia_decay_rate),
        ] {
            if !(0.0..1.0).contains(&rate) {
                return Err(ConfigError::DecayRateOutOfRange { channel, rate });
            }
        }
        if !self.rest_epsilon.is_finite() || self.rest_epsilon <= 0.0 {
            return Err(ConfigError::NonPositiveEpsilon);
        }
        if !self.frame_interval.is_finite() || self.frame_interval <= 0.0 {
            return Err(ConfigError::NonPositiveFrameInterval);
        }
        Ok(())
    }

    /// Clamps `scale` into the zoom range.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Clamps `position` component-wise into the pan range.
    #[must_use]
    pub fn clamp_position(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            position.x.clamp(self.min_position.x, self.max_position.x),
            position.y.clamp(self.min_position.y, self.max_position.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ManipulationConfig::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_scale_range_is_rejected() {
        let config = ManipulationConfig::default().with_scale_range(12.0, 0.9);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedScaleRange {
                min: 12.0,
                max: 0.9
            })
        );
    }

    #[test]
    fn inverted_position_range_names_the_axis() {
        let config = ManipulationConfig::default()
            .with_position_range(Vec2::new(0.0, 10.0), Vec2::new(5.0, -10.0));
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedPositionRange {
                axis: Axis::Y,
                min: 10.0,
                max: -10.0
            })
        );
    }

    #[test]
    fn decay_rate_of_one_is_rejected() {
        let config = ManipulationConfig::default().with_scale_decay_rate(1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DecayRateOutOfRange {
                channel: DecayChannel::Scale,
                ..
            })
        ));
        let config = ManipulationConfig::default().with_decay_rate(0.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn nan_and_non_positive_values_are_rejected() {
        let config = ManipulationConfig::default().with_rest_epsilon(f64::NAN);
        assert_eq!(config.validate(), Err(ConfigError::NotANumber("rest_epsilon")));

        let config = ManipulationConfig::default().with_scale_range(0.0, 2.0);
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveScale));

        let config = ManipulationConfig::default().with_rest_epsilon(0.0);
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveEpsilon));

        let config = ManipulationConfig::default().with_frame_interval(-1.0);
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveFrameInterval));
    }

    #[test]
    fn for_view_size_spans_ten_views() {
        let config = ManipulationConfig::for_view_size(Size::new(800.0, 600.0));
        assert_eq!(config.max_position, Vec2::new(8000.0, 6000.0));
        assert_eq!(config.min_position, Vec2::new(-8000.0, -6000.0));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn clamp_helpers() {
        let config = ManipulationConfig::default()
            .with_position_range(Vec2::new(-1.0, -2.0), Vec2::new(1.0, 2.0));
        assert_eq!(config.clamp_scale(20.0), 12.0);
        assert_eq!(config.clamp_scale(0.1), 0.9);
        assert_eq!(
            config.clamp_position(Vec2::new(5.0, -5.0)),
            Vec2::new(1.0, -2.0)
        );
    }
}

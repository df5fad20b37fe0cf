// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Source configuration: accepted devices, per-channel modes, and rails.

use crate::pointer::PointerKind;

bitflags::bitflags! {
    /// Device classes a source accepts for redirection.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DeviceFilter: u8 {
        /// Touch screen contacts.
        const TOUCH    = 0b0000_0001;
        /// Precision touchpad contacts.
        const TOUCHPAD = 0b0000_0010;
        /// Stylus input.
        const PEN      = 0b0000_0100;
        /// Mouse input.
        const MOUSE    = 0b0000_1000;
    }
}

impl Default for DeviceFilter {
    fn default() -> Self {
        Self::TOUCH
    }
}

impl DeviceFilter {
    /// Returns `true` if events from `kind` pass this filter.
    #[must_use]
    pub fn accepts(self, kind: PointerKind) -> bool {
        let flag = match kind {
            PointerKind::Touch => Self::TOUCH,
            PointerKind::Touchpad => Self::TOUCHPAD,
            PointerKind::Pen => Self::PEN,
            PointerKind::Mouse => Self::MOUSE,
        };
        self.contains(flag)
    }
}

/// How one manipulation channel (X, Y or scale) responds to input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SourceMode {
    /// The channel ignores input entirely.
    Disabled,
    /// The channel follows input but stops dead on release.
    Enabled,
    /// The channel follows input and hands its release velocity to inertia.
    #[default]
    EnabledWithInertia,
}

impl SourceMode {
    /// Returns `true` if the channel follows input.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self != Self::Disabled
    }

    /// Returns `true` if the channel keeps its velocity on release.
    #[must_use]
    pub fn has_inertia(self) -> bool {
        self == Self::EnabledWithInertia
    }
}

/// Configuration of a [`ManipulationSource`](crate::ManipulationSource).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceConfig {
    /// Devices that may be redirected.
    pub devices: DeviceFilter,
    /// Horizontal pan channel.
    pub position_x: SourceMode,
    /// Vertical pan channel.
    pub position_y: SourceMode,
    /// Pinch zoom channel.
    pub scale: SourceMode,
    /// Rail gestures that start clearly horizontal onto the X axis.
    pub position_x_rails: bool,
    /// Rail gestures that start clearly vertical onto the Y axis.
    pub position_y_rails: bool,
}

impl Default for SourceConfig {
    /// Touch only, every channel with inertia, rails off.
    fn default() -> Self {
        Self {
            devices: DeviceFilter::default(),
            position_x: SourceMode::EnabledWithInertia,
            position_y: SourceMode::EnabledWithInertia,
            scale: SourceMode::EnabledWithInertia,
            position_x_rails: false,
            position_y_rails: false,
        }
    }
}

impl SourceConfig {
    /// Sets the accepted devices.
    #[must_use]
    pub fn with_devices(mut self, devices: DeviceFilter) -> Self {
        self.devices = devices;
        self
    }

    /// Sets both pan channels to `mode`.
    #[must_use]
    pub fn with_position_mode(mut self, mode: SourceMode) -> Self {
        self.position_x = mode;
        self.position_y = mode;
        self
    }

    /// Sets the pinch zoom channel to `mode`.
    #[must_use]
    pub fn with_scale_mode(mut self, mode: SourceMode) -> Self {
        self.scale = mode;
        self
    }

    /// Enables or disables rails on both axes.
    #[must_use]
    pub fn with_rails(mut self, enabled: bool) -> Self {
        self.position_x_rails = enabled;
        self.position_y_rails = enabled;
        self
    }
}

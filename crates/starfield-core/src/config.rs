//! Device-adaptive engine configuration.
//!
//! Everything here is derived from two coarse signals, the device class and
//! the reduced-motion preference, and is recomputed whenever either changes.

use crate::constants::*;

/// Coarse device classification derived from the viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Regular,
    /// Lower-powered or small-viewport device: fewer stars, no pointer
    /// parallax, no transient sprites, capped pixel ratio.
    Constrained,
}

impl DeviceClass {
    pub fn from_viewport_width(css_width: f32) -> Self {
        if css_width <= CONSTRAINED_MAX_WIDTH {
            DeviceClass::Constrained
        } else {
            DeviceClass::Regular
        }
    }

    #[inline]
    pub fn is_constrained(self) -> bool {
        self == DeviceClass::Constrained
    }

    /// Effective pixel ratio used for the backing surface.
    pub fn clamp_pixel_ratio(self, device_pixel_ratio: f32) -> f32 {
        // NaN and sub-1 ratios both fall back to 1
        let ratio = if device_pixel_ratio.is_finite() {
            device_pixel_ratio.max(1.0)
        } else {
            1.0
        };
        match self {
            DeviceClass::Constrained => ratio.min(CONSTRAINED_MAX_PIXEL_RATIO),
            DeviceClass::Regular => ratio,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub star_count_base: usize,
    /// Link threshold in css px; scaled by the pixel ratio when drawing.
    pub link_distance: f32,
    pub max_star_radius: f32,
    pub parallax_x: f32,
    pub parallax_y: f32,
    pub background_glow: bool,
    pub motion_speed: f32,
    pub streaks_enabled: bool,
    pub sprites_enabled: bool,
}

/// Pure mapping from (device class, reduced motion) to the engine config.
pub fn recompute_config(device: DeviceClass, reduced_motion: bool) -> EngineConfig {
    let constrained = device.is_constrained();
    EngineConfig {
        star_count_base: if constrained {
            STAR_COUNT_BASE_CONSTRAINED
        } else {
            STAR_COUNT_BASE
        },
        link_distance: if constrained {
            LINK_DISTANCE_CONSTRAINED
        } else {
            LINK_DISTANCE
        },
        max_star_radius: STAR_RADIUS_MAX,
        parallax_x: if constrained {
            PARALLAX_X_CONSTRAINED
        } else {
            PARALLAX_X
        },
        parallax_y: if constrained {
            PARALLAX_Y_CONSTRAINED
        } else {
            PARALLAX_Y
        },
        background_glow: !reduced_motion,
        motion_speed: if constrained {
            MOTION_SPEED_CONSTRAINED
        } else {
            MOTION_SPEED
        },
        streaks_enabled: !constrained && !reduced_motion,
        sprites_enabled: !constrained && !reduced_motion,
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        recompute_config(DeviceClass::Regular, false)
    }
}

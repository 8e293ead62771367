#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cache::*;
pub use error::*;
pub use luck::*;
pub use session::*;
pub use types::*;

mod board;
mod cache;
mod error;
mod luck;
mod session;
mod types;

/// Size of one cell in map units.
pub const DEFAULT_TILE_WIDTH: f64 = 1e-4;

/// Chebyshev radius, in cells, of the visible neighborhood.
pub const DEFAULT_VISIBILITY_RADIUS: u16 = 8;

/// Uniform translation applied to cell bounds to keep rendered rectangles
/// off the shared edge pixels.
pub const DEFAULT_GRID_OFFSET: f64 = -5e-5;

pub const DEFAULT_SPAWN_PROBABILITY: f64 = 0.1;

/// Default starting position of the player.
pub const DEFAULT_ORIGIN: Point = Point::new(-122.06277128548504, 36.98949379578401);

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub tile_width: f64,
    pub visibility_radius: u16,
    pub grid_offset: f64,
    pub spawn_probability: f64,
    pub origin: Point,
}

impl SessionConfig {
    pub const fn new_unchecked(
        tile_width: f64,
        visibility_radius: u16,
        grid_offset: f64,
        spawn_probability: f64,
        origin: Point,
    ) -> Self {
        Self {
            tile_width,
            visibility_radius,
            grid_offset,
            spawn_probability,
            origin,
        }
    }

    pub fn new(
        tile_width: f64,
        visibility_radius: u16,
        grid_offset: f64,
        spawn_probability: f64,
        origin: Point,
    ) -> Self {
        let tile_width = if tile_width.is_finite() && tile_width > 0.0 {
            tile_width
        } else {
            log::warn!("Tile width {tile_width} is unusable, fallback to {DEFAULT_TILE_WIDTH}");
            DEFAULT_TILE_WIDTH
        };
        let spawn_probability =
            if spawn_probability.is_finite() && (0.0..=1.0).contains(&spawn_probability) {
                spawn_probability
            } else {
                log::warn!(
                    "Spawn probability {spawn_probability} outside [0, 1], fallback to {DEFAULT_SPAWN_PROBABILITY}"
                );
                DEFAULT_SPAWN_PROBABILITY
            };
        Self::new_unchecked(
            tile_width,
            visibility_radius,
            grid_offset,
            spawn_probability,
            origin,
        )
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new_unchecked(
            DEFAULT_TILE_WIDTH,
            DEFAULT_VISIBILITY_RADIUS,
            DEFAULT_GRID_OFFSET,
            DEFAULT_SPAWN_PROBABILITY,
            DEFAULT_ORIGIN,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_deployment_constants() {
        let config = SessionConfig::default();
        assert_eq!(config.tile_width, 1e-4);
        assert_eq!(config.visibility_radius, 8);
        assert_eq!(config.grid_offset, -5e-5);
        assert_eq!(config.spawn_probability, 0.1);
        assert_eq!(config.origin, DEFAULT_ORIGIN);
    }

    #[test]
    fn unusable_values_fall_back_to_defaults() {
        let config = SessionConfig::new(-1.0, 8, 0.0, 7.0, DEFAULT_ORIGIN);
        assert_eq!(config.tile_width, DEFAULT_TILE_WIDTH);
        assert_eq!(config.spawn_probability, DEFAULT_SPAWN_PROBABILITY);

        let config = SessionConfig::new(f64::NAN, 8, 0.0, f64::NAN, DEFAULT_ORIGIN);
        assert_eq!(config.tile_width, DEFAULT_TILE_WIDTH);
        assert_eq!(config.spawn_probability, DEFAULT_SPAWN_PROBABILITY);
    }

    #[test]
    fn in_range_values_pass_through() {
        let config = SessionConfig::new(2.5, 3, 0.125, 0.5, Point::new(1.0, 2.0));
        assert_eq!(config.tile_width, 2.5);
        assert_eq!(config.visibility_radius, 3);
        assert_eq!(config.grid_offset, 0.125);
        assert_eq!(config.spawn_probability, 0.5);
    }
}

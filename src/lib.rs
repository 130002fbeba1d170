//! Gone Fishing - a canvas fishing mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fish pool, hook, phase machine, timers)
//! - `hud`: Phase-derived text and overlay state for the page
//! - `snapshot`: Per-frame serializable view handed to the renderer
//! - `settings`: Data-driven game rules

pub mod hud;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use hud::{Hud, Overlay};
pub use settings::{ConfigError, GameConfig};
pub use snapshot::Snapshot;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Y coordinate of the water surface; fish never spawn above it
    pub const WATER_SURFACE: f32 = 120.0;
    /// Gap between the surface and the shallowest spawn row
    pub const SPAWN_TOP_GAP: f32 = 20.0;
    /// Band height lost between the surface and the lake bed
    pub const SPAWN_BOTTOM_GAP: f32 = 80.0;

    /// Hook altitude while idle (rod tip)
    pub const HOOK_IDLE_Y: f32 = 60.0;
    /// Cast depth is measured up from the bottom of the field
    pub const CAST_DEPTH_MARGIN: f32 = 120.0;
    /// Hook x stays this far from either side
    pub const HOOK_EDGE_MARGIN: f32 = 20.0;
    /// Hook counts as arrived within this many units of its target
    pub const ARRIVAL_TOLERANCE: f32 = 5.0;

    /// Hook approach speeds (units per tick)
    pub const CAST_SPEED: f32 = 6.0;
    pub const REEL_SPEED: f32 = 8.0;
    pub const EMPTY_REEL_SPEED: f32 = 5.0;

    /// Fish horizontal speed range (units per tick)
    pub const FISH_MIN_SPEED: f32 = 0.8;
    pub const FISH_SPEED_SPREAD: f32 = 1.5;
    /// Cosmetic wobble advance per tick
    pub const WOBBLE_STEP: f32 = 0.1;

    /// Session defaults
    pub const SESSION_SECONDS: u32 = 60;
    pub const INITIAL_POPULATION: usize = 15;
    pub const MIN_POPULATION: usize = 12;
    pub const BITE_DELAY_MIN: f32 = 1.0;
    pub const BITE_DELAY_MAX: f32 = 5.0;
    pub const REEL_CLICKS_MIN: u32 = 3;
    pub const REEL_CLICKS_MAX: u32 = 5;

    /// Seconds left at which the timer turns red
    pub const LOW_TIME_SECONDS: u32 = 10;
}

/// Clamp `x` into `[lo, hi]`, preferring `lo` when the range is inverted.
///
/// `f32::clamp` panics on an inverted range, which a tiny viewport can produce.
#[inline]
pub fn clamp_lenient(x: f32, lo: f32, hi: f32) -> f32 {
    lo.max(x.min(hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_lenient_inside() {
        assert_eq!(clamp_lenient(50.0, 20.0, 780.0), 50.0);
        assert_eq!(clamp_lenient(-5.0, 20.0, 780.0), 20.0);
        assert_eq!(clamp_lenient(900.0, 20.0, 780.0), 780.0);
    }

    #[test]
    fn test_clamp_lenient_inverted_range() {
        // 30px wide field: hi = 10 < lo = 20
        assert_eq!(clamp_lenient(15.0, 20.0, 10.0), 20.0);
    }
}

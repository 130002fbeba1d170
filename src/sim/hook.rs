//! The player's hook
//!
//! x follows the pointer while idle; y eases toward `target_y` at `speed`
//! units per tick, snapping once within [`ARRIVAL_TOLERANCE`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    pub x: f32,
    pub y: f32,
    pub target_y: f32,
    /// Units per tick toward `target_y`
    pub speed: f32,
}

impl Default for Hook {
    fn default() -> Self {
        Self::at(0.0)
    }
}

impl Hook {
    /// A hook resting at idle altitude
    pub fn at(x: f32) -> Self {
        Self {
            x,
            y: HOOK_IDLE_Y,
            target_y: HOOK_IDLE_Y,
            speed: 0.0,
        }
    }

    /// Aim at a new altitude
    pub fn send_to(&mut self, target_y: f32, speed: f32) {
        self.target_y = target_y;
        self.speed = speed;
    }

    /// Step toward the target without overshooting it. Returns true once arrived.
    pub fn approach(&mut self) -> bool {
        let dy = self.target_y - self.y;
        if dy.abs() > ARRIVAL_TOLERANCE {
            self.y += dy.signum() * self.speed.min(dy.abs());
            false
        } else {
            self.y = self.target_y;
            true
        }
    }
}

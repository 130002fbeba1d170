//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically.

use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer/touch x in field coordinates
    pub pointer_x: Option<f32>,
    /// Click/tap this tick
    pub activate: bool,
    /// Demo mode - the game fishes by itself
    pub autopilot: bool,
}

/// Advance the session by one fixed timestep
///
/// Order within a tick: input, timers, fish, hook, pool top-up.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Nothing to simulate until the canvas has been measured
    if !state.field.is_ready() {
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }

    if let Some(x) = input.pointer_x {
        state.pointer_moved(x);
    }
    if input.activate {
        state.activate();
    }

    // Frozen before start and after time's up
    if !state.active || state.game_over {
        return;
    }

    state.time_ticks += 1;

    state.advance_timers(dt);
    if !state.active {
        return;
    }

    state.swim_fish();
    state.update_hook();
    state.top_up_pool();
}

/// Fill in input for demo mode: sweep the rod, cast when idle, tap when hooked
fn autopilot(state: &GameState, input: &mut TickInput) {
    if !state.active || state.game_over {
        return;
    }
    match state.phase {
        GamePhase::Idle => {
            // Drift across the field so consecutive casts land in different spots
            let t = state.time_ticks as f32 * SIM_DT;
            let half = state.field.width / 2.0;
            input.pointer_x = Some(half + (t * 0.7).sin() * half * 0.6);
            input.activate = true;
        }
        GamePhase::FishOn => input.activate = true,
        _ => {}
    }
}

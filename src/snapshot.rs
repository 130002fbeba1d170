//! Per-frame view of a session for the renderer
//!
//! Drawing happens outside this crate. Each frame the driver serializes a
//! [`Snapshot`] and hands it to the page.

use serde::Serialize;

use crate::hud::Hud;
use crate::sim::{Fish, FishKind, GamePhase, GameState, Hook};

/// A fish as the renderer needs it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FishView {
    pub id: u32,
    pub kind: FishKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// +1 right, -1 left
    pub direction: f32,
    pub wobble: f32,
    pub color: &'static str,
    pub fin_color: &'static str,
}

impl From<&Fish> for FishView {
    fn from(fish: &Fish) -> Self {
        let (width, height) = fish.kind.size();
        let (color, fin_color) = fish.kind.colors();
        Self {
            id: fish.id,
            kind: fish.kind,
            x: fish.pos.x,
            y: fish.pos.y,
            width,
            height,
            direction: fish.direction.sign(),
            wobble: fish.wobble,
            color,
            fin_color,
        }
    }
}

/// Everything visible this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub score: u64,
    pub time_left: u32,
    pub active: bool,
    pub game_over: bool,
    pub clicks_remaining: u32,
    pub hook: Hook,
    pub fish: Vec<FishView>,
    /// Fighting or freshly caught fish, drawn hanging from the hook
    pub on_line: Option<FishView>,
    pub hud: Hud,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            width: state.field.width,
            height: state.field.height,
            phase: state.phase,
            score: state.score,
            time_left: state.time_left,
            active: state.active,
            game_over: state.game_over,
            clicks_remaining: state.clicks_remaining,
            hook: state.hook,
            fish: state.pool.fish.iter().map(FishView::from).collect(),
            on_line: state.fish_on_line().map(FishView::from),
            hud: Hud::from_state(state),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::with_field(3, GameConfig::default(), 800.0, 600.0);
        state.start();
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.fish.len(), 15);
        assert_eq!(snap.phase, GamePhase::Idle);
        assert_eq!(snap.hook.x, 400.0);
        assert!(snap.on_line.is_none());
        assert!(snap.active);
    }

    #[test]
    fn test_json_uses_wire_names() {
        let mut state = GameState::with_field(3, GameConfig::default(), 800.0, 600.0);
        state.start();
        state.phase = GamePhase::FishOn;
        let json = Snapshot::capture(&state).to_json().unwrap();
        assert!(json.contains(r#""phase":"fish-on""#));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["fish"].as_array().unwrap().len(), 15);
        assert!(value["fish"][0]["color"].is_string());
        assert_eq!(value["hud"]["instruction"], "Fish on! Tap 0x to reel!");
    }
}

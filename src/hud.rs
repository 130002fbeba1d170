//! HUD text and overlays
//!
//! Everything here is derived from [`GameState`] each frame; nothing is stored.

use serde::Serialize;

use crate::consts::LOW_TIME_SECONDS;
use crate::sim::{GamePhase, GameState};

/// Full-screen panel over the canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Overlay {
    /// No session yet
    Start {
        title: &'static str,
        subtitle: &'static str,
        hint: &'static str,
        button: &'static str,
    },
    /// Countdown ran out
    GameOver {
        title: &'static str,
        final_score: String,
        button: &'static str,
    },
}

impl Overlay {
    pub fn start() -> Self {
        Overlay::Start {
            title: "Gone Fishing!",
            subtitle: "Move to aim the rod",
            hint: "Tap to cast, then tap to reel when a fish bites!",
            button: "Start Fishing",
        }
    }

    pub fn game_over(score: u64) -> Self {
        Overlay::GameOver {
            title: "Great Catch!",
            final_score: format!("Final Score: {score}"),
            button: "Fish Again",
        }
    }
}

/// Prompt shown under the canvas for a phase
pub fn instruction_text(phase: GamePhase, clicks_remaining: u32) -> String {
    match phase {
        GamePhase::Idle => "Tap to cast".to_string(),
        GamePhase::Casting => "Casting...".to_string(),
        GamePhase::Waiting => "Waiting for a bite...".to_string(),
        GamePhase::FishOn => format!("Fish on! Tap {clicks_remaining}x to reel!"),
        GamePhase::Reeling => "Reeling in...".to_string(),
    }
}

/// Everything the page needs to lay out the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    /// `None` hides the score/timer bar
    pub score: Option<String>,
    pub timer: Option<String>,
    /// Timer drawn in red
    pub time_low: bool,
    pub instruction: Option<String>,
    /// Instruction pill pulses while a fish is on
    pub urgent: bool,
    pub overlay: Option<Overlay>,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        if state.game_over {
            return Self::hidden(Some(Overlay::game_over(state.score)));
        }
        if !state.active {
            return Self::hidden(Some(Overlay::start()));
        }

        Self {
            score: Some(format!("Score: {}", state.score)),
            timer: Some(format!("{}s", state.time_left)),
            time_low: state.time_left <= LOW_TIME_SECONDS,
            instruction: Some(instruction_text(state.phase, state.clicks_remaining)),
            urgent: state.phase == GamePhase::FishOn,
            overlay: None,
        }
    }

    fn hidden(overlay: Option<Overlay>) -> Self {
        Self {
            score: None,
            timer: None,
            time_low: false,
            instruction: None,
            urgent: false,
            overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;

    #[test]
    fn test_instruction_text() {
        assert_eq!(instruction_text(GamePhase::Idle, 0), "Tap to cast");
        assert_eq!(instruction_text(GamePhase::Casting, 0), "Casting...");
        assert_eq!(
            instruction_text(GamePhase::Waiting, 0),
            "Waiting for a bite..."
        );
        assert_eq!(
            instruction_text(GamePhase::FishOn, 4),
            "Fish on! Tap 4x to reel!"
        );
        assert_eq!(instruction_text(GamePhase::Reeling, 0), "Reeling in...");
    }

    #[test]
    fn test_start_overlay_before_session() {
        let state = GameState::with_field(1, GameConfig::default(), 800.0, 600.0);
        let hud = Hud::from_state(&state);
        assert_eq!(hud.overlay, Some(Overlay::start()));
        assert!(hud.score.is_none());
    }

    #[test]
    fn test_running_hud() {
        let mut state = GameState::with_field(1, GameConfig::default(), 800.0, 600.0);
        state.start();
        state.score = 35;
        state.time_left = 9;

        let hud = Hud::from_state(&state);
        assert_eq!(hud.score.as_deref(), Some("Score: 35"));
        assert_eq!(hud.timer.as_deref(), Some("9s"));
        assert!(hud.time_low);
        assert_eq!(hud.instruction.as_deref(), Some("Tap to cast"));
        assert!(!hud.urgent);
        assert!(hud.overlay.is_none());
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = GameState::with_field(1, GameConfig::default(), 800.0, 600.0);
        state.start();
        state.score = 135;
        state.game_over = true;

        let hud = Hud::from_state(&state);
        match hud.overlay {
            Some(Overlay::GameOver { final_score, .. }) => {
                assert_eq!(final_score, "Final Score: 135")
            }
            other => panic!("expected game over overlay, got {other:?}"),
        }
    }
}

//! Whole-session behaviour driven through the public API

use std::collections::HashSet;

use glam::Vec2;
use proptest::prelude::*;

use gone_fishing::consts::*;
use gone_fishing::sim::{
    Direction, Fish, FishKind, GameEvent, GamePhase, GameState, TickInput, tick,
};
use gone_fishing::{GameConfig, Snapshot};

fn started(seed: u64, config: GameConfig) -> GameState {
    let mut state = GameState::with_field(seed, config, 800.0, 600.0);
    state.start();
    state
}

fn instant_bites() -> GameConfig {
    GameConfig {
        bite_delay_min: 0.0,
        bite_delay_max: 0.0,
        ..Default::default()
    }
}

fn step(state: &mut GameState) {
    tick(state, &TickInput::default(), SIM_DT);
}

#[test]
fn test_single_fish_scenario() {
    let config = GameConfig {
        reel_clicks_min: 3,
        reel_clicks_max: 3,
        ..instant_bites()
    };
    let mut state = started(7, config);

    // Cast, with the hook already at depth
    state.activate();
    assert_eq!(state.phase, GamePhase::Casting);
    state.hook.y = state.hook.target_y;
    step(&mut state);
    assert_eq!(state.phase, GamePhase::Waiting);

    // One known fish in the water when the bite lands
    let id = state.pool.next_fish_id();
    state.pool.fish = vec![Fish::new(
        id,
        FishKind::Large,
        Vec2::new(400.0, 300.0),
        Direction::Right,
        1.0,
    )];
    step(&mut state);
    assert_eq!(state.phase, GamePhase::FishOn);
    assert_eq!(state.hooked.as_ref().map(|f| f.id), Some(id));
    assert_eq!(state.clicks_remaining, 3);
    assert!(!state.pool.contains(id));

    for _ in 0..3 {
        state.activate();
    }
    assert_eq!(state.score, 50);
    assert_eq!(state.phase, GamePhase::Reeling);
    assert!(state.hooked.is_none());
    assert_eq!(state.caught.as_ref().map(|f| f.id), Some(id));

    // A fourth tap while reeling changes nothing
    state.activate();
    assert_eq!(state.score, 50);

    for _ in 0..12 {
        step(&mut state);
    }
    assert!(state.pool.len() >= 12);

    while state.phase != GamePhase::Idle {
        step(&mut state);
    }
    assert!(state.caught.is_none());
    assert!(!state.pool.contains(id));

    let caught: Vec<_> = state
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::Caught { .. }))
        .collect();
    assert_eq!(caught, vec![GameEvent::Caught { fish_id: id, points: 50 }]);
}

#[test]
fn test_game_over_cancels_pending_bite() {
    let config = GameConfig {
        session_seconds: 2,
        bite_delay_min: 5.0,
        bite_delay_max: 5.0,
        ..Default::default()
    };
    let mut state = started(11, config);
    state.activate();
    while state.phase != GamePhase::Waiting {
        step(&mut state);
    }
    assert!(state.bite_pending());

    for _ in 0..(10 * 60) {
        step(&mut state);
    }
    assert!(state.game_over);
    assert!(!state.active);
    assert!(!state.bite_pending());
    assert_eq!(state.phase, GamePhase::Waiting);
    assert!(state.hooked.is_none());

    // Taps after the whistle are ignored
    state.activate();
    assert_eq!(state.phase, GamePhase::Waiting);
}

#[test]
fn test_snapshot_tracks_fish_on_line() {
    let mut state = started(5, instant_bites());
    state.activate();
    while state.phase != GamePhase::FishOn {
        step(&mut state);
    }
    let snap = Snapshot::capture(&state);
    assert_eq!(
        snap.on_line.as_ref().map(|f| f.id),
        state.hooked.as_ref().map(|f| f.id)
    );
    assert!(snap.hud.urgent);
}

#[derive(Debug, Clone)]
enum Action {
    Tick,
    Activate,
    Pointer(f32),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        6 => Just(Action::Tick),
        2 => Just(Action::Activate),
        1 => (-100.0f32..900.0).prop_map(Action::Pointer),
    ]
}

fn legal_transition(from: GamePhase, to: GamePhase) -> bool {
    use GamePhase::*;
    from == to
        || matches!(
            (from, to),
            (Idle, Casting)
                | (Casting, Waiting)
                | (Waiting, FishOn)
                | (Waiting, Reeling)
                | (FishOn, Reeling)
                | (Reeling, Idle)
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_session_invariants(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..600),
    ) {
        let mut state = started(seed, instant_bites());
        let mut landed: HashSet<u32> = HashSet::new();

        for action in actions {
            let before_phase = state.phase;
            let before_score = state.score;
            let before_x = state.hook.x;
            let before_target = state.hook.target_y;
            let before_speed = state.hook.speed;
            let finishing = state
                .hooked
                .as_ref()
                .filter(|_| state.phase == GamePhase::FishOn && state.clicks_remaining == 1)
                .map(|f| (f.id, u64::from(f.points())));

            match action {
                Action::Tick => step(&mut state),
                Action::Activate => {
                    state.activate();
                    match finishing {
                        Some((id, points)) => {
                            prop_assert_eq!(state.score, before_score + points);
                            prop_assert_eq!(state.phase, GamePhase::Reeling);
                            prop_assert!(state.hooked.is_none());
                            landed.insert(id);
                        }
                        None => prop_assert_eq!(state.score, before_score),
                    }
                    // Outside idle and fish-on, taps change nothing
                    if !matches!(before_phase, GamePhase::Idle | GamePhase::FishOn) {
                        prop_assert_eq!(state.phase, before_phase);
                        prop_assert_eq!(state.hook.target_y, before_target);
                        prop_assert_eq!(state.hook.speed, before_speed);
                    }
                }
                Action::Pointer(x) => {
                    state.pointer_moved(x);
                    if before_phase != GamePhase::Idle {
                        prop_assert_eq!(state.hook.x, before_x);
                    } else {
                        prop_assert!(state.hook.x >= 20.0 && state.hook.x <= 780.0);
                    }
                }
            }

            prop_assert!(legal_transition(before_phase, state.phase),
                "{:?} -> {:?}", before_phase, state.phase);
            prop_assert!(state.score >= before_score);
            prop_assert!(state.bite_pending() == (state.phase == GamePhase::Waiting && state.active));
            if state.active {
                prop_assert!(state.pool.len() >= MIN_POPULATION);
            }
            if let Some(hooked) = &state.hooked {
                prop_assert!(!state.pool.contains(hooked.id));
            }
            for id in &landed {
                prop_assert!(!state.pool.contains(*id));
            }
        }
    }

    #[test]
    fn prop_countdown_ends_once(
        seed in any::<u64>(),
        seconds in 1u32..5,
        extra_ticks in 0usize..600,
    ) {
        let config = GameConfig { session_seconds: seconds, ..Default::default() };
        let mut state = started(seed, config);
        let total = (seconds as usize + 1) * 60 + extra_ticks;

        let mut time_ups = 0;
        let mut last_left = state.time_left;
        for _ in 0..total {
            step(&mut state);
            prop_assert!(state.time_left <= last_left);
            last_left = state.time_left;
            time_ups += state
                .take_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::TimeUp { .. }))
                .count();
        }

        prop_assert!(state.game_over);
        prop_assert_eq!(state.time_left, 0);
        prop_assert_eq!(time_ups, 1);
        prop_assert!(!state.clock_running());
    }
}

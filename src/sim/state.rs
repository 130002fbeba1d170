//! Session state and phase transitions
//!
//! Everything one fishing session mutates lives in [`GameState`]. Input
//! handlers, timer callbacks, and the per-tick update all take it by `&mut`,
//! so there is exactly one place the phase can change.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::field::PlayField;
use super::fish::Fish;
use super::hook::Hook;
use super::pool::FishPool;
use super::timer::{Scheduler, TimerHandle, TimerKind};
use crate::consts::*;
use crate::settings::GameConfig;

/// Where the line is in the cast/bite/reel cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GamePhase {
    /// Hook at the rod tip, following the pointer
    #[default]
    Idle,
    /// Hook sinking toward cast depth
    Casting,
    /// Hook at depth, bite timer running
    Waiting,
    /// A fish is on; taps count down `clicks_remaining`
    FishOn,
    /// Hook rising back to the rod tip
    Reeling,
}

/// Something notable that happened this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameEvent {
    SessionStarted,
    Cast,
    /// Hook reached depth; a bite is due in `delay_ms`
    LineSet { delay_ms: u32 },
    Bite { fish_id: u32, clicks: u32 },
    /// Bite fired with nothing in the water
    EmptyHook,
    ReelClick { remaining: u32 },
    Caught { fish_id: u32, points: u32 },
    ReeledIn,
    TimeUp { score: u64 },
}

/// Complete state of one fishing session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Rules this session plays by
    pub config: GameConfig,
    /// Canvas bounds
    pub field: PlayField,
    /// Current phase
    pub phase: GamePhase,
    /// A session has been started and has not ended
    pub active: bool,
    /// The countdown ran out
    pub game_over: bool,
    /// Sum of landed fish points
    pub score: u64,
    /// Whole seconds left on the countdown
    pub time_left: u32,
    /// The player's hook
    pub hook: Hook,
    /// Fish not on the hook
    pub pool: FishPool,
    /// Fish currently fighting on the line
    pub hooked: Option<Fish>,
    /// Fish being reeled up after landing
    pub caught: Option<Fish>,
    /// Taps still needed to land `hooked`
    pub clicks_remaining: u32,
    /// Simulation tick counter (current session)
    pub time_ticks: u64,
    /// Events since the last `take_events`
    pub events: Vec<GameEvent>,
    timers: Scheduler,
    countdown: Option<TimerHandle>,
    bite: Option<TimerHandle>,
    rng: Pcg32,
}

impl GameState {
    /// Create an unstarted session with the given seed
    pub fn new(seed: u64, config: GameConfig) -> Self {
        let time_left = config.session_seconds;
        Self {
            seed,
            config,
            field: PlayField::default(),
            phase: GamePhase::Idle,
            active: false,
            game_over: false,
            score: 0,
            time_left,
            hook: Hook::default(),
            pool: FishPool::new(),
            hooked: None,
            caught: None,
            clicks_remaining: 0,
            time_ticks: 0,
            events: Vec::new(),
            timers: Scheduler::new(),
            countdown: None,
            bite: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Unstarted session on a field of the given size
    pub fn with_field(seed: u64, config: GameConfig, width: f32, height: f32) -> Self {
        let mut state = Self::new(seed, config);
        state.resize(width, height);
        state
    }

    /// Begin a fresh session, discarding any previous one
    pub fn start(&mut self) {
        self.timers.cancel_all();
        self.bite = None;

        self.pool = FishPool::new();
        self.pool
            .repopulate(self.config.initial_population, &self.field, &mut self.rng);
        self.hook = Hook::at(self.field.width / 2.0);
        self.phase = GamePhase::Idle;
        self.hooked = None;
        self.caught = None;
        self.clicks_remaining = 0;
        self.score = 0;
        self.time_left = self.config.session_seconds;
        self.time_ticks = 0;
        self.events.clear();
        self.active = true;
        self.game_over = false;

        self.countdown = Some(self.timers.schedule_repeating(TimerKind::Countdown, 1.0));
        self.events.push(GameEvent::SessionStarted);
        log::info!(
            "Session started: {} fish, {}s on the clock",
            self.pool.len(),
            self.time_left
        );
    }

    /// Tear the session down without declaring game over
    pub fn stop(&mut self) {
        self.timers.cancel_all();
        self.countdown = None;
        self.bite = None;
        self.active = false;
        log::debug!("Session stopped");
    }

    /// Viewport changed size
    pub fn resize(&mut self, width: f32, height: f32) {
        self.field = PlayField::new(width, height);
        if !self.active {
            self.hook.x = self.field.width / 2.0;
        } else if self.phase == GamePhase::Idle {
            self.hook.x = self.field.clamp_hook_x(self.hook.x);
        }
    }

    /// Pointer or touch moved to `x`. Only steers the hook while idle.
    pub fn pointer_moved(&mut self, x: f32) {
        if self.game_over || self.phase != GamePhase::Idle {
            return;
        }
        self.hook.x = self.field.clamp_hook_x(x);
    }

    /// Click or tap: casts from idle, reels while a fish is on
    pub fn activate(&mut self) {
        if !self.active || self.game_over {
            return;
        }
        match self.phase {
            GamePhase::Idle => self.cast(),
            GamePhase::FishOn => self.reel_click(),
            phase => log::debug!("Tap ignored during {phase:?}"),
        }
    }

    fn cast(&mut self) {
        self.phase = GamePhase::Casting;
        let depth = self.field.cast_depth();
        self.hook.send_to(depth, self.config.cast_speed);
        self.events.push(GameEvent::Cast);
        log::debug!("Casting to depth {depth}");
    }

    fn reel_click(&mut self) {
        self.clicks_remaining = self.clicks_remaining.saturating_sub(1);
        self.events.push(GameEvent::ReelClick {
            remaining: self.clicks_remaining,
        });
        if self.clicks_remaining > 0 {
            return;
        }
        let Some(fish) = self.hooked.take() else {
            return;
        };

        let points = fish.points();
        self.score += u64::from(points);
        self.events.push(GameEvent::Caught {
            fish_id: fish.id,
            points,
        });
        log::info!(
            "Landed a {:?} fish for {} points (score {})",
            fish.kind,
            points,
            self.score
        );
        self.caught = Some(fish);
        self.phase = GamePhase::Reeling;
        self.hook.send_to(HOOK_IDLE_Y, self.config.reel_speed);
    }

    /// Hook reached cast depth: start the bite timer
    fn line_set(&mut self) {
        self.phase = GamePhase::Waiting;
        if let Some(stale) = self.bite.take() {
            self.timers.cancel(stale);
        }

        let spread = self.config.bite_delay_max - self.config.bite_delay_min;
        let delay = self.config.bite_delay_min + self.rng.random::<f32>() * spread;
        self.bite = Some(self.timers.schedule_once(TimerKind::Bite, delay));
        self.events.push(GameEvent::LineSet {
            delay_ms: (delay * 1000.0).round() as u32,
        });
        log::debug!("Line set, bite in {delay:.1}s");
    }

    /// Advance session timers by `dt` seconds and run whatever fired
    pub fn advance_timers(&mut self, dt: f32) {
        for handle in self.timers.advance(dt) {
            match handle.kind {
                TimerKind::Countdown => self.on_countdown(handle),
                TimerKind::Bite => self.on_bite(handle),
            }
        }
    }

    fn on_countdown(&mut self, handle: TimerHandle) {
        if self.countdown != Some(handle) || !self.active || self.game_over {
            return;
        }
        if self.time_left <= 1 {
            self.time_left = 0;
            self.end_session();
        } else {
            self.time_left -= 1;
        }
    }

    fn end_session(&mut self) {
        if let Some(bite) = self.bite.take() {
            self.timers.cancel(bite);
        }
        if let Some(countdown) = self.countdown.take() {
            self.timers.cancel(countdown);
        }
        self.game_over = true;
        self.active = false;
        self.events.push(GameEvent::TimeUp { score: self.score });
        log::info!("Time's up! Final score: {}", self.score);
    }

    fn on_bite(&mut self, handle: TimerHandle) {
        if self.bite != Some(handle) {
            log::debug!("Stale bite timer {} ignored", handle.generation);
            return;
        }
        self.bite = None;
        if !self.active || self.game_over || self.phase != GamePhase::Waiting {
            log::debug!("Bite fired during {:?}, ignored", self.phase);
            return;
        }

        match self.pool.take_random(&mut self.rng) {
            Some(fish) => {
                let clicks = self
                    .rng
                    .random_range(self.config.reel_clicks_min..=self.config.reel_clicks_max);
                log::info!("Fish on! {:?}, {} taps to land", fish.kind, clicks);
                self.events.push(GameEvent::Bite {
                    fish_id: fish.id,
                    clicks,
                });
                self.clicks_remaining = clicks;
                self.hooked = Some(fish);
                self.phase = GamePhase::FishOn;
            }
            None => {
                log::info!("No fish in the water, reeling back");
                self.events.push(GameEvent::EmptyHook);
                self.phase = GamePhase::Reeling;
                self.hook.send_to(HOOK_IDLE_Y, self.config.empty_reel_speed);
            }
        }
    }

    /// Swim the roaming fish one tick
    pub fn swim_fish(&mut self) {
        self.pool.advance(&self.field, &mut self.rng);
    }

    /// Move the hook and settle casting/reeling arrivals
    pub fn update_hook(&mut self) {
        if !matches!(self.phase, GamePhase::Casting | GamePhase::Reeling) {
            return;
        }
        if !self.hook.approach() {
            return;
        }
        match self.phase {
            GamePhase::Casting => self.line_set(),
            GamePhase::Reeling => {
                self.phase = GamePhase::Idle;
                self.caught = None;
                self.events.push(GameEvent::ReeledIn);
                log::debug!("Reeled in, back to idle");
            }
            _ => {}
        }
    }

    /// Spawn a fish if the pool is under its floor
    pub fn top_up_pool(&mut self) {
        self.pool
            .top_up(self.config.min_population, &self.field, &mut self.rng);
    }

    /// The fish to draw on the line: the catch while reeling, else the fighter
    pub fn fish_on_line(&self) -> Option<&Fish> {
        self.caught.as_ref().or(self.hooked.as_ref())
    }

    /// Whether a bite timer is currently scheduled
    pub fn bite_pending(&self) -> bool {
        self.timers.pending(TimerKind::Bite) > 0
    }

    /// Whether the countdown is running
    pub fn clock_running(&self) -> bool {
        self.countdown
            .is_some_and(|handle| self.timers.is_pending(handle))
    }

    /// Drain events recorded since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

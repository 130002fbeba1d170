//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Timers driven by simulation time, never the wall clock
//! - No rendering or platform dependencies

pub mod field;
pub mod fish;
pub mod hook;
pub mod pool;
pub mod state;
pub mod tick;
pub mod timer;

pub use field::PlayField;
pub use fish::{Direction, Fish, FishKind};
pub use hook::Hook;
pub use pool::FishPool;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use timer::{Scheduler, TimerHandle, TimerKind};

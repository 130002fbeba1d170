//! Roaming fish population
//!
//! Fish never interact with each other; the pool only swims them, swaps out
//! escapees, and keeps the headcount at the floor.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::field::PlayField;
use super::fish::Fish;

/// The population of fish not on the hook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FishPool {
    pub fish: Vec<Fish>,
    /// Next fish ID
    next_id: u32,
}

impl Default for FishPool {
    fn default() -> Self {
        Self::new()
    }
}

impl FishPool {
    pub fn new() -> Self {
        Self {
            fish: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new fish ID
    pub fn next_fish_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.fish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fish.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.fish.iter().any(|f| f.id == id)
    }

    /// Add one freshly sampled fish, returning its ID
    pub fn spawn<R: Rng + ?Sized>(&mut self, field: &PlayField, rng: &mut R) -> u32 {
        let id = self.next_fish_id();
        self.fish.push(Fish::spawn(id, field, rng));
        id
    }

    /// Drop everything and spawn `count` new fish
    pub fn repopulate<R: Rng + ?Sized>(&mut self, count: usize, field: &PlayField, rng: &mut R) {
        self.fish.clear();
        for _ in 0..count {
            self.spawn(field, rng);
        }
    }

    /// Swim every fish one tick, replacing any that left the field.
    ///
    /// Returns how many were replaced.
    pub fn advance<R: Rng + ?Sized>(&mut self, field: &PlayField, rng: &mut R) -> usize {
        let mut replaced = 0;
        for i in 0..self.fish.len() {
            self.fish[i].advance();
            let fish = &self.fish[i];
            if field.has_escaped(fish.pos.x, fish.width()) {
                let id = self.next_fish_id();
                self.fish[i] = Fish::spawn(id, field, rng);
                replaced += 1;
            }
        }
        replaced
    }

    /// Spawn at most one fish when below `floor`. Returns true if one was added.
    pub fn top_up<R: Rng + ?Sized>(&mut self, floor: usize, field: &PlayField, rng: &mut R) -> bool {
        if self.fish.len() < floor {
            self.spawn(field, rng);
            true
        } else {
            false
        }
    }

    /// Remove a uniformly chosen fish
    pub fn take_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Fish> {
        if self.fish.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.fish.len());
        Some(self.fish.remove(idx))
    }
}

//! Fish actors and their size classes

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::field::PlayField;
use crate::consts::*;

/// Fish size classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FishKind {
    Small,
    Medium,
    Large,
    Rare,
}

impl FishKind {
    pub const ALL: [FishKind; 4] = [
        FishKind::Small,
        FishKind::Medium,
        FishKind::Large,
        FishKind::Rare,
    ];

    /// Body size `(width, height)`
    pub fn size(&self) -> (f32, f32) {
        match self {
            FishKind::Small => (35.0, 18.0),
            FishKind::Medium => (55.0, 28.0),
            FishKind::Large => (85.0, 45.0),
            FishKind::Rare => (65.0, 35.0),
        }
    }

    pub fn width(&self) -> f32 {
        self.size().0
    }

    /// Score awarded for landing one
    pub fn points(&self) -> u32 {
        match self {
            FishKind::Small => 10,
            FishKind::Medium => 25,
            FishKind::Large => 50,
            FishKind::Rare => 100,
        }
    }

    /// Nominal taps to land. The bite rolls its own count; this is display only.
    pub fn clicks_to_reel(&self) -> u32 {
        match self {
            FishKind::Small => 2,
            FishKind::Medium => 4,
            FishKind::Large => 6,
            FishKind::Rare => 5,
        }
    }

    /// Relative spawn frequency (small fish dominate)
    pub fn spawn_weight(&self) -> u32 {
        match self {
            FishKind::Small => 4,
            FishKind::Medium => 3,
            FishKind::Large => 2,
            FishKind::Rare => 1,
        }
    }

    /// `(body, fin)` colours for the renderer
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self {
            FishKind::Small => ("#FF6B6B", "#FF8E8E"),
            FishKind::Medium => ("#4ECDC4", "#7EDDD6"),
            FishKind::Large => ("#45B7D1", "#6BC9DD"),
            FishKind::Rare => ("#FFD93D", "#FFE566"),
        }
    }

    /// Draw a class from the weighted spawn table
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let total: u32 = Self::ALL.iter().map(|k| k.spawn_weight()).sum();
        let mut roll = rng.random_range(0..total);
        for kind in Self::ALL {
            let weight = kind.spawn_weight();
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        FishKind::Small
    }
}

/// Horizontal heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1.0 for left, +1.0 for right
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// A roaming fish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fish {
    pub id: u32,
    /// Top-left corner of the body
    pub pos: Vec2,
    pub kind: FishKind,
    pub direction: Direction,
    /// Units per tick, always positive
    pub speed: f32,
    /// Cosmetic swim phase
    pub wobble: f32,
}

impl Fish {
    pub fn new(id: u32, kind: FishKind, pos: Vec2, direction: Direction, speed: f32) -> Self {
        Self {
            id,
            pos,
            kind,
            direction,
            speed,
            wobble: 0.0,
        }
    }

    /// Sample a fresh fish entering from the edge it is heading away from
    pub fn spawn<R: Rng + ?Sized>(id: u32, field: &PlayField, rng: &mut R) -> Self {
        let kind = FishKind::sample(rng);
        let direction = if rng.random_bool(0.5) {
            Direction::Right
        } else {
            Direction::Left
        };
        let width = kind.width();
        let x = match direction {
            Direction::Right => -width,
            Direction::Left => field.width + width,
        };
        let (top, span) = field.spawn_band();
        let y = top + rng.random::<f32>() * span;
        let speed = FISH_MIN_SPEED + rng.random::<f32>() * FISH_SPEED_SPREAD;

        Self {
            id,
            pos: Vec2::new(x, y),
            kind,
            direction,
            speed,
            wobble: rng.random::<f32>() * std::f32::consts::TAU,
        }
    }

    /// Swim one tick
    pub fn advance(&mut self) {
        self.pos.x += self.speed * self.direction.sign();
        self.wobble += WOBBLE_STEP;
    }

    pub fn points(&self) -> u32 {
        self.kind.points()
    }

    pub fn width(&self) -> f32 {
        self.kind.width()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_class_table() {
        assert_eq!(FishKind::Small.points(), 10);
        assert_eq!(FishKind::Medium.points(), 25);
        assert_eq!(FishKind::Large.points(), 50);
        assert_eq!(FishKind::Rare.points(), 100);
        assert_eq!(FishKind::Large.clicks_to_reel(), 6);
        assert_eq!(FishKind::Large.size(), (85.0, 45.0));
    }

    #[test]
    fn test_weighted_sample_favours_small() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            let idx = FishKind::ALL
                .iter()
                .position(|k| *k == FishKind::sample(&mut rng))
                .unwrap();
            counts[idx] += 1;
        }
        // Expected 4000/3000/2000/1000
        assert!(counts[0] > counts[1]);
        assert!(counts[1] > counts[2]);
        assert!(counts[2] > counts[3]);
        assert!(counts[3] > 500);
    }

    #[test]
    fn test_spawn_enters_from_trailing_edge() {
        let field = PlayField::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..200 {
            let fish = Fish::spawn(id, &field, &mut rng);
            match fish.direction {
                Direction::Right => assert_eq!(fish.pos.x, -fish.width()),
                Direction::Left => assert_eq!(fish.pos.x, 800.0 + fish.width()),
            }
            assert!(fish.pos.y >= 140.0 && fish.pos.y <= 540.0);
            assert!(fish.speed >= 0.8 && fish.speed <= 2.3);
            assert!(!field.has_escaped(fish.pos.x, fish.width()));
        }
    }

    #[test]
    fn test_advance_moves_by_heading() {
        let mut fish = Fish::new(1, FishKind::Small, Vec2::new(100.0, 200.0), Direction::Left, 2.0);
        fish.advance();
        assert_eq!(fish.pos.x, 98.0);
        assert_eq!(fish.pos.y, 200.0);
        assert!(fish.wobble > 0.0);
    }
}

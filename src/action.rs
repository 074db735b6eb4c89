use crate::chance::Chance;
use serde::{Deserialize, Serialize};

/// Rolls at or above this count as a win.
pub const WIN_THRESHOLD: f64 = 0.5;

/// Something the pet can eat. Deltas are signed; `cost` is in dollars.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub name: String,
    pub energy: i32,
    pub happiness: i32,
    pub weight: i32,
    pub cost: f64,
}

impl Food {
    pub fn new(name: impl Into<String>, energy: i32, happiness: i32, weight: i32, cost: f64) -> Self {
        Self {
            name: name.into(),
            energy,
            happiness,
            weight,
            cost,
        }
    }
}

/// Something the pet can play. `happiness` is gained on a win and lost on a
/// loss; `weight` is burned either way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    pub happiness: i32,
    pub weight: i32,
}

impl Game {
    pub fn new(name: impl Into<String>, happiness: i32, weight: i32) -> Self {
        Self {
            name: name.into(),
            happiness,
            weight,
        }
    }

    pub fn is_winner(&self, chance: &mut impl Chance) -> bool {
        chance.roll() >= WIN_THRESHOLD
    }
}

//! Numeric limits of the simulation and the one clamp every mutation goes through.

pub const METER_MIN: i32 = 0;
pub const METER_MAX: i32 = 10;

pub const START_ENERGY: i32 = 5;
pub const START_HAPPINESS: i32 = 5;
pub const START_BALANCE: f64 = 10.0;
pub const START_WEIGHT_MIN: i32 = 10;
pub const START_WEIGHT_MAX: i32 = 30;

/// Playing never drops the weight below this.
pub const WEIGHT_FLOOR: i32 = 5;

/// Largest magnitude a single discipline call can apply.
pub const DISCIPLINE_LIMIT: i32 = 4;

pub const MONTHS_PER_YEAR: u32 = 12;
/// The pet dies once its age in years exceeds this.
pub const LIFESPAN_YEARS: u32 = 12;

/// `max(lo, min(v, hi))`. Unlike `Ord::clamp` this never panics when `lo > hi`; `lo` wins.
pub fn bound<T: Ord>(lo: T, v: T, hi: T) -> T {
    lo.max(v.min(hi))
}

/// Clamp a value into the shared energy/happiness range.
pub fn meter(v: i32) -> i32 {
    bound(METER_MIN, v, METER_MAX)
}

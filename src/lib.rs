//! A virtual pet that lives in bordered boxes on a plain text console.

pub mod action;
pub mod app;
pub mod catalog;
pub mod chance;
pub mod config;
pub mod console;
pub mod meter;
pub mod pet;

pub use action::{Food, Game};
pub use chance::{Chance, Dice, Script};
pub use console::{Console, ConsoleError, StyleSupport};
pub use pet::{Pet, Wager};

use crate::action::{Food, Game};
use crate::catalog::{default_foods, default_games};
use crate::console::DEFAULT_BOX_WIDTH;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub box_width: usize,
    /// `None` asks the terminal on startup.
    pub color: Option<bool>,
    pub seed: Option<u64>,
    pub foods: Vec<Food>,
    pub games: Vec<Game>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            box_width: DEFAULT_BOX_WIDTH,
            color: None,
            seed: None,
            foods: default_foods(),
            games: default_games(),
        }
    }
}

pub fn settings_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("com", "petbox", "Petbox")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok();
    Ok(dir.join("settings.json"))
}

/// Missing or unreadable files yield defaults; an empty catalog falls back
/// to the built-in one so the menu always has something to offer.
pub fn load_settings(path: &Path) -> Settings {
    let mut settings = match fs::read_to_string(path) {
        Ok(s) => match serde_json::from_str::<Settings>(&s) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("ignoring malformed settings {}: {e}", path.display());
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };
    if settings.foods.is_empty() {
        settings.foods = default_foods();
    }
    if settings.games.is_empty() {
        settings.games = default_games();
    }
    settings
}

pub fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data).with_context(|| format!("writing {}", tmp.display()))?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn atomic_rename(from: &Path, to: &Path) -> Result<()> {
    // rename-over-existing is not atomic on Windows; remove first
    if cfg!(windows) && to.exists() {
        if let Err(e) = fs::remove_file(to) {
            log::warn!("could not remove old {}: {e}", to.display());
        }
    }
    fs::rename(from, to).with_context(|| format!("renaming to {}", to.display()))?;
    Ok(())
}

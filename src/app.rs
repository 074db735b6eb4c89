use crate::chance::{Chance, Dice};
use crate::config::{load_settings, save_settings_atomic, settings_path, Settings};
use crate::console::{self, paint, Console, ConsoleError};
use crate::pet::{Pet, Wager};
use anyhow::Context;
use clap::Parser;
use crossterm::style::Color;
use std::io::{self, BufRead, Write};

const FALLBACK_NAME: &str = "Pet";
const MAX_BET: i64 = 1_000;

#[derive(Parser, Debug, Default)]
#[command(about = "Raise a virtual pet one month at a time")]
pub struct Args {
    /// pet name (asked for when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// total box width in columns
    #[arg(long)]
    pub width: Option<usize>,

    /// seed for every random draw
    #[arg(long)]
    pub seed: Option<u64>,

    /// assume the terminal shows colour, skip the check
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// never emit colour, skip the check
    #[arg(long)]
    pub no_color: bool,

    /// write the effective settings back to the settings file
    #[arg(long)]
    pub save_settings: bool,
}

impl Args {
    pub fn apply(&self, s: &mut Settings) {
        if let Some(w) = self.width {
            s.box_width = w;
        }
        if self.seed.is_some() {
            s.seed = self.seed;
        }
        if self.color {
            s.color = Some(true);
        } else if self.no_color {
            s.color = Some(false);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// One pet, one console, one random source.
pub struct Session<R, W, C> {
    console: Console<R, W>,
    chance: C,
    settings: Settings,
}

impl<R: BufRead, W: Write, C: Chance> Session<R, W, C> {
    pub fn new(console: Console<R, W>, chance: C, settings: Settings) -> Self {
        Self {
            console,
            chance,
            settings,
        }
    }

    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Runs until the player quits or the pet dies; returns the final pet.
    pub fn run(&mut self, name: Option<String>) -> console::Result<Pet> {
        match self.settings.color {
            Some(enabled) => self.console.set_style_support(enabled),
            None => {
                self.console.probe_style_support()?;
            }
        }

        let name = match name {
            Some(n) => n,
            None => self.ask_name()?,
        };
        let mut pet = Pet::new(name, &mut self.chance);
        log::info!("new session with {}", pet.name());
        self.show_status(&pet)?;

        while !pet.is_dead() {
            if self.turn(&mut pet)? == Flow::Quit {
                break;
            }
        }

        if pet.is_dead() {
            self.console.render_text("GAME OVER", false, true)?;
            self.console
                .render_box(&pet.describe().lines().collect::<Vec<_>>(), true, false)?;
        }
        log::info!("session over after {} months", pet.age_months());
        Ok(pet)
    }

    fn ask_name(&mut self) -> console::Result<String> {
        self.console
            .render_text("Welcome!;What would you like to name your pet?", false, false)?;
        let name = self.console.read_line()?;
        let name = name.trim();
        Ok(if name.is_empty() {
            FALLBACK_NAME.to_string()
        } else {
            name.to_string()
        })
    }

    fn show_status(&mut self, pet: &Pet) -> console::Result<()> {
        let summary = pet.describe();
        self.console
            .render_box(&summary.lines().collect::<Vec<_>>(), false, false)
    }

    fn turn(&mut self, pet: &mut Pet) -> console::Result<Flow> {
        let header = paint(&format!("{}  |  ${:.2}", pet.name(), pet.balance()), Color::Cyan);
        self.console.render_box(&[header], false, true)?;
        self.console.render_box(
            &[
                " 1) Feed",
                " 2) Play",
                " 3) Gamble",
                " 4) Discipline",
                " 5) Check status",
                " 6) Quit",
            ],
            true,
            false,
        )?;

        let acted = match self.console.read_int(1, 6)? {
            1 => self.feed(pet)?,
            2 => self.play(pet)?,
            3 => self.gamble(pet)?,
            4 => self.discipline(pet)?,
            5 => {
                self.show_status(pet)?;
                false
            }
            _ => return Ok(Flow::Quit),
        };

        if acted {
            pet.advance_time(&mut self.console)?;
        }
        Ok(Flow::Continue)
    }

    fn feed(&mut self, pet: &mut Pet) -> console::Result<bool> {
        let mut lines = vec!["What should it eat?".to_string()];
        for (i, f) in self.settings.foods.iter().enumerate() {
            lines.push(format!(
                " {}) {:<14} ${:>5.2}  energy {:+}  happy {:+}",
                i + 1,
                f.name,
                f.cost,
                f.energy,
                f.happiness
            ));
        }
        lines.push(" 0) Back".to_string());
        self.console.render_box(&lines, false, false)?;

        let pick = self.console.read_int(0, self.settings.foods.len() as i64)?;
        if pick == 0 {
            return Ok(false);
        }
        let food = self.settings.foods[pick as usize - 1].clone();
        if pet.feed(&food, &mut self.console)? {
            self.console
                .render_text(&format!("{} ate the {}.", pet.name(), food.name), false, false)?;
            return Ok(true);
        }
        Ok(false)
    }

    fn play(&mut self, pet: &mut Pet) -> console::Result<bool> {
        let mut lines = vec!["What should you play?".to_string()];
        for (i, g) in self.settings.games.iter().enumerate() {
            lines.push(format!(" {}) {}", i + 1, g.name));
        }
        lines.push(" 0) Back".to_string());
        self.console.render_box(&lines, false, false)?;

        let pick = self.console.read_int(0, self.settings.games.len() as i64)?;
        if pick == 0 {
            return Ok(false);
        }
        let game = self.settings.games[pick as usize - 1].clone();
        let msg = if pet.play(&game, &mut self.chance) {
            paint(&format!("{} won at {}!", pet.name(), game.name), Color::Green)
        } else {
            paint(&format!("{} lost at {}.", pet.name(), game.name), Color::Red)
        };
        self.console.render_box(&[msg], false, false)?;
        Ok(true)
    }

    fn gamble(&mut self, pet: &mut Pet) -> console::Result<bool> {
        self.console.render_text(
            &format!("How much will you bet? (0 to back out, max {MAX_BET})"),
            false,
            false,
        )?;
        let amount = self.console.read_int(0, MAX_BET)?;
        if amount == 0 {
            return Ok(false);
        }
        let placed = pet.gamble(amount as f64, &mut self.console, &mut self.chance)?;
        if let Some(Wager::Lost(_)) = placed {
            log::debug!("{} is down to ${:.2}", pet.name(), pet.balance());
        }
        Ok(placed.is_some())
    }

    fn discipline(&mut self, pet: &mut Pet) -> console::Result<bool> {
        self.console
            .render_text("How firmly? (0 to back out, 4 is the firmest)", false, false)?;
        let amount = self.console.read_int(0, 4)?;
        if amount == 0 {
            return Ok(false);
        }
        pet.discipline(amount as i32);
        Ok(true)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = Args::parse();
    let path = settings_path()?;
    let mut settings = load_settings(&path);
    args.apply(&mut settings);
    if args.save_settings {
        save_settings_atomic(&path, &settings)
            .with_context(|| format!("saving settings to {}", path.display()))?;
        log::info!("settings written to {}", path.display());
    }

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout(), settings.box_width);
    let dice = Dice::session(settings.seed);
    let mut session = Session::new(console, dice, settings);

    match session.run(args.name) {
        Ok(_) => Ok(()),
        Err(ConsoleError::Closed) => {
            log::info!("input closed, leaving");
            Ok(())
        }
        Err(e) => Err(e).context("console session failed"),
    }
}

use crate::action::{Food, Game};
use crate::chance::Chance;
use crate::console::{self, paint, Console};
use crate::meter::{
    bound, meter, DISCIPLINE_LIMIT, LIFESPAN_YEARS, MONTHS_PER_YEAR, START_BALANCE, START_ENERGY,
    START_HAPPINESS, START_WEIGHT_MAX, START_WEIGHT_MIN, WEIGHT_FLOOR,
};
use crossterm::style::Color;
use std::fmt;
use std::io::{BufRead, Write};

/// Result of a bet that was actually placed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Wager {
    Won(f64),
    Lost(f64),
}

#[derive(Clone, Debug)]
pub struct Pet {
    name: String,
    energy: i32,
    happiness: i32,
    weight: i32,
    age_months: u32,
    balance: f64,
    dead: bool,
}

impl Pet {
    pub fn new(name: impl Into<String>, chance: &mut impl Chance) -> Self {
        Self {
            name: name.into(),
            energy: START_ENERGY,
            happiness: START_HAPPINESS,
            weight: chance.between(START_WEIGHT_MIN, START_WEIGHT_MAX),
            age_months: 0,
            balance: START_BALANCE,
            dead: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn happiness(&self) -> i32 {
        self.happiness
    }

    pub fn weight(&self) -> i32 {
        self.weight
    }

    pub fn age_months(&self) -> u32 {
        self.age_months
    }

    /// Completed years.
    pub fn age_years(&self) -> u32 {
        self.age_months / MONTHS_PER_YEAR
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Returns whether the pet ate. A refused meal leaves everything untouched.
    pub fn feed<R: BufRead, W: Write>(
        &mut self,
        food: &Food,
        console: &mut Console<R, W>,
    ) -> console::Result<bool> {
        if self.dead {
            return Ok(false);
        }
        if self.balance < food.cost {
            log::debug!("{} cannot afford {} (${:.2} < ${:.2})", self.name, food.name, self.balance, food.cost);
            console.render_text("You don't have enough money;Consider making more", false, false)?;
            return Ok(false);
        }
        self.energy = meter(self.energy.saturating_add(food.energy));
        self.happiness = meter(self.happiness.saturating_add(food.happiness));
        self.weight = self.weight.saturating_add(food.weight);
        self.balance -= food.cost;
        log::debug!("{} ate {}: {self:?}", self.name, food.name);
        Ok(true)
    }

    /// Weight is burned whatever happens; happiness moves with the outcome.
    pub fn play(&mut self, game: &Game, chance: &mut impl Chance) -> bool {
        if self.dead {
            return false;
        }
        self.weight = self.weight.saturating_sub(game.weight).max(WEIGHT_FLOOR);
        let won = game.is_winner(chance);
        self.happiness = if won {
            meter(self.happiness.saturating_add(game.happiness))
        } else {
            meter(self.happiness.saturating_sub(game.happiness))
        };
        log::debug!("{} played {} (won={won}): {self:?}", self.name, game.name);
        won
    }

    /// One month passes.
    pub fn advance_time<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> console::Result<()> {
        if self.dead {
            return Ok(());
        }
        self.happiness = meter(self.happiness - 1);
        self.energy = meter(self.energy - 1);
        self.age_months += 1;
        if self.age_years() > LIFESPAN_YEARS {
            self.dead = true;
            log::info!("{} died of old age at {} months", self.name, self.age_months);
            console.render_text(&format!("{} has passed away.", self.name), false, false)?;
        }
        Ok(())
    }

    /// Bet `|amount|` on RED or GREEN. `None` when the pet is dead.
    pub fn gamble<R: BufRead, W: Write>(
        &mut self,
        amount: f64,
        console: &mut Console<R, W>,
        chance: &mut impl Chance,
    ) -> console::Result<Option<Wager>> {
        if self.dead {
            return Ok(None);
        }
        let amount = amount.abs();
        let red = paint("RED", Color::Red);
        let green = paint("GREEN", Color::Green);

        console.render_box(&[format!("Gambling ${amount:.2}!")], false, true)?;
        console.render_box(
            &[
                format!("Would you like to bet on {red} or {green}?"),
                format!(" 1) {red}"),
                format!(" 2) {green}"),
            ],
            true,
            false,
        )?;

        let choice = console.read_int(1, 2)?;
        let landed = chance.pick(2) as i64 + 1;
        let wager = if choice == landed {
            self.deposit(amount);
            console.render_text(&format!("You won: ${amount:.2}"), false, false)?;
            Wager::Won(amount)
        } else {
            self.deposit(-amount);
            console.render_text(&format!("You lost: ${amount:.2}"), false, false)?;
            Wager::Lost(amount)
        };
        log::debug!("{} gambled: {wager:?}, balance ${:.2}", self.name, self.balance);
        Ok(Some(wager))
    }

    /// Positive `amount` makes the pet less happy. Magnitude is capped.
    pub fn discipline(&mut self, amount: i32) {
        if self.dead {
            return;
        }
        let amount = bound(-DISCIPLINE_LIMIT, amount, DISCIPLINE_LIMIT);
        self.happiness = meter(self.happiness - amount);
    }

    /// Signed change to the balance; may go negative.
    pub fn deposit(&mut self, amount: f64) {
        if !self.dead {
            self.balance += amount;
        }
    }

    pub fn kill(&mut self) {
        self.dead = true;
    }

    pub fn describe(&self) -> String {
        let months = self.age_months;
        let years = self.age_years();
        format!(
            "{}\n - Energy Level: {}\n - Happiness Level: {}\n - Weight: {}\n - Age: {} {}, {} {}\n - Balance: ${:.2}\n - Status: {}",
            self.name,
            self.energy,
            self.happiness,
            self.weight,
            months,
            plural(months, "month"),
            years,
            plural(years, "year"),
            self.balance,
            if self.dead { "dead" } else { "alive" },
        )
    }
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

impl fmt::Display for Pet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chance::Script;
    use std::io::Cursor;

    type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

    fn console(input: &str) -> TestConsole {
        let mut c = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), 60);
        c.set_style_support(false);
        c
    }

    fn printed(c: &TestConsole) -> String {
        String::from_utf8(c.output().clone()).unwrap()
    }

    fn pet_weighing(weight: i32) -> Pet {
        Pet::new("Biscuit", &mut Script::new().ranges([weight]))
    }

    #[test]
    fn fresh_pet_defaults() {
        let p = pet_weighing(17);
        assert_eq!(p.name(), "Biscuit");
        assert_eq!(p.energy(), 5);
        assert_eq!(p.happiness(), 5);
        assert_eq!(p.weight(), 17);
        assert_eq!(p.balance(), 10.0);
        assert_eq!(p.age_months(), 0);
        assert_eq!(p.age_years(), 0);
        assert!(!p.is_dead());
    }

    #[test]
    fn feed_clamps_meters_and_charges() {
        let mut p = pet_weighing(20);
        let mut c = console("");
        let food = Food::new("Energy bar", 8, -3, 2, 5.0);
        assert!(p.feed(&food, &mut c).unwrap());
        assert_eq!(p.energy(), 10);
        assert_eq!(p.happiness(), 2);
        assert_eq!(p.weight(), 22);
        assert_eq!(p.balance(), 5.0);
        assert!(printed(&c).is_empty());
    }

    #[test]
    fn feed_refuses_when_broke() {
        let mut p = pet_weighing(20);
        let mut c = console("");
        let food = Food::new("Caviar", 3, 3, 1, 10.01);
        assert!(!p.feed(&food, &mut c).unwrap());
        assert_eq!((p.energy(), p.happiness(), p.weight()), (5, 5, 20));
        assert_eq!(p.balance(), 10.0);
        assert!(printed(&c).contains("You don't have enough money"));
    }

    #[test]
    fn feed_allows_spending_everything() {
        let mut p = pet_weighing(20);
        let mut c = console("");
        assert!(p.feed(&Food::new("Feast", 1, 1, 1, 10.0), &mut c).unwrap());
        assert_eq!(p.balance(), 0.0);
    }

    #[test]
    fn play_floors_weight_for_any_delta() {
        let mut p = pet_weighing(12);
        let mut s = Script::new().rolls([0.9, 0.1]);
        assert!(p.play(&Game::new("Marathon", 3, 100), &mut s));
        assert_eq!(p.weight(), WEIGHT_FLOOR);
        assert_eq!(p.happiness(), 8);
        assert!(!p.play(&Game::new("Marathon", 3, 100), &mut s));
        assert_eq!(p.weight(), WEIGHT_FLOOR);
        assert_eq!(p.happiness(), 5);
    }

    #[test]
    fn extreme_food_deltas_saturate() {
        let mut p = pet_weighing(20);
        let mut c = console("");
        assert!(p.feed(&Food::new("Feast", i32::MAX, i32::MAX, i32::MAX, 0.0), &mut c).unwrap());
        assert_eq!((p.energy(), p.happiness(), p.weight()), (10, 10, i32::MAX));
        assert!(p.feed(&Food::new("Feast", 1, 1, 1, 0.0), &mut c).unwrap());
        assert_eq!(p.weight(), i32::MAX);

        assert!(p.feed(&Food::new("Poison", i32::MIN, i32::MIN, i32::MIN, 0.0), &mut c).unwrap());
        assert_eq!((p.energy(), p.happiness()), (0, 0));
        assert_eq!(p.weight(), -1);
    }

    #[test]
    fn extreme_game_deltas_saturate() {
        let mut p = pet_weighing(20);
        let mut s = Script::new().rolls([0.9, 0.1, 0.9]);

        assert!(p.play(&Game::new("Feast day", i32::MAX, i32::MIN), &mut s));
        assert_eq!((p.weight(), p.happiness()), (i32::MAX, 10));

        assert!(!p.play(&Game::new("Ultra", i32::MAX, i32::MAX), &mut s));
        assert_eq!((p.weight(), p.happiness()), (WEIGHT_FLOOR, 0));

        assert!(p.play(&Game::new("Sulk", i32::MIN, 0), &mut s));
        assert_eq!(p.happiness(), 0);
    }

    #[test]
    fn burn_larger_than_weight_either_way() {
        let mut p = pet_weighing(20);
        p.play(&Game::new("Sprint", 1, 21), &mut Script::new());
        assert_eq!(p.weight(), WEIGHT_FLOOR);
        p.play(&Game::new("Snack race", 1, -21), &mut Script::new());
        assert_eq!(p.weight(), WEIGHT_FLOOR + 21);
    }

    #[test]
    fn play_with_negative_burn_gains_weight() {
        let mut p = pet_weighing(12);
        p.play(&Game::new("Eating contest", 1, -4), &mut Script::new());
        assert_eq!(p.weight(), 16);
    }

    #[test]
    fn play_loss_clamps_at_zero() {
        let mut p = pet_weighing(12);
        assert!(!p.play(&Game::new("Chess", 9, 0), &mut Script::new().rolls([0.2])));
        assert_eq!(p.happiness(), 0);
    }

    #[test]
    fn advance_time_decays_and_ages() {
        let mut p = pet_weighing(12);
        let mut c = console("");
        for _ in 0..7 {
            p.advance_time(&mut c).unwrap();
        }
        assert_eq!((p.energy(), p.happiness()), (0, 0));
        assert_eq!(p.age_months(), 7);
    }

    #[test]
    fn dies_after_thirteenth_birthday() {
        let mut p = pet_weighing(12);
        let mut c = console("");
        for _ in 0..145 {
            p.advance_time(&mut c).unwrap();
        }
        assert_eq!((p.age_months(), p.age_years()), (145, 12));
        for _ in 145..155 {
            p.advance_time(&mut c).unwrap();
        }
        assert!(!p.is_dead());
        p.advance_time(&mut c).unwrap();
        assert_eq!((p.age_months(), p.age_years()), (156, 13));
        assert!(p.is_dead());
        assert!(printed(&c).contains("Biscuit has passed away."));

        p.advance_time(&mut c).unwrap();
        assert_eq!(p.age_months(), 156);
    }

    #[test]
    fn discipline_caps_amount() {
        let mut a = pet_weighing(12);
        let mut b = pet_weighing(12);
        a.discipline(9);
        b.discipline(4);
        assert_eq!(a.happiness(), b.happiness());
        assert_eq!(a.happiness(), 1);

        a.discipline(-100);
        assert_eq!(a.happiness(), 5);
    }

    #[test]
    fn gamble_win_credits_absolute_amount() {
        let mut p = pet_weighing(12);
        let mut c = console("2\n");
        let w = p.gamble(-3.5, &mut c, &mut Script::new().picks([1])).unwrap();
        assert_eq!(w, Some(Wager::Won(3.5)));
        assert_eq!(p.balance(), 13.5);
        let out = printed(&c);
        assert!(out.contains("Gambling $3.50!"));
        assert!(out.contains("1) RED"));
        assert!(out.contains("You won: $3.50"));
    }

    #[test]
    fn gamble_loss_can_go_negative() {
        let mut p = pet_weighing(12);
        let mut c = console("1\n");
        let w = p.gamble(25.0, &mut c, &mut Script::new().picks([1])).unwrap();
        assert_eq!(w, Some(Wager::Lost(25.0)));
        assert_eq!(p.balance(), -15.0);
        assert!(printed(&c).contains("You lost: $25.00"));
    }

    #[test]
    fn gamble_boxes_are_chained() {
        let mut p = pet_weighing(12);
        let mut c = console("1\n");
        p.gamble(1.0, &mut c, &mut Script::new()).unwrap();
        let out = printed(&c);
        let rows: Vec<&str> = out.lines().collect();
        assert!(rows[0].starts_with('┌'));
        assert!(rows[1].contains("Gambling"));
        assert!(rows[2].starts_with('├'));
    }

    #[test]
    fn dead_pet_ignores_everything() {
        let mut p = pet_weighing(12);
        p.kill();
        let before = p.clone();
        let mut c = console("1\n");

        assert!(!p.feed(&Food::new("Kibble", 1, 1, 1, 1.0), &mut c).unwrap());
        assert!(!p.play(&Game::new("Fetch", 2, 1), &mut Script::new().rolls([0.9])));
        p.advance_time(&mut c).unwrap();
        assert_eq!(p.gamble(5.0, &mut c, &mut Script::new()).unwrap(), None);
        p.discipline(3);
        p.deposit(100.0);

        assert_eq!(p.energy(), before.energy());
        assert_eq!(p.happiness(), before.happiness());
        assert_eq!(p.weight(), before.weight());
        assert_eq!(p.age_months(), before.age_months());
        assert_eq!(p.balance(), before.balance());
        assert!(printed(&c).is_empty());
    }

    #[test]
    fn describe_lists_attributes() {
        let mut p = pet_weighing(14);
        let mut c = console("");
        p.advance_time(&mut c).unwrap();
        assert_eq!(
            p.describe(),
            "Biscuit\n - Energy Level: 4\n - Happiness Level: 4\n - Weight: 14\n - Age: 1 month, 0 years\n - Balance: $10.00\n - Status: alive"
        );
        p.kill();
        assert!(p.to_string().ends_with("Status: dead"));
    }
}

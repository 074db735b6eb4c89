use crate::action::{Food, Game};

pub fn default_foods() -> Vec<Food> {
    vec![
        Food::new("Kibble", 2, 1, 1, 1.0),
        Food::new("Salad", 3, -1, 0, 2.5),
        Food::new("Candy", 1, 4, 2, 2.0),
        Food::new("Steak", 5, 3, 3, 6.5),
    ]
}

pub fn default_games() -> Vec<Game> {
    vec![
        Game::new("Fetch", 2, 1),
        Game::new("Tug of war", 3, 2),
        Game::new("Hide and seek", 1, 0),
        Game::new("Agility course", 4, 3),
    ]
}

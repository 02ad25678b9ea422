use rand::Rng;
use std::collections::HashMap;

use super::types::{Direction, Rarity, TradeMetrics};

/// Adjective lists for one rarity tier, split by trade outcome.
#[derive(Debug, Clone)]
pub struct AdjectiveSet {
    pub win: Vec<String>,
    pub loss: Vec<String>,
}

impl AdjectiveSet {
    fn new(win: &[&str], loss: &[&str]) -> Self {
        Self {
            win: win.iter().map(|s| s.to_string()).collect(),
            loss: loss.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Word tables used to name cards. Passed to the scorer rather than held globally
/// so deployments and tests can swap them.
#[derive(Debug, Clone)]
pub struct NameTables {
    adjectives: HashMap<Rarity, AdjectiveSet>,
}

impl NameTables {
    pub fn new(adjectives: HashMap<Rarity, AdjectiveSet>) -> Self {
        Self { adjectives }
    }

    pub fn adjectives(&self, rarity: Rarity, is_win: bool) -> &[String] {
        match self.adjectives.get(&rarity) {
            Some(set) if is_win => &set.win,
            Some(set) => &set.loss,
            None => &[],
        }
    }
}

impl Default for NameTables {
    fn default() -> Self {
        let mut adjectives = HashMap::new();
        adjectives.insert(
            Rarity::Mythic,
            AdjectiveSet::new(
                &["Godlike", "Divine", "Perfect", "Celestial"],
                &["Catastrophic", "Apocalyptic", "Disastrous", "Legendary Loss"],
            ),
        );
        adjectives.insert(
            Rarity::Legendary,
            AdjectiveSet::new(
                &["Epic", "Legendary", "Supreme", "Majestic"],
                &["Titanic", "Colossal", "Monumental Loss"],
            ),
        );
        adjectives.insert(
            Rarity::Epic,
            AdjectiveSet::new(
                &["Stellar", "Magnificent", "Brilliant", "Superb"],
                &["Massive", "Substantial Loss"],
            ),
        );
        adjectives.insert(
            Rarity::Rare,
            AdjectiveSet::new(
                &["Strong", "Solid", "Notable", "Impressive"],
                &["Significant Loss"],
            ),
        );
        adjectives.insert(
            Rarity::Common,
            AdjectiveSet::new(&["Modest", "Steady", "Stable"], &["Minor Loss"]),
        );
        Self { adjectives }
    }
}

pub fn card_noun(direction: Direction, is_win: bool) -> &'static str {
    match (direction, is_win) {
        (Direction::Long, true) => "Bull",
        (Direction::Long, false) => "Slump",
        (Direction::Short, true) => "Short",
        (Direction::Short, false) => "Rally",
    }
}

/// "{adjective} {asset} {noun}". The adjective is the only random part.
pub fn compute_name<R: Rng + ?Sized>(
    metrics: &TradeMetrics,
    rarity: Rarity,
    tables: &NameTables,
    rng: &mut R,
) -> String {
    let is_win = metrics.is_win();
    let noun = card_noun(metrics.direction, is_win);

    let adjectives = tables.adjectives(rarity, is_win);
    if adjectives.is_empty() {
        return format!("{} {}", metrics.asset(), noun);
    }
    let adjective = &adjectives[rng.random_range(0..adjectives.len())];

    format!("{} {} {}", adjective, metrics.asset(), noun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_tables_cover_every_tier() {
        let tables = NameTables::default();
        for rarity in Rarity::ALL {
            assert!(!tables.adjectives(rarity, true).is_empty());
            assert!(!tables.adjectives(rarity, false).is_empty());
        }
    }

    #[test]
    fn test_nouns() {
        assert_eq!(card_noun(Direction::Long, true), "Bull");
        assert_eq!(card_noun(Direction::Long, false), "Slump");
        assert_eq!(card_noun(Direction::Short, true), "Short");
        assert_eq!(card_noun(Direction::Short, false), "Rally");
    }

    #[test]
    fn test_single_word_list_is_deterministic() {
        let metrics = TradeMetrics::new(-3.0, 1, 100.0, Direction::Long, "ETH/USD").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let name = compute_name(&metrics, Rarity::Common, &NameTables::default(), &mut rng);
        assert_eq!(name, "Minor Loss ETH Slump");
    }

    #[test]
    fn test_custom_tables_are_used() {
        let mut adjectives = HashMap::new();
        adjectives.insert(Rarity::Epic, AdjectiveSet::new(&["Shiny"], &["Dull"]));
        let tables = NameTables::new(adjectives);
        let metrics = TradeMetrics::new(40.0, 5, 900.0, Direction::Short, "SOL/USD").unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(compute_name(&metrics, Rarity::Epic, &tables, &mut rng), "Shiny SOL Short");
        // Tiers missing from the table fall back to "{asset} {noun}"
        assert_eq!(compute_name(&metrics, Rarity::Rare, &tables, &mut rng), "SOL Short");
    }
}

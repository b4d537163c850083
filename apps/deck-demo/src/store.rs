use std::collections::{HashMap, HashSet};

use swipedeck_core::{CardId, OutcomeHandler, SwipeOutcome};

/// A profile shown on a card.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: CardId,
    pub name: &'static str,
    pub age: u8,
}

pub fn sample_profiles() -> Vec<Profile> {
    [
        ("Ada", 29),
        ("Grace", 34),
        ("Linus", 27),
        ("Margaret", 31),
        ("Dennis", 38),
        ("Barbara", 26),
        ("Ken", 41),
        ("Radia", 33),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, age))| Profile {
        id: CardId(i as u64 + 1),
        name,
        age,
    })
    .collect()
}

/// In-memory stand-in for the decision service.
///
/// Stores every decision, and reports a match when a like lands on a profile
/// that already liked the user back.
#[derive(Debug, Default)]
pub struct MockDecisionStore {
    names: HashMap<CardId, &'static str>,
    liked_back: HashSet<CardId>,
    decisions: Vec<(CardId, SwipeOutcome)>,
    matches: Vec<CardId>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub likes: usize,
    pub passes: usize,
    pub super_likes: usize,
    pub matches: usize,
}

impl MockDecisionStore {
    pub fn new(profiles: &[Profile], liked_back: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            names: profiles.iter().map(|p| (p.id, p.name)).collect(),
            liked_back: liked_back.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn decisions(&self) -> &[(CardId, SwipeOutcome)] {
        &self.decisions
    }

    pub fn matches(&self) -> &[CardId] {
        &self.matches
    }

    pub fn name_of(&self, card: CardId) -> &'static str {
        self.names.get(&card).copied().unwrap_or("unknown")
    }

    pub fn tally(&self) -> Tally {
        let mut tally = Tally {
            matches: self.matches.len(),
            ..Tally::default()
        };
        for (_, outcome) in &self.decisions {
            match outcome {
                SwipeOutcome::Like => tally.likes += 1,
                SwipeOutcome::Pass => tally.passes += 1,
                SwipeOutcome::SuperLike => tally.super_likes += 1,
                SwipeOutcome::Cancelled => {}
            }
        }
        tally
    }
}

impl OutcomeHandler for MockDecisionStore {
    fn on_resolved(&mut self, card: CardId, outcome: SwipeOutcome) {
        let name = self.name_of(card);
        log::info!("saved {:?} for {} ({})", outcome, name, card);
        self.decisions.push((card, outcome));

        let interested = matches!(outcome, SwipeOutcome::Like | SwipeOutcome::SuperLike);
        if interested && self.liked_back.contains(&card) {
            log::info!("it's a match with {name}!");
            self.matches.push(card);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn likes_on_interested_profiles_match() {
        let profiles = sample_profiles();
        let mut store = MockDecisionStore::new(&profiles, [CardId(2), CardId(3)]);
        store.on_resolved(CardId(1), SwipeOutcome::Like);
        store.on_resolved(CardId(2), SwipeOutcome::SuperLike);
        store.on_resolved(CardId(3), SwipeOutcome::Pass);

        assert_eq!(store.matches(), &[CardId(2)]);
        assert_eq!(
            store.tally(),
            Tally {
                likes: 1,
                passes: 1,
                super_likes: 1,
                matches: 1,
            }
        );
        assert_eq!(store.name_of(CardId(2)), "Grace");
        assert_eq!(store.name_of(CardId(99)), "unknown");
    }
}

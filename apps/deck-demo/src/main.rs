mod script;
mod store;

use anyhow::Context;
use swipedeck_core::{CardId, Size, SwipeConfig, SwipeDeck};

use crate::script::{browsing_session, Player};
use crate::store::{sample_profiles, MockDecisionStore};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let profiles = sample_profiles();
    for profile in &profiles {
        log::debug!("{} is {}, {}", profile.id, profile.name, profile.age);
    }
    let store = MockDecisionStore::new(&profiles, [CardId(1), CardId(4), CardId(6)]);

    let config = SwipeConfig::new(Size::new(390.0, 844.0)).with_visible_cards(3);
    let deck = SwipeDeck::new(config, profiles.iter().map(|p| p.id), store)
        .context("failed to build the card deck")?;

    let mut player = Player::new(deck);
    player
        .play(&browsing_session())
        .context("scripted session failed")?;
    let frames = player.frames();
    let deck = player.into_deck();

    let exhausted = deck.is_exhausted();
    let store = deck.into_handler();
    let tally = store.tally();
    log::info!(
        "{} decision(s) over {} frame(s): {} like, {} pass, {} super like, {} match(es)",
        store.decisions().len(),
        frames,
        tally.likes,
        tally.passes,
        tally.super_likes,
        tally.matches
    );
    for card in store.matches() {
        log::info!("matched with {}", store.name_of(*card));
    }
    if !exhausted {
        log::info!("profiles left to review");
    }
    Ok(())
}

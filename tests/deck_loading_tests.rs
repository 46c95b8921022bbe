//! Deck files from JSON through the registry into a fresh game.

use serde_json::{json, Value};

use skirmish_engine::config::SessionConfig;
use skirmish_engine::core::{GameRng, PlayerId};
use skirmish_engine::decks::{CharacterSize, DeckError, DeckRegistry};
use skirmish_engine::maps::MapRegistry;
use skirmish_engine::state::{build_initial_state, LobbySeat};

/// A valid deck file: 28 combat cards and two specials.
fn deck_file(id: &str) -> Value {
    let mut cards: Vec<Value> = (1..=28)
        .map(|i| json!({ "id": i, "type": "combat", "attack": i % 5 + 1, "defense": i % 3 }))
        .collect();
    cards.push(json!({ "id": 29, "type": "special", "name": "Rally", "rulesText": "Draw two cards." }));
    cards.push(json!({ "id": 30, "type": "special", "name": "Mend", "rulesText": "Heal 3." }));

    json!({
        "id": id,
        "name": format!("Deck {}", id),
        "author": "tester",
        "version": "1.0",
        "characters": [
            { "id": "captain", "name": "Captain", "hp": 18, "size": "large" },
            { "id": "scout", "name": "Scout", "hp": 6, "minionCount": 3, "ranged": true },
        ],
        "cards": cards,
    })
}

fn load(registry: &mut DeckRegistry, file: &Value) -> Result<(), DeckError> {
    registry.load_json(&file.to_string()).map(|_| ())
}

/// A well-formed deck file loads with defaults applied.
#[test]
fn test_load_valid_file() {
    let mut registry = DeckRegistry::new();
    let deck = registry.load_json(&deck_file("raiders").to_string()).unwrap();

    assert_eq!(deck.cards.len(), 30);
    assert_eq!(deck.characters[0].size, CharacterSize::Large);
    assert_eq!(deck.characters[1].size, CharacterSize::Medium);
    assert_eq!(deck.characters[1].instances(), 3);
    assert!(deck.description.is_none());
}

/// Each validation rule rejects the file and leaves the registry unchanged.
#[test]
fn test_validation_rejects() {
    let mut registry = DeckRegistry::new();

    let mut no_author = deck_file("a");
    no_author["author"] = json!("  ");
    assert!(matches!(load(&mut registry, &no_author), Err(DeckError::MissingField("author"))));

    let mut short = deck_file("b");
    short["cards"].as_array_mut().unwrap().pop();
    assert!(matches!(
        load(&mut registry, &short),
        Err(DeckError::WrongCardCount { expected: 30, found: 29 })
    ));

    let mut duplicate = deck_file("c");
    duplicate["cards"][1]["id"] = json!(1);
    assert!(matches!(load(&mut registry, &duplicate), Err(DeckError::DuplicateCardId(1))));

    let mut zero = deck_file("d");
    zero["cards"][0]["id"] = json!(0);
    assert!(matches!(load(&mut registry, &zero), Err(DeckError::CardIdOutOfRange(0))));

    let mut nameless = deck_file("e");
    nameless["cards"][29]["name"] = json!("");
    assert!(matches!(load(&mut registry, &nameless), Err(DeckError::IncompleteSpecialCard(30))));

    let mut bad_art = deck_file("f");
    bad_art["artAssets"] = json!({ "12": { "cardArt": "data:image/png;hex,00ff" } });
    assert!(matches!(load(&mut registry, &bad_art), Err(DeckError::InvalidArtData(12))));

    let mut dead_on_arrival = deck_file("h");
    dead_on_arrival["characters"][1]["hp"] = json!(0);
    assert!(matches!(
        load(&mut registry, &dead_on_arrival),
        Err(DeckError::InvalidCharacterHp { ref character, hp: 0 }) if character == "scout"
    ));

    let mut missing_cards = deck_file("g");
    missing_cards.as_object_mut().unwrap().remove("cards");
    assert!(matches!(load(&mut registry, &missing_cards), Err(DeckError::Malformed(_))));

    assert!(registry.is_empty());
}

/// Art assets pointing at existing cards pass.
#[test]
fn test_art_assets_accepted() {
    let mut registry = DeckRegistry::new();
    let mut file = deck_file("art");
    file["artAssets"] = json!({
        "1": { "cardArt": "https://cdn.example.com/1.png" },
        "29": { "cardArt": "data:image/webp;base64,UklGRg==", "thumbnail": "https://cdn.example.com/29t.png" },
    });

    let deck = registry.load_json(&file.to_string()).unwrap();
    assert_eq!(deck.art_assets.as_ref().map(|a| a.len()), Some(2));
}

/// A started game deals every seat its selected deck.
#[test]
fn test_initial_state_from_loaded_decks() {
    let mut registry = DeckRegistry::new();
    load(&mut registry, &deck_file("raiders")).unwrap();
    load(&mut registry, &deck_file("wardens")).unwrap();

    let seats = [
        LobbySeat::new("p1", "Alice").with_deck("wardens"),
        LobbySeat::new("p2", "Bob"),
    ];
    let config = SessionConfig::default().with_opening_hand(5);
    let state = build_initial_state(
        &seats,
        &registry,
        &MapRegistry::presets(),
        Some("swamp"),
        &config,
        &mut GameRng::new(11),
    );

    assert_eq!(state.map_id, "swamp");
    assert_eq!(state.players.len(), 2);
    for player in &state.players {
        assert_eq!(player.hand.len(), 5);
        assert_eq!(player.deck.len(), 25);
        assert_eq!(player.card_count(), 30);
    }

    // One captain plus three numbered scouts per player
    let bob: Vec<_> = state.characters_of(&PlayerId::new("p2")).map(|c| c.name.as_str()).collect();
    assert_eq!(bob, vec!["Captain", "Scout 1", "Scout 2", "Scout 3"]);
    assert!(state.characters.iter().all(|c| c.health == c.max_health));
}

/// Doubling copies doubles the deck, keeping each id twice.
#[test]
fn test_copies_per_card() {
    let mut registry = DeckRegistry::new();
    load(&mut registry, &deck_file("raiders")).unwrap();

    let config = SessionConfig::default().with_copies_per_card(2).with_opening_hand(0);
    let state = build_initial_state(
        &[LobbySeat::new("p1", "Alice")],
        &registry,
        &MapRegistry::presets(),
        None,
        &config,
        &mut GameRng::new(3),
    );

    let deck = &state.players[0].deck;
    assert_eq!(deck.len(), 60);
    assert_eq!(deck.iter().filter(|c| c.id().raw() == 17).count(), 2);
}

/// A seat whose deck is not registered is left out of the game.
#[test]
fn test_unknown_deck_skips_seat() {
    let mut registry = DeckRegistry::new();
    load(&mut registry, &deck_file("raiders")).unwrap();

    let seats = [
        LobbySeat::new("p1", "Alice"),
        LobbySeat::new("p2", "Bob").with_deck("deleted"),
    ];
    let state = build_initial_state(
        &seats,
        &registry,
        &MapRegistry::presets(),
        Some("no_such_map"),
        &SessionConfig::default(),
        &mut GameRng::new(1),
    );

    assert_eq!(state.players.len(), 1);
    assert!(state.characters_of(&PlayerId::new("p2")).next().is_none());
    assert_eq!(state.map_id, MapRegistry::presets().default_map().id);
}

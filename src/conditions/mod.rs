//! Status conditions: the reference catalog and list helpers.
//!
//! Characters carry conditions as free-text labels; the catalog below is
//! what the rules reference names, but labels outside it are allowed.
//!
//! `update_character_conditions` replaces the whole list, so callers build
//! the new list with `with_condition` / `without_condition` first.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Condition labels on one character.
pub type Conditions = SmallVec<[String; 4]>;

/// Whether a condition helps or hinders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

/// One catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConditionInfo {
    pub name: &'static str,
    pub effect: &'static str,
    pub polarity: Polarity,
}

const fn negative(name: &'static str, effect: &'static str) -> ConditionInfo {
    ConditionInfo { name, effect, polarity: Polarity::Negative }
}

const fn positive(name: &'static str, effect: &'static str) -> ConditionInfo {
    ConditionInfo { name, effect, polarity: Polarity::Positive }
}

/// Named conditions referenced by the rules.
pub const CATALOG: &[ConditionInfo] = &[
    negative("Stunned", "The character loses 1 action on its next turn."),
    negative(
        "Bleeding",
        "At the end of its turn, the character takes 1 damage per Bleed token; a heal removes 1 Bleed instead of restoring HP.",
    ),
    negative(
        "Blinded",
        "The next time this character deals damage, that damage is halved (round down), then Blinded ends.",
    ),
    negative("Silenced", "The character cannot play Special cards on its next turn."),
    negative(
        "Immobilized",
        "The character cannot move of its own accord until the end of its next turn (it may still be pushed/pulled).",
    ),
    negative(
        "Vulnerable",
        "All damage this character takes is increased by +2 (once per attack) until its next turn ends.",
    ),
    negative("Cursed", "The character cannot be healed until the end of its next turn."),
    positive("Armor", "Reduce the next incoming damage by 3, then discard this token."),
    positive("Fortified", "Reduce the next incoming damage by 2, then discard this token."),
    positive("Hasted", "Each move action this turn gains +2 squares of movement."),
    positive("Focused", "The character's next attack this turn deals +2 damage."),
    positive(
        "Stealthed",
        "Until it attacks or takes damage, this character cannot be chosen as a target for enemy combat-card attacks.",
    ),
    positive("Regenerating", "At the end of its turn, the character heals 2 HP (duration 1 round)."),
    positive("Empowered", "Until turn end, all attacks by this character deal +1 damage."),
    positive(
        "Phase-Shifted",
        "The character ignores terrain and may move through figures until its next turn starts.",
    ),
];

/// Case-insensitive catalog lookup.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static ConditionInfo> {
    CATALOG.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// Catalog entries of one polarity.
pub fn by_polarity(polarity: Polarity) -> impl Iterator<Item = &'static ConditionInfo> {
    CATALOG.iter().filter(move |c| c.polarity == polarity)
}

/// `current` plus `name`, unless already present.
#[must_use]
pub fn with_condition(current: &[String], name: &str) -> Conditions {
    let mut next: Conditions = current.iter().cloned().collect();
    if !next.iter().any(|c| c == name) {
        next.push(name.to_string());
    }
    next
}

/// `current` without any occurrence of `name`.
#[must_use]
pub fn without_condition(current: &[String], name: &str) -> Conditions {
    current.iter().filter(|c| *c != name).cloned().collect()
}

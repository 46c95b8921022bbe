//! String identifiers for players, characters and games.
//!
//! ## Id Layout
//!
//! - `PlayerId`: issued by the external lobby store, opaque here.
//! - `CharacterId`: `"{player}-{template}"`, or `"{player}-{template}-{n}"`
//!   for the n-th minion instance of a template. Tokens use
//!   `"token-{millis}-{random}"`.
//! - `GameId`: the persistence key and broadcast channel name.
//!
//! All three serialize as plain JSON strings.

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new id.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw id.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Player identifier, issued by the lobby roster.
    PlayerId
);

string_id!(
    /// Character identifier, unique within one game.
    CharacterId
);

string_id!(
    /// Game identifier: persistence key and broadcast channel name.
    GameId
);

impl CharacterId {
    /// Id for a deck character instance.
    ///
    /// `instance` is `None` for single characters and `Some(n)` (1-based)
    /// for the n-th minion of a template.
    ///
    /// ```
    /// use skirmish_engine::core::{CharacterId, PlayerId};
    ///
    /// let p1 = PlayerId::new("p1");
    /// assert_eq!(CharacterId::for_template(&p1, "hero", None).as_str(), "p1-hero");
    /// assert_eq!(CharacterId::for_template(&p1, "imp", Some(2)).as_str(), "p1-imp-2");
    /// ```
    #[must_use]
    pub fn for_template(player: &PlayerId, template: &str, instance: Option<u32>) -> Self {
        match instance {
            Some(n) => Self(format!("{}-{}-{}", player, template, n)),
            None => Self(format!("{}-{}", player, template)),
        }
    }

    /// The template instance's id with its minion number removed.
    ///
    /// Only an all-digit trailing `-segment` is stripped: `"p1-hero-2"` →
    /// `"p1-hero"`, while `"p1-hero"` and `"p1-fire-mage"` come back whole.
    #[must_use]
    pub fn base(&self) -> &str {
        match self.0.rsplit_once('-') {
            Some((base, n)) if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) => base,
            _ => &self.0,
        }
    }
}

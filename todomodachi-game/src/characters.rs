//! Collectible character catalog.
use serde::{Deserialize, Serialize};

/// A collectible companion character.
///
/// Catalog entries are immutable at runtime; ownership is tracked by id
/// in the game state, never by mutating the catalog itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    /// Path or URL of the character portrait, resolved by the platform layer.
    pub image: String,
    /// Flavor text, also fed to the companion text collaborator as persona.
    pub desc: String,
}

/// Fixed ordered catalog of characters available to the loot engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterCatalog {
    pub characters: Vec<Character>,
}

impl CharacterCatalog {
    /// Parse a catalog from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the catalog shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Empty catalog, mostly useful for tests exercising rejection paths.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in starter roster.
    #[must_use]
    pub fn builtin() -> Self {
        let character = |id: &str, name: &str, desc: &str| Character {
            id: id.to_string(),
            name: name.to_string(),
            image: format!("assets/characters/{id}.png"),
            desc: desc.to_string(),
        };
        Self {
            characters: vec![
                character(
                    "chick",
                    "Hiyoko",
                    "A cheerful chick who gives every task its all.",
                ),
                character(
                    "bear",
                    "Kuma",
                    "An easygoing bear who gets things done slowly but surely.",
                ),
                character(
                    "penguin",
                    "Pen",
                    "A cold-proof penguin who never backs down from a challenge.",
                ),
            ],
        }
    }

    /// Find a character by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// The character granted at session start, by convention the first entry.
    #[must_use]
    pub fn starter(&self) -> Option<&Character> {
        self.characters.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_unique_ids_and_a_starter() {
        let catalog = CharacterCatalog::builtin();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.starter().map(|c| c.id.as_str()), Some("chick"));

        let mut ids: Vec<&str> = catalog.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len(), "catalog ids must be unique");
    }

    #[test]
    fn catalog_round_trips_through_json() {
        let catalog = CharacterCatalog::builtin();
        let json = serde_json::to_string(&catalog).unwrap();
        let back = CharacterCatalog::from_json(&json).unwrap();
        assert_eq!(back, catalog);
    }
}

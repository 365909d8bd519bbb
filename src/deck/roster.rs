//! Deck collection lifecycle and persistence
//!
//! The roster owns every saved deck and enforces the collection rules: at
//! most one main deck per color, and each color always keeps at least one
//! deck (deleting the last auto-creates a fresh empty replacement). Load
//! falls back to the default roster with a warning rather than failing the
//! caller; save errors are logged and returned.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use shakmaty::Color;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::army::ArmyDeck;

/// All of a player's saved decks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckRoster {
    decks: Vec<ArmyDeck>,
}

impl Default for DeckRoster {
    /// A roster with one classic main deck per color.
    fn default() -> Self {
        let mut white = ArmyDeck::standard_template(Color::White);
        white.is_main = true;
        let mut black = ArmyDeck::standard_template(Color::Black);
        black.is_main = true;
        Self { decks: vec![white, black] }
    }
}

impl DeckRoster {
    pub fn decks(&self) -> &[ArmyDeck] {
        &self.decks
    }

    pub fn decks_for(&self, color: Color) -> impl Iterator<Item = &ArmyDeck> {
        self.decks.iter().filter(move |deck| deck.color == color)
    }

    pub fn get(&self, id: Uuid) -> Option<&ArmyDeck> {
        self.decks.iter().find(|deck| deck.id == id)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut ArmyDeck> {
        self.decks.iter_mut().find(|deck| deck.id == id)
    }

    /// The deck a game is composed from for this color.
    pub fn main_deck(&self, color: Color) -> Option<&ArmyDeck> {
        self.decks_for(color).find(|deck| deck.is_main)
    }

    /// Add a deck and return its id.
    pub fn add(&mut self, deck: ArmyDeck) -> Uuid {
        let id = deck.id;
        self.decks.push(deck);
        id
    }

    /// Flag a deck as its color's main deck, clearing the previous flag.
    pub fn set_main(&mut self, id: Uuid) -> bool {
        let Some(color) = self.get(id).map(|deck| deck.color) else {
            return false;
        };
        for deck in &mut self.decks {
            if deck.color == color {
                deck.is_main = deck.id == id;
            }
        }
        true
    }

    /// Delete a deck.
    ///
    /// Each color keeps at least one deck: deleting the last one creates a
    /// fresh empty replacement. When the deleted deck was the main one, the
    /// first remaining deck of that color takes the flag.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let Some(index) = self.decks.iter().position(|deck| deck.id == id) else {
            return false;
        };
        let removed = self.decks.remove(index);

        if self.decks_for(removed.color).next().is_none() {
            info!(
                "[DECK] last {:?} deck deleted, creating a fresh one",
                removed.color
            );
            let mut fresh = ArmyDeck::new("New Army", removed.color);
            fresh.is_main = removed.is_main;
            self.decks.push(fresh);
        } else if removed.is_main {
            if let Some(successor) = self
                .decks
                .iter_mut()
                .find(|deck| deck.color == removed.color)
            {
                successor.is_main = true;
            }
        }
        true
    }

    /// Load a roster from a JSON file, falling back to the default roster.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<DeckRoster>(&contents) {
                Ok(roster) => {
                    info!("[DECK] loaded {} decks from {path:?}", roster.decks.len());
                    roster
                }
                Err(e) => {
                    warn!("[DECK] failed to parse {path:?}: {e}. Using defaults.");
                    Self::default()
                }
            },
            Err(e) => {
                warn!("[DECK] failed to read {path:?}: {e}. Using defaults.");
                Self::default()
            }
        }
    }

    /// Save the roster as JSON.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        match fs::write(path, json) {
            Ok(()) => {
                info!("[DECK] saved {} decks to {path:?}", self.decks.len());
                Ok(())
            }
            Err(e) => {
                error!("[DECK] failed to write {path:?}: {e}");
                Err(e)
            }
        }
    }
}

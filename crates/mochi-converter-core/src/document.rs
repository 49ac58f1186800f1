// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::edn::Keyword;
use crate::edn::MapBuilder;
use crate::edn::Value;
use crate::types::aliases::DECK_PATH_SEPARATOR;
use crate::types::deck::DeckBucket;

/// Version of the Mochi data format written to `data.edn`.
pub const MOCHI_FORMAT_VERSION: i64 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct SerializedCard {
    pub content: String,
    pub deck_id: Option<Keyword>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SerializedDeck {
    /// Last segment of the deck's full name.
    pub name: String,
    pub id: Option<Keyword>,
    pub parent_id: Option<Keyword>,
    pub cards: Vec<SerializedCard>,
}

/// The top-level `{:decks … :version …}` envelope.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub decks: Vec<SerializedDeck>,
    pub version: i64,
}

fn leaf_name(name: &str) -> &str {
    name.rsplit(DECK_PATH_SEPARATOR).next().unwrap_or(name)
}

impl SerializedDeck {
    pub fn from_bucket(bucket: &DeckBucket) -> Self {
        let id = bucket.id.as_deref().map(Keyword::new);
        let cards = bucket
            .cards
            .iter()
            .map(|card| SerializedCard {
                content: card.content.clone(),
                deck_id: id.clone(),
            })
            .collect();
        Self {
            name: leaf_name(&bucket.name).to_string(),
            parent_id: bucket.parent_id.as_deref().map(Keyword::new),
            id,
            cards,
        }
    }

    fn to_edn(&self) -> Value {
        let cards = self
            .cards
            .iter()
            .map(|card| {
                MapBuilder::new()
                    .entry("content", card.content.as_str())
                    .entry_opt("deck-id", card.deck_id.clone())
                    .build()
            })
            .collect();
        MapBuilder::new()
            .entry("name", self.name.as_str())
            .entry_opt("id", self.id.clone())
            .entry_opt("parent-id", self.parent_id.clone())
            .entry("cards", Value::List(cards))
            .build()
    }
}

impl Document {
    pub fn from_buckets(buckets: &[DeckBucket]) -> Self {
        Self {
            decks: buckets.iter().map(SerializedDeck::from_bucket).collect(),
            version: MOCHI_FORMAT_VERSION,
        }
    }

    pub fn to_edn(&self) -> Value {
        let decks = self.decks.iter().map(SerializedDeck::to_edn).collect();
        MapBuilder::new()
            .entry("decks", Value::Vector(decks))
            .entry("version", self.version)
            .build()
    }
}

/// Render assembled decks as the text of `data.edn`.
pub fn serialize(buckets: &[DeckBucket]) -> String {
    Document::from_buckets(buckets).to_edn().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::deck::BucketCard;

    fn bucket(name: &str, id: Option<&str>, parent_id: Option<&str>, contents: &[&str]) -> DeckBucket {
        DeckBucket {
            name: name.to_string(),
            cards: contents
                .iter()
                .map(|c| BucketCard {
                    content: c.to_string(),
                })
                .collect(),
            id: id.map(str::to_string),
            parent_id: parent_id.map(str::to_string),
        }
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name("Science::Biology::Genetics"), "Genetics");
        assert_eq!(leaf_name("Test"), "Test");
    }

    #[test]
    fn test_serialize_without_ids() {
        let text = serialize(&[bucket("Test", None, None, &["2 + 2\n---\n4"])]);
        assert_eq!(
            text,
            r#"{:decks [{:name "Test" :cards ({:content "2 + 2\n---\n4"})}] :version 2}"#
        );
    }

    #[test]
    fn test_serialize_with_ids() {
        let text = serialize(&[bucket(
            "Science::Biology",
            Some("bio"),
            Some("sci"),
            &["a\n---\nb", "c\n---\nd"],
        )]);
        assert_eq!(
            text,
            r#"{:decks [{:name "Biology" :id :bio :parent-id :sci :cards ({:content "a\n---\nb" :deck-id :bio} {:content "c\n---\nd" :deck-id :bio})}] :version 2}"#
        );
    }

    #[test]
    fn test_every_card_carries_deck_id() {
        let doc = Document::from_buckets(&[bucket("Test", Some("abc123"), None, &["x", "y", "z"])]);
        let deck = &doc.decks[0];
        assert_eq!(deck.id, Some(Keyword::new("abc123")));
        assert!(deck.cards.iter().all(|c| c.deck_id == deck.id));
        assert_eq!(doc.version, 2);
    }

    #[test]
    fn test_serialize_no_decks() {
        assert_eq!(serialize(&[]), "{:decks [] :version 2}");
    }
}

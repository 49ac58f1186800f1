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

use std::collections::HashMap;

use crate::error::ConvertError;
use crate::hierarchy::FlatDecks;
use crate::types::card::CardRecord;
use crate::types::deck::BucketCard;
use crate::types::deck::DeckBucket;

/// Group cards by deck. Decks appear in the order their first card appears;
/// cards keep their source order within a deck.
pub fn assemble(cards: &[CardRecord]) -> Vec<DeckBucket> {
    let mut buckets: Vec<DeckBucket> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for card in cards {
        let idx = *positions.entry(card.deck_name()).or_insert_with(|| {
            buckets.push(DeckBucket::new(card.deck_name().to_string()));
            buckets.len() - 1
        });
        buckets[idx].cards.push(BucketCard {
            content: card.merged_content(),
        });
    }
    buckets
}

/// Copy ids and parent ids from the flattened hierarchy into the buckets.
/// Every bucket must be declared in the hierarchy.
pub fn apply_hierarchy(
    mut buckets: Vec<DeckBucket>,
    flat: &FlatDecks,
) -> Result<Vec<DeckBucket>, ConvertError> {
    for bucket in buckets.iter_mut() {
        let info = flat.get(&bucket.name).ok_or_else(|| ConvertError::UnknownDeck {
            name: bucket.name.clone(),
        })?;
        bucket.id = Some(info.id.clone());
        if let Some(parent_id) = &info.parent_id {
            bucket.parent_id = Some(parent_id.clone());
        }
    }
    Ok(buckets)
}

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

use crate::types::aliases::DeckName;

/// The line that separates the front of a card from its back.
pub const SIDE_SEPARATOR: &str = "---";

/// A single two-sided card, as read from the notes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardRecord {
    deck_name: DeckName,
    front: String,
    back: String,
}

impl CardRecord {
    pub fn new(deck_name: DeckName, front: String, back: String) -> Self {
        Self {
            deck_name,
            front,
            back,
        }
    }

    pub fn deck_name(&self) -> &str {
        &self.deck_name
    }

    pub fn front(&self) -> &str {
        &self.front
    }

    pub fn back(&self) -> &str {
        &self.back
    }

    /// The same card with its sides swapped.
    pub fn reversed(&self) -> Self {
        Self {
            deck_name: self.deck_name.clone(),
            front: self.back.clone(),
            back: self.front.clone(),
        }
    }

    /// Both sides as one Markdown blob, split by a separator line. Mochi
    /// splits card sides on that same line.
    pub fn merged_content(&self) -> String {
        format!("{}\n{SIDE_SEPARATOR}\n{}", self.front, self.back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merged_content() {
        let card = CardRecord::new("Math".to_string(), "2 + 2".to_string(), "4".to_string());
        assert_eq!(card.merged_content(), "2 + 2\n---\n4");
    }

    #[test]
    fn test_reversed() {
        let card = CardRecord::new("Math".to_string(), "Q".to_string(), "A".to_string());
        let rev = card.reversed();
        assert_eq!(rev.deck_name(), "Math");
        assert_eq!(rev.front(), "A");
        assert_eq!(rev.back(), "Q");
    }
}

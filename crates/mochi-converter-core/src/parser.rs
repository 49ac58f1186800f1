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

use std::fs::read_to_string;
use std::path::Path;

use crate::error::ConvertError;
use crate::types::aliases::DeckName;
use crate::types::card::CardRecord;
use crate::types::card::SIDE_SEPARATOR;

/// Header prefix marking a card that should also be emitted reversed.
const QA_MARKER: &str = "QA";

/// In-body directive that moves a single card to another deck.
const DECK_DIRECTIVE: &str = "!deck:";

/// Read and parse a Markdown notes file.
pub fn parse_file(path: &Path) -> Result<Vec<CardRecord>, ConvertError> {
    if !path.exists() {
        return Err(ConvertError::InputNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    Parser::new(path.display().to_string()).parse(&text)
}

/// Parse Markdown notes held in memory. `source_path` is only used in error
/// messages.
pub fn parse_notes(source_path: &str, text: &str) -> Result<Vec<CardRecord>, ConvertError> {
    Parser::new(source_path.to_string()).parse(text)
}

pub struct Parser {
    source_path: String,
}

/// A card whose `## ` header has been read and whose body is still being
/// collected.
struct OpenCard<'a> {
    /// Deck in effect when the header was read.
    deck: Option<DeckName>,
    header: &'a str,
    header_line: usize,
    body: Vec<&'a str>,
}

enum State<'a> {
    /// No card header seen yet.
    NoCardOpen { current_deck: Option<DeckName> },
    /// Collecting the body of a card.
    CardOpen {
        current_deck: Option<DeckName>,
        card: OpenCard<'a>,
    },
}

enum Line<'a> {
    /// A line like `# <deck>`.
    DeckHeading(&'a str),
    /// A line like `## <header>`.
    CardHeading(&'a str),
    /// Any other line.
    Text(&'a str),
}

impl<'a> Line<'a> {
    fn read(line: &'a str) -> Self {
        if let Some(rest) = line.strip_prefix("# ") {
            Line::DeckHeading(rest.trim())
        } else if let Some(rest) = line.strip_prefix("## ") {
            Line::CardHeading(rest.trim())
        } else {
            Line::Text(line)
        }
    }
}

fn is_separator(line: &str) -> bool {
    line.trim() == SIDE_SEPARATOR
}

/// If the line is a `!deck: <name>` directive, return the name.
fn deck_directive(line: &str) -> Option<&str> {
    let name = line.trim().strip_prefix(DECK_DIRECTIVE)?.trim();
    if name.is_empty() { None } else { Some(name) }
}

impl Parser {
    pub fn new(source_path: String) -> Self {
        Parser { source_path }
    }

    /// Parse all the cards in the given text.
    pub fn parse(&self, text: &str) -> Result<Vec<CardRecord>, ConvertError> {
        let mut cards = Vec::new();
        let mut state = State::NoCardOpen { current_deck: None };
        for (line_num, line) in text.lines().enumerate() {
            state = self.parse_line(state, Line::read(line), line_num, &mut cards)?;
        }
        self.finalize(state, &mut cards)?;
        Ok(cards)
    }

    fn parse_line<'a>(
        &self,
        state: State<'a>,
        line: Line<'a>,
        line_num: usize,
        cards: &mut Vec<CardRecord>,
    ) -> Result<State<'a>, ConvertError> {
        match state {
            State::NoCardOpen { current_deck } => match line {
                Line::DeckHeading(name) => Ok(State::NoCardOpen {
                    current_deck: Some(name.to_string()),
                }),
                Line::CardHeading(header) => Ok(State::CardOpen {
                    card: OpenCard {
                        deck: current_deck.clone(),
                        header,
                        header_line: line_num,
                        body: Vec::new(),
                    },
                    current_deck,
                }),
                Line::Text(_) => Ok(State::NoCardOpen { current_deck }),
            },
            State::CardOpen {
                current_deck,
                mut card,
            } => match line {
                // A new deck heading applies to the cards that follow; the
                // open card keeps the deck it was opened under.
                Line::DeckHeading(name) => Ok(State::CardOpen {
                    current_deck: Some(name.to_string()),
                    card,
                }),
                Line::CardHeading(header) => {
                    self.close_card(card, current_deck.as_deref(), cards)?;
                    Ok(State::CardOpen {
                        card: OpenCard {
                            deck: current_deck.clone(),
                            header,
                            header_line: line_num,
                            body: Vec::new(),
                        },
                        current_deck,
                    })
                }
                Line::Text(text) => {
                    card.body.push(text);
                    Ok(State::CardOpen { current_deck, card })
                }
            },
        }
    }

    fn finalize(&self, state: State<'_>, cards: &mut Vec<CardRecord>) -> Result<(), ConvertError> {
        match state {
            State::NoCardOpen { .. } => Ok(()),
            State::CardOpen { current_deck, card } => {
                self.close_card(card, current_deck.as_deref(), cards)
            }
        }
    }

    /// Turn a finished card into one or two records. A card opened before any
    /// deck heading takes the deck in effect when it closes, and is dropped if
    /// there is still none.
    fn close_card(
        &self,
        card: OpenCard<'_>,
        current_deck: Option<&str>,
        cards: &mut Vec<CardRecord>,
    ) -> Result<(), ConvertError> {
        let Some(deck) = card.deck.or_else(|| current_deck.map(str::to_string)) else {
            return Ok(());
        };

        let mut deck_override: Option<&str> = None;
        let mut lines: Vec<&str> = Vec::with_capacity(card.body.len());
        for line in card.body {
            match deck_directive(line) {
                Some(name) => {
                    if deck_override.is_none() {
                        deck_override = Some(name);
                    }
                }
                None => lines.push(line),
            }
        }
        let deck = deck_override.map(str::to_string).unwrap_or(deck);

        let separators: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_separator(line))
            .map(|(idx, _)| idx)
            .collect();
        let &[separator] = separators.as_slice() else {
            return Err(ConvertError::MalformedCard {
                source_path: self.source_path.clone(),
                line: card.header_line + 1,
                header: card.header.to_string(),
                separators: separators.len(),
            });
        };

        let front = lines[..separator].join("\n").trim().to_string();
        let back = lines[separator + 1..].join("\n").trim().to_string();
        let record = CardRecord::new(deck, front, back);
        if card.header.starts_with(QA_MARKER) {
            let reversed = record.reversed();
            cards.push(record);
            cards.push(reversed);
        } else {
            cards.push(record);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() -> Result<(), ConvertError> {
        let cards = parse_notes("test.md", "")?;
        assert_eq!(cards.len(), 0);
        Ok(())
    }

    #[test]
    fn test_whitespace_string() -> Result<(), ConvertError> {
        let cards = parse_notes("test.md", "\n\n\n")?;
        assert_eq!(cards.len(), 0);
        Ok(())
    }

    #[test]
    fn test_basic_card() -> Result<(), ConvertError> {
        let input = "# Test\n## Basic\n2 + 2\n---\n4\n";
        let cards = parse_notes("test.md", input)?;
        assert_eq!(
            cards,
            vec![CardRecord::new(
                "Test".to_string(),
                "2 + 2".to_string(),
                "4".to_string()
            )]
        );
        Ok(())
    }

    #[test]
    fn test_multiline_sides() -> Result<(), ConvertError> {
        let input = "# Rust\n## Ownership\n\nWhat does\n*move* mean?\n\n---\n\nOwnership\n\n### transfers\n";
        let cards = parse_notes("test.md", input)?;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front(), "What does\n*move* mean?");
        assert_eq!(cards[0].back(), "Ownership\n\n### transfers");
        Ok(())
    }

    #[test]
    fn test_qa_header_emits_reverse() -> Result<(), ConvertError> {
        let input = "# Capitals\n## QA France\nParis\n---\nFrance\n";
        let cards = parse_notes("test.md", input)?;
        assert_eq!(cards.len(), 2);
        assert_eq!((cards[0].front(), cards[0].back()), ("Paris", "France"));
        assert_eq!((cards[1].front(), cards[1].back()), ("France", "Paris"));
        assert!(cards.iter().all(|c| c.deck_name() == "Capitals"));
        Ok(())
    }

    #[test]
    fn test_qa_marker_must_lead_header() -> Result<(), ConvertError> {
        let input = "# Capitals\n## France QA\nParis\n---\nFrance\n";
        let cards = parse_notes("test.md", input)?;
        assert_eq!(cards.len(), 1);
        Ok(())
    }

    #[test]
    fn test_deck_override() -> Result<(), ConvertError> {
        let input = "# Test\n## Moved\n!deck: Other\nfront\n---\nback\n## Stays\na\n---\nb\n";
        let cards = parse_notes("test.md", input)?;
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].deck_name(), "Other");
        assert_eq!(cards[0].front(), "front");
        assert!(!cards[0].merged_content().contains("!deck"));
        assert_eq!(cards[1].deck_name(), "Test");
        Ok(())
    }

    #[test]
    fn test_deck_override_applies_to_both_qa_records() -> Result<(), ConvertError> {
        let input = "# Test\n## QA Moved\nfront\n---\nback\n!deck: Other\n";
        let cards = parse_notes("test.md", input)?;
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|c| c.deck_name() == "Other"));
        assert_eq!(cards[1].front(), "back");
        Ok(())
    }

    #[test]
    fn test_missing_separator() {
        let input = "# Test\n\n## Broken\nno back side\n";
        let result = parse_notes("test.md", input);
        assert_eq!(
            result,
            Err(ConvertError::MalformedCard {
                source_path: "test.md".to_string(),
                line: 3,
                header: "Broken".to_string(),
                separators: 0,
            })
        );
    }

    #[test]
    fn test_too_many_separators() {
        let input = "# Test\n## Broken\na\n---\nb\n---\nc\n";
        let result = parse_notes("test.md", input);
        assert!(matches!(
            result,
            Err(ConvertError::MalformedCard { separators: 2, .. })
        ));
    }

    #[test]
    fn test_inline_dashes_are_not_separators() {
        let input = "# Test\n## Dashes\na --- b\n";
        let result = parse_notes("test.md", input);
        assert!(matches!(
            result,
            Err(ConvertError::MalformedCard { separators: 0, .. })
        ));
    }

    #[test]
    fn test_cards_keep_source_order_across_decks() -> Result<(), ConvertError> {
        let input = "# A\n## one\n1\n---\n1\n# B\n## two\n2\n---\n2\n# A\n## three\n3\n---\n3\n";
        let cards = parse_notes("test.md", input)?;
        let decks: Vec<&str> = cards.iter().map(|c| c.deck_name()).collect();
        assert_eq!(decks, vec!["A", "B", "A"]);
        let fronts: Vec<&str> = cards.iter().map(|c| c.front()).collect();
        assert_eq!(fronts, vec!["1", "2", "3"]);
        Ok(())
    }

    #[test]
    fn test_card_before_deck_takes_deck_at_close() -> Result<(), ConvertError> {
        let input = "## Early\na\n---\nb\n# Test\n## Kept\nc\n---\nd\n";
        let cards = parse_notes("test.md", input)?;
        assert_eq!(
            cards,
            vec![
                CardRecord::new("Test".to_string(), "a".to_string(), "b".to_string()),
                CardRecord::new("Test".to_string(), "c".to_string(), "d".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_card_before_deck_at_end_of_input() -> Result<(), ConvertError> {
        let input = "## Early\na\n---\nb\n# Test\n";
        let cards = parse_notes("test.md", input)?;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].deck_name(), "Test");
        Ok(())
    }

    #[test]
    fn test_card_without_any_deck_is_dropped() -> Result<(), ConvertError> {
        let cards = parse_notes("test.md", "## Orphan\na\n---\nb\n")?;
        assert!(cards.is_empty());
        Ok(())
    }

    #[test]
    fn test_text_before_first_card_is_ignored() -> Result<(), ConvertError> {
        let input = "Intro text\n---\n# Test\nDeck description.\n## Card\na\n---\nb\n";
        let cards = parse_notes("test.md", input)?;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front(), "a");
        Ok(())
    }

    #[test]
    fn test_deck_heading_does_not_close_card() -> Result<(), ConvertError> {
        let input = "# A\n## one\nfront\n# B\n---\nback\n## two\nx\n---\ny\n";
        let cards = parse_notes("test.md", input)?;
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].deck_name(), "A");
        assert_eq!(cards[0].front(), "front");
        assert_eq!(cards[0].back(), "back");
        assert_eq!(cards[1].deck_name(), "B");
        Ok(())
    }

    #[test]
    fn test_parse_file_not_found() {
        let path = Path::new("./does-not-exist.md");
        assert_eq!(
            parse_file(path),
            Err(ConvertError::InputNotFound {
                path: path.to_path_buf()
            })
        );
    }

    #[test]
    fn test_parse_file() -> Result<(), ConvertError> {
        let dir = tempfile::tempdir().map_err(|e| ConvertError::io("tempdir", e))?;
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "# Test\r\n## Basic\r\n2 + 2\r\n---\r\n4\r\n")
            .map_err(|e| ConvertError::io(&path, e))?;
        let cards = parse_file(&path)?;
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].back(), "4");
        Ok(())
    }
}

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

use std::fmt::Display;
use std::fmt::Formatter;
use std::path::PathBuf;

use clap::ValueEnum;
use mochi_converter_core::DeckBucket;
use mochi_converter_core::ParentIdPropagation;
use mochi_converter_core::build_decks;
use mochi_converter_core::error::Fallible;
use mochi_converter_core::parse_file;
use serde::Serialize;

use crate::cmd::convert::load_optional_hierarchy;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum CheckFormat {
    /// One line per deck.
    Text,
    /// A JSON array of decks.
    Json,
}

impl Display for CheckFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckFormat::Text => write!(f, "text"),
            CheckFormat::Json => write!(f, "json"),
        }
    }
}

pub struct CheckConfig {
    pub input: PathBuf,
    pub hierarchy: Option<PathBuf>,
    pub propagation: ParentIdPropagation,
    pub format: CheckFormat,
}

#[derive(Debug, PartialEq, Serialize)]
struct DeckSummary {
    name: String,
    id: Option<String>,
    parent_id: Option<String>,
    cards: usize,
}

impl From<&DeckBucket> for DeckSummary {
    fn from(bucket: &DeckBucket) -> Self {
        DeckSummary {
            name: bucket.name.clone(),
            id: bucket.id.clone(),
            parent_id: bucket.parent_id.clone(),
            cards: bucket.cards.len(),
        }
    }
}

impl Display for DeckSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(id) = &self.id {
            write!(f, " (id: {id})")?;
        }
        if let Some(parent_id) = &self.parent_id {
            write!(f, " (parent: {parent_id})")?;
        }
        write!(f, ": {} cards", self.cards)
    }
}

/// Run the conversion without writing anything and describe the result.
fn summarize(config: &CheckConfig) -> Fallible<Vec<DeckSummary>> {
    let hierarchy = load_optional_hierarchy(config.hierarchy.as_deref())?;
    let cards = parse_file(&config.input)?;
    let decks = build_decks(&cards, hierarchy.as_deref(), config.propagation)?;
    Ok(decks.iter().map(DeckSummary::from).collect())
}

fn render(summaries: &[DeckSummary], format: CheckFormat) -> Fallible<String> {
    match format {
        CheckFormat::Text => Ok(summaries
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
        CheckFormat::Json => Ok(serde_json::to_string_pretty(summaries)?),
    }
}

pub fn check_notes(config: CheckConfig) -> Fallible<()> {
    let summaries = summarize(&config)?;
    log::debug!("Checked {} decks", summaries.len());
    println!("{}", render(&summaries, config.format)?);
    Ok(())
}

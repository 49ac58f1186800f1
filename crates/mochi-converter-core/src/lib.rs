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

//! mochi-converter-core: converts Markdown notes into Mochi deck archives.
//!
//! The pipeline is:
//! - [`parser`]: Markdown notes to card records
//! - [`assembler`]: card records grouped into decks
//! - [`hierarchy`]: deck hierarchy flattened and merged into the decks
//! - [`document`]: decks rendered as an EDN document
//! - [`archive`]: the document written out as `.edn` and `.mochi` files

pub mod archive;
pub mod assembler;
pub mod document;
pub mod edn;
pub mod error;
pub mod hierarchy;
pub mod parser;
pub mod types;

use std::path::Path;

pub use archive::{PackedPaths, pack};
pub use assembler::{apply_hierarchy, assemble};
pub use document::{Document, serialize};
pub use error::{ConvertError, ErrorReport, Fallible, fail};
pub use hierarchy::{FlatDecks, ParentIdPropagation, flatten};
pub use parser::{parse_file, parse_notes};
pub use types::card::CardRecord;
pub use types::deck::{DeckBucket, DeckNode, FlatDeckInfo};

/// Parse notes and build the decks, applying the hierarchy when one is given.
/// Without a hierarchy the decks carry no ids.
pub fn build_decks(
    cards: &[CardRecord],
    hierarchy: Option<&[DeckNode]>,
    propagation: ParentIdPropagation,
) -> Result<Vec<DeckBucket>, ConvertError> {
    let buckets = assemble(cards);
    match hierarchy {
        Some(nodes) => {
            let flat = flatten(nodes, None, propagation)?;
            apply_hierarchy(buckets, &flat)
        }
        None => Ok(buckets),
    }
}

/// Convert the Markdown file at `input` into `<output>.edn` and
/// `<output>.mochi`.
pub fn convert(
    input: &Path,
    output: &Path,
    hierarchy: Option<&[DeckNode]>,
    propagation: ParentIdPropagation,
) -> Result<PackedPaths, ConvertError> {
    let cards = parse_file(input)?;
    let decks = build_decks(&cards, hierarchy, propagation)?;
    pack(&serialize(&decks), output)
}

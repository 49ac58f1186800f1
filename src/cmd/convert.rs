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

use std::path::Path;
use std::path::PathBuf;

use mochi_converter_core::DeckNode;
use mochi_converter_core::PackedPaths;
use mochi_converter_core::ParentIdPropagation;
use mochi_converter_core::build_decks;
use mochi_converter_core::error::Fallible;
use mochi_converter_core::pack;
use mochi_converter_core::parse_file;
use mochi_converter_core::serialize;

use crate::config::load_hierarchy;

pub struct ConvertConfig {
    pub input: PathBuf,
    /// Output path without extension.
    pub output: PathBuf,
    /// Deck hierarchy file. Without one, decks are written without ids.
    pub hierarchy: Option<PathBuf>,
    pub propagation: ParentIdPropagation,
}

pub(crate) fn load_optional_hierarchy(path: Option<&Path>) -> Fallible<Option<Vec<DeckNode>>> {
    match path {
        Some(path) => {
            log::debug!("Loading deck hierarchy from {}", path.display());
            Ok(Some(load_hierarchy(path)?))
        }
        None => Ok(None),
    }
}

pub fn convert_notes(config: ConvertConfig) -> Fallible<PackedPaths> {
    let hierarchy = load_optional_hierarchy(config.hierarchy.as_deref())?;

    log::debug!("Reading notes from {}", config.input.display());
    let cards = parse_file(&config.input)?;
    log::debug!("Parsed {} card records", cards.len());

    let decks = build_decks(&cards, hierarchy.as_deref(), config.propagation)?;
    log::debug!(
        "Assembled {} decks (hierarchy applied: {})",
        decks.len(),
        hierarchy.is_some()
    );

    let paths = pack(&serialize(&decks), &config.output)?;
    log::info!("Wrote {}", paths.edn.display());
    log::info!("Wrote {}", paths.archive.display());
    Ok(paths)
}

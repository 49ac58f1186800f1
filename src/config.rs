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

use mochi_converter_core::DeckNode;
use mochi_converter_core::error::ErrorReport;
use mochi_converter_core::error::Fallible;
use mochi_converter_core::error::fail;
use serde::Deserialize;

/// The deck hierarchy file. Its `decks` key lists the top-level decks, each
/// with a `name`, an `id` and optional `children`.
#[derive(Debug, Deserialize)]
struct HierarchyConfig {
    decks: Vec<DeckNode>,
}

#[derive(Debug, PartialEq)]
enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Load the deck hierarchy from a YAML or TOML file.
pub fn load_hierarchy(path: &Path) -> Fallible<Vec<DeckNode>> {
    if !path.exists() {
        return fail(format!("config file does not exist: {}", path.display()));
    }
    let text = read_to_string(path)?;
    let config: HierarchyConfig = match ConfigFormat::of(path) {
        ConfigFormat::Yaml => serde_yaml::from_str(&text).map_err(|e| {
            ErrorReport::new(format!("Failed to parse YAML config {}: {}", path.display(), e))
        })?,
        ConfigFormat::Toml => toml::from_str(&text).map_err(|e| {
            ErrorReport::new(format!("Failed to parse TOML config {}: {}", path.display(), e))
        })?,
    };
    Ok(config.decks)
}

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

use crate::edn::Keyword;
use crate::error::ConvertError;
use crate::types::aliases::DECK_PATH_SEPARATOR;
use crate::types::aliases::DeckName;
use crate::types::deck::DeckNode;
use crate::types::deck::FlatDeckInfo;

/// Which id a nested deck records as its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParentIdPropagation {
    /// Each deck points at the deck it is nested in.
    #[default]
    Immediate,
    /// Every deck gets the parent id passed to [`flatten`] itself, whatever
    /// its depth. Earlier releases built archives this way; called with no
    /// parent id, it leaves every deck without a parent.
    RootLevel,
}

/// Flattened hierarchy, keyed by fully-qualified deck name, in declaration
/// order.
#[derive(Debug, Default, PartialEq)]
pub struct FlatDecks {
    entries: Vec<FlatDeckInfo>,
    index: HashMap<DeckName, usize>,
}

impl FlatDecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, rejecting a name that is already present.
    pub fn insert(&mut self, info: FlatDeckInfo) -> Result<(), ConvertError> {
        if self.index.contains_key(&info.name) {
            return Err(ConvertError::DuplicateDeckName { name: info.name });
        }
        self.index.insert(info.name.clone(), self.entries.len());
        self.entries.push(info);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FlatDeckInfo> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlatDeckInfo> {
        self.entries.iter()
    }
}

/// Flatten a deck hierarchy into fully-qualified names.
///
/// Top-level nodes keep their own name and get `parent_id` as their parent.
/// Children are registered as `parent::child`; which parent id they get
/// depends on `propagation`.
pub fn flatten(
    nodes: &[DeckNode],
    parent_id: Option<&str>,
    propagation: ParentIdPropagation,
) -> Result<FlatDecks, ConvertError> {
    let mut flat = FlatDecks::new();
    flatten_into(&mut flat, nodes, None, parent_id, parent_id, propagation)?;
    Ok(flat)
}

fn flatten_into(
    flat: &mut FlatDecks,
    nodes: &[DeckNode],
    prefix: Option<&str>,
    parent_id: Option<&str>,
    root_parent_id: Option<&str>,
    propagation: ParentIdPropagation,
) -> Result<(), ConvertError> {
    for node in nodes {
        let name = match prefix {
            Some(prefix) => format!("{prefix}{DECK_PATH_SEPARATOR}{}", node.name),
            None => node.name.clone(),
        };
        if !Keyword::is_valid_name(&node.id) {
            return Err(ConvertError::InvalidDeckId {
                name,
                id: node.id.clone(),
            });
        }
        let own_parent_id = match propagation {
            ParentIdPropagation::Immediate => parent_id,
            ParentIdPropagation::RootLevel => root_parent_id,
        };
        flat.insert(FlatDeckInfo {
            name: name.clone(),
            id: node.id.clone(),
            parent_id: own_parent_id.map(str::to_string),
        })?;
        flatten_into(
            flat,
            &node.children,
            Some(name.as_str()),
            Some(node.id.as_str()),
            root_parent_id,
            propagation,
        )?;
    }
    Ok(())
}

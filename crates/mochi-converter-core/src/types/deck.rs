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

use serde::Deserialize;
use serde::Deserializer;

use crate::types::aliases::DeckId;
use crate::types::aliases::DeckName;

/// A node of the user-declared deck hierarchy.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DeckNode {
    pub name: DeckName,
    #[serde(deserialize_with = "deserialize_id")]
    pub id: DeckId,
    #[serde(default)]
    pub children: Vec<DeckNode>,
}

impl DeckNode {
    pub fn new(name: impl Into<DeckName>, id: impl Into<DeckId>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<DeckNode>) -> Self {
        self.children = children;
        self
    }
}

/// YAML reads ids like `12345678` as integers. Accept both forms.
fn deserialize_id<'de, D>(deserializer: D) -> Result<DeckId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(n) => n.to_string(),
    })
}

/// A hierarchy node after flattening.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatDeckInfo {
    /// Fully-qualified name, e.g. `Science::Biology`.
    pub name: DeckName,
    pub id: DeckId,
    pub parent_id: Option<DeckId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BucketCard {
    pub content: String,
}

/// The cards of one deck, in the order they appear in the notes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckBucket {
    pub name: DeckName,
    pub cards: Vec<BucketCard>,
    pub id: Option<DeckId>,
    pub parent_id: Option<DeckId>,
}

impl DeckBucket {
    pub fn new(name: DeckName) -> Self {
        Self {
            name,
            cards: Vec::new(),
            id: None,
            parent_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_deserialize_nested() -> Fallible<()> {
        let json = r#"[{"name": "Science", "id": "sci", "children": [{"name": "Biology", "id": 42}]}]"#;
        let nodes: Vec<DeckNode> = serde_json::from_str(json)?;
        assert_eq!(
            nodes,
            vec![DeckNode::new("Science", "sci").with_children(vec![DeckNode::new("Biology", "42")])]
        );
        Ok(())
    }

    #[test]
    fn test_children_default_to_empty() -> Fallible<()> {
        let node: DeckNode = serde_json::from_str(r#"{"name": "Test", "id": "abc123"}"#)?;
        assert!(node.children.is_empty());
        Ok(())
    }
}

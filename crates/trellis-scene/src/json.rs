//! JSON ingestion for design-tool scene exports.

use serde::Deserialize;
use thiserror::Error;

use crate::node::Node;

/// Errors produced while loading a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("scene contains no nodes")]
    Empty,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SceneDocument {
    Many(Vec<Node>),
    One(Box<Node>),
}

/// Parse a scene export into a list of root nodes.
///
/// Accepts either a single node object or an array of nodes, the two
/// shapes design tools emit for single- and multi-selection exports.
pub fn parse_scene(input: &str) -> Result<Vec<Node>, SceneError> {
    let document: SceneDocument = serde_json::from_str(input)?;
    let nodes = match document {
        SceneDocument::Many(nodes) => nodes,
        SceneDocument::One(node) => vec![*node],
    };
    if nodes.is_empty() {
        return Err(SceneError::Empty);
    }
    Ok(nodes)
}

use serde::Serialize;

use crate::ast::Metadata;

/// One concrete hand: a flat sequence of tile codes in generation order.
///
/// Tiles are never deduplicated or sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variation {
    /// Tile codes in the order the template produced them.
    pub tiles:       Vec<String>,
    /// The template's `name` metadata, if it is text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name:        Option<String>,
    /// The template's `description` metadata, if it is text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The result of compiling one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledTemplate {
    /// The metadata record, in source order.
    pub metadata:   Metadata,
    /// Every variation the template denotes, in generation order.
    pub variations: Vec<Variation>,
}

impl CompiledTemplate {
    /// Returns just the tile sequences, one per variation.
    #[must_use]
    pub fn tile_lists(&self) -> Vec<&[String]> {
        self.variations.iter().map(|v| v.tiles.as_slice()).collect()
    }

    /// Serializes the template as JSON.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

//! Index and template request bodies.
//!
//! Bodies are plain structs serialized with serde, so caller-supplied names end up as
//! escaped JSON strings rather than spliced into a hand-written document.

use std::collections::BTreeMap;

use serde::Serialize;

/// Shard and replica counts for an index or template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShardSettings {
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
}

/// Body of a create-index request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSettings {
    pub settings: ShardSettings,
}

impl IndexSettings {
    pub fn new(shards: u32, replicas: u32) -> Self {
        Self {
            settings: ShardSettings {
                number_of_shards: shards,
                number_of_replicas: replicas,
            },
        }
    }
}

/// Alias definition inside a template body; serialized as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AliasDefinition {}

/// Body of a legacy index template request.
///
/// The template applies to every new index whose name starts with the configured
/// prefix and binds it to the configured alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexTemplate {
    pub index_patterns: Vec<String>,
    pub settings: ShardSettings,
    pub aliases: BTreeMap<String, AliasDefinition>,
}

impl IndexTemplate {
    /// Build a template matching `<index_prefix>*`.
    ///
    /// # Arguments
    ///
    /// * `index_prefix` - Prefix of the index names the template applies to
    /// * `alias` - Alias every matching index is added to
    /// * `shards` - Number of primary shards
    /// * `replicas` - Number of replicas per shard
    pub fn new(index_prefix: &str, alias: impl Into<String>, shards: u32, replicas: u32) -> Self {
        let mut aliases = BTreeMap::new();
        aliases.insert(alias.into(), AliasDefinition::default());
        Self {
            index_patterns: vec![index_pattern(index_prefix)],
            settings: ShardSettings {
                number_of_shards: shards,
                number_of_replicas: replicas,
            },
            aliases,
        }
    }
}

/// Get the glob pattern matching every index that starts with `prefix`.
pub fn index_pattern(prefix: &str) -> String {
    format!("{}*", prefix)
}

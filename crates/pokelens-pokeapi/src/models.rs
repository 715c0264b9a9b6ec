//! Serde models for the PokéAPI payload.
//!
//! Mirrors the subset of the `pokemon/{id|name}` resource that pokelens
//! serves. Unknown fields are ignored; records are immutable once
//! deserialized.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Named reference used throughout the PokéAPI payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// One type slot on a Pokémon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: i32,
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

/// One ability slot on a Pokémon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitySlot {
    #[serde(default)]
    pub is_hidden: bool,
    pub slot: i32,
    pub ability: NamedResource,
}

/// One base stat entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatSlot {
    pub base_stat: i64,
    #[serde(default)]
    pub effort: i64,
    pub stat: NamedResource,
}

/// Sprite URLs for a Pokémon.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
    #[serde(default)]
    pub back_shiny: Option<String>,
}

/// A Pokémon record as served by `pokemon/{id|name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub base_experience: Option<i64>,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub weight: i64,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

impl Pokemon {
    /// Normalize the record: name lowercased and trimmed.
    pub(crate) fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_lowercase();
        self
    }

    /// Primary (slot 1) type name, or "unknown" when absent.
    pub fn primary_type(&self) -> &str {
        self.types
            .first()
            .map(|t| t.type_ref.name.as_str())
            .unwrap_or("unknown")
    }

    /// All type names, slot order.
    pub fn all_types(&self) -> Vec<String> {
        self.types.iter().map(|t| t.type_ref.name.clone()).collect()
    }

    /// All ability names, slot order.
    pub fn ability_names(&self) -> Vec<String> {
        self.abilities
            .iter()
            .map(|a| a.ability.name.clone())
            .collect()
    }

    /// Base stats keyed by stat name.
    pub fn base_stats(&self) -> HashMap<String, i64> {
        self.stats
            .iter()
            .map(|s| (s.stat.name.clone(), s.base_stat))
            .collect()
    }
}

/// Trimmed-down record for quick responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: i64,
    pub name: String,
    pub types: Vec<String>,
    pub sprite_url: Option<String>,
    pub height: i64,
    pub weight: i64,
}

impl PokemonSummary {
    pub fn from_pokemon(pokemon: &Pokemon) -> Self {
        Self {
            id: pokemon.id,
            name: pokemon.name.clone(),
            types: pokemon.all_types(),
            sprite_url: pokemon.sprites.front_default.clone(),
            height: pokemon.height,
            weight: pokemon.weight,
        }
    }
}

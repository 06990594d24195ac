//! Generated-level name folding.
//!
//! The host instantiates procedural dungeon floors per visit and gives each
//! an instance-unique name (`UndergroundMine87`, `VolcanoDungeon4`). The
//! context graph never stores those literal names. Every floor folds into
//! one canonical entry before any store lookup or insert.
//!
//! Two dungeon families are recognized:
//!
//! - the mine: `<mine_prefix><floor>`, where floors above
//!   `deep_level_threshold` belong to the deep branch (`SkullCave`) and the
//!   rest to the shallow branch (`Mine`);
//! - the volcano: any name starting with `volcano_prefix` folds to one
//!   canonical entry with no numeric branching.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use wayfinder_types::LocationName;

/// Default rules, used by [`generated_level_name`].
static DEFAULT_LEVELS: LazyLock<LevelFolding> = LazyLock::new(LevelFolding::default);

/// Rules mapping generated level names to canonical static names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelFolding {
    /// Prefix shared by every mine floor.
    pub mine_prefix: String,
    /// Highest floor number that still belongs to the shallow mine.
    pub deep_level_threshold: u32,
    /// Canonical name for shallow mine floors.
    pub shallow_mine: LocationName,
    /// Canonical name for floors above the threshold.
    pub deep_mine: LocationName,
    /// Prefix shared by every volcano floor.
    pub volcano_prefix: String,
    /// Canonical name for all volcano floors.
    pub volcano: LocationName,
}

impl Default for LevelFolding {
    fn default() -> Self {
        Self {
            mine_prefix: "UndergroundMine".to_owned(),
            deep_level_threshold: 120,
            shallow_mine: LocationName::from("Mine"),
            deep_mine: LocationName::from("SkullCave"),
            volcano_prefix: "VolcanoDungeon".to_owned(),
            volcano: LocationName::from("VolcanoDungeon"),
        }
    }
}

impl LevelFolding {
    /// Map a literal location name to its canonical generated-level entry.
    ///
    /// Returns `None` when `name` is not a generated level; callers then use
    /// the literal name as-is. A mine name whose suffix is empty or not all
    /// digits is not a generated level.
    pub fn fold(&self, name: &str) -> Option<LocationName> {
        if !self.mine_prefix.is_empty()
            && let Some(suffix) = name.strip_prefix(self.mine_prefix.as_str())
        {
            if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            // Anything too large for u32 is deeper than any threshold.
            let deep = suffix
                .parse::<u32>()
                .ok()
                .is_none_or(|floor| floor > self.deep_level_threshold);
            let canonical = if deep {
                &self.deep_mine
            } else {
                &self.shallow_mine
            };
            return Some(canonical.clone());
        }

        if !self.volcano_prefix.is_empty() && name.starts_with(self.volcano_prefix.as_str()) {
            return Some(self.volcano.clone());
        }

        None
    }

    /// The name to store or look up `name` under: its fold, or itself.
    pub fn canonical(&self, name: &str) -> LocationName {
        self.fold(name).unwrap_or_else(|| LocationName::from(name))
    }

    /// Whether `name` is a literal generated-level name that must not be
    /// used as a store key. Canonical entries that fold onto themselves are
    /// not foldable.
    pub fn is_foldable(&self, name: &str) -> bool {
        self.fold(name).is_some_and(|canonical| canonical != name)
    }
}

/// Fold `name` using the default rules.
///
/// Pure and usable before any store exists.
pub fn generated_level_name(name: &str) -> Option<LocationName> {
    DEFAULT_LEVELS.fold(name)
}

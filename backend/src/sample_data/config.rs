//! Sample data configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::{Deserialize, Deserializer};

use crate::domain::DEFAULT_SAMPLE_NAMES;

/// A names override arrives as a list when the environment value holds
/// commas and as a plain string otherwise.
#[derive(Deserialize)]
#[serde(untagged)]
enum NameList {
    One(String),
    Many(Vec<String>),
}

fn name_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<NameList>::deserialize(deserializer)?.map(|list| match list {
            NameList::One(raw) => raw.split(',').map(str::to_owned).collect(),
            NameList::Many(names) => names,
        }),
    )
}

/// Configuration values controlling reservation seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SAMPLE_DATA")]
pub struct SampleDataSettings {
    /// Seed sample reservations once the server is ready; enabled when unset.
    pub enabled: Option<bool>,
    /// Comma-separated override for the seeded names.
    #[serde(default, deserialize_with = "name_list")]
    pub names: Option<Vec<String>>,
}

impl SampleDataSettings {
    /// Whether seeding runs at startup.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Names to seed, falling back to the built-in list.
    ///
    /// Entries are trimmed and blanks ignored; an override made only of
    /// blanks yields an empty list.
    pub fn names(&self) -> Vec<String> {
        match self.names.as_deref() {
            Some(raw) => raw
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect(),
            None => DEFAULT_SAMPLE_NAMES
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
        }
    }
}

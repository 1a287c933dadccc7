//! Background registry: speaker name → background picture
//!
//! Built once from the configured picture list and shared read-only
//! afterwards. Later rows win over earlier rows with the same name, so a
//! later row with an empty picture turns a speaker's picture off. An empty
//! name is the unnamed speaker.

use std::collections::{BTreeSet, HashMap};

use msgbg_common::BackgroundEntry;

use crate::assets::AssetProvider;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackgroundRegistry {
    pictures: HashMap<String, String>,
}

impl BackgroundRegistry {
    /// Build from configuration rows.
    ///
    /// Rows missing a name or picture field are skipped. Empty strings are
    /// kept as given.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a BackgroundEntry>) -> Self {
        let mut pictures = HashMap::new();
        let mut skipped = 0usize;

        for entry in entries {
            match (entry.name.as_deref(), entry.picture_name.as_deref()) {
                (Some(name), Some(picture)) => {
                    if let Some(previous) = pictures.insert(name.to_string(), picture.to_string()) {
                        tracing::debug!(
                            "Background for '{}' replaced: {} -> {}",
                            name,
                            previous,
                            picture
                        );
                    }
                }
                _ => {
                    skipped += 1;
                    tracing::debug!("Skipping incomplete background entry: {:?}", entry);
                }
            }
        }

        tracing::info!(
            "Background registry: {} speakers ({} entries skipped)",
            pictures.len(),
            skipped
        );
        Self { pictures }
    }

    /// Picture registered for a speaker. May be empty, meaning the
    /// speaker's picture was switched off.
    pub fn lookup(&self, speaker_name: &str) -> Option<&str> {
        self.pictures.get(speaker_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pictures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pictures.is_empty()
    }

    /// Every distinct non-empty picture id, sorted
    pub fn image_ids(&self) -> Vec<&str> {
        let ids: BTreeSet<&str> = self
            .pictures
            .values()
            .map(String::as_str)
            .filter(|id| !id.is_empty())
            .collect();
        ids.into_iter().collect()
    }

    /// Ask the asset provider to start loading every registered picture
    pub fn preload_all(&self, assets: &mut dyn AssetProvider) {
        for id in self.image_ids() {
            tracing::trace!("Preloading background picture '{}'", id);
            assets.preload(id);
        }
    }
}

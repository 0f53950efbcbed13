//! Parsed image catalog.

mod image;

use std::collections::HashSet;

use tracing::{debug, warn};

pub use image::{Image, ImageKind};

use crate::{error::FilenameError, manifest::CatalogEntry};

/// Every screenshot available to a session. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    images: Vec<Image>,
    rejected: Vec<FilenameError>,
}

impl Catalog {
    /// Parse manifest entries, skipping malformed or duplicate filenames.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut seen = HashSet::new();
        let mut images = Vec::new();
        let mut rejected = Vec::new();

        for entry in entries {
            let filename = entry.filename.trim();
            if !seen.insert(filename.to_string()) {
                debug!(filename, "Skipping duplicate catalog entry");
                continue;
            }
            match Image::parse(filename) {
                Ok(image) => images.push(image),
                Err(err) => {
                    warn!("Skipping catalog entry: {err}");
                    rejected.push(err);
                }
            }
        }

        Self { images, rejected }
    }

    /// Build a catalog from already parsed images.
    pub fn from_images(images: Vec<Image>) -> Self {
        Self {
            images,
            rejected: Vec::new(),
        }
    }

    /// All accepted images in manifest order.
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// Entries that were dropped at load time.
    pub fn rejected(&self) -> &[FilenameError] {
        &self.rejected
    }

    /// Number of accepted images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// True when no image was accepted.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Look an image up by filename.
    pub fn get(&self, filename: &str) -> Option<&Image> {
        self.images.iter().find(|image| image.filename() == filename)
    }

    /// Number of distinct sites that have both a real and a fake screenshot.
    pub fn playable_sites(&self) -> usize {
        let real: HashSet<&str> = self
            .images
            .iter()
            .filter(|image| image.is_real())
            .map(Image::site)
            .collect();
        self.images
            .iter()
            .filter(|image| !image.is_real())
            .map(Image::site)
            .filter(|site| real.contains(site))
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<CatalogEntry> {
        names.iter().map(|name| CatalogEntry::new(*name)).collect()
    }

    #[test]
    fn skips_malformed_and_duplicate_entries() {
        let catalog = Catalog::from_entries(entries(&[
            "real_BankA_easy.jpg",
            "fake_BankA_easy.jpg",
            "real_BankA_easy.jpg",
            "broken.jpg",
            "other_ShopB_hard.jpg",
        ]));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.rejected().len(), 2);
        assert!(catalog.get("fake_BankA_easy.jpg").is_some());
        assert!(catalog.get("broken.jpg").is_none());
    }

    #[test]
    fn counts_sites_with_both_kinds() {
        let catalog = Catalog::from_entries(entries(&[
            "real_BankA_easy.jpg",
            "fake_BankA_easy.jpg",
            "real_ShopB_hard.jpg",
            "fake_MailC_hard.jpg",
        ]));
        assert_eq!(catalog.playable_sites(), 1);
    }
}

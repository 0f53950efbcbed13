use std::collections::HashSet;

use tracing::debug;

use crate::{
    catalog::{Catalog, Image},
    rng::GameRng,
};

use super::pair::Pair;

/// Filenames already shown in the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedSet {
    filenames: HashSet<String>,
}

impl UsedSet {
    /// Mark both images of a shown pair.
    pub fn insert_pair(&mut self, pair: &Pair) {
        for filename in pair.filenames() {
            self.filenames.insert(filename.to_string());
        }
    }

    /// Whether the filename was already shown.
    pub fn contains(&self, filename: &str) -> bool {
        self.filenames.contains(filename)
    }

    /// Number of filenames shown.
    pub fn len(&self) -> usize {
        self.filenames.len()
    }

    /// True at the start of a session.
    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }

    /// Forget everything; used on restart.
    pub fn clear(&mut self) {
        self.filenames.clear();
    }
}

/// Draw the next pair, or `None` when no unused real/fake pair of one site remains.
///
/// The real image is drawn uniformly among unused real images that still
/// have an unused fake of the same site; the fake is drawn uniformly among
/// those partners. Display order is a fair coin flip. `used` is not
/// modified: the caller records the pair once it has actually been shown.
pub fn select_pair(catalog: &Catalog, used: &UsedSet, rng: &mut GameRng) -> Option<Pair> {
    let (real, fake): (Vec<&Image>, Vec<&Image>) = catalog
        .images()
        .iter()
        .filter(|image| !used.contains(image.filename()))
        .partition(|image| image.is_real());

    if real.is_empty() || fake.is_empty() {
        debug!(real = real.len(), fake = fake.len(), "Catalog exhausted");
        return None;
    }

    let candidates: Vec<&Image> = real
        .into_iter()
        .filter(|genuine| fake.iter().any(|phish| phish.site() == genuine.site()))
        .collect();
    let Some(genuine) = rng.choose(&candidates).copied() else {
        debug!("No unused real image has a matching fake");
        return None;
    };

    let partners: Vec<&Image> = fake
        .into_iter()
        .filter(|phish| phish.site() == genuine.site())
        .collect();
    let phish = rng.choose(&partners).copied()?;

    let (left, right) = if rng.flip() {
        (genuine.clone(), phish.clone())
    } else {
        (phish.clone(), genuine.clone())
    };
    Pair::new(left, right).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{manifest::CatalogEntry, round::Side};

    fn catalog(names: &[&str]) -> Catalog {
        Catalog::from_entries(names.iter().map(|name| CatalogEntry::new(*name)))
    }

    fn sample() -> Catalog {
        catalog(&[
            "real_BankA_easy.jpg",
            "fake_BankA_easy.jpg",
            "real_ShopB_hard.jpg",
            "fake_ShopB_hard.jpg",
        ])
    }

    #[test]
    fn picks_matching_pair() {
        let catalog = sample();
        let used = UsedSet::default();
        for seed in 0..32 {
            let pair = select_pair(&catalog, &used, &mut GameRng::new(seed)).expect("pair");
            let [left, right] = pair.images();
            assert_eq!(left.site_name(), right.site_name());
            assert_ne!(left.is_real(), right.is_real());
            assert!(["BankA", "ShopB"].contains(&left.site_name()));
        }
    }

    #[test]
    fn both_orders_occur() {
        let catalog = sample();
        let used = UsedSet::default();
        let sides: HashSet<_> = (0..64)
            .filter_map(|seed| select_pair(&catalog, &used, &mut GameRng::new(seed)))
            .map(|pair| format!("{:?}", pair.genuine_side()))
            .collect();
        assert!(sides.contains(&format!("{:?}", Side::Left)));
        assert!(sides.contains(&format!("{:?}", Side::Right)));
    }

    #[test]
    fn same_seed_same_pair() {
        let catalog = sample();
        let used = UsedSet::default();
        let first = select_pair(&catalog, &used, &mut GameRng::new(11));
        let second = select_pair(&catalog, &used, &mut GameRng::new(11));
        assert_eq!(first, second);
    }

    #[test]
    fn exhausted_catalog_always_returns_none() {
        let catalog = sample();
        let mut used = UsedSet::default();
        let mut rng = GameRng::new(3);
        while let Some(pair) = select_pair(&catalog, &used, &mut rng) {
            used.insert_pair(&pair);
        }
        assert_eq!(used.len(), 4);
        for _ in 0..10 {
            assert!(select_pair(&catalog, &used, &mut rng).is_none());
        }
    }

    #[test]
    fn none_when_one_kind_is_missing() {
        let only_real = catalog(&["real_BankA_easy.jpg", "real_ShopB_hard.jpg"]);
        assert!(select_pair(&only_real, &UsedSet::default(), &mut GameRng::new(0)).is_none());
        let empty = Catalog::default();
        assert!(select_pair(&empty, &UsedSet::default(), &mut GameRng::new(0)).is_none());
    }

    #[test]
    fn orphan_real_images_are_never_paired() {
        let catalog = catalog(&[
            "real_Lonely_easy.jpg",
            "real_BankA_easy.jpg",
            "fake_BankA_easy.jpg",
        ]);
        for seed in 0..32 {
            let pair = select_pair(&catalog, &UsedSet::default(), &mut GameRng::new(seed))
                .expect("BankA pair is available");
            assert_eq!(pair.site_name(), "BankA");
        }
    }

    #[test]
    fn fails_closed_without_partner() {
        let catalog = catalog(&["real_BankA_easy.jpg", "fake_ShopB_easy.jpg"]);
        assert!(select_pair(&catalog, &UsedSet::default(), &mut GameRng::new(5)).is_none());
    }
}

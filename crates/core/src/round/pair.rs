use serde::{Deserialize, Serialize};

use crate::{catalog::Image, error::PairError};

/// Screen position of an image within a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// First image.
    Left,
    /// Second image.
    Right,
}

impl Side {
    fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// One real and one fake screenshot of the same site, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    images: [Image; 2],
}

impl Pair {
    /// Validate and build a pair. Order is preserved as given.
    pub fn new(left: Image, right: Image) -> Result<Self, PairError> {
        if left.is_real() == right.is_real() {
            return Err(PairError::SameKind {
                first: left.filename().to_string(),
                second: right.filename().to_string(),
            });
        }
        if left.site() != right.site() {
            return Err(PairError::SiteMismatch {
                first: left.site().to_string(),
                second: right.site().to_string(),
            });
        }
        Ok(Self {
            images: [left, right],
        })
    }

    /// Image shown on the given side.
    pub fn get(&self, side: Side) -> &Image {
        &self.images[side.index()]
    }

    /// Both images, left first.
    pub fn images(&self) -> &[Image; 2] {
        &self.images
    }

    /// Side holding the genuine screenshot.
    pub fn genuine_side(&self) -> Side {
        if self.images[0].is_real() {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Display name shared by both images.
    pub fn site_name(&self) -> &str {
        self.images[0].site_name()
    }

    /// Filenames of both images, left first.
    pub fn filenames(&self) -> [&str; 2] {
        [self.images[0].filename(), self.images[1].filename()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(name: &str) -> Image {
        Image::parse(name).unwrap()
    }

    #[test]
    fn accepts_real_and_fake_of_same_site() {
        let pair = Pair::new(image("fake_BankA_easy.jpg"), image("real_BankA_easy.jpg")).unwrap();
        assert_eq!(pair.genuine_side(), Side::Right);
        assert_eq!(pair.get(Side::Left).filename(), "fake_BankA_easy.jpg");
        assert_eq!(pair.site_name(), "BankA");
    }

    #[test]
    fn rejects_two_of_a_kind() {
        let err =
            Pair::new(image("real_BankA_easy.jpg"), image("real_BankA_hard.jpg")).unwrap_err();
        assert!(matches!(err, PairError::SameKind { .. }));
    }

    #[test]
    fn rejects_mismatched_sites() {
        let err =
            Pair::new(image("real_BankA_easy.jpg"), image("fake_ShopB_easy.jpg")).unwrap_err();
        assert!(matches!(err, PairError::SiteMismatch { .. }));
    }
}

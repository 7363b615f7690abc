//! Session-related types.
//!
//! The session doubles as the visitor's local storage: basket collections are
//! kept in it as raw JSON strings under the core storage keys, next to a
//! one-shot flash used for button feedback.

use serde::{Deserialize, Serialize};
use ugly_things_core::ProductId;

/// One-shot feedback shown on the next rendered page, then discarded.
///
/// The button highlight it triggers fades out in CSS (1s for "Added!", 0.3s
/// for the favorite heart).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Flash {
    /// A product was added to the cart.
    AddedToCart { id: ProductId },
    /// A product was favorited or unfavorited.
    FavoriteToggled { id: ProductId, added: bool },
    /// A plain notice such as "Your cart is empty!".
    Notice { message: String },
}

impl Flash {
    /// Whether this flash is the "Added!" feedback for `id`.
    #[must_use]
    pub fn added_to_cart(&self, id: ProductId) -> bool {
        matches!(self, Self::AddedToCart { id: flashed } if *flashed == id)
    }

    /// Whether this flash is the favorite-toggle feedback for `id`.
    #[must_use]
    pub fn favorite_toggled(&self, id: ProductId) -> bool {
        matches!(self, Self::FavoriteToggled { id: flashed, .. } if *flashed == id)
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Notice { message } => Some(message),
            _ => None,
        }
    }
}

/// Session keys that are not basket storage keys.
pub mod keys {
    /// Key for the pending one-shot [`Flash`](super::Flash).
    pub const FLASH: &str = "flash";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_matches_product() {
        let flash = Flash::AddedToCart {
            id: ProductId::new(2),
        };
        assert!(flash.added_to_cart(ProductId::new(2)));
        assert!(!flash.added_to_cart(ProductId::new(3)));
        assert!(!flash.favorite_toggled(ProductId::new(2)));
        assert!(flash.notice().is_none());
    }

    #[test]
    fn test_flash_serialization_is_tagged() {
        let flash = Flash::FavoriteToggled {
            id: ProductId::new(6),
            added: true,
        };
        let json = serde_json::to_value(&flash).unwrap();
        assert_eq!(json["kind"], "favorite_toggled");
        assert_eq!(json["id"], 6);

        let back: Flash = serde_json::from_value(json).unwrap();
        assert_eq!(back, flash);
    }
}

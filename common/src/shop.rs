#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use tracing::info;

use crate::constants::*;

// ============================================================================
// Shop Items
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum ShopItem {
    BlueCharacter,
    RedCharacter,
    ExtraShield,
    DoubleCoins,
}

impl ShopItem {
    pub const ALL: [Self; 4] = [Self::BlueCharacter, Self::RedCharacter, Self::ExtraShield, Self::DoubleCoins];

    #[must_use]
    pub const fn price(self) -> u32 {
        match self {
            Self::BlueCharacter => PRICE_BLUE_CHARACTER,
            Self::RedCharacter => PRICE_RED_CHARACTER,
            Self::ExtraShield => PRICE_EXTRA_SHIELD,
            Self::DoubleCoins => PRICE_DOUBLE_COINS,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::BlueCharacter => 0,
            Self::RedCharacter => 1,
            Self::ExtraShield => 2,
            Self::DoubleCoins => 3,
        }
    }
}

// Player look reported to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum Skin {
    #[default]
    Default,
    Blue,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased,
    InsufficientCoins,
    AlreadyOwned,
}

// ============================================================================
// Shop
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Shop {
    owned: [bool; 4],
}

impl Shop {
    #[must_use]
    pub const fn owns(&self, item: ShopItem) -> bool {
        self.owned[item.index()]
    }

    // Debit `coins` and mark the item owned. Rejections leave coins untouched.
    pub fn buy(&mut self, item: ShopItem, coins: &mut u32) -> PurchaseOutcome {
        if self.owns(item) {
            return PurchaseOutcome::AlreadyOwned;
        }
        if *coins < item.price() {
            return PurchaseOutcome::InsufficientCoins;
        }
        *coins -= item.price();
        self.owned[item.index()] = true;
        info!(?item, remaining = *coins, "item purchased");
        PurchaseOutcome::Purchased
    }

    // Whether the shop would accept the purchase right now
    #[must_use]
    pub const fn can_buy(&self, item: ShopItem, coins: u32) -> bool {
        !self.owns(item) && coins >= item.price()
    }

    #[must_use]
    pub const fn coin_multiplier(&self) -> u32 {
        if self.owns(ShopItem::DoubleCoins) {
            DOUBLE_COIN_MULTIPLIER
        } else {
            1
        }
    }

    // Red wins when both characters are owned
    #[must_use]
    pub const fn skin(&self) -> Skin {
        if self.owns(ShopItem::RedCharacter) {
            Skin::Red
        } else if self.owns(ShopItem::BlueCharacter) {
            Skin::Blue
        } else {
            Skin::Default
        }
    }
}

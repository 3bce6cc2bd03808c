//! Predefined event categories and their valid event types.
//!
//! The six categories form a closed taxonomy: a typed entry point on the
//! client validates the event type against its category's fixed set before
//! a builder is handed out. Custom events bypass the taxonomy entirely.

use serde::{Deserialize, Serialize};

/// Event-type string constants, grouped per category.
///
/// Call sites use these instead of bare literals so a typo fails at the
/// taxonomy check in one obvious place.
pub mod types {
    /// `user` category events.
    pub mod user {
        /// Session opened.
        pub const SESSION_START: &str = "session_start";
        /// Session closed.
        pub const SESSION_END: &str = "session_end";
        /// Authenticated login.
        pub const USER_LOGIN: &str = "user_login";
        /// Logout back to anonymous.
        pub const USER_LOGOUT: &str = "user_logout";
        /// Account registration.
        pub const USER_REGISTER: &str = "user_register";
    }

    /// `gameplay` category events.
    pub mod gameplay {
        /// Level entered.
        pub const LEVEL_START: &str = "level_start";
        /// Level finished or abandoned.
        pub const LEVEL_END: &str = "level_end";
        /// Player leveled up.
        pub const LEVEL_UP: &str = "level_up";
        /// Match/run started.
        pub const GAME_START: &str = "game_start";
        /// Match/run ended.
        pub const GAME_END: &str = "game_end";
        /// Boss encounter.
        pub const BOSS_FIGHT: &str = "boss_fight";
    }

    /// `economy` category events.
    pub mod economy {
        /// Soft/hard currency credited.
        pub const CURRENCY_EARNED: &str = "currency_earned";
        /// Currency debited.
        pub const CURRENCY_SPENT: &str = "currency_spent";
        /// Item bought with in-game currency.
        pub const ITEM_PURCHASED: &str = "item_purchased";
        /// Item sold back.
        pub const ITEM_SOLD: &str = "item_sold";
        /// Shop screen opened.
        pub const SHOP_VIEWED: &str = "shop_viewed";
    }

    /// `progression` category events.
    pub mod progression {
        /// Tutorial finished.
        pub const TUTORIAL_COMPLETE: &str = "tutorial_complete";
        /// Achievement unlocked.
        pub const ACHIEVEMENT_UNLOCKED: &str = "achievement_unlocked";
        /// Named milestone reached.
        pub const MILESTONE_REACHED: &str = "milestone_reached";
        /// Quest turned in.
        pub const QUEST_COMPLETED: &str = "quest_completed";
    }

    /// `ad` category events.
    pub mod ad {
        /// Impression shown to completion.
        pub const AD_VIEWED: &str = "ad_viewed";
        /// Ad clicked through.
        pub const AD_CLICKED: &str = "ad_clicked";
        /// Rewarded ad completed.
        pub const AD_REWARDED: &str = "ad_rewarded";
        /// Ad failed to load or play.
        pub const AD_FAILED: &str = "ad_failed";
    }

    /// `iap` category events.
    pub mod iap {
        /// Real-money purchase completed.
        pub const PURCHASE: &str = "purchase";
        /// Purchase failed or was cancelled.
        pub const PURCHASE_FAILED: &str = "purchase_failed";
        /// Prior purchase restored.
        pub const PURCHASE_RESTORED: &str = "purchase_restored";
        /// Subscription began.
        pub const SUBSCRIPTION_STARTED: &str = "subscription_started";
        /// Subscription cancelled.
        pub const SUBSCRIPTION_CANCELLED: &str = "subscription_cancelled";
    }
}

/// The six predefined event categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    /// Session lifecycle and account events.
    User,
    /// Core play-loop events.
    Gameplay,
    /// In-game currency and item flow.
    Economy,
    /// Long-term player progression.
    Progression,
    /// Ad impressions and rewards.
    Ad,
    /// Real-money purchases.
    Iap,
}

impl EventCategory {
    /// Wire name of the category.
    pub fn name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Gameplay => "gameplay",
            Self::Economy => "economy",
            Self::Progression => "progression",
            Self::Ad => "ad",
            Self::Iap => "iap",
        }
    }

    /// The fixed set of event types valid for this category.
    pub fn valid_types(self) -> &'static [&'static str] {
        use types::{ad, economy, gameplay, iap, progression, user};
        match self {
            Self::User => &[
                user::SESSION_START,
                user::SESSION_END,
                user::USER_LOGIN,
                user::USER_LOGOUT,
                user::USER_REGISTER,
            ],
            Self::Gameplay => &[
                gameplay::LEVEL_START,
                gameplay::LEVEL_END,
                gameplay::LEVEL_UP,
                gameplay::GAME_START,
                gameplay::GAME_END,
                gameplay::BOSS_FIGHT,
            ],
            Self::Economy => &[
                economy::CURRENCY_EARNED,
                economy::CURRENCY_SPENT,
                economy::ITEM_PURCHASED,
                economy::ITEM_SOLD,
                economy::SHOP_VIEWED,
            ],
            Self::Progression => &[
                progression::TUTORIAL_COMPLETE,
                progression::ACHIEVEMENT_UNLOCKED,
                progression::MILESTONE_REACHED,
                progression::QUEST_COMPLETED,
            ],
            Self::Ad => &[ad::AD_VIEWED, ad::AD_CLICKED, ad::AD_REWARDED, ad::AD_FAILED],
            Self::Iap => &[
                iap::PURCHASE,
                iap::PURCHASE_FAILED,
                iap::PURCHASE_RESTORED,
                iap::SUBSCRIPTION_STARTED,
                iap::SUBSCRIPTION_CANCELLED,
            ],
        }
    }

    /// Membership test against this category's fixed set.
    ///
    /// An unknown type yields `false`, never an error.
    pub fn is_valid(self, event_type: &str) -> bool {
        self.valid_types().contains(&event_type)
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

//! Constants shared by the web app and the website builder

use serde::{Deserialize, Serialize};

pub use nav_core_auth::{TOKEN_REFRESH_MIN_VALIDITY, TOKEN_UPDATE_MIN_VALIDITY};

/// Navigation bar height
pub const NAV_HEIGHT_PX: u32 = 56;
pub const ICON_SIZE: u32 = 20;
pub const AVATAR_SIZE_MOBILE_PX: u32 = 32;
pub const AVATAR_SIZE_DESKTOP_PX: u32 = 40;
pub const DROPDOWN_OFFSET_PX: u32 = 8;

/// What a user menu entry does when picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserMenuAction {
    Upgrade,
    Account,
    Billing,
    Notifications,
    Signout,
}

/// An entry in the user dropdown menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Semantic icon id; each surface maps it to its own icon
    pub icon: &'static str,
    pub label: &'static str,
    pub action: UserMenuAction,
    /// Draw a separator above this entry
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub separator: bool,
}

pub const USER_MENU_ITEMS: [MenuItem; 5] = [
    MenuItem {
        icon: "sparkles",
        label: "Update plan",
        action: UserMenuAction::Upgrade,
        separator: false,
    },
    MenuItem {
        icon: "account",
        label: "Account settings",
        action: UserMenuAction::Account,
        separator: false,
    },
    MenuItem {
        icon: "credit-card",
        label: "Billing",
        action: UserMenuAction::Billing,
        separator: false,
    },
    MenuItem {
        icon: "notifications",
        label: "Notifications",
        action: UserMenuAction::Notifications,
        separator: false,
    },
    MenuItem {
        icon: "sign-out",
        label: "Sign out",
        action: UserMenuAction::Signout,
        separator: true,
    },
];

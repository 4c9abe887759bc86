//! Text helpers for user names

use nav_core_auth::UserInfo;

use crate::string_hash;

const HUE_MAX: i64 = 360;

fn upper_first(s: &str) -> String {
    s.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
}

/// Initials for an avatar.
///
/// * `"John Doe"` -> `"JD"`
/// * `"John"` -> `"JO"`
pub fn user_initials(name: &str) -> String {
    let parts: Vec<&str> = name.trim().split(' ').collect();
    if let [first, .., last] = parts.as_slice() {
        return format!("{}{}", upper_first(first), upper_first(last));
    }
    name.chars().take(2).collect::<String>().to_uppercase()
}

/// First letter of a name, upper-cased; empty for a blank name
pub fn first_initial(name: &str) -> String {
    upper_first(name.trim())
}

/// The name to show for a user, falling back through the full name, given
/// plus family name, preferred username and email, then `"Unknown"`.
pub fn user_display_name(user: Option<&UserInfo>) -> String {
    let Some(user) = user else {
        return "Unknown".to_string();
    };

    let non_empty = |value: &Option<String>| value.as_deref().filter(|v| !v.is_empty()).map(str::to_string);

    if let Some(name) = non_empty(&user.name) {
        return name;
    }
    if let (Some(given), Some(family)) = (&user.given_name, &user.family_name) {
        return format!("{} {}", given, family);
    }
    non_empty(&user.preferred_username)
        .or_else(|| non_empty(&user.email))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// A stable HSL colour for a name
pub fn avatar_color(name: &str) -> String {
    let hue = string_hash(name).abs() % HUE_MAX;
    format!("hsl({}, 65%, 50%)", hue)
}

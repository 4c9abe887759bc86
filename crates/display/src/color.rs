//! Fallback colours for avatars and company icons

use serde::Serialize;

use crate::string_hash;

/// A background/text colour pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPair {
    /// Tailwind background class, for the web app
    pub bg: &'static str,
    /// Tailwind text class, for the web app
    pub text: &'static str,
    /// Inline CSS background (oklch), for the website builder
    pub bg_value: &'static str,
    /// Inline CSS text colour (oklch), for the website builder
    pub text_value: &'static str,
}

const fn pair(
    bg: &'static str,
    text: &'static str,
    bg_value: &'static str,
    text_value: &'static str,
) -> ColorPair {
    ColorPair {
        bg,
        text,
        bg_value,
        text_value,
    }
}

const PRI_LIGHT: &str = "oklch(0.9636 0.0176 253.34)";
const PRI_DARK: &str = "oklch(0.658 0.1823 256.59)";
const SEC_LIGHT: &str = "oklch(0.9591 0.0147 290.31)";
const SEC_DARK: &str = "oklch(0.5913 0.1585 284.25)";
const TER_LIGHT: &str = "oklch(0.9703 0.0167 343.61)";
const TER_DARK: &str = "oklch(0.7279 0.1872 349.22)";
const SUC_LIGHT: &str = "oklch(0.977 0.0158 196.9)";
const SUC_DARK: &str = "oklch(0.7929 0.1183 194.35)";
const WAR_LIGHT: &str = "oklch(0.9796 0.0119 67.69)";
const WAR_DARK: &str = "oklch(0.8019 0.1167 62.39)";
const DAN_LIGHT: &str = "oklch(0.9656 0.0177 4.51)";
const DAN_DARK: &str = "oklch(0.6996 0.197366 10.4046)";

const DEFAULT_PAIR: ColorPair = pair("bg-pri-8", "text-pri-80", PRI_LIGHT, PRI_DARK);

/// Light background, darker text. Used for user avatars.
pub const AVATAR_COLOR_PAIRS: [ColorPair; 6] = [
    DEFAULT_PAIR,
    pair("bg-sec-8", "text-sec-80", SEC_LIGHT, SEC_DARK),
    pair("bg-ter-8", "text-ter-80", TER_LIGHT, TER_DARK),
    pair("bg-suc-8", "text-suc-80", SUC_LIGHT, SUC_DARK),
    pair("bg-war-8", "text-war-80", WAR_LIGHT, WAR_DARK),
    pair("bg-dan-8", "text-dan-80", DAN_LIGHT, DAN_DARK),
];

/// Dark background, lighter text. Used for company icons.
pub const COMPANY_COLOR_PAIRS: [ColorPair; 6] = [
    pair("bg-pri-80", "text-pri-8", PRI_DARK, PRI_LIGHT),
    pair("bg-sec-80", "text-sec-8", SEC_DARK, SEC_LIGHT),
    pair("bg-ter-80", "text-ter-8", TER_DARK, TER_LIGHT),
    pair("bg-suc-80", "text-suc-8", SUC_DARK, SUC_LIGHT),
    pair("bg-war-80", "text-war-8", WAR_DARK, WAR_LIGHT),
    pair("bg-dan-80", "text-dan-8", DAN_DARK, DAN_LIGHT),
];

/// Pick a colour pair for `s` from `pairs`; the same string always gets the
/// same pair. Empty input gets the first pair.
pub fn color_pair(s: &str, pairs: &[ColorPair]) -> ColorPair {
    let default = pairs.first().copied().unwrap_or(DEFAULT_PAIR);
    if s.is_empty() || pairs.is_empty() {
        return default;
    }

    let index = (string_hash(s).abs() % pairs.len() as i64) as usize;
    pairs.get(index).copied().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_pair_is_stable() {
        assert_eq!(color_pair("a", &AVATAR_COLOR_PAIRS).bg, "bg-sec-8");
        assert_eq!(color_pair("ab", &AVATAR_COLOR_PAIRS).bg, "bg-suc-8");
        assert_eq!(color_pair("ab", &COMPANY_COLOR_PAIRS).bg, "bg-suc-80");
        assert_eq!(
            color_pair("Ada Lovelace", &AVATAR_COLOR_PAIRS),
            color_pair("Ada Lovelace", &AVATAR_COLOR_PAIRS)
        );
    }

    #[test]
    fn test_color_pair_defaults() {
        assert_eq!(color_pair("", &AVATAR_COLOR_PAIRS), AVATAR_COLOR_PAIRS[0]);
        assert_eq!(color_pair("", &COMPANY_COLOR_PAIRS), COMPANY_COLOR_PAIRS[0]);
        assert_eq!(color_pair("anything", &[]), DEFAULT_PAIR);
    }

    #[test]
    fn test_color_pair_serializes_for_inline_styles() {
        let value = serde_json::to_value(COMPANY_COLOR_PAIRS[5]).unwrap();
        assert_eq!(value["bg"], "bg-dan-80");
        assert_eq!(value["bgValue"], "oklch(0.6996 0.197366 10.4046)");
        assert_eq!(value["textValue"], "oklch(0.9656 0.0177 4.51)");
    }
}

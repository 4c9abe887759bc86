//! Design tokens as inline CSS values, for surfaces without Tailwind

pub mod colors {
    pub const FOREGROUND: &str = "#1f1f1f";
    pub const BACKGROUND: &str = "oklch(0.9731 0 0)";
    pub const CARD: &str = "#ffffff";
    pub const CARD_FOREGROUND: &str = "oklch(0.145 0 0)";
    pub const MUTED_FOREGROUND: &str = "oklch(0.556 0 0)";
    pub const MUTED_FOREGROUND_WEAK: &str = "#9093a1";
    pub const BASE_BORDER: &str = "#e0e0e0";
    pub const ZERO_BRAND: &str = "oklch(0.6569 0.1759 286.1)";

    pub const SEC_100: &str = "oklch(0.4936 0.1986 280.27)";
    pub const SEC_4: &str = "oklch(0.9805 0.0066 286.28)";
    pub const SUC_100: &str = "oklch(0.7549 0.1264 194.16)";
    pub const INK_4: &str = "oklch(0.9642 0 0)";
    pub const INK_8: &str = "oklch(0.9401 0 0)";
    pub const INK_24: &str = "oklch(0.8141 0 0)";
    pub const INK_40: &str = "oklch(0.683 0 0)";
    pub const INK_64: &str = "oklch(0.4748 0 0)";
}

pub mod fonts {
    pub const SANS: &str = "'DM Sans', system-ui, -apple-system, sans-serif";
}

pub mod radii {
    pub const SM: &str = "4px";
    pub const MD: &str = "8px";
    pub const LG: &str = "10px";
    pub const FULL: &str = "9999px";
}

//! Human-readable labels for feature and category keys

/// Label for each feature key
pub const FEATURE_LABELS: &[(&str, &str)] = &[
    ("onboarding_setup", "Onboarding & setup"),
    ("asset_map_scoping", "Asset map & scoping"),
    ("continuous_recon", "Continuous recon"),
    ("hacker_marketplace", "Hacker marketplace"),
    ("cvd_ai_triage", "CVD AI triage"),
    ("bug_bounty_ai_triage", "Bug bounty AI triage"),
    ("ai_pentest_reporting", "AI pentest reporting"),
    ("community_pentesting", "Community pentesting"),
    ("community_peer_review", "Community peer review"),
    ("human_triage", "Human triage"),
    ("standard", "Standard reports"),
    ("management_dashboards", "Management dashboards"),
];

/// Label for each feature category
pub const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("platform", "Platform"),
    ("services", "Services"),
    ("hacker_in_the_loop", "Hacker in the Loop"),
    ("reporting", "Reporting"),
];

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, label)| *label)
}

/// The feature's label, or the key with underscores as spaces
pub fn feature_label(key: &str) -> String {
    lookup(FEATURE_LABELS, key)
        .map(str::to_string)
        .unwrap_or_else(|| key.replace('_', " "))
}

/// The category's label, or the key itself
pub fn category_label(key: &str) -> String {
    lookup(CATEGORY_LABELS, key)
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

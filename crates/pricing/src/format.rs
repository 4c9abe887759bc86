//! Display values derived from pricing data

use crate::labels::{category_label, feature_label};
use crate::types::{FeatureValue, PricingPackage};

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

fn currency_symbol(currency: &str) -> &str {
    match currency.to_ascii_uppercase().as_str() {
        "EUR" => "€",
        "USD" => "$",
        "GBP" => "£",
        _ => currency,
    }
}

/// Whole-unit price in German formatting, e.g. `3000.0, "EUR"` -> `"3.000 €"`
/// (with a non-breaking space).
pub fn format_price_eu(amount: f64, currency: &str) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{}", rounded.abs() as u64);
    format!(
        "{}{}\u{a0}{}",
        sign,
        group_digits(&digits, '.'),
        currency_symbol(currency)
    )
}

/// Credit count in English formatting, e.g. `1000` -> `"1,000"`
pub fn format_credits(credits: u64) -> String {
    group_digits(&credits.to_string(), ',')
}

fn title_case(key: &str) -> String {
    let mut titled = String::with_capacity(key.len());
    let mut at_word_start = true;
    for c in key.chars() {
        let c = if c == '_' { ' ' } else { c };
        if at_word_start && c.is_alphanumeric() {
            titled.extend(c.to_uppercase());
        } else {
            titled.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    titled
}

/// Title-cased names of every enabled feature, in declaration order
pub fn feature_summary(package: &PricingPackage) -> Vec<String> {
    package
        .features
        .categories()
        .into_iter()
        .flat_map(|category| category.features)
        .filter(|(_, value)| value.is_enabled())
        .map(|(key, _)| title_case(key))
        .collect()
}

/// The card description used when none is given
pub fn default_description(package: &PricingPackage) -> String {
    format!("The {} plan includes:", package.name.to_lowercase())
}

/// One row of the comparison table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub key: &'static str,
    pub label: String,
    /// One value per package, in package order
    pub values: Vec<FeatureValue>,
}

/// A labelled group of comparison rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonCategory {
    pub key: &'static str,
    pub label: String,
    pub rows: Vec<ComparisonRow>,
}

/// Rows of the feature comparison table; empty without packages
pub fn comparison_rows(packages: &[PricingPackage]) -> Vec<ComparisonCategory> {
    let Some(first) = packages.first() else {
        return Vec::new();
    };

    let per_package: Vec<_> = packages
        .iter()
        .map(|package| package.features.categories())
        .collect();

    first
        .features
        .categories()
        .into_iter()
        .enumerate()
        .map(|(category_index, category)| ComparisonCategory {
            key: category.key,
            label: category_label(category.key),
            rows: category
                .features
                .iter()
                .enumerate()
                .map(|(feature_index, &(key, _))| ComparisonRow {
                    key,
                    label: feature_label(key),
                    values: per_package
                        .iter()
                        .map(|categories| categories[category_index].features[feature_index].1)
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

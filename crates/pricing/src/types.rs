//! Types matching `data/pricing/packages.json`

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PricingError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformFeatures {
    pub onboarding_setup: bool,
    pub asset_map_scoping: bool,
    pub continuous_recon: bool,
    pub hacker_marketplace: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceFeatures {
    pub cvd_ai_triage: bool,
    pub bug_bounty_ai_triage: bool,
    pub ai_pentest_reporting: bool,
}

/// Credit-based features; `None` means not available on the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HackerInTheLoopFeatures {
    pub community_pentesting: Option<u64>,
    pub community_peer_review: Option<u64>,
    pub human_triage: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingFeatures {
    pub standard: bool,
    pub management_dashboards: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingFeatures {
    pub platform: PlatformFeatures,
    pub services: ServiceFeatures,
    pub hacker_in_the_loop: HackerInTheLoopFeatures,
    pub reporting: ReportingFeatures,
}

/// One cell of the feature matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureValue {
    Included,
    NotIncluded,
    Credits(u64),
    Unavailable,
}

impl FeatureValue {
    /// Included, or a positive number of credits
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Included => true,
            Self::Credits(credits) => *credits > 0,
            Self::NotIncluded | Self::Unavailable => false,
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        if value {
            Self::Included
        } else {
            Self::NotIncluded
        }
    }
}

impl From<Option<u64>> for FeatureValue {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::Unavailable, Self::Credits)
    }
}

/// A feature category with its features in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCategory {
    pub key: &'static str,
    pub features: Vec<(&'static str, FeatureValue)>,
}

impl PricingFeatures {
    /// Every category and feature, in the order the data file declares them
    pub fn categories(&self) -> Vec<FeatureCategory> {
        let platform = &self.platform;
        let services = &self.services;
        let hitl = &self.hacker_in_the_loop;
        let reporting = &self.reporting;

        vec![
            FeatureCategory {
                key: "platform",
                features: vec![
                    ("onboarding_setup", platform.onboarding_setup.into()),
                    ("asset_map_scoping", platform.asset_map_scoping.into()),
                    ("continuous_recon", platform.continuous_recon.into()),
                    ("hacker_marketplace", platform.hacker_marketplace.into()),
                ],
            },
            FeatureCategory {
                key: "services",
                features: vec![
                    ("cvd_ai_triage", services.cvd_ai_triage.into()),
                    ("bug_bounty_ai_triage", services.bug_bounty_ai_triage.into()),
                    ("ai_pentest_reporting", services.ai_pentest_reporting.into()),
                ],
            },
            FeatureCategory {
                key: "hacker_in_the_loop",
                features: vec![
                    ("community_pentesting", hitl.community_pentesting.into()),
                    ("community_peer_review", hitl.community_peer_review.into()),
                    ("human_triage", hitl.human_triage.into()),
                ],
            },
            FeatureCategory {
                key: "reporting",
                features: vec![
                    ("standard", reporting.standard.into()),
                    ("management_dashboards", reporting.management_dashboards.into()),
                ],
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPackage {
    pub id: String,
    pub name: String,
    pub monthly_price: f64,
    pub included_credits_yearly: u64,
    pub bug_bounty_handling_fee: String,
    /// Curated highlight lines shown on the pricing card
    pub card_highlights: Vec<String>,
    pub features: PricingFeatures,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingData {
    pub last_updated: String,
    pub currency: String,
    pub billing_cycle: String,
    pub packages: Vec<PricingPackage>,
}

impl PricingData {
    /// Parse pricing data from JSON
    pub fn parse(json: &str) -> Result<Self, PricingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load pricing data from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PricingError> {
        let json = fs::read_to_string(path)?;
        Self::parse(&json)
    }

    pub fn package(&self, id: &str) -> Option<&PricingPackage> {
        self.packages.iter().find(|package| package.id == id)
    }
}

use crate::utils::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header names of the launch data file.
pub const COLUMN_LAUNCH_SITE: &str = "Launch Site";
pub const COLUMN_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COLUMN_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COLUMN_CLASS: &str = "class";

pub const REQUIRED_COLUMNS: [&str; 4] = [
    COLUMN_LAUNCH_SITE,
    COLUMN_PAYLOAD_MASS,
    COLUMN_BOOSTER_CATEGORY,
    COLUMN_CLASS,
];

/// Value of the selector's "every site" option.
pub const ALL_SITES: &str = "ALL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OutcomeClass {
    Failure,
    Success,
}

impl OutcomeClass {
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Failure => 0,
            Self::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Failure => "Failure",
            Self::Success => "Success",
        }
    }
}

impl TryFrom<u8> for OutcomeClass {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Failure),
            1 => Ok(Self::Success),
            other => Err(format!("class must be 0 or 1, got {}", other)),
        }
    }
}

impl From<OutcomeClass> for u8 {
    fn from(value: OutcomeClass) -> Self {
        value.as_u8()
    }
}

/// One launch row. Field names follow the input file headers so the same type
/// reads the source file and writes exported subsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
    #[serde(rename = "class")]
    pub outcome: OutcomeClass,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        booster_version_category: impl Into<String>,
        outcome: OutcomeClass,
    ) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            booster_version_category: booster_version_category.into(),
            outcome,
        }
    }

    /// Checks the invariants a loaded record must satisfy.
    pub fn check(&self) -> std::result::Result<(), String> {
        if self.site.trim().is_empty() {
            return Err("launch site is empty".to_string());
        }
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(format!(
                "payload mass must be a non-negative number, got {}",
                self.payload_mass_kg
            ));
        }
        Ok(())
    }
}

/// Current value of the site selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Parses a selector value. An empty value means no choice was made, which the
    /// dropdown treats as its default.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value.to_string())
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            Self::All => true,
            Self::Site(selected) => selected == site,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::All => ALL_SITES,
            Self::Site(site) => site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl Serialize for SiteSelection {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value())
    }
}

impl<'de> Deserialize<'de> for SiteSelection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Inclusive payload mass interval in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    min: f64,
    max: f64,
}

impl PayloadRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(DashError::InvalidRange {
                min,
                max,
                reason: "bounds must be finite".to_string(),
            });
        }
        if min > max {
            return Err(DashError::InvalidRange {
                min,
                max,
                reason: "minimum is above maximum".to_string(),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        payload_mass_kg >= self.min && payload_mass_kg <= self.max
    }

    /// Narrows this range to `bounds`. A range entirely outside collapses onto the
    /// nearest bound.
    pub fn clamp_to(&self, bounds: &PayloadRange) -> PayloadRange {
        let min = self.min.clamp(bounds.min, bounds.max);
        let max = self.max.clamp(bounds.min, bounds.max);
        PayloadRange { min, max }
    }
}

/// Selector option as shown in the dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub class: u8,
    pub booster_version_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub range: PayloadRange,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    /// Distinct booster categories in first-seen order; drives the legend.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for point in &self.points {
            if !seen.contains(&point.booster_version_category.as_str()) {
                seen.push(&point.booster_version_category);
            }
        }
        seen
    }
}

//! Destination cost metadata.
//!
//! The catalog is immutable configuration: resolved once at process start
//! (built-in table or a CSV override) and passed by reference into the
//! calculators. Unlisted countries resolve to a conservative default profile
//! and the lookup reports that a fallback was used.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::questionnaire::domain::VisaType;

/// Cost-of-stay metadata for one destination country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationProfile {
    pub country_code: String,
    pub country_name: String,
    pub daily_cost_tourist_usd: f64,
    pub daily_cost_student_usd: f64,
    pub annual_tuition_usd: f64,
}

impl DestinationProfile {
    pub fn daily_cost(&self, visa_type: VisaType) -> f64 {
        match visa_type {
            VisaType::Tourist => self.daily_cost_tourist_usd,
            VisaType::Student => self.daily_cost_student_usd,
        }
    }
}

/// Outcome of a catalog lookup.
#[derive(Debug, Clone, Copy)]
pub struct DestinationLookup<'a> {
    pub profile: &'a DestinationProfile,
    pub is_fallback: bool,
}

/// Immutable per-country cost catalog.
#[derive(Debug, Clone)]
pub struct DestinationCatalog {
    profiles: HashMap<String, DestinationProfile>,
    fallback: DestinationProfile,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog row: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog contains no destination rows")]
    Empty,
    #[error("catalog row for '{country_code}' has a non-positive cost")]
    InvalidCost { country_code: String },
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    country_code: String,
    country_name: String,
    daily_cost_tourist_usd: f64,
    daily_cost_student_usd: f64,
    annual_tuition_usd: f64,
}

impl DestinationCatalog {
    /// Catalog shipped with the binary. Figures are deliberately rounded
    /// planning estimates, not live cost-of-living data.
    pub fn builtin() -> Self {
        const TABLE: &[(&str, &str, f64, f64, f64)] = &[
            ("US", "United States", 100.0, 65.0, 28_000.0),
            ("GB", "United Kingdom", 95.0, 60.0, 24_000.0),
            ("CA", "Canada", 85.0, 55.0, 20_000.0),
            ("AU", "Australia", 90.0, 60.0, 22_000.0),
            ("DE", "Germany", 75.0, 45.0, 3_500.0),
            ("FR", "France", 80.0, 50.0, 4_000.0),
            ("ES", "Spain", 70.0, 45.0, 3_000.0),
            ("IT", "Italy", 75.0, 45.0, 3_500.0),
            ("NL", "Netherlands", 85.0, 55.0, 12_000.0),
            ("PL", "Poland", 55.0, 35.0, 4_500.0),
            ("CZ", "Czech Republic", 60.0, 35.0, 5_000.0),
            ("JP", "Japan", 85.0, 55.0, 9_000.0),
            ("KR", "South Korea", 70.0, 45.0, 7_000.0),
            ("AE", "United Arab Emirates", 110.0, 70.0, 18_000.0),
            ("TR", "Turkey", 55.0, 35.0, 5_000.0),
        ];

        let mut profiles = HashMap::with_capacity(TABLE.len());
        for (code, name, tourist, student, tuition) in TABLE {
            profiles.insert(
                (*code).to_string(),
                DestinationProfile {
                    country_code: (*code).to_string(),
                    country_name: (*name).to_string(),
                    daily_cost_tourist_usd: *tourist,
                    daily_cost_student_usd: *student,
                    annual_tuition_usd: *tuition,
                },
            );
        }

        Self {
            profiles,
            fallback: Self::default_profile(),
        }
    }

    /// Load a catalog override from CSV with the columns
    /// `country_code,country_name,daily_cost_tourist_usd,daily_cost_student_usd,annual_tuition_usd`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut profiles = HashMap::new();
        for row in csv_reader.deserialize::<CatalogRow>() {
            let row = row?;
            if row.daily_cost_tourist_usd <= 0.0 || row.daily_cost_student_usd <= 0.0 {
                return Err(CatalogError::InvalidCost {
                    country_code: row.country_code,
                });
            }
            let code = row.country_code.to_ascii_uppercase();
            profiles.insert(
                code.clone(),
                DestinationProfile {
                    country_code: code,
                    country_name: row.country_name,
                    daily_cost_tourist_usd: row.daily_cost_tourist_usd,
                    daily_cost_student_usd: row.daily_cost_student_usd,
                    annual_tuition_usd: row.annual_tuition_usd,
                },
            );
        }

        if profiles.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self {
            profiles,
            fallback: Self::default_profile(),
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Look up a destination, falling back to the conservative default for
    /// unlisted countries.
    pub fn resolve(&self, country_code: &str) -> DestinationLookup<'_> {
        match self.profiles.get(&country_code.to_ascii_uppercase()) {
            Some(profile) => DestinationLookup {
                profile,
                is_fallback: false,
            },
            None => DestinationLookup {
                profile: &self.fallback,
                is_fallback: true,
            },
        }
    }

    // Conservative on purpose: unknown destinations should not look cheaper
    // than any listed one.
    fn default_profile() -> DestinationProfile {
        DestinationProfile {
            country_code: "??".to_string(),
            country_name: "Unlisted destination".to_string(),
            daily_cost_tourist_usd: 100.0,
            daily_cost_student_usd: 65.0,
            annual_tuition_usd: 20_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_known_country() {
        let catalog = DestinationCatalog::builtin();
        let lookup = catalog.resolve("us");
        assert!(!lookup.is_fallback);
        assert_eq!(lookup.profile.country_name, "United States");
        assert_eq!(lookup.profile.daily_cost(VisaType::Tourist), 100.0);
    }

    #[test]
    fn unlisted_country_uses_fallback_profile() {
        let catalog = DestinationCatalog::builtin();
        let lookup = catalog.resolve("ZZ");
        assert!(lookup.is_fallback);
        assert!(lookup.profile.daily_cost_tourist_usd >= 100.0);
    }

    #[test]
    fn csv_override_parses_and_uppercases_codes() {
        let data = "country_code,country_name,daily_cost_tourist_usd,daily_cost_student_usd,annual_tuition_usd\n\
                    us,United States,120,70,30000\n";
        let catalog = DestinationCatalog::from_reader(data.as_bytes()).expect("catalog parses");
        let lookup = catalog.resolve("US");
        assert!(!lookup.is_fallback);
        assert_eq!(lookup.profile.daily_cost_tourist_usd, 120.0);
    }

    #[test]
    fn empty_csv_is_rejected() {
        let data = "country_code,country_name,daily_cost_tourist_usd,daily_cost_student_usd,annual_tuition_usd\n";
        match DestinationCatalog::from_reader(data.as_bytes()) {
            Err(CatalogError::Empty) => {}
            other => panic!("expected empty catalog error, got {other:?}"),
        }
    }

    #[test]
    fn non_positive_costs_are_rejected() {
        let data = "country_code,country_name,daily_cost_tourist_usd,daily_cost_student_usd,annual_tuition_usd\n\
                    XX,Nowhere,0,50,1000\n";
        match DestinationCatalog::from_reader(data.as_bytes()) {
            Err(CatalogError::InvalidCost { country_code }) => assert_eq!(country_code, "XX"),
            other => panic!("expected invalid cost error, got {other:?}"),
        }
    }
}

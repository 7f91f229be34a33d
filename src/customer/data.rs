//! Customer profile and allocation structures

use serde::{Deserialize, Serialize};

/// Gender of the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[serde(alias = "Male")]
    Male,
    #[serde(alias = "Female")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Tobacco use declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TobaccoUse {
    #[serde(alias = "Yes")]
    Yes,
    #[serde(alias = "No")]
    No,
}

impl TobaccoUse {
    pub fn is_user(&self) -> bool {
        matches!(self, TobaccoUse::Yes)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TobaccoUse::Yes => "yes",
            TobaccoUse::No => "no",
        }
    }
}

/// Demographic inputs for one illustration
///
/// Only the life insurance rate depends on these fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub age: u32,
    pub gender: Gender,
    pub tobacco_use: TobaccoUse,
}

impl CustomerProfile {
    pub fn new(age: u32, gender: Gender, tobacco_use: TobaccoUse) -> Self {
        Self {
            age,
            gender,
            tobacco_use,
        }
    }
}

/// Horizon bucket a slice of the customer's money is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizonBucket {
    /// Less than 1 year
    Short,
    /// 2 to 5 years
    Intermediate,
    /// 5+ years
    Long,
    /// Maybe never / leave on
    Never,
}

impl HorizonBucket {
    pub const ALL: [HorizonBucket; 4] = [
        HorizonBucket::Short,
        HorizonBucket::Intermediate,
        HorizonBucket::Long,
        HorizonBucket::Never,
    ];

    /// Tab heading shown on the results screen
    pub fn heading(&self) -> &'static str {
        match self {
            HorizonBucket::Short => "Short Term (Less than 1 year)",
            HorizonBucket::Intermediate => "Intermediate Term (2 to 5 years)",
            HorizonBucket::Long => "Long Term (5+ years)",
            HorizonBucket::Never => "Maybe Never / Leave On",
        }
    }
}

/// Four independent investment amounts, one per horizon bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub short_term: f64,
    pub intermediate: f64,
    pub long_term: f64,
    pub never: f64,
}

impl Allocation {
    pub fn new(short_term: f64, intermediate: f64, long_term: f64, never: f64) -> Self {
        Self {
            short_term,
            intermediate,
            long_term,
            never,
        }
    }

    /// Amount assigned to a bucket
    pub fn amount(&self, bucket: HorizonBucket) -> f64 {
        match bucket {
            HorizonBucket::Short => self.short_term,
            HorizonBucket::Intermediate => self.intermediate,
            HorizonBucket::Long => self.long_term,
            HorizonBucket::Never => self.never,
        }
    }

    pub fn total(&self) -> f64 {
        self.short_term + self.intermediate + self.long_term + self.never
    }
}

/// Everything the engine needs for one illustration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IllustrationInputs {
    pub profile: CustomerProfile,
    pub allocation: Allocation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_buckets_are_independent() {
        let allocation = Allocation::new(1_000.0, 2_000.0, 3_000.0, 4_000.0);

        assert_eq!(allocation.amount(HorizonBucket::Short), 1_000.0);
        assert_eq!(allocation.amount(HorizonBucket::Intermediate), 2_000.0);
        assert_eq!(allocation.amount(HorizonBucket::Long), 3_000.0);
        assert_eq!(allocation.amount(HorizonBucket::Never), 4_000.0);
        assert_eq!(allocation.total(), 10_000.0);
    }

    #[test]
    fn test_enum_wire_names() {
        let gender: Gender = serde_json::from_str("\"Female\"").unwrap();
        assert_eq!(gender, Gender::Female);
        assert_eq!(serde_json::to_string(&TobaccoUse::No).unwrap(), "\"no\"");
    }
}

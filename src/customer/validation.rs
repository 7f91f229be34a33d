//! Calculator form validation
//!
//! Errors are field-local values collected into a list so the form can show
//! them inline; nothing here panics or returns early on the first problem.

use super::data::{Allocation, CustomerProfile, Gender, IllustrationInputs, TobaccoUse};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Oldest age the calculator form accepts
pub const MAX_AGE: u32 = 120;

/// Form fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Age,
    Gender,
    TobaccoUse,
    ShortTerm,
    Intermediate,
    LongTerm,
    Never,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Age => "Customer Age",
            FormField::Gender => "Gender",
            FormField::TobaccoUse => "Tobacco Use",
            FormField::ShortTerm => "Short Term (Less than 1 year)",
            FormField::Intermediate => "Intermediate Term (2 to 5 years)",
            FormField::LongTerm => "Long Term (5+ years)",
            FormField::Never => "Maybe Never / Leave On",
        }
    }
}

/// A validation problem attached to one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

/// Raw calculator form values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub age: String,
    pub gender: String,
    pub tobacco_use: String,
    pub short_term: String,
    pub intermediate: String,
    pub long_term: String,
    pub never: String,
}

impl FormInput {
    /// Validate every field, returning all errors at once
    pub fn validate(&self) -> Result<IllustrationInputs, Vec<FieldError>> {
        let mut errors = Vec::new();

        let age = parse_age(&self.age).map_err(|e| errors.push(e)).ok();
        let gender = parse_gender(&self.gender).map_err(|e| errors.push(e)).ok();
        let tobacco_use = parse_tobacco(&self.tobacco_use)
            .map_err(|e| errors.push(e))
            .ok();

        let mut amount = |field: FormField, raw: &str| {
            parse_amount(field, raw).map_err(|e| errors.push(e)).ok()
        };
        let short_term = amount(FormField::ShortTerm, &self.short_term);
        let intermediate = amount(FormField::Intermediate, &self.intermediate);
        let long_term = amount(FormField::LongTerm, &self.long_term);
        let never = amount(FormField::Never, &self.never);

        match (age, gender, tobacco_use, short_term, intermediate, long_term, never) {
            (Some(age), Some(gender), Some(tobacco_use), Some(s), Some(i), Some(l), Some(n)) => {
                Ok(IllustrationInputs {
                    profile: CustomerProfile::new(age, gender, tobacco_use),
                    allocation: Allocation::new(s, i, l, n),
                })
            }
            _ => Err(errors),
        }
    }
}

fn parse_age(raw: &str) -> Result<u32, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(FormField::Age, "Age is required"));
    }
    let age: i64 = trimmed
        .parse()
        .map_err(|_| FieldError::new(FormField::Age, "Age must be a whole number"))?;
    if !(0..=MAX_AGE as i64).contains(&age) {
        return Err(FieldError::new(
            FormField::Age,
            format!("Age must be between 0 and {}", MAX_AGE),
        ));
    }
    Ok(age as u32)
}

fn parse_gender(raw: &str) -> Result<Gender, FieldError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        "" => Err(FieldError::new(FormField::Gender, "Gender is required")),
        _ => Err(FieldError::new(FormField::Gender, "Select male or female")),
    }
}

fn parse_tobacco(raw: &str) -> Result<TobaccoUse, FieldError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" => Ok(TobaccoUse::Yes),
        "no" => Ok(TobaccoUse::No),
        "" => Err(FieldError::new(FormField::TobaccoUse, "Tobacco use is required")),
        _ => Err(FieldError::new(FormField::TobaccoUse, "Select yes or no")),
    }
}

/// Parse a money amount, accepting a leading `$` and thousands separators
pub fn parse_amount(field: FormField, raw: &str) -> Result<f64, FieldError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return Err(FieldError::new(field, "Amount is required"));
    }
    let value: f64 = cleaned
        .parse()
        .map_err(|_| FieldError::new(field, "Amount must be a number"))?;
    if !value.is_finite() {
        return Err(FieldError::new(field, "Amount must be a number"));
    }
    if value < 0.0 {
        return Err(FieldError::new(field, "Amount cannot be negative"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> FormInput {
        FormInput {
            age: "45".into(),
            gender: "female".into(),
            tobacco_use: "no".into(),
            short_term: "$10,000".into(),
            intermediate: "25000".into(),
            long_term: "100,000".into(),
            never: "0".into(),
        }
    }

    #[test]
    fn test_valid_form() {
        let inputs = filled_form().validate().expect("form should validate");

        assert_eq!(inputs.profile.age, 45);
        assert_eq!(inputs.profile.gender, Gender::Female);
        assert_eq!(inputs.profile.tobacco_use, TobaccoUse::No);
        assert_eq!(inputs.allocation.short_term, 10_000.0);
        assert_eq!(inputs.allocation.long_term, 100_000.0);
        assert_eq!(inputs.allocation.never, 0.0);
    }

    #[test]
    fn test_errors_are_collected_per_field() {
        let mut form = filled_form();
        form.age = "130".into();
        form.gender = String::new();
        form.intermediate = "abc".into();
        form.never = "-5".into();

        let errors = form.validate().unwrap_err();
        let fields: Vec<FormField> = errors.iter().map(|e| e.field).collect();

        assert_eq!(
            fields,
            vec![
                FormField::Age,
                FormField::Gender,
                FormField::Intermediate,
                FormField::Never
            ]
        );
    }

    #[test]
    fn test_age_bounds_inclusive() {
        assert_eq!(parse_age("0").unwrap(), 0);
        assert_eq!(parse_age("120").unwrap(), 120);
        assert!(parse_age("-1").is_err());
        assert!(parse_age("30.5").is_err());
    }

    #[test]
    fn test_empty_amount_is_required() {
        let err = parse_amount(FormField::ShortTerm, "  ").unwrap_err();
        assert_eq!(err.message, "Amount is required");
    }
}

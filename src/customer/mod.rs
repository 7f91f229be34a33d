//! Customer inputs: demographic profile, horizon allocation, form validation
//! and shareable result tokens

mod data;
pub mod share;
pub mod validation;

pub use data::{Allocation, CustomerProfile, Gender, HorizonBucket, IllustrationInputs, TobaccoUse};
pub use validation::{FieldError, FormField, FormInput};

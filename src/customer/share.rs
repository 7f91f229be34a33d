//! Shareable result links
//!
//! The full input tuple is packed into a compact JSON object, base64-encoded
//! and embedded as the `/results/:data` path segment, so results can be
//! bookmarked without a backend.

use super::data::{Allocation, CustomerProfile, Gender, IllustrationInputs, TobaccoUse};
use super::validation::MAX_AGE;
use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use log::debug;
use serde::{Deserialize, Serialize};

/// Route prefix for shared results
pub const RESULTS_ROUTE: &str = "/results";

/// Route the presentation layer falls back to when a token carries no data
pub const CALCULATOR_ROUTE: &str = "/calculator";

/// Compact wire form of the inputs: single-letter keys keep links short
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompactInputs {
    a: u32,
    g: Gender,
    t: TobaccoUse,
    s: f64,
    i: f64,
    l: f64,
    n: f64,
}

impl From<&IllustrationInputs> for CompactInputs {
    fn from(inputs: &IllustrationInputs) -> Self {
        Self {
            a: inputs.profile.age,
            g: inputs.profile.gender,
            t: inputs.profile.tobacco_use,
            s: inputs.allocation.short_term,
            i: inputs.allocation.intermediate,
            l: inputs.allocation.long_term,
            n: inputs.allocation.never,
        }
    }
}

impl CompactInputs {
    fn into_inputs(self) -> Option<IllustrationInputs> {
        let amounts = [self.s, self.i, self.l, self.n];
        if amounts.iter().any(|v| !v.is_finite() || *v < 0.0) {
            debug!("Share token carries an invalid amount: {:?}", amounts);
            return None;
        }
        if self.a > MAX_AGE {
            debug!("Share token carries an out-of-range age: {}", self.a);
            return None;
        }
        Some(IllustrationInputs {
            profile: CustomerProfile::new(self.a, self.g, self.t),
            allocation: Allocation::new(self.s, self.i, self.l, self.n),
        })
    }
}

/// Encode inputs as a URL-safe share token
pub fn encode(inputs: &IllustrationInputs) -> String {
    let compact = CompactInputs::from(inputs);
    // Serializing plain numbers and unit enums cannot fail
    let json = serde_json::to_vec(&compact).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a share token
///
/// Returns `None` for anything malformed; the caller treats that as "no
/// data" and sends the user back to the calculator form. Tokens made with
/// the standard alphabet (as browsers' `btoa` produces) are accepted too.
pub fn decode(token: &str) -> Option<IllustrationInputs> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let bytes = [&URL_SAFE_NO_PAD, &URL_SAFE, &STANDARD]
        .iter()
        .find_map(|engine| engine.decode(token).ok());
    let Some(bytes) = bytes else {
        debug!("Share token is not valid base64");
        return None;
    };

    match serde_json::from_slice::<CompactInputs>(&bytes) {
        Ok(compact) => compact.into_inputs(),
        Err(e) => {
            debug!("Share token payload is not valid JSON: {}", e);
            None
        }
    }
}

/// Build the results path for a set of inputs
pub fn results_path(inputs: &IllustrationInputs) -> String {
    format!("{}/{}", RESULTS_ROUTE, encode(inputs))
}

/// Resolve a `/results/:data` segment to inputs or to the calculator route
pub fn route_for_token(token: Option<&str>) -> Result<IllustrationInputs, &'static str> {
    token.and_then(decode).ok_or(CALCULATOR_ROUTE)
}

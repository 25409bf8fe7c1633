use std::collections::HashSet;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::error::{DeskError, Result};

pub const TICKET_ID_PREFIX: &str = "T-";

const MIN_DIGITS: u32 = 4;
const MAX_DIGITS: u32 = 8;

static TICKET_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^T-[1-9][0-9]{3,7}$").expect("ticket ID pattern is valid"));

/// Generate a random number with exactly `digits` decimal digits (no leading zero)
fn random_digits(digits: u32) -> u64 {
    let low = 10u64.pow(digits - 1);
    let high = 10u64.pow(digits);
    rand::rng().random_range(low..high)
}

/// Generate a unique ticket ID with collision checking
///
/// IDs look like `T-4821`. Each width gets a fixed number of random attempts
/// against `existing`; when the four-digit space is crowded the generator
/// widens to five digits and so on up to eight.
pub fn generate_ticket_id(existing: &HashSet<&str>) -> Result<String> {
    const RETRIES_PER_LENGTH: u32 = 40;

    for digits in MIN_DIGITS..=MAX_DIGITS {
        for _ in 0..RETRIES_PER_LENGTH {
            let candidate = format!("{TICKET_ID_PREFIX}{}", random_digits(digits));
            if !existing.contains(candidate.as_str()) {
                return Ok(candidate);
            }
        }
        tracing::debug!("ticket ID space with {digits} digits is crowded, widening");
    }

    Err(DeskError::IdGenerationFailed(format!(
        "no free ID after trying {MIN_DIGITS}-{MAX_DIGITS} digits with {RETRIES_PER_LENGTH} retries each"
    )))
}

/// Validate that an ID has the `T-####` shape (4 to 8 digits)
pub fn validate_ticket_id(id: &str) -> Result<()> {
    if TICKET_ID_RE.is_match(id) {
        Ok(())
    } else {
        Err(DeskError::InvalidTicketId(id.to_string()))
    }
}

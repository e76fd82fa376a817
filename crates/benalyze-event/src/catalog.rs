//! Placeholder step catalog
//!
//! The fixed, ordered sequence of step identifiers the placeholder
//! scheduler walks through before real data arrives. The names mirror the
//! backend pipeline so the optimistic display stays believable.

/// Ordered catalog of placeholder step identifiers
pub const PLACEHOLDER_STEPS: [&str; 7] = [
    "download_files",
    "initialize_agent",
    "extract_paystub",
    "extract_rsu",
    "analyze_policies",
    "compute_opportunities",
    "safety_check",
];

/// Number of placeholder steps
pub const PLACEHOLDER_STEP_COUNT: usize = PLACEHOLDER_STEPS.len();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_seven_steps() {
        assert_eq!(PLACEHOLDER_STEP_COUNT, 7);
    }

    #[test]
    fn catalog_starts_with_download_and_ends_with_safety() {
        assert_eq!(PLACEHOLDER_STEPS[0], "download_files");
        assert_eq!(PLACEHOLDER_STEPS[6], "safety_check");
    }
}

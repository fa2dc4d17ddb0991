//! Numbering plan metadata used to decompose national numbers.

use std::sync::LazyLock;

use regex::Regex;

/// Numbering plan knowledge for a single region.
///
/// The codec consults the plan to recognise the region's own country code,
/// to strip and re-add the trunk prefix, and to decide how many leading
/// digits of an unseparated national number form the area code.
pub trait NumberPlan: Send + Sync + std::fmt::Debug {
    /// ISO 3166 region code, e.g. `NL`.
    fn region(&self) -> &str;

    /// International dialling code without `+`, e.g. `31`.
    fn country_code(&self) -> &str;

    /// Prefix dialled in front of the area code for national calls.
    fn trunk_prefix(&self) -> &str;

    /// Number of leading digits forming the area code of `national_number`.
    ///
    /// `national_number` contains digits only and has its trunk prefix
    /// removed.
    fn area_code_length(&self, national_number: &str) -> usize;
}

/// Two-digit Dutch area codes (after the trunk `0`). All other geographic
/// codes have three digits.
static NL_TWO_DIGIT_AREA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(1[035]|2[0346]|3[03568]|4[03568]|5[0358]|7\d)").expect("Invalid regex")
});

/// The Dutch numbering plan.
///
/// - mobile numbers (`06…`) use the single digit `6` as area code
/// - the large cities and all `07x` ranges use two digits (`020`, `010`, ...)
/// - every other region uses three digits (`0251`, ...)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DutchNumberPlan;

impl DutchNumberPlan {
    /// Region code of this plan.
    pub const REGION: &'static str = "NL";

    const MOBILE_PREFIX: char = '6';
}

impl NumberPlan for DutchNumberPlan {
    fn region(&self) -> &str {
        Self::REGION
    }

    fn country_code(&self) -> &str {
        "31"
    }

    fn trunk_prefix(&self) -> &str {
        "0"
    }

    fn area_code_length(&self, national_number: &str) -> usize {
        if national_number.starts_with(Self::MOBILE_PREFIX) {
            1
        } else if NL_TWO_DIGIT_AREA_RE.is_match(national_number) {
            2
        } else {
            3
        }
    }
}

/// Look up the plan for `region`, if supported.
#[must_use]
pub fn plan_for_region(region: &str) -> Option<DutchNumberPlan> {
    region
        .eq_ignore_ascii_case(DutchNumberPlan::REGION)
        .then_some(DutchNumberPlan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_area_code_length() {
        assert_eq!(DutchNumberPlan.area_code_length("612345678"), 1);
    }

    #[test]
    fn test_two_digit_area_codes() {
        for number in ["201234567", "101234567", "301234567", "701234567", "461234567"] {
            assert_eq!(DutchNumberPlan.area_code_length(number), 2, "{number}");
        }
    }

    #[test]
    fn test_three_digit_area_codes() {
        for number in ["251223344", "525122334", "111234567", "881234567"] {
            assert_eq!(DutchNumberPlan.area_code_length(number), 3, "{number}");
        }
    }

    #[test]
    fn test_plan_for_region() {
        assert_eq!(plan_for_region("NL"), Some(DutchNumberPlan));
        assert_eq!(plan_for_region("nl"), Some(DutchNumberPlan));
        assert_eq!(plan_for_region("BE"), None);
    }
}

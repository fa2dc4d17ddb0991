//! Phone number parsing and formatting.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::metadata::{DutchNumberPlan, NumberPlan};
use crate::config::{CodecConfig, ConfigError};
use crate::store::is_blank_str;

/// Template used when no format is given.
pub const DEFAULT_FORMAT: &str = "c (a) s";

/// Country codes longer than this are re-sliced, see [`PhoneNumberCodec::parse`].
const MAX_COUNTRY_CODE_LENGTH: usize = 3;

/// Length a run of unknown digits after `+` is cut back to.
const FALLBACK_COUNTRY_CODE_LENGTH: usize = 2;

/// Trunk marker written between country code and area code, e.g. `+31 (0) 20`.
const TRUNK_MARKER: &str = "(0)";

/// Matches an international number: `+`, a digit run, and the remainder.
static INTERNATIONAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*\+([0-9]+)(.*)$").expect("Invalid regex"));

/// Matches the bracketed area code group of a format template.
static AREA_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s?a\s?\)\s?").expect("Invalid regex"));

static SHARED_CODEC: LazyLock<PhoneNumberCodec> = LazyLock::new(PhoneNumberCodec::default);

/// A phone number decomposed into its parts.
///
/// All parts are plain digit strings; the country code has no `+` and the
/// area code has no trunk prefix when produced by [`PhoneNumberCodec::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumberParts {
    /// International dialling code, e.g. `31`. Empty for national input.
    pub country_code: String,
    /// Area code, e.g. `20` or `6`.
    pub area_code: String,
    /// Remaining subscriber digits.
    pub subscriber_number: String,
}

impl PhoneNumberParts {
    /// Create parts from their components.
    #[must_use]
    pub fn new(
        country_code: impl Into<String>,
        area_code: impl Into<String>,
        subscriber_number: impl Into<String>,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            area_code: area_code.into(),
            subscriber_number: subscriber_number.into(),
        }
    }

    /// Returns `true` if neither an area code nor a subscriber number is set.
    ///
    /// This is the canonical representation of an invalid or absent number.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_blank_str(&self.area_code) && is_blank_str(&self.subscriber_number)
    }
}

/// Parses free-form phone numbers and formats them from templates.
///
/// The codec holds the [`NumberPlan`] of its default region. Use
/// [`PhoneNumberCodec::shared`] for the process-wide Dutch codec, or build
/// one with [`PhoneNumberCodec::new`] to inject a different plan.
///
/// ## Examples
///
/// ```
/// use communibase_core::phone::{PhoneNumberCodec, PhoneNumberParts};
///
/// let codec = PhoneNumberCodec::shared();
///
/// let parts = codec.parse("+31(0)251-223344");
/// assert_eq!(parts, PhoneNumberParts::new("31", "251", "223344"));
/// assert_eq!(codec.format(&parts, None), "+31 (251) 223344");
/// assert_eq!(codec.format(&parts, Some("a-s")), "0251-223344");
/// ```
#[derive(Debug, Clone)]
pub struct PhoneNumberCodec {
    plan: Arc<dyn NumberPlan>,
    default_format: String,
}

impl Default for PhoneNumberCodec {
    fn default() -> Self {
        Self::new(Arc::new(DutchNumberPlan))
    }
}

impl PhoneNumberCodec {
    /// Create a codec for `plan` using [`DEFAULT_FORMAT`].
    #[must_use]
    pub fn new(plan: Arc<dyn NumberPlan>) -> Self {
        Self {
            plan,
            default_format: DEFAULT_FORMAT.to_owned(),
        }
    }

    /// Create a codec from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedRegion`] if the configured region
    /// has no numbering plan.
    pub fn from_config(config: &CodecConfig) -> Result<Self, ConfigError> {
        let plan = config.number_plan()?;
        Ok(Self::new(Arc::new(plan)).with_default_format(config.default_format.clone()))
    }

    /// Replace the template used when [`format`](Self::format) gets no template.
    #[must_use]
    pub fn with_default_format(mut self, format: impl Into<String>) -> Self {
        self.default_format = format.into();
        self
    }

    /// The process-wide codec for the default region.
    ///
    /// Created on first use and never modified afterwards.
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED_CODEC
    }

    /// The numbering plan of this codec.
    #[must_use]
    pub fn plan(&self) -> &dyn NumberPlan {
        self.plan.as_ref()
    }

    /// The template used when none is passed to [`format`](Self::format).
    #[must_use]
    pub fn default_format(&self) -> &str {
        &self.default_format
    }

    /// Decompose a free-form phone number.
    ///
    /// Accepts international (`+31 (0) 251 22 33 44`) and national
    /// (`020-1234567`, `tel.:0612345678`) notations. Separated digit groups
    /// are split at the first separator; unseparated national numbers are
    /// split by the numbering plan. The area code never carries the trunk
    /// prefix.
    ///
    /// Input without any digits yields empty parts; this never fails.
    ///
    /// Parsing formatted output gives the same parts back only when the area
    /// code width matches this codec's plan. `") "` is collapsed before
    /// tokenizing, so `+32 (2) 1234567` reads as area `212`.
    #[must_use]
    pub fn parse(&self, input: &str) -> PhoneNumberParts {
        let (country_code, national) = self.split_country_code(input);

        let normalized: String = national
            .replace(") ", ")")
            .replace('-', " ")
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == ' ')
            .collect();

        if !normalized.bytes().any(|b| b.is_ascii_digit()) {
            tracing::debug!(input, "Phone number has no national digits");
            return PhoneNumberParts::default();
        }

        let mut tokens = normalized.split_whitespace();
        let first = tokens.next().unwrap_or_default();
        let rest: String = tokens.collect();

        let area_code = self.strip_trunk_prefix(first);
        if !rest.is_empty() && !area_code.is_empty() {
            return PhoneNumberParts::new(country_code, area_code, rest);
        }

        let digits = normalized.replace(' ', "");
        let national_number = self.strip_trunk_prefix(&digits);
        let split = self
            .plan
            .area_code_length(national_number)
            .min(national_number.len());
        let (area_code, subscriber_number) = national_number.split_at(split);
        PhoneNumberParts::new(country_code, area_code, subscriber_number)
    }

    /// Format `parts` according to `template`.
    ///
    /// The letters `c`, `a` and `s` in the template are replaced by the
    /// country code, area code and subscriber number; every other character
    /// is copied. Without a template the codec's default (`c (a) s`) is used.
    ///
    /// - a number without area code and subscriber formats to `""`
    /// - without an area code the `(a)` group is dropped from the template
    /// - with a country code in the output, the area code loses its trunk
    ///   prefix; without one, the trunk prefix is added
    /// - the country code is always written with a leading `+`
    #[must_use]
    pub fn format(&self, parts: &PhoneNumberParts, template: Option<&str>) -> String {
        if parts.is_empty() {
            return String::new();
        }

        let mut country_code = parts.country_code.clone();
        if !is_blank_str(&country_code) && !country_code.starts_with('+') {
            country_code.insert(0, '+');
        }

        let mut template = template.unwrap_or(&self.default_format).to_owned();
        let mut area_code = parts.area_code.clone();
        if is_blank_str(&area_code) {
            area_code.clear();
            template = AREA_GROUP_RE.replace_all(&template, "").into_owned();
        }

        let with_country = !is_blank_str(&country_code) && template.contains('c');
        if with_country {
            area_code = area_code.trim_start_matches('0').to_owned();
        }
        let trunk_prefix = self.plan.trunk_prefix();
        if !with_country && !area_code.starts_with(trunk_prefix) {
            area_code.insert_str(0, trunk_prefix);
        }

        let mut output = String::with_capacity(template.len() + 16);
        for c in template.chars() {
            match c {
                'c' => output.push_str(&country_code),
                'a' => output.push_str(&area_code),
                's' => output.push_str(&parts.subscriber_number),
                other => output.push(other),
            }
        }
        output.trim().to_owned()
    }

    /// Splits an international number into country code and national part.
    ///
    /// National numbers are returned unchanged with an empty country code.
    fn split_country_code(&self, input: &str) -> (String, String) {
        let Some(captures) = INTERNATIONAL_RE.captures(input) else {
            return (String::new(), input.to_owned());
        };
        let digits = captures.get(1).map_or("", |m| m.as_str());
        let rest = captures.get(2).map_or("", |m| m.as_str());

        let own = self.plan.country_code();
        let split = if !own.is_empty() && digits.starts_with(own) {
            own.len()
        } else if digits.len() <= MAX_COUNTRY_CODE_LENGTH {
            digits.len()
        } else {
            FALLBACK_COUNTRY_CODE_LENGTH
        };
        let (country_code, leading) = digits.split_at(split);

        let national = format!("{leading}{rest}").replace(TRUNK_MARKER, "");
        (country_code.to_owned(), national)
    }

    fn strip_trunk_prefix<'a>(&self, digits: &'a str) -> &'a str {
        digits
            .strip_prefix(self.plan.trunk_prefix())
            .unwrap_or(digits)
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Dutch numbers whose area code width agrees with the numbering plan.
    fn dutch_number() -> impl Strategy<Value = (String, String)> {
        prop_oneof![
            Just("6".to_string()),
            "(1[035]|2[0346]|3[03568]|4[03568]|5[0358]|7[0-9])",
            "(1[1246789]|2[125789]|3[12479]|4[12479]|5[124679]|8[0-9]|9[0-9])[0-9]",
        ]
        .prop_flat_map(|area| {
            let subscriber_len = 9 - area.len();
            (Just(area), proptest::string::string_regex(&format!("[1-9][0-9]{{{}}}", subscriber_len - 1)).unwrap())
        })
    }

    proptest! {
        /// Formatting and parsing again reproduces the decomposed number.
        #[test]
        fn parse_format_parse_is_stable(
            (area, subscriber) in dutch_number(),
            international in any::<bool>(),
            template in prop_oneof![Just("c (a) s"), Just("cas"), Just("(a) s"), Just("a-s"), Just("c a s")],
        ) {
            let codec = PhoneNumberCodec::shared();
            let input = if international {
                format!("+31 (0) {area} {subscriber}")
            } else {
                format!("0{area}-{subscriber}")
            };
            let parsed = codec.parse(&input);
            prop_assert_eq!(&parsed.area_code, &area);
            prop_assert_eq!(&parsed.subscriber_number, &subscriber);

            let reparsed = codec.parse(&codec.format(&parsed, Some(template)));
            prop_assert_eq!(&reparsed.area_code, &parsed.area_code);
            prop_assert_eq!(&reparsed.subscriber_number, &parsed.subscriber_number);
        }

        /// Parsing never panics and only ever yields digits.
        #[test]
        fn parse_yields_digits_only(input in "\\PC{0,40}") {
            let parts = PhoneNumberCodec::shared().parse(&input);
            for part in [&parts.country_code, &parts.area_code, &parts.subscriber_number] {
                prop_assert!(part.bytes().all(|b| b.is_ascii_digit()));
            }
        }
    }
}

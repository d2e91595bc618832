//! Phone-number normalization into the router's dial format.
//!
//! TRB-series routers reject `+`-prefixed destinations, so numbers are
//! rewritten with a `00` international prefix before sending. Two incompatible
//! domestic-number conventions exist in the field; [`DialPolicy`] makes the
//! choice explicit instead of hard-coding one of them.

/// Separator characters stripped before any prefix rewriting.
const SEPARATORS: [char; 6] = [' ', '-', '(', ')', '.', '/'];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// How a raw destination number is rewritten for the router.
pub enum DialPolicy {
    /// Convert `+XX…` to `00XX…` and nothing else. Domestic numbers (`0151…`)
    /// are passed through for the router to interpret.
    #[default]
    International,
    /// Like [`DialPolicy::International`], but additionally replace a single
    /// leading `0` with the given international code, e.g. `country_code`
    /// `"0049"` maps `0151…` to `0049151…`. Already-international `00…` input
    /// is left alone.
    DomesticPrefix { country_code: String },
}

/// Normalize a raw phone number into the router's canonical dial string.
///
/// Total function: never fails, empty input stays empty. No digit validation
/// is performed; a number that is still malformed after normalization is the
/// router's to reject.
pub fn normalize(raw: &str, policy: &DialPolicy) -> String {
    let stripped: String = raw.chars().filter(|c| !SEPARATORS.contains(c)).collect();

    let mut number = match stripped.strip_prefix('+') {
        // A `+` not followed by a digit carries no country code; drop it.
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => format!("00{rest}"),
        Some(rest) => rest.to_owned(),
        None => stripped,
    };

    if let DialPolicy::DomesticPrefix { country_code } = policy {
        if number.starts_with('0') && !number.starts_with("00") {
            number = format!("{country_code}{}", &number[1..]);
        }
    }

    number
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_prefix_becomes_double_zero() {
        let policy = DialPolicy::International;
        assert_eq!(normalize("+491234567890", &policy), "00491234567890");
        assert_eq!(normalize("+1 555 0100", &policy), "0015550100");
        assert_eq!(normalize("+43(664)1234", &policy), "00436641234");
    }

    #[test]
    fn separators_are_stripped() {
        let policy = DialPolicy::International;
        assert_eq!(normalize("+49 151/2345-678.9", &policy), "004915123456789");
        assert_eq!(normalize("(0151) 234 5678", &policy), "01512345678");
    }

    #[test]
    fn already_normalized_input_passes_through() {
        let policy = DialPolicy::International;
        assert_eq!(normalize("0049123", &policy), "0049123");
        assert_eq!(normalize("01512345678", &policy), "01512345678");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["+491234567890", "0049123", "01512345678", "+1 (555) 010-0"] {
            for policy in [
                DialPolicy::International,
                DialPolicy::DomesticPrefix {
                    country_code: "0049".to_owned(),
                },
            ] {
                let once = normalize(input, &policy);
                assert_eq!(normalize(&once, &policy), once, "input: {input}");
            }
        }
    }

    #[test]
    fn lone_plus_without_digits_is_dropped() {
        let policy = DialPolicy::International;
        assert_eq!(normalize("+", &policy), "");
        assert_eq!(normalize("+-", &policy), "");
    }

    #[test]
    fn domestic_policy_replaces_trunk_zero() {
        let policy = DialPolicy::DomesticPrefix {
            country_code: "0049".to_owned(),
        };
        assert_eq!(normalize("01512345678", &policy), "00491512345678");
        // Already international: left alone.
        assert_eq!(normalize("00431234", &policy), "00431234");
        assert_eq!(normalize("+41 44 123", &policy), "004144123");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize("", &DialPolicy::International), "");
    }
}

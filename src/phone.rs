use lazy_static::lazy_static;

/// A selectable international dialing prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallingCode {
    /// The two-letter country code shown in the selector.
    pub code: &'static str,

    /// The country name, in French.
    pub name: &'static str,

    /// The dialing prefix, including the leading `+`.
    pub prefix: &'static str,
}

impl CallingCode {
    /// The text the selector displays, e.g. `FR - France (+33)`.
    pub fn label(&self) -> String {
        format!("{} - {} ({})", self.code, self.name, self.prefix)
    }
}

/// The number of digits a local number may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitRule {
    min: usize,
    max: usize,
}

impl DigitRule {
    const fn exactly(count: usize) -> Self {
        DigitRule {
            min: count,
            max: count,
        }
    }

    const fn between(min: usize, max: usize) -> Self {
        DigitRule { min, max }
    }

    /// Checks a local number against this rule: digits only, count within
    /// range.
    pub fn accepts(&self, local: &str) -> bool {
        !local.is_empty()
            && local.chars().all(|c| c.is_ascii_digit())
            && self.min <= local.len()
            && local.len() <= self.max
    }

    /// The phrase used in user-facing messages, e.g. `9 chiffres` or
    /// `10-11 chiffres`.
    pub fn phrase(&self) -> String {
        if self.min == self.max {
            format!("{} chiffres", self.min)
        } else {
            format!("{}-{} chiffres", self.min, self.max)
        }
    }
}

/// The rule applied to any prefix without a dedicated entry below.
pub const FALLBACK_RULE: DigitRule = DigitRule::between(9, 10);

/// The calling codes the form offers, in display order. France comes
/// first and is preselected.
pub const CALLING_CODES: [CallingCode; 16] = [
    CallingCode {
        code: "FR",
        name: "France",
        prefix: "+33",
    },
    CallingCode {
        code: "BE",
        name: "Belgique",
        prefix: "+32",
    },
    CallingCode {
        code: "CH",
        name: "Suisse",
        prefix: "+41",
    },
    CallingCode {
        code: "LU",
        name: "Luxembourg",
        prefix: "+352",
    },
    CallingCode {
        code: "MC",
        name: "Monaco",
        prefix: "+377",
    },
    CallingCode {
        code: "GB",
        name: "Royaume-Uni",
        prefix: "+44",
    },
    CallingCode {
        code: "DE",
        name: "Allemagne",
        prefix: "+49",
    },
    CallingCode {
        code: "ES",
        name: "Espagne",
        prefix: "+34",
    },
    CallingCode {
        code: "IT",
        name: "Italie",
        prefix: "+39",
    },
    CallingCode {
        code: "PT",
        name: "Portugal",
        prefix: "+351",
    },
    CallingCode {
        code: "NL",
        name: "Pays-Bas",
        prefix: "+31",
    },
    CallingCode {
        code: "US",
        name: "États-Unis",
        prefix: "+1",
    },
    CallingCode {
        code: "CA",
        name: "Canada",
        prefix: "+1",
    },
    CallingCode {
        code: "MA",
        name: "Maroc",
        prefix: "+212",
    },
    CallingCode {
        code: "DZ",
        name: "Algérie",
        prefix: "+213",
    },
    CallingCode {
        code: "TN",
        name: "Tunisie",
        prefix: "+216",
    },
];

/// Returns the digit rule for a dialing prefix. Adding a country means
/// adding one arm here (and an entry to `CALLING_CODES` if it should be
/// selectable).
pub fn rule_for(prefix: &str) -> DigitRule {
    match prefix {
        "+33" | "+32" | "+41" | "+34" | "+351" | "+31" | "+212" | "+213" => DigitRule::exactly(9),
        "+44" | "+1" => DigitRule::exactly(10),
        "+352" | "+216" => DigitRule::exactly(8),
        "+49" => DigitRule::between(10, 11),
        "+39" => DigitRule::between(9, 10),
        "+377" => DigitRule::between(8, 9),
        _ => FALLBACK_RULE,
    }
}

/// Finds the selectable entry for a dialing prefix.
pub fn find(prefix: &str) -> Option<&'static CallingCode> {
    CALLING_CODES.iter().find(|c| c.prefix == prefix)
}

/// Splits a combined number (`+<code><local>`) into its calling code and
/// local part, matching the longest known prefix so that `+351…` is never
/// read as an invalid `+35` number.
pub fn resolve(telephone: &str) -> Option<(&'static CallingCode, &str)> {
    lazy_static! {
        static ref BY_PREFIX_LENGTH: Vec<&'static CallingCode> = {
            let mut codes = CALLING_CODES.iter().collect::<Vec<_>>();
            codes.sort_by_key(|c| std::cmp::Reverse(c.prefix.len()));
            codes
        };
    }

    BY_PREFIX_LENGTH
        .iter()
        .find(|c| telephone.starts_with(c.prefix))
        .map(|c| (*c, &telephone[c.prefix.len()..]))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    // (prefix, shortest accepted, longest accepted)
    const EXPECTED_RANGES: [(&str, usize, usize); 16] = [
        ("+33", 9, 9),
        ("+32", 9, 9),
        ("+41", 9, 9),
        ("+352", 8, 8),
        ("+377", 8, 9),
        ("+44", 10, 10),
        ("+49", 10, 11),
        ("+34", 9, 9),
        ("+39", 9, 10),
        ("+351", 9, 9),
        ("+31", 9, 9),
        ("+1", 10, 10),
        ("+212", 9, 9),
        ("+213", 9, 9),
        ("+216", 8, 8),
        ("+1", 10, 10),
    ];

    fn digits(count: usize) -> String {
        "6".repeat(count)
    }

    #[test]
    fn each_code_accepts_lengths_in_range_only() {
        for (prefix, min, max) in EXPECTED_RANGES.iter() {
            let rule = rule_for(prefix);

            for count in *min..=*max {
                assert!(
                    rule.accepts(&digits(count)),
                    "{} must accept {} digits",
                    prefix,
                    count
                );
            }

            assert!(
                !rule.accepts(&digits(min - 1)),
                "{} must reject {} digits",
                prefix,
                min - 1
            );
            assert!(
                !rule.accepts(&digits(max + 1)),
                "{} must reject {} digits",
                prefix,
                max + 1
            );
        }
    }

    #[test]
    fn unknown_codes_fall_back_to_nine_or_ten() {
        let rule = rule_for("+999");

        assert_eq!(rule, FALLBACK_RULE);
        assert!(!rule.accepts(&digits(8)));
        assert!(rule.accepts(&digits(9)));
        assert!(rule.accepts(&digits(10)));
        assert!(!rule.accepts(&digits(11)));
    }

    #[test]
    fn rules_reject_non_digit_input() {
        let rule = rule_for("+33");

        assert!(!rule.accepts("61234567a"));
        assert!(!rule.accepts("612 45678"));
        assert!(!rule.accepts(""));
    }

    #[test]
    fn phrases_match_the_selected_rule() {
        assert_eq!(rule_for("+33").phrase(), "9 chiffres");
        assert_eq!(rule_for("+44").phrase(), "10 chiffres");
        assert_eq!(rule_for("+216").phrase(), "8 chiffres");
        assert_eq!(rule_for("+49").phrase(), "10-11 chiffres");
        assert_eq!(rule_for("+39").phrase(), "9-10 chiffres");
        assert_eq!(rule_for("+377").phrase(), "8-9 chiffres");
        assert_eq!(FALLBACK_RULE.phrase(), "9-10 chiffres");
    }

    #[test]
    fn resolve_prefers_the_longest_prefix() {
        let (code, local) = resolve("+351912345678").expect("resolve Portuguese number");
        assert_eq!(code.code, "PT");
        assert_eq!(local, "912345678");

        let (code, local) = resolve("+33612345678").expect("resolve French number");
        assert_eq!(code.code, "FR");
        assert_eq!(local, "612345678");

        assert_eq!(resolve("0612345678"), None);
        assert_eq!(resolve("+990612345678"), None);
    }

    #[test]
    fn labels_follow_the_selector_format() {
        let france = find("+33").expect("find France");

        assert_eq!(france.label(), "FR - France (+33)");
    }

    proptest! {
        #[test]
        fn acceptance_depends_only_on_length_for_digit_strings(count in 0usize..20) {
            let local = "7".repeat(count);

            for (prefix, min, max) in EXPECTED_RANGES.iter() {
                let expected = *min <= count && count <= *max;

                prop_assert_eq!(
                    rule_for(prefix).accepts(&local),
                    expected,
                    "{} digits against {}", count, prefix
                );
            }
        }

        #[test]
        fn combined_numbers_resolve_to_their_own_code(count in 1usize..20) {
            let local = "7".repeat(count);

            for code in CALLING_CODES.iter() {
                let combined = format!("{}{}", code.prefix, local);
                let (resolved, rest) = resolve(&combined).expect("resolve known prefix");

                prop_assert_eq!(resolved.prefix, code.prefix);
                prop_assert_eq!(rest, local.as_str());
            }
        }
    }
}

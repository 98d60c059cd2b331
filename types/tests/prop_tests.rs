use proptest::prelude::*;

use grove_types::{Address, Timestamp, Weight};

proptest! {
    /// Display output always parses back to the same weight.
    #[test]
    fn weight_display_parses_back(raw in any::<u128>()) {
        let weight = Weight::from_raw(raw);
        let parsed: Weight = weight.to_string().parse().unwrap();
        prop_assert_eq!(parsed, weight);
    }

    /// Weight ordering matches raw ordering.
    #[test]
    fn weight_ordering(a in any::<u128>(), b in any::<u128>()) {
        prop_assert_eq!(Weight::from_raw(a) <= Weight::from_raw(b), a <= b);
    }

    /// Whole units parse from their plain integer rendering.
    #[test]
    fn weight_from_units_matches_parse(units in any::<u64>()) {
        let parsed: Weight = units.to_string().parse().unwrap();
        prop_assert_eq!(parsed, Weight::from_units(units));
    }

    /// A leading minus sign is never accepted.
    #[test]
    fn weight_rejects_negative(units in 0u64..1_000_000) {
        let negative = format!("-{units}");
        prop_assert!(negative.parse::<Weight>().is_err());
    }

    /// checked_sum agrees with folding checked_add.
    #[test]
    fn weight_checked_sum(values in prop::collection::vec(0u64..1_000_000, 0..20)) {
        let expected: u64 = values.iter().sum();
        let sum = Weight::checked_sum(values.iter().map(|v| Weight::from_units(*v))).unwrap();
        prop_assert_eq!(sum, Weight::from_units(expected));
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Any lowercase alphanumeric body behind the prefix is a valid address.
    #[test]
    fn address_accepts_lowercase_bodies(body in "[a-z0-9]{1,60}") {
        let addr = Address::parse(format!("grove_{body}")).unwrap();
        prop_assert_eq!(addr.body(), body.as_str());
    }
}

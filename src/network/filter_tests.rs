//! Tests for the interface filtering module.

use super::InterfaceRecord;
use super::filter::*;
use crate::flags::{Flag, INTERFACE_FLAGS, InterfaceFlag};

// ============================================================================
// Test Fixtures
// ============================================================================

fn mask(flags: &[InterfaceFlag]) -> u32 {
    flags
        .iter()
        .fold(0, |mask, &flag| mask | INTERFACE_FLAGS.mask_of(flag))
}

fn ethernet_interface() -> InterfaceRecord {
    InterfaceRecord::builder(2, "Ethernet")
        .flags(mask(&[InterfaceFlag::Up, InterfaceFlag::Broadcast]))
        .build()
}

fn wifi_interface() -> InterfaceRecord {
    InterfaceRecord::builder(3, "Wi-Fi")
        .flags(mask(&[InterfaceFlag::Up, InterfaceFlag::Multicast]))
        .build()
}

fn down_interface() -> InterfaceRecord {
    InterfaceRecord::builder(4, "vEthernet (WSL)")
        .flags(mask(&[InterfaceFlag::Broadcast]))
        .build()
}

fn loopback_interface() -> InterfaceRecord {
    InterfaceRecord::builder(1, "Loopback Pseudo-Interface")
        .flags(mask(&[InterfaceFlag::Up, InterfaceFlag::Loopback]))
        .build()
}

fn docker_interface() -> InterfaceRecord {
    InterfaceRecord::builder(5, "Docker Network Adapter")
        .flags(mask(&[InterfaceFlag::Up]))
        .build()
}

// ============================================================================
// FlagFilter Tests
// ============================================================================

mod flag_filter {
    use super::*;

    #[test]
    fn matches_single_flag() {
        let filter = FlagFilter::new([InterfaceFlag::Loopback]);
        assert!(filter.matches(&loopback_interface()));
        assert!(!filter.matches(&ethernet_interface()));
    }

    #[test]
    fn matches_any_of_several_flags() {
        let filter = FlagFilter::new([InterfaceFlag::Loopback, InterfaceFlag::Multicast]);
        assert!(filter.matches(&loopback_interface()));
        assert!(filter.matches(&wifi_interface()));
        assert!(!filter.matches(&ethernet_interface()));
    }

    #[test]
    fn empty_filter_matches_nothing() {
        let filter = FlagFilter::new([]);
        assert!(filter.is_empty());
        assert!(!filter.matches(&ethernet_interface()));
    }

    #[test]
    fn flags_accessor_keeps_order() {
        let filter = FlagFilter::new([InterfaceFlag::Up, InterfaceFlag::Running]);
        assert_eq!(filter.flags(), &[InterfaceFlag::Up, InterfaceFlag::Running]);
    }

    #[test]
    fn unset_mask_never_matches() {
        let filter = FlagFilter::new(InterfaceFlag::ALL.iter().copied());
        let bare = InterfaceRecord::builder(9, "bare").build();
        assert!(!filter.matches(&bare));
    }
}

// ============================================================================
// FilterChain Tests
// ============================================================================

mod filter_chain {
    use super::*;

    #[test]
    fn empty_chain_matches_all() {
        let chain = FilterChain::new();
        assert!(chain.matches(&ethernet_interface()));
        assert!(chain.matches(&down_interface()));
        assert!(chain.matches(&loopback_interface()));
    }

    #[test]
    fn exclude_rejects_matching_interfaces() {
        let chain = FilterChain::new().exclude(FlagFilter::new([InterfaceFlag::Loopback]));
        assert!(chain.matches(&ethernet_interface()));
        assert!(!chain.matches(&loopback_interface()));
    }

    #[test]
    fn include_accepts_matching_interfaces() {
        let chain = FilterChain::new().include(FlagFilter::new([InterfaceFlag::Up]));
        assert!(chain.matches(&ethernet_interface()));
        assert!(!chain.matches(&down_interface()));
    }

    #[test]
    fn exclude_takes_priority_over_include() {
        let chain = FilterChain::new()
            .include(FlagFilter::new([InterfaceFlag::Loopback]))
            .exclude(FlagFilter::new([InterfaceFlag::Loopback]));
        assert!(!chain.matches(&loopback_interface()));
    }

    #[test]
    fn multiple_includes_use_or_semantics() {
        let chain = FilterChain::new()
            .include(NameRegexFilter::new("^Ethernet$").unwrap())
            .include(NameRegexFilter::new("^Wi-Fi$").unwrap());
        assert!(chain.matches(&ethernet_interface()));
        assert!(chain.matches(&wifi_interface()));
        assert!(!chain.matches(&down_interface()));
    }

    #[test]
    fn multiple_excludes_use_and_semantics() {
        let chain = FilterChain::new()
            .exclude(FlagFilter::new([InterfaceFlag::Loopback]))
            .exclude(NameRegexFilter::new(r"^vEthernet").unwrap());
        assert!(chain.matches(&ethernet_interface()));
        assert!(!chain.matches(&down_interface()));
        assert!(!chain.matches(&loopback_interface()));
    }

    #[test]
    fn counts_and_emptiness() {
        let chain = FilterChain::new()
            .include(FlagFilter::new([InterfaceFlag::Up]))
            .include(FlagFilter::new([InterfaceFlag::Running]))
            .exclude(FlagFilter::new([InterfaceFlag::Loopback]));
        assert_eq!(chain.include_count(), 2);
        assert_eq!(chain.exclude_count(), 1);
        assert!(!chain.is_empty());
        assert!(FilterChain::default().is_empty());
    }

    #[test]
    fn debug_impl_shows_counts() {
        let chain = FilterChain::new()
            .include(FlagFilter::new([InterfaceFlag::Up]))
            .exclude(FlagFilter::new([InterfaceFlag::Loopback]));
        let debug_str = format!("{chain:?}");
        assert!(debug_str.contains("FilterChain"));
        assert!(debug_str.contains("include_count"));
        assert!(debug_str.contains("exclude_count"));
    }

    #[test]
    fn up_only_without_loopback() {
        let chain = FilterChain::new()
            .exclude(FlagFilter::new([InterfaceFlag::Loopback]))
            .include(FlagFilter::new([InterfaceFlag::Up]));

        assert!(chain.matches(&ethernet_interface()));
        assert!(chain.matches(&wifi_interface()));
        assert!(!chain.matches(&down_interface()));
        assert!(!chain.matches(&loopback_interface()));
    }

    #[test]
    fn combined_flag_and_name_filters() {
        let chain = FilterChain::new()
            .exclude(NameRegexFilter::new(r"(?i)docker").unwrap())
            .include(FlagFilter::new([InterfaceFlag::Up]));

        assert!(chain.matches(&ethernet_interface()));
        assert!(!chain.matches(&docker_interface()));
        assert!(!chain.matches(&down_interface()));
    }
}

// ============================================================================
// NameRegexFilter Tests
// ============================================================================

mod name_regex_filter {
    use super::*;

    #[test]
    fn matches_when_pattern_matches() {
        let filter = NameRegexFilter::new(r"^Ethernet").unwrap();
        assert!(filter.matches(&ethernet_interface()));
        assert!(!filter.matches(&wifi_interface()));
    }

    #[test]
    fn partial_match_works() {
        let filter = NameRegexFilter::new(r"Wi").unwrap();
        assert!(filter.matches(&wifi_interface()));
    }

    #[test]
    fn case_sensitive_by_default() {
        let filter = NameRegexFilter::new(r"ethernet").unwrap();
        assert!(!filter.matches(&ethernet_interface()));
    }

    #[test]
    fn case_insensitive_with_flag() {
        let filter = NameRegexFilter::new(r"(?i)ethernet").unwrap();
        assert!(filter.matches(&ethernet_interface()));
    }

    #[test]
    fn invalid_regex_returns_error() {
        assert!(NameRegexFilter::new(r"[invalid").is_err());
    }

    #[test]
    fn from_regex_wraps_compiled_pattern() {
        let filter = NameRegexFilter::from_regex(regex::Regex::new(r"^eth\d+").unwrap());
        assert!(filter.pattern().is_match("eth0"));
        assert!(!filter.pattern().is_match("wlan0"));
    }
}

// ============================================================================
// Negate Tests
// ============================================================================

mod negate {
    use super::*;

    #[test]
    fn inverts_wrapped_filter() {
        let filter = Negate(FlagFilter::new([InterfaceFlag::Up]));
        assert!(filter.matches(&down_interface()));
        assert!(!filter.matches(&ethernet_interface()));
    }

    #[test]
    fn negated_exclude_acts_as_required_flag() {
        let chain = FilterChain::new()
            .include(NameRegexFilter::new("^vEthernet").unwrap())
            .include(NameRegexFilter::new("^Ethernet$").unwrap())
            .exclude(Negate(FlagFilter::new([InterfaceFlag::Up])));

        assert!(chain.matches(&ethernet_interface()));
        assert!(!chain.matches(&down_interface()));
        assert!(!chain.matches(&wifi_interface()));
    }
}

// ============================================================================
// Blanket Implementation Tests
// ============================================================================

mod blanket_impl {
    use super::*;

    #[test]
    fn reference_to_filter_implements_trait() {
        let filter = FlagFilter::new([InterfaceFlag::Loopback]);
        let filter_ref: &dyn InterfaceFilter = &filter;

        assert!(filter_ref.matches(&loopback_interface()));
        assert!(!filter_ref.matches(&ethernet_interface()));
    }

    #[test]
    fn boxed_filter_implements_trait() {
        let filter: Box<dyn InterfaceFilter> = Box::new(FlagFilter::new([InterfaceFlag::Loopback]));

        assert!(filter.matches(&loopback_interface()));
        assert!(!filter.matches(&ethernet_interface()));
    }
}

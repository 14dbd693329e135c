//! Interface filtering for listings.
//!
//! # Design
//!
//! - **Pure Matchers**: [`FlagFilter`] and [`NameRegexFilter`] only answer
//!   "does this interface match?" without include/exclude semantics.
//! - **Filter Chain**: [`FilterChain`] combines matchers with correct semantics:
//!   - Exclude filters: AND logic (must pass ALL excludes)
//!   - Include filters: OR logic (pass ANY include, empty = match all)
//! - **Negation**: [`Negate`] turns a matcher into its complement.

use regex::Regex;

use super::InterfaceRecord;
use crate::flags::InterfaceFlag;

/// Trait for filtering interface records.
///
/// # Thread Safety
///
/// Filters must be `Send + Sync` so a chain can be shared across threads.
pub trait InterfaceFilter: Send + Sync {
    /// Returns `true` if the interface matches this filter.
    fn matches(&self, interface: &InterfaceRecord) -> bool;
}

// ============================================================================
// FlagFilter - Pure matcher by interface flag
// ============================================================================

/// Matches interfaces that have any of the given flags enabled.
///
/// A flag the platform does not support never matches.
///
/// # Examples
///
/// ```
/// use ifbrowse::flags::{INTERFACE_FLAGS, InterfaceFlag};
/// use ifbrowse::network::InterfaceRecord;
/// use ifbrowse::network::filter::{FlagFilter, InterfaceFilter};
///
/// let filter = FlagFilter::new([InterfaceFlag::Loopback]);
///
/// let lo = InterfaceRecord::builder(1, "lo")
///     .flags(INTERFACE_FLAGS.mask_of(InterfaceFlag::Loopback))
///     .build();
/// let eth0 = InterfaceRecord::builder(2, "eth0").build();
///
/// assert!(filter.matches(&lo));
/// assert!(!filter.matches(&eth0));
/// ```
#[derive(Debug, Clone)]
pub struct FlagFilter {
    flags: Vec<InterfaceFlag>,
}

impl FlagFilter {
    /// Creates a filter matching any of the specified flags.
    #[must_use]
    pub fn new(flags: impl IntoIterator<Item = InterfaceFlag>) -> Self {
        Self {
            flags: flags.into_iter().collect(),
        }
    }

    /// Returns true if no flags are configured (matches nothing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Returns the configured flags.
    #[must_use]
    pub fn flags(&self) -> &[InterfaceFlag] {
        &self.flags
    }
}

impl InterfaceFilter for FlagFilter {
    fn matches(&self, interface: &InterfaceRecord) -> bool {
        self.flags.iter().any(|&flag| interface.is_flag_enabled(flag))
    }
}

// ============================================================================
// FilterChain - Include OR / Exclude AND semantics
// ============================================================================

/// Filter chain with include/exclude semantics.
///
/// Evaluation order:
/// 1. **Exclude filters (AND)**: Any match → reject. Interface must pass ALL excludes.
/// 2. **Include filters (OR)**: Any match → accept. Interface needs to pass ANY include.
///    Empty includes = match all (passthrough).
///
/// # Examples
///
/// ```
/// use ifbrowse::flags::{INTERFACE_FLAGS, InterfaceFlag};
/// use ifbrowse::network::InterfaceRecord;
/// use ifbrowse::network::filter::{FilterChain, FlagFilter, InterfaceFilter, NameRegexFilter};
///
/// let chain = FilterChain::new()
///     .exclude(FlagFilter::new([InterfaceFlag::Loopback]))
///     .include(NameRegexFilter::new("^(eth|en)").unwrap());
///
/// let eth0 = InterfaceRecord::builder(2, "eth0").build();
/// let docker0 = InterfaceRecord::builder(3, "docker0").build();
/// let lo = InterfaceRecord::builder(1, "lo")
///     .flags(INTERFACE_FLAGS.mask_of(InterfaceFlag::Loopback))
///     .build();
///
/// assert!(chain.matches(&eth0));     // Included by name
/// assert!(!chain.matches(&docker0)); // Not in include patterns
/// assert!(!chain.matches(&lo));      // Excluded
/// ```
#[derive(Default)]
pub struct FilterChain {
    includes: Vec<Box<dyn InterfaceFilter>>,
    excludes: Vec<Box<dyn InterfaceFilter>>,
}

impl FilterChain {
    /// Creates an empty filter chain (matches all interfaces).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an include filter (OR semantics).
    ///
    /// Interfaces matching ANY include filter will be accepted
    /// (after passing all exclude filters).
    #[must_use]
    pub fn include<F: InterfaceFilter + 'static>(mut self, filter: F) -> Self {
        self.includes.push(Box::new(filter));
        self
    }

    /// Adds an exclude filter (AND semantics - must not match ANY).
    ///
    /// Interfaces matching ANY exclude filter will be rejected,
    /// regardless of include filters.
    #[must_use]
    pub fn exclude<F: InterfaceFilter + 'static>(mut self, filter: F) -> Self {
        self.excludes.push(Box::new(filter));
        self
    }

    /// Returns the number of include filters.
    #[must_use]
    pub fn include_count(&self) -> usize {
        self.includes.len()
    }

    /// Returns the number of exclude filters.
    #[must_use]
    pub fn exclude_count(&self) -> usize {
        self.excludes.len()
    }

    /// Returns true if no filters are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

impl InterfaceFilter for FilterChain {
    fn matches(&self, interface: &InterfaceRecord) -> bool {
        // 1. Any exclude match → reject
        if self.excludes.iter().any(|f| f.matches(interface)) {
            return false;
        }

        // 2. No includes = all pass; otherwise any include match → accept
        self.includes.is_empty() || self.includes.iter().any(|f| f.matches(interface))
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("include_count", &self.includes.len())
            .field("exclude_count", &self.excludes.len())
            .finish()
    }
}

// ============================================================================
// NameRegexFilter - Pure matcher by name pattern
// ============================================================================

/// Filters interfaces by name pattern (pure matcher, no include/exclude semantics).
///
/// # Examples
///
/// ```
/// use ifbrowse::network::InterfaceRecord;
/// use ifbrowse::network::filter::{InterfaceFilter, NameRegexFilter};
///
/// let filter = NameRegexFilter::new(r"^eth").unwrap();
///
/// assert!(filter.matches(&InterfaceRecord::builder(2, "eth0").build()));
/// assert!(!filter.matches(&InterfaceRecord::builder(3, "wlan0").build()));
/// ```
#[derive(Debug)]
pub struct NameRegexFilter {
    pattern: Regex,
}

impl NameRegexFilter {
    /// Creates a name filter with the given regex pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Wraps an already compiled pattern.
    #[must_use]
    pub const fn from_regex(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// Returns a reference to the regex pattern.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Regex is not a const type
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl InterfaceFilter for NameRegexFilter {
    fn matches(&self, interface: &InterfaceRecord) -> bool {
        self.pattern.is_match(interface.name())
    }
}

// ============================================================================
// Negate - Inverts another matcher
// ============================================================================

/// Matches exactly the interfaces the wrapped filter rejects.
///
/// Lets AND-style requirements ride on the exclude side of a chain:
/// `exclude(Negate(FlagFilter::new([InterfaceFlag::Up])))` drops every
/// interface that is not up, whatever the includes say.
#[derive(Debug, Clone)]
pub struct Negate<F>(pub F);

impl<F: InterfaceFilter> InterfaceFilter for Negate<F> {
    fn matches(&self, interface: &InterfaceRecord) -> bool {
        !self.0.matches(interface)
    }
}

// Blanket implementation: any &T where T: InterfaceFilter also implements InterfaceFilter
impl<T: InterfaceFilter + ?Sized> InterfaceFilter for &T {
    fn matches(&self, interface: &InterfaceRecord) -> bool {
        (*self).matches(interface)
    }
}

// Box<dyn InterfaceFilter> implements InterfaceFilter
impl InterfaceFilter for Box<dyn InterfaceFilter> {
    fn matches(&self, interface: &InterfaceRecord) -> bool {
        self.as_ref().matches(interface)
    }
}

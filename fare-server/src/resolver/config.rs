//! Resolver configuration.

use rust_decimal::Decimal;

use crate::domain::{Fare, Location};

/// Default destination when a request names none.
pub const DEFAULT_HUB: &str = "BSU";

/// Default hop bound for the depth-first search.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Default trike surcharge rate (10%).
pub fn default_trike_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// Policy parameters for fare resolution.
///
/// There is deliberately no `Default`: the trike surcharge floor has no
/// agreed value and must be chosen by whoever builds the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Minimum trike surcharge.
    pub trike_minimum_fare: Fare,

    /// Trike surcharge as a fraction of the segment total.
    pub trike_rate: Decimal,

    /// Maximum number of segments in a searched path.
    pub max_depth: usize,

    /// Destination used when a request omits one.
    pub hub: Location,

    /// Graph-search keyed districts when no exact route key exists.
    pub keyed_search_fallback: bool,
}

impl ResolverConfig {
    /// Create a configuration with the given trike floor and defaults for
    /// everything else.
    pub fn new(trike_minimum_fare: Fare) -> Self {
        Self {
            trike_minimum_fare,
            trike_rate: default_trike_rate(),
            max_depth: DEFAULT_MAX_DEPTH,
            hub: Location::from_normalized(DEFAULT_HUB),
            keyed_search_fallback: false,
        }
    }

    /// Set the trike rate. Negative rates contribute nothing.
    pub fn with_trike_rate(mut self, rate: Decimal) -> Self {
        self.trike_rate = rate;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_hub(mut self, hub: Location) -> Self {
        self.hub = hub;
        self
    }

    pub fn with_keyed_search_fallback(mut self, enabled: bool) -> Self {
        self.keyed_search_fallback = enabled;
        self
    }

    /// Surcharge for a trike ride on top of `subtotal`:
    /// `max(trike_minimum_fare, subtotal * trike_rate)`.
    pub fn trike_surcharge(&self, subtotal: Fare) -> Fare {
        self.trike_minimum_fare.max(subtotal.scaled(self.trike_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fare(s: &str) -> Fare {
        Fare::parse(s).unwrap()
    }

    #[test]
    fn new_uses_defaults() {
        let config = ResolverConfig::new(fare("10"));

        assert_eq!(config.trike_minimum_fare, fare("10"));
        assert_eq!(config.trike_rate, Decimal::new(1, 1));
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.hub.as_str(), "BSU");
        assert!(!config.keyed_search_fallback);
    }

    #[test]
    fn builder_overrides() {
        let config = ResolverConfig::new(fare("5"))
            .with_trike_rate(Decimal::new(15, 2))
            .with_max_depth(4)
            .with_hub(Location::new("grand terminal").unwrap())
            .with_keyed_search_fallback(true);

        assert_eq!(config.trike_rate, Decimal::new(15, 2));
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.hub.as_str(), "GRAND TERMINAL");
        assert!(config.keyed_search_fallback);
    }

    #[test]
    fn surcharge_uses_floor_for_small_totals() {
        let config = ResolverConfig::new(fare("10"));
        assert_eq!(config.trike_surcharge(fare("35")), fare("10"));
        assert_eq!(config.trike_surcharge(Fare::ZERO), fare("10"));
    }

    #[test]
    fn surcharge_uses_rate_for_large_totals() {
        let config = ResolverConfig::new(fare("5"));
        assert_eq!(config.trike_surcharge(fare("106")), fare("10.6"));
        assert_eq!(config.trike_surcharge(fare("50")), fare("5"));
    }

    #[test]
    fn floor_is_configurable() {
        let low = ResolverConfig::new(fare("5"));
        let high = ResolverConfig::new(fare("10"));
        assert_eq!(low.trike_surcharge(fare("60")), fare("6"));
        assert_eq!(high.trike_surcharge(fare("60")), fare("10"));
    }
}

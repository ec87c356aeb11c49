//! Simulated traffic: a multiplicative adjustment of estimated travel times
//! driven by a clock and a high-traffic predicate over locations.
//!
//! A route's base time is multiplied by every factor that applies and rounded
//! up to whole minutes:
//!
//! | Condition                                   | Factor          |
//! |---------------------------------------------|-----------------|
//! | rush hour, `[07:00,10:00)` or `[16:00,19:00)` | 1.5           |
//! | late night, `[22:00,24:00)` or `[00:00,05:00)` | 0.8          |
//! | Saturday or Sunday                          | 0.9             |
//! | path touches a high-traffic location        | 1.2 (once)      |
//! | always                                      | U ~ [0.9, 1.1]  |

mod clock;

use std::fmt;

use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use clock::Clock;

use crate::Minutes;
use crate::model::{Location, RouteOption};

const RUSH_HOUR_FACTOR: f64 = 1.5;
const LATE_NIGHT_FACTOR: f64 = 0.8;
const WEEKEND_FACTOR: f64 = 0.9;
const HIGH_TRAFFIC_FACTOR: f64 = 1.2;
const JITTER_MIN: f64 = 0.9;
const JITTER_MAX: f64 = 1.1;

/// Host predicate marking locations that attract heavy traffic
pub trait HighTraffic {
    fn is_high_traffic(&self, location: &Location) -> bool;
}

impl<F> HighTraffic for F
where
    F: Fn(&Location) -> bool,
{
    fn is_high_traffic(&self, location: &Location) -> bool {
        self(location)
    }
}

/// Marks a location as high-traffic when its name contains any of the
/// fragments (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameFragments(Vec<String>);

impl NameFragments {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(fragments.into_iter().map(Into::into).collect())
    }

    pub fn fragments(&self) -> &[String] {
        &self.0
    }
}

impl Default for NameFragments {
    fn default() -> Self {
        Self::new(["Hall", "Gate", "Market", "Bank"])
    }
}

impl HighTraffic for NameFragments {
    fn is_high_traffic(&self, location: &Location) -> bool {
        self.0
            .iter()
            .any(|fragment| location.name().contains(fragment.as_str()))
    }
}

/// Traffic settings read from host configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    pub high_traffic: NameFragments,
}

/// Qualitative traffic at a single location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrafficLevel {
    Light,
    Moderate,
    Heavy,
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            Self::Light => "Light",
            Self::Moderate => "Moderate",
            Self::Heavy => "Heavy",
        };
        f.write_str(level)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrafficModel<T = NameFragments> {
    high_traffic: T,
}

impl TrafficModel<NameFragments> {
    pub fn from_config(config: &TrafficConfig) -> Self {
        Self::new(config.high_traffic.clone())
    }
}

impl<T: HighTraffic> TrafficModel<T> {
    pub fn new(high_traffic: T) -> Self {
        Self { high_traffic }
    }

    pub fn is_high_traffic(&self, location: &Location) -> bool {
        self.high_traffic.is_high_traffic(location)
    }

    /// Product of the clock and location factors, without jitter
    pub fn base_multiplier(&self, route: &RouteOption, clock: &Clock) -> f64 {
        let mut multiplier = 1.0;
        if clock.is_rush_hour() {
            multiplier *= RUSH_HOUR_FACTOR;
        }
        if clock.is_late_night() {
            multiplier *= LATE_NIGHT_FACTOR;
        }
        if clock.is_weekend() {
            multiplier *= WEEKEND_FACTOR;
        }
        if route.path().iter().any(|location| self.is_high_traffic(location)) {
            multiplier *= HIGH_TRAFFIC_FACTOR;
        }
        multiplier
    }

    /// Adjusted travel time of a single route
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn adjusted_time<R: Rng + ?Sized>(
        &self,
        route: &RouteOption,
        clock: &Clock,
        rng: &mut R,
    ) -> Minutes {
        let jitter = rng.gen_range(JITTER_MIN..=JITTER_MAX);
        let multiplier = self.base_multiplier(route, clock) * jitter;
        let adjusted = (f64::from(route.time()) * multiplier).ceil();
        trace!(
            "{route}: multiplier {multiplier:.3} at {clock} gives {adjusted} min"
        );
        adjusted as Minutes
    }

    /// New routes with traffic-adjusted times; path, distance and landmarks
    /// are untouched. One jitter value is drawn per route, in order.
    pub fn apply_traffic<R: Rng + ?Sized>(
        &self,
        routes: &[RouteOption],
        clock: &Clock,
        rng: &mut R,
    ) -> Vec<RouteOption> {
        routes
            .iter()
            .map(|route| {
                let time = self.adjusted_time(route, clock, rng);
                route.clone().with_time(time)
            })
            .collect()
    }

    /// Extra minutes traffic adds to `route`; negative when traffic is lighter
    /// than the base estimate.
    pub fn delay<R: Rng + ?Sized>(&self, route: &RouteOption, clock: &Clock, rng: &mut R) -> i64 {
        i64::from(self.adjusted_time(route, clock, rng)) - i64::from(route.time())
    }

    /// Traffic at `location` for `clock`. Deterministic.
    pub fn traffic_level(&self, location: &Location, clock: &Clock) -> TrafficLevel {
        match (self.is_high_traffic(location), clock.is_rush_hour()) {
            (true, true) => TrafficLevel::Heavy,
            (true, false) | (false, true) => TrafficLevel::Moderate,
            (false, false) => TrafficLevel::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn route(path: &[&str], time: Minutes) -> RouteOption {
        let path = path.iter().copied().map(Location::from).collect();
        RouteOption::new(path, 600.0, time, Vec::new()).unwrap()
    }

    fn clock(weekday: Weekday, hour: u32) -> Clock {
        Clock::at(weekday, hour, 0).unwrap()
    }

    #[test]
    fn default_fragments_are_case_sensitive() {
        let model = TrafficModel::<NameFragments>::default();

        assert!(model.is_high_traffic(&"Main Gate".into()));
        assert!(model.is_high_traffic(&"Dining Hall".into()));
        assert!(!model.is_high_traffic(&"main gate".into()));
        assert!(!model.is_high_traffic(&"Library".into()));
    }

    #[test]
    fn factors_multiply() {
        let model = TrafficModel::<NameFragments>::default();
        let plain = route(&["Library", "Lab"], 10);
        let busy = route(&["Library", "Bank Street", "Lab"], 10);

        assert!((model.base_multiplier(&plain, &clock(Weekday::Wed, 12)) - 1.0).abs() < 1e-12);
        assert!((model.base_multiplier(&plain, &clock(Weekday::Wed, 8)) - 1.5).abs() < 1e-12);
        assert!((model.base_multiplier(&plain, &clock(Weekday::Sun, 23)) - 0.72).abs() < 1e-12);
        assert!((model.base_multiplier(&busy, &clock(Weekday::Sat, 17)) - 1.62).abs() < 1e-12);
    }

    #[test]
    fn high_traffic_factor_applies_once() {
        let model = TrafficModel::<NameFragments>::default();
        let one = route(&["Main Gate", "Lab"], 10);
        let many = route(&["Main Gate", "Town Hall", "Market", "Lab"], 10);
        let noon = clock(Weekday::Tue, 12);

        assert_eq!(
            model.base_multiplier(&one, &noon),
            model.base_multiplier(&many, &noon)
        );
    }

    #[test]
    fn only_time_changes() {
        let model = TrafficModel::<NameFragments>::default();
        let routes = vec![route(&["Main Gate", "Lab"], 10), route(&["Library", "Lab"], 7)];
        let mut rng = StdRng::seed_from_u64(7);

        let adjusted = model.apply_traffic(&routes, &clock(Weekday::Mon, 8), &mut rng);
        assert_eq!(adjusted.len(), routes.len());
        for (before, after) in routes.iter().zip(&adjusted) {
            assert_eq!(before.path(), after.path());
            assert_eq!(before.distance(), after.distance());
            assert_eq!(before.landmarks(), after.landmarks());
        }
    }

    #[test]
    fn same_seed_same_times() {
        let model = TrafficModel::<NameFragments>::default();
        let routes = vec![route(&["Main Gate", "Lab"], 13), route(&["Library", "Lab"], 29)];
        let now = clock(Weekday::Thu, 17);

        let first = model.apply_traffic(&routes, &now, &mut StdRng::seed_from_u64(42));
        let second = model.apply_traffic(&routes, &now, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn delay_is_difference_from_base() {
        let model = TrafficModel::<NameFragments>::default();
        let busy = route(&["Main Gate", "Lab"], 20);
        let mut rng = StdRng::seed_from_u64(3);

        // 20 * 1.5 * 1.2 * [0.9, 1.1] lies in [32.4, 39.6]
        let delay = model.delay(&busy, &clock(Weekday::Mon, 8), &mut rng);
        assert!((13..=20).contains(&delay), "delay {delay}");
    }

    #[test]
    fn level_table() {
        let model = TrafficModel::<NameFragments>::default();
        let busy: Location = "North Gate".into();
        let quiet: Location = "Library".into();
        let rush = clock(Weekday::Mon, 8);
        let calm = clock(Weekday::Mon, 12);

        assert_eq!(model.traffic_level(&busy, &rush), TrafficLevel::Heavy);
        assert_eq!(model.traffic_level(&busy, &calm), TrafficLevel::Moderate);
        assert_eq!(model.traffic_level(&quiet, &rush), TrafficLevel::Moderate);
        assert_eq!(model.traffic_level(&quiet, &calm), TrafficLevel::Light);
    }

    #[test]
    fn closure_predicate() {
        let model = TrafficModel::new(|location: &Location| location.name() == "Stadium");

        assert!(model.is_high_traffic(&"Stadium".into()));
        assert!(!model.is_high_traffic(&"Main Gate".into()));
    }

    #[test]
    fn config_fragments() {
        let config = TrafficConfig {
            high_traffic: NameFragments::new(["Stadium"]),
        };
        let model = TrafficModel::from_config(&config);

        assert!(model.is_high_traffic(&"City Stadium".into()));
        assert!(!model.is_high_traffic(&"Main Gate".into()));
    }
}

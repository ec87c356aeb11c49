//! Stable ordering of route collections.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::model::RouteOption;

/// Key a route collection is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Shortest distance first
    Distance,
    /// Fastest estimated time first
    #[default]
    Time,
    /// Most landmarks passed first
    Landmarks,
}

impl Criterion {
    fn compare(self, a: &RouteOption, b: &RouteOption) -> Ordering {
        match self {
            Self::Distance => a.distance().total_cmp(&b.distance()),
            Self::Time => a.time().cmp(&b.time()),
            Self::Landmarks => b.landmarks().len().cmp(&a.landmarks().len()),
        }
    }
}

impl FromStr for Criterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(Self::Distance),
            "time" => Ok(Self::Time),
            "landmarks" => Ok(Self::Landmarks),
            other => Err(Error::InvalidData(format!(
                "Unknown ranking criterion: {other}"
            ))),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Distance => "distance",
            Self::Time => "time",
            Self::Landmarks => "landmarks",
        };
        f.write_str(name)
    }
}

/// Orders routes by `criterion`; routes with equal keys keep their input order.
pub fn rank(mut routes: Vec<RouteOption>, criterion: Criterion) -> Vec<RouteOption> {
    routes.sort_by(|a, b| criterion.compare(a, b));
    routes
}

/// [`rank`] for values that wrap a route, e.g. waypoint routes
pub fn rank_by<T, F>(mut items: Vec<T>, criterion: Criterion, route: F) -> Vec<T>
where
    F: Fn(&T) -> &RouteOption,
{
    items.sort_by(|a, b| criterion.compare(route(a), route(b)));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;

    fn route(name: &str, distance: f64, time: u32, landmarks: usize) -> RouteOption {
        let tags = (0..landmarks)
            .map(|i| Location::new(format!("L{i}")))
            .collect();
        RouteOption::new(vec!["S".into(), name.into()], distance, time, tags).unwrap()
    }

    fn names(routes: &[RouteOption]) -> Vec<&str> {
        routes.iter().map(|route| route.destination().name()).collect()
    }

    #[test]
    fn time_ties_keep_input_order() {
        let routes = vec![route("x", 1.0, 10, 0), route("a", 2.0, 5, 0), route("b", 3.0, 5, 0)];
        let ranked = rank(routes, Criterion::Time);

        assert_eq!(names(&ranked), ["a", "b", "x"]);
    }

    #[test]
    fn distance_is_non_decreasing() {
        let routes = vec![
            route("a", 300.0, 1, 0),
            route("b", 100.0, 9, 0),
            route("c", 300.0, 2, 0),
            route("d", 200.0, 3, 0),
        ];
        let ranked = rank(routes, Criterion::Distance);

        assert!(ranked.windows(2).all(|w| w[0].distance() <= w[1].distance()));
        assert_eq!(names(&ranked), ["b", "d", "a", "c"]);
    }

    #[test]
    fn landmarks_most_first() {
        let routes = vec![route("a", 1.0, 1, 1), route("b", 1.0, 1, 3), route("c", 1.0, 1, 1)];
        let ranked = rank(routes, Criterion::Landmarks);

        assert_eq!(names(&ranked), ["b", "a", "c"]);
    }

    #[test]
    fn ranks_wrapped_routes() {
        let items = vec![("first", route("a", 5.0, 1, 0)), ("second", route("b", 1.0, 1, 0))];
        let ranked = rank_by(items, Criterion::Distance, |(_, route)| route);

        assert_eq!(ranked[0].0, "second");
    }

    #[test]
    fn criterion_parsing() {
        assert_eq!("Distance".parse::<Criterion>().unwrap(), Criterion::Distance);
        assert_eq!(" time ".parse::<Criterion>().unwrap(), Criterion::Time);
        assert_eq!("landmarks".parse::<Criterion>().unwrap(), Criterion::Landmarks);
        assert!("speed".parse::<Criterion>().is_err());
        assert_eq!(Criterion::default().to_string(), "time");
    }
}

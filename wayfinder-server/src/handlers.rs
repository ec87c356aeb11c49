use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};
use tracing::{debug, info};
use wayfinder_core::prelude::{
    Clock, Criterion, DEFAULT_AUTO_CONNECTIONS, Distance, Error, Location, RouteOption,
    RoutePlanner, TrafficLevel, WaypointRoute, distance_matrix, rank_by,
};

use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct PrefixQuery {
    #[serde(default)]
    prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct NamedLocation {
    name: Location,
}

#[derive(Debug, Deserialize)]
pub struct ConnectionRequest {
    from: Location,
    to: Location,
    distance: Distance,
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    from: Location,
    to: Location,
    /// Waypoints every route has to visit
    #[serde(default)]
    landmarks: Vec<Location>,
    #[serde(default)]
    criterion: Criterion,
    /// Adjust times for simulated traffic
    #[serde(default)]
    traffic: bool,
    /// Clock for the traffic model; current local time when absent
    at: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct ClockQuery {
    at: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct MatrixRequest {
    locations: Vec<Location>,
}

#[derive(Debug, Serialize)]
pub struct TrafficResponse {
    location: Location,
    level: TrafficLevel,
    clock: String,
}

fn clock_at(at: Option<NaiveDateTime>) -> Clock {
    at.map_or_else(Clock::now, Clock::from_datetime)
}

fn neighbor_map(neighbors: impl IntoIterator<Item = (Location, Distance)>) -> BTreeMap<Location, Distance> {
    neighbors.into_iter().collect()
}

fn waypoint_route_json(route: &WaypointRoute) -> JsonValue {
    json!({
        "route": route.route.to_json(),
        "realized": route.realized,
        "skipped": route.skipped,
        "complete": route.is_complete(),
    })
}

pub async fn health(State(state): State<AppState>) -> ApiResult<Json<JsonValue>> {
    let graph = state.graph.read()?;
    Ok(Json(json!({
        "status": "ok",
        "locations": graph.location_count(),
        "connections": graph.edge_count(),
    })))
}

pub async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<PrefixQuery>,
) -> ApiResult<Json<Vec<Location>>> {
    let graph = state.graph.read()?;
    Ok(Json(graph.search_by_prefix(&query.prefix)))
}

/// Adds a location connected to a few existing ones with generated distances
pub async fn add_location(
    State(state): State<AppState>,
    Json(request): Json<NamedLocation>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    let location = request.name;
    let mut rng = state.child_rng()?;
    let (created, neighbors) = state.graph.update(|graph| {
        let created =
            graph.add_location_connected(location.clone(), DEFAULT_AUTO_CONNECTIONS, &mut rng);
        (created, neighbor_map(graph.neighbors(&location)))
    })?;

    let status = if created {
        info!("Added location {location} with {} connections", neighbors.len());
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(json!({ "name": location, "created": created, "neighbors": neighbors })),
    ))
}

pub async fn connect(
    State(state): State<AppState>,
    Json(request): Json<ConnectionRequest>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    let ConnectionRequest { from, to, distance } = request;
    state
        .graph
        .update(|graph| graph.connect(from.clone(), to.clone(), distance))??;

    info!("Connected {from} and {to} ({distance})");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "from": from, "to": to, "distance": distance })),
    ))
}

pub async fn list_landmarks(State(state): State<AppState>) -> ApiResult<Json<Vec<Location>>> {
    let landmarks = state.landmarks()?;
    Ok(Json(landmarks.iter().cloned().collect()))
}

/// Flags a location as a landmark, adding the location if it is new
pub async fn add_landmark(
    State(state): State<AppState>,
    Json(request): Json<NamedLocation>,
) -> ApiResult<(StatusCode, Json<JsonValue>)> {
    let location = request.name;
    state.graph.update(|graph| graph.add_location(location.clone()))?;
    let added = state.landmarks_mut()?.insert(location.clone());

    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(json!({ "name": location, "added": added }))))
}

/// Runs CPU-bound search work on the blocking pool so async workers stay
/// free and the request timeout can fire while it runs.
async fn run_blocking<T, F>(work: F) -> ApiResult<T>
where
    F: FnOnce() -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await??)
}

/// Ranked routes between two locations, optionally through waypoints and
/// adjusted for traffic
pub async fn find_routes(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> ApiResult<Json<JsonValue>> {
    debug!("Route request {request:?}");
    let rng = state.child_rng()?;
    let body = run_blocking(move || plan_routes(&state, &request, rng)).await?;
    Ok(Json(body))
}

fn plan_routes(
    state: &AppState,
    request: &RouteRequest,
    mut rng: StdRng,
) -> Result<JsonValue, Error> {
    let graph = state.graph.read()?;
    let landmarks = state.landmarks()?;

    let planner = RoutePlanner::new(|location: &Location| landmarks.contains(location))
        .with_budget(state.budget);
    let mut routes = planner.find_routes_via_landmarks(
        &graph,
        &request.from,
        &request.to,
        &request.landmarks,
        &mut rng,
    )?;

    if request.traffic {
        let clock = clock_at(request.at);
        let plain: Vec<RouteOption> = routes.iter().map(|route| route.route.clone()).collect();
        let adjusted = state.traffic.apply_traffic(&plain, &clock, &mut rng);
        routes = routes
            .into_iter()
            .zip(adjusted)
            .map(|(route, option)| route.with_route(option))
            .collect();
    }

    let ranked = rank_by(routes, request.criterion, |route| &route.route);
    Ok(json!({
        "criterion": request.criterion,
        "routes": ranked.iter().map(waypoint_route_json).collect::<Vec<_>>(),
    }))
}

/// Sampled routes passing through a landmark
pub async fn routes_through_landmark(
    State(state): State<AppState>,
    Path(name): Path<Location>,
) -> ApiResult<Json<Vec<JsonValue>>> {
    let mut rng = state.child_rng()?;
    let routes = run_blocking(move || {
        let graph = state.graph.read()?;
        let landmarks = state.landmarks()?;
        let planner = RoutePlanner::new(|location: &Location| landmarks.contains(location))
            .with_budget(state.budget);
        let routes = planner.routes_through_landmark(&graph, &name, &mut rng)?;
        Ok(routes.iter().map(RouteOption::to_json).collect())
    })
    .await?;
    Ok(Json(routes))
}

pub async fn traffic_level(
    State(state): State<AppState>,
    Path(location): Path<Location>,
    Query(query): Query<ClockQuery>,
) -> ApiResult<Json<TrafficResponse>> {
    if !state.graph.read()?.contains(&location) {
        return Err(Error::UnknownLocation(location.to_string()).into());
    }

    let clock = clock_at(query.at);
    let level = state.traffic.traffic_level(&location, &clock);
    Ok(Json(TrafficResponse {
        location,
        level,
        clock: clock.to_string(),
    }))
}

/// Pairwise shortest distances; `null` marks unreachable pairs
pub async fn distances(
    State(state): State<AppState>,
    Json(request): Json<MatrixRequest>,
) -> ApiResult<Json<JsonValue>> {
    let body = run_blocking(move || {
        let graph = state.graph.read()?;
        if let Some(unknown) = request
            .locations
            .iter()
            .find(|location| !graph.contains(location))
        {
            return Err(Error::UnknownLocation(unknown.to_string()));
        }

        let matrix = distance_matrix(&graph, &request.locations);
        Ok(json!({
            "locations": request.locations,
            "distances": matrix,
        }))
    })
    .await?;
    Ok(Json(body))
}

//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{
    Distance, InvalidDistance, LineId, PathError, Section, SectionError, SectionPath, Station,
    StationId,
};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/lines/:line_id/sections",
            post(add_section).get(list_sections).delete(remove_section),
        )
        .route("/lines/:line_id/stations", get(list_stations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Add a section, creating the line's path on first use.
async fn add_section(
    State(state): State<AppState>,
    Path(line_id): Path<u64>,
    Json(req): Json<AddSectionRequest>,
) -> Result<(StatusCode, Json<StationsResponse>), AppError> {
    let line = LineId(line_id);
    let section = section_from_request(line, req)?;

    let mut lines = state.lines.lock().await;
    let path = lines.entry(line).or_insert_with(|| SectionPath::new(line));
    path.add_section(section)?;

    let stations = path.sorted_stations()?;
    Ok((
        StatusCode::CREATED,
        Json(StationsResponse::new(line, &stations)),
    ))
}

/// Remove the last section of a line.
async fn remove_section(
    State(state): State<AppState>,
    Path(line_id): Path<u64>,
    Query(query): Query<RemoveSectionQuery>,
) -> Result<Json<StationsResponse>, AppError> {
    let line = LineId(line_id);
    let station_id = StationId(query.station_id);

    let mut lines = state.lines.lock().await;
    let path = lines.get_mut(&line).ok_or_else(|| unknown_line(line))?;
    if !path.has_section() {
        return Err(PathError::EmptyPath.into());
    }
    let station = path
        .station(station_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound {
            message: format!("station {station_id} is not on line {line}"),
        })?;
    path.remove_section(&station)?;

    let stations = path.sorted_stations()?;
    Ok(Json(StationsResponse::new(line, &stations)))
}

/// List the stations of a line in travel order.
async fn list_stations(
    State(state): State<AppState>,
    Path(line_id): Path<u64>,
) -> Result<Json<StationsResponse>, AppError> {
    let line = LineId(line_id);
    let lines = state.lines.lock().await;
    let path = lines.get(&line).ok_or_else(|| unknown_line(line))?;

    let stations = path.sorted_stations()?;
    Ok(Json(StationsResponse::new(line, &stations)))
}

/// List the sections of a line in travel order.
async fn list_sections(
    State(state): State<AppState>,
    Path(line_id): Path<u64>,
) -> Result<Json<SectionsResponse>, AppError> {
    let line = LineId(line_id);
    let lines = state.lines.lock().await;
    let path = lines.get(&line).ok_or_else(|| unknown_line(line))?;

    Ok(Json(SectionsResponse::from(path)))
}

fn section_from_request(line: LineId, req: AddSectionRequest) -> Result<Section, AppError> {
    let up = Station::new(StationId(req.up_station.id), req.up_station.name);
    let down = Station::new(StationId(req.down_station.id), req.down_station.name);
    let distance = Distance::new(req.distance)?;
    Ok(Section::new(line, up, down, distance)?)
}

fn unknown_line(line: LineId) -> AppError {
    AppError::NotFound {
        message: format!("line {line} not found"),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest {
        message: String,
        code: Option<&'static str>,
    },
    NotFound {
        message: String,
    },
    Internal {
        message: String,
        code: Option<&'static str>,
    },
}

impl From<PathError> for AppError {
    fn from(e: PathError) -> Self {
        let code = Some(e.code());
        if e.is_internal() {
            AppError::Internal {
                message: e.to_string(),
                code,
            }
        } else {
            AppError::BadRequest {
                message: e.to_string(),
                code,
            }
        }
    }
}

impl From<SectionError> for AppError {
    fn from(e: SectionError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
            code: Some("INVALID_SECTION"),
        }
    }
}

impl From<InvalidDistance> for AppError {
    fn from(e: InvalidDistance) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
            code: Some("INVALID_DISTANCE"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, code) = match self {
            AppError::BadRequest { message, code } => (StatusCode::BAD_REQUEST, message, code),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message, None),
            AppError::Internal { message, code } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message, code)
            }
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse {
            error: message,
            code,
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn add_body(up: (u64, &str), down: (u64, &str), distance: u32) -> Value {
        json!({
            "up_station": { "id": up.0, "name": up.1 },
            "down_station": { "id": down.0, "name": down.1 },
            "distance": distance,
        })
    }

    fn station_ids(body: &Value) -> Vec<u64> {
        body["stations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_u64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn health_check() {
        let router = create_router(AppState::new());
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn add_list_and_remove() {
        let router = create_router(AppState::new());

        let (status, body) = send(
            &router,
            Method::POST,
            "/lines/1/sections",
            Some(add_body((1, "A"), (2, "B"), 10)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(station_ids(&body), vec![1, 2]);
        assert_eq!(body["line_id"], 1);

        let (status, body) = send(
            &router,
            Method::POST,
            "/lines/1/sections",
            Some(add_body((1, "A"), (3, "D"), 3)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(station_ids(&body), vec![1, 3, 2]);

        let (status, body) = send(&router, Method::GET, "/lines/1/sections", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_distance"], 10);
        assert_eq!(body["sections"][1]["distance"], 7);
        assert_eq!(body["sections"][1]["up_station"]["name"], "D");

        let (status, body) =
            send(&router, Method::DELETE, "/lines/1/sections?station_id=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(station_ids(&body), vec![1, 3]);

        let (status, body) = send(&router, Method::GET, "/lines/1/stations", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stations"][1]["name"], "D");
    }

    #[tokio::test]
    async fn validation_errors_are_bad_requests() {
        let router = create_router(AppState::new());
        send(
            &router,
            Method::POST,
            "/lines/2/sections",
            Some(add_body((1, "A"), (2, "B"), 10)),
        )
        .await;

        let (status, body) = send(
            &router,
            Method::POST,
            "/lines/2/sections",
            Some(add_body((1, "A"), (3, "C"), 10)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "SECTION_TOO_LONG");

        let (status, body) = send(
            &router,
            Method::POST,
            "/lines/2/sections",
            Some(add_body((2, "B"), (1, "A"), 5)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "SECTIONS_ALREADY_EXIST");

        let (status, body) = send(
            &router,
            Method::POST,
            "/lines/2/sections",
            Some(add_body((8, "X"), (9, "Y"), 5)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "DISCONNECTED_SECTION");

        let (status, body) = send(
            &router,
            Method::POST,
            "/lines/2/sections",
            Some(add_body((2, "B"), (3, "C"), 0)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_DISTANCE");

        let (status, body) = send(
            &router,
            Method::POST,
            "/lines/2/sections",
            Some(add_body((2, "B"), (2, "B"), 4)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_SECTION");
    }

    #[tokio::test]
    async fn remove_errors() {
        let router = create_router(AppState::new());

        let (status, _) =
            send(&router, Method::DELETE, "/lines/5/sections?station_id=1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(
            &router,
            Method::POST,
            "/lines/5/sections",
            Some(add_body((1, "A"), (2, "B"), 10)),
        )
        .await;
        send(
            &router,
            Method::POST,
            "/lines/5/sections",
            Some(add_body((2, "B"), (3, "C"), 10)),
        )
        .await;

        let (status, body) =
            send(&router, Method::DELETE, "/lines/5/sections?station_id=1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "NOT_END_STATION");

        let (status, _) =
            send(&router, Method::DELETE, "/lines/5/sections?station_id=42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn remove_from_emptied_line() {
        let router = create_router(AppState::new());
        send(
            &router,
            Method::POST,
            "/lines/6/sections",
            Some(add_body((1, "A"), (2, "B"), 10)),
        )
        .await;

        let (status, body) =
            send(&router, Method::DELETE, "/lines/6/sections?station_id=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(station_ids(&body).is_empty());

        let (status, body) =
            send(&router, Method::DELETE, "/lines/6/sections?station_id=2", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "EMPTY_PATH");
    }

    #[tokio::test]
    async fn renamed_station_keeps_one_name() {
        let router = create_router(AppState::new());
        send(
            &router,
            Method::POST,
            "/lines/7/sections",
            Some(add_body((1, "A"), (2, "B"), 10)),
        )
        .await;
        let (status, body) = send(
            &router,
            Method::POST,
            "/lines/7/sections",
            Some(add_body((0, "Z"), (1, "A-renamed"), 5)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["stations"][1]["name"], "A");

        let (_, body) = send(&router, Method::GET, "/lines/7/sections", None).await;
        assert_eq!(body["sections"][0]["down_station"]["name"], "A");
        assert_eq!(body["sections"][1]["up_station"]["name"], "A");
    }

    #[tokio::test]
    async fn unknown_line_not_found() {
        let router = create_router(AppState::new());
        let (status, body) = send(&router, Method::GET, "/lines/99/stations", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "line 99 not found");
        assert!(body.get("code").is_none());
    }

    #[tokio::test]
    async fn preloaded_lines_are_served() {
        let line = LineId(3);
        let stations: Vec<Station> = (1..=3)
            .map(|id| Station::new(StationId(id), format!("S{id}")))
            .collect();
        let sections = stations.windows(2).rev().map(|pair| {
            Section::new(line, pair[0].clone(), pair[1].clone(), Distance::new(2).unwrap())
                .unwrap()
        });
        let path = SectionPath::from_sections(line, sections).unwrap();

        let router = create_router(AppState::with_lines([path]));
        let (status, body) = send(&router, Method::GET, "/lines/3/stations", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(station_ids(&body), vec![1, 2, 3]);
    }
}

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::{
    estimator::{
        format::{format_currency, format_price_per_m2, render_text},
        DisplayState, Estimator,
    },
    models::{
        coordinate::Coordinate,
        district::District,
        property::{check_coordinate, InputError, PropertyAttributes},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub estimator: Estimator,
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct DistrictView {
    pub label: String,
    pub index: u8,
}

#[derive(Serialize)]
pub struct DistrictsResponse {
    pub comunas: Vec<DistrictView>,
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub lat: f64,
    pub lon: f64,
    pub comuna: String,
    pub dormitorios: u32,
    pub banos: u32,
    pub ambientes: u32,
    pub sup_m2: f64,
}

#[derive(Serialize)]
pub struct EstimateResponse {
    pub state: DisplayState,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_price_per_m2: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl EstimateRequest {
    pub fn into_form(self) -> Result<(Coordinate, PropertyAttributes), InputError> {
        let coordinate = Coordinate::new(self.lat, self.lon);
        check_coordinate(&coordinate)?;

        let attributes = PropertyAttributes {
            district: District::parse_label(&self.comuna)?,
            bedrooms: self.dormitorios,
            bathrooms: self.banos,
            rooms: self.ambientes,
            surface_m2: self.sup_m2,
        };
        attributes.validate()?;

        Ok((coordinate, attributes))
    }
}

impl From<DisplayState> for EstimateResponse {
    fn from(state: DisplayState) -> Self {
        let message = render_text(&state);
        let (formatted_price, formatted_price_per_m2) = match &state {
            DisplayState::Result { prediction, .. } => (
                Some(format_currency(prediction.price)),
                Some(format_price_per_m2(prediction.price_per_m2)),
            ),
            _ => (None, None),
        };
        EstimateResponse {
            state,
            message,
            formatted_price,
            formatted_price_per_m2,
        }
    }
}

const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "content-type"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
];

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/comunas", get(list_districts).options(preflight))
        .route("/api/estimate", post(estimate).options(preflight))
        .layer(middleware::map_response(with_cors_headers))
        .with_state(state)
}

pub async fn bind(bind_addr: &str) -> anyhow::Result<TcpListener> {
    TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind http listener on {bind_addr}"))
}

pub async fn start_http_server(
    state: AppState,
    listener: TcpListener,
    mut shutdown_rx: tokio::sync::broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
        })
        .await?;

    Ok(())
}

async fn with_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
    response
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn list_districts() -> Json<ApiResponse<DistrictsResponse>> {
    let comunas = District::all()
        .map(|district| DistrictView {
            label: district.label(),
            index: district.index(),
        })
        .collect();
    Json(ApiResponse {
        data: DistrictsResponse { comunas },
    })
}

async fn estimate(State(state): State<AppState>, Json(body): Json<EstimateRequest>) -> Response {
    let (coordinate, attributes) = match body.into_form() {
        Ok(form) => form,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    };

    let estimator = state.estimator.clone();
    let result =
        tokio::task::spawn_blocking(move || estimator.calculate(coordinate, &attributes)).await;

    match result {
        Ok(display) => Json(ApiResponse {
            data: EstimateResponse::from(display),
        })
        .into_response(),
        Err(err) => {
            error!("Estimate task failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

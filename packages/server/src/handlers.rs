//! HTTP handler functions for the disaster map API.

use actix_web::{HttpResponse, web};
use disaster_map_analytics::aggregate::country_summary;
use disaster_map_dashboard::{Selection, derive_views};
use disaster_map_disaster_models::{DisasterType, Metric, Year, YearRange};
use disaster_map_server_models::{ApiError, ApiHealth, ApiMeta, ApiMetric, ViewQueryParams};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/meta`
///
/// Returns the year bounds, disaster types, metrics, and countries the
/// frontend builds its controls from.
pub async fn meta(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiMeta {
        years: state.bounds,
        disaster_types: DisasterType::all().to_vec(),
        metrics: Metric::all().iter().copied().map(ApiMetric::from).collect(),
        default_metric: state.default_metric,
        countries: state.store.keys().cloned().collect(),
    })
}

/// `GET /api/views`
///
/// Derives the map, bar, and line views for the selection described by
/// the query parameters.
pub async fn views(
    state: web::Data<AppState>,
    params: web::Query<ViewQueryParams>,
) -> HttpResponse {
    match parse_selection(&state, &params) {
        Ok(selection) => HttpResponse::Ok().json(derive_views(&state.store, &selection)),
        Err(e) => {
            log::warn!("Rejected views query {params:?}: {e}");
            HttpResponse::BadRequest().json(ApiError::new(e))
        }
    }
}

/// `GET /api/countries/{name}`
///
/// Returns the tooltip totals for one country.
pub async fn country(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let name = path.into_inner();
    match country_summary(&state.store, &name) {
        Some(summary) => HttpResponse::Ok().json(summary),
        None => HttpResponse::NotFound().json(ApiError::new(format!("Unknown country '{name}'"))),
    }
}

/// Reads an optional year parameter, ignoring blanks.
fn parse_year_param(name: &str, value: Option<&str>) -> Result<Option<Year>, String> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| format!("Invalid {name} year '{v}'")),
    }
}

/// Builds a [`Selection`] from query parameters, defaulting to the full
/// range, no country, no type, and the server's default metric.
fn parse_selection(state: &AppState, params: &ViewQueryParams) -> Result<Selection, String> {
    let start = parse_year_param("start", params.start.as_deref())?.unwrap_or(state.bounds.start());
    let end = parse_year_param("end", params.end.as_deref())?.unwrap_or(state.bounds.end());
    let years = YearRange::new(start, end)
        .map_err(|e| e.to_string())?
        .clamp_to(state.bounds);

    let metric = match params.metric.as_deref().map(str::trim) {
        None | Some("") => state.default_metric,
        Some(m) => m.parse().map_err(|_| format!("Unknown metric '{m}'"))?,
    };

    let mut selection = Selection::new(years, metric);

    if let Some(ty) = params.disaster_type.as_deref().map(str::trim)
        && !ty.is_empty()
    {
        selection.disaster_type = Some(
            ty.parse()
                .map_err(|_| format!("Unknown disaster type '{ty}'"))?,
        );
    }

    if let Some(country) = params.country.as_deref().map(str::trim)
        && !country.is_empty()
    {
        if !state.store.contains_key(country) {
            return Err(format!("Unknown country '{country}'"));
        }
        selection.country = Some(country.to_string());
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, http::StatusCode, test as actix_test};
    use disaster_map_source::store::{RawRow, build};

    use super::*;

    fn state() -> web::Data<AppState> {
        let rows = vec![
            RawRow::new()
                .with("Country Name", "Bermuda")
                .with("Year", "1970")
                .with("Disaster Type", "Storm")
                .with("Total deaths", "5")
                .with("1970", "50000"),
            RawRow::new()
                .with("Country Name", "Chile")
                .with("Year", "1975")
                .with("Disaster Type", "Flood")
                .with("Total deaths", "12"),
        ];
        let store = build(&rows).store;
        web::Data::new(AppState::new(store, Metric::Death).unwrap())
    }

    #[test]
    fn selection_defaults_to_full_range() {
        let state = state();
        let selection = parse_selection(&state, &ViewQueryParams::default()).unwrap();
        assert_eq!(selection, Selection::new(YearRange::new(1970, 1975).unwrap(), Metric::Death));
    }

    #[test]
    fn selection_rejects_bad_params() {
        let state = state();
        let bad = |params: ViewQueryParams| parse_selection(&state, &params).unwrap_err();

        assert!(bad(ViewQueryParams {
            start: Some("abc".to_string()),
            ..ViewQueryParams::default()
        })
        .contains("start"));
        assert!(bad(ViewQueryParams {
            start: Some("1975".to_string()),
            end: Some("1970".to_string()),
            ..ViewQueryParams::default()
        })
        .contains("1975"));
        assert!(bad(ViewQueryParams {
            disaster_type: Some("Meteor".to_string()),
            ..ViewQueryParams::default()
        })
        .contains("Meteor"));
        assert!(bad(ViewQueryParams {
            metric: Some("population".to_string()),
            ..ViewQueryParams::default()
        })
        .contains("population"));
        assert!(bad(ViewQueryParams {
            country: Some("Atlantis".to_string()),
            ..ViewQueryParams::default()
        })
        .contains("Atlantis"));
    }

    #[actix_web::test]
    async fn health_and_meta() {
        let app = actix_test::init_service(App::new().app_data(state()).configure(crate::configure)).await;

        let req = actix_test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);

        let req = actix_test::TestRequest::get().uri("/api/meta").to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["years"]["start"], 1970);
        assert_eq!(body["disasterTypes"].as_array().unwrap().len(), 13);
        assert_eq!(body["countries"], serde_json::json!(["Bermuda", "Chile"]));
    }

    #[actix_web::test]
    async fn views_for_selection() {
        let app = actix_test::init_service(App::new().app_data(state()).configure(crate::configure)).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/views?start=1970&end=1972&disasterType=Storm&metric=frequency")
            .to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["selection"]["disasterType"], "Storm");
        assert_eq!(body["bar"]["metric"], "frequency");
        assert_eq!(body["line"]["counts"], serde_json::json!([1, 0, 0]));
        assert_eq!(body["map"]["countries"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn invalid_views_query_is_bad_request() {
        let app = actix_test::init_service(App::new().app_data(state()).configure(crate::configure)).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/views?disasterType=Meteor")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("Meteor"));
    }

    #[actix_web::test]
    async fn country_summary_or_not_found() {
        let app = actix_test::init_service(App::new().app_data(state()).configure(crate::configure)).await;

        let req = actix_test::TestRequest::get().uri("/api/countries/Chile").to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["totalDeaths"], 12);

        let req = actix_test::TestRequest::get().uri("/api/countries/Atlantis").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

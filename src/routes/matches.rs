use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{render_matches, render_matrix, Matcher};
use crate::error::MatchError;
use crate::models::{ComputeMatchesRequest, ComputeMatchesResponse, ErrorResponse, HealthResponse, MatchReport, PopulationLimits};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub limits: PopulationLimits,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/compute", web::post().to(compute_matches))
        .route("/matches/matrix", web::post().to(render_report));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Compute matches endpoint
///
/// POST /api/v1/matches/compute
///
/// Request body:
/// ```json
/// {
///   "providers": [{ "name": "string", "attributes": { "subjects": "a,b", "grade_level": "string", "style": "string" } }],
///   "seekers": [{ "name": "string", "attributes": { "subjects": "a,b", "grade_level": "string", "style": "string" } }]
/// }
/// ```
async fn compute_matches(
    state: web::Data<AppState>,
    req: web::Json<ComputeMatchesRequest>,
) -> HttpResponse {
    match run_request(&state, req.into_inner()).await {
        Ok(report) => {
            tracing::info!(
                "Returning {} matches from {} scored pairs",
                report.matches.len(),
                report.scores.len()
            );
            HttpResponse::Ok().json(ComputeMatchesResponse::from(report))
        }
        Err(response) => response,
    }
}

/// Plain-text report endpoint
///
/// POST /api/v1/matches/matrix
///
/// Takes the same body as `/matches/compute` and returns the match lines
/// followed by the compatibility matrix.
async fn render_report(
    state: web::Data<AppState>,
    req: web::Json<ComputeMatchesRequest>,
) -> HttpResponse {
    match run_request(&state, req.into_inner()).await {
        Ok(report) => {
            let body = format!(
                "{}\nCompatibility Matrix:\n{}",
                render_matches(&report.matches),
                render_matrix(&report.scores)
            );
            HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(body)
        }
        Err(response) => response,
    }
}

/// Validate the request, build populations and run the matcher off the
/// async executor
async fn run_request(
    state: &AppState,
    req: ComputeMatchesRequest,
) -> Result<MatchReport, HttpResponse> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: field_errors={:?}", errors);
        return Err(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        }));
    }

    let (providers, seekers) = req
        .into_populations(state.limits)
        .map_err(bad_request)?;

    tracing::debug!(
        "Built populations: {} providers, {} seekers",
        providers.len(),
        seekers.len()
    );

    let matcher = state.matcher.clone();
    web::block(move || matcher.run(&providers, &seekers))
        .await
        .map_err(|e| {
            tracing::error!("Matching task failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Matching failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        })?
        .map_err(bad_request)
}

fn bad_request(err: MatchError) -> HttpResponse {
    tracing::warn!("Rejecting match request: {}", err);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: err.kind().to_string(),
        message: err.to_string(),
        status_code: 400,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    fn app_state(max_population: usize) -> AppState {
        AppState {
            matcher: Matcher::default(),
            limits: PopulationLimits {
                max_population,
                max_pairs: 1000,
            },
        }
    }

    fn record(name: &str, subjects: &str, grade: &str, style: &str) -> serde_json::Value {
        serde_json::json!({
            "name": name,
            "attributes": { "subjects": subjects, "grade_level": grade, "style": style },
        })
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(10)))
                .configure(configure),
        )
        .await;

        let resp: HealthResponse =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;

        assert_eq!(resp.status, "healthy");
    }

    #[actix_web::test]
    async fn test_compute_matches() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(10)))
                .configure(configure),
        )
        .await;

        let body = serde_json::json!({
            "providers": [
                record("Ms. Johnson", "Math,Science", "Elementary", "Visual"),
                record("Mrs. Davis", "Math,Art", "Elementary", "Kinesthetic"),
            ],
            "seekers": [record("Alice", "Math,Science", "Elementary", "Visual")],
        });
        let req = test::TestRequest::post()
            .uri("/matches/compute")
            .set_json(&body)
            .to_request();

        let resp: ComputeMatchesResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp.scores.len(), 2);
        assert_eq!(resp.matches.len(), 1);
        let best = resp.matches[0].best.as_ref().unwrap();
        assert_eq!(best.provider_name, "Ms. Johnson");
        assert_eq!(best.score, 4);
    }

    #[actix_web::test]
    async fn test_missing_attribute_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(10)))
                .configure(configure),
        )
        .await;

        let body = serde_json::json!({
            "providers": [{ "name": "Mr. Smith", "attributes": { "subjects": "English" } }],
            "seekers": [],
        });
        let req = test::TestRequest::post()
            .uri("/matches/compute")
            .set_json(&body)
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let err: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(err.error, "missing_attribute");
    }

    #[actix_web::test]
    async fn test_oversized_population_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(1)))
                .configure(configure),
        )
        .await;

        let body = serde_json::json!({
            "providers": [],
            "seekers": [
                record("Alice", "Math", "Elementary", "Visual"),
                record("Bob", "Art", "Middle", "Auditory"),
            ],
        });
        let req = test::TestRequest::post()
            .uri("/matches/compute")
            .set_json(&body)
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_cross_product_over_limit_is_bad_request() {
        let state = AppState {
            matcher: Matcher::default(),
            limits: PopulationLimits {
                max_population: 10,
                max_pairs: 3,
            },
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;

        let body = serde_json::json!({
            "providers": [
                record("Ms. Johnson", "Math", "Elementary", "Visual"),
                record("Mr. Smith", "English", "Middle", "Auditory"),
            ],
            "seekers": [
                record("Alice", "Math", "Elementary", "Visual"),
                record("Bob", "Art", "Middle", "Auditory"),
            ],
        });
        let req = test::TestRequest::post()
            .uri("/matches/compute")
            .set_json(&body)
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let err: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(err.error, "too_many_pairs");
    }

    #[actix_web::test]
    async fn test_empty_record_name_fails_validation() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(10)))
                .configure(configure),
        )
        .await;

        let body = serde_json::json!({
            "providers": [record("Ms. Johnson", "Math", "Elementary", "Visual")],
            "seekers": [record("", "Math", "Elementary", "Visual")],
        });
        let req = test::TestRequest::post()
            .uri("/matches/compute")
            .set_json(&body)
            .to_request();

        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let err: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(err.error, "Validation failed");
    }

    #[actix_web::test]
    async fn test_matrix_report() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(10)))
                .configure(configure),
        )
        .await;

        let body = serde_json::json!({
            "providers": [record("Mr. Smith", "English,History", "Middle", "Auditory")],
            "seekers": [record("Bob", "English,History", "Middle", "Auditory")],
        });
        let req = test::TestRequest::post()
            .uri("/matches/matrix")
            .set_json(&body)
            .to_request();

        let body = test::call_and_read_body(&app, req).await;
        let text = String::from_utf8(body.to_vec()).unwrap();

        assert!(text.starts_with("Bob is matched with Mr. Smith (Score: 4)\n"));
        assert!(text.contains("Compatibility Matrix:"));
    }
}

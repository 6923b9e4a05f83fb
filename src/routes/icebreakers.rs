use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::IcebreakerAssembler;
use crate::models::{ErrorResponse, GenerationRequest, HealthResponse, IcebreakerRequest};
use crate::services::GenerationFailure;
use std::time::Duration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub assembler: IcebreakerAssembler,
    pub generation_timeout: Duration,
}

/// Configure all icebreaker-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .service(
            web::resource("/api/icebreakers")
                .route(web::post().to(generate_icebreakers))
                .route(web::head().to(availability)),
        );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        backend: state.assembler.backend_name().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Availability probe used by clients before posting
async fn availability() -> impl Responder {
    HttpResponse::Ok().finish()
}

/// Generate icebreakers endpoint
///
/// POST /api/icebreakers
///
/// Request body:
/// ```json
/// {
///   "userA": { "name": "string", "campus": "string", "interests": ["string"], ... },
///   "userB": { ... },
///   "meetingDate": "string",
///   "location": "string",
///   "maxNewTokens": 150
/// }
/// ```
async fn generate_icebreakers(
    state: web::Data<AppState>,
    req: web::Json<IcebreakerRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for icebreaker request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request_id = uuid::Uuid::new_v4();
    let request = GenerationRequest::new(&req.user_a, &req.user_b, req.context());
    let budget = req.max_new_tokens.unwrap_or(state.assembler.max_new_tokens());

    tracing::info!(
        "[{}] Icebreaker request for {} and {} at {}",
        request_id,
        request.user_a.name(),
        request.user_b.name(),
        request.context.location
    );

    let outcome = tokio::time::timeout(
        state.generation_timeout,
        state.assembler.generate(&request, budget),
    )
    .await;

    match outcome {
        Ok(Ok(result)) => {
            tracing::info!("[{}] Returning icebreakers", request_id);
            HttpResponse::Ok().json(result)
        }
        Ok(Err(GenerationFailure::Unavailable(message))) => {
            tracing::error!("[{}] Generation backend unavailable: {}", request_id, message);
            HttpResponse::ServiceUnavailable().json(ErrorResponse {
                error: "Model unavailable".to_string(),
                message,
                status_code: 503,
            })
        }
        Ok(Err(e)) => {
            tracing::error!("[{}] Failed to generate icebreakers: {}", request_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to generate icebreakers".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
        Err(_) => {
            tracing::error!(
                "[{}] Generation timed out after {}s",
                request_id,
                state.generation_timeout.as_secs()
            );
            HttpResponse::GatewayTimeout().json(ErrorResponse {
                error: "Generation timed out".to_string(),
                message: format!(
                    "No response from the generator within {} seconds",
                    state.generation_timeout.as_secs()
                ),
                status_code: 504,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IcebreakerResult;
    use crate::services::{TemplateGenerator, TextGenerator};
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _prompt: &str, _max_new_tokens: u32) -> Result<String, GenerationFailure> {
            Err(GenerationFailure::Unavailable("model is loading".to_string()))
        }
    }

    struct SlowGenerator;

    #[async_trait]
    impl TextGenerator for SlowGenerator {
        fn name(&self) -> &str {
            "slow"
        }

        async fn generate(&self, _prompt: &str, _max_new_tokens: u32) -> Result<String, GenerationFailure> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(String::new())
        }
    }

    fn state(generator: Arc<dyn TextGenerator>, timeout: Duration) -> web::Data<AppState> {
        web::Data::new(AppState {
            assembler: IcebreakerAssembler::with_default_budget(generator),
            generation_timeout: timeout,
        })
    }

    #[actix_web::test]
    async fn test_generate_returns_two_starters() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(TemplateGenerator::new(true)), Duration::from_secs(10)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/icebreakers")
            .set_json(serde_json::json!({
                "userA": { "name": "Alex", "interests": ["AI", "Music"] },
                "userB": { "name": "Jordan", "interests": ["music"] },
                "location": "Campus Coffee Shop"
            }))
            .to_request();

        let result: IcebreakerResult = test::call_and_read_body_json(&app, req).await;
        assert_eq!(result.conversation_starters.len(), 2);
        assert!(!result.activity.is_empty());
        assert!(!result.shared_topic.is_empty());
    }

    #[actix_web::test]
    async fn test_invalid_token_budget_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(TemplateGenerator::default()), Duration::from_secs(10)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/icebreakers")
            .set_json(serde_json::json!({ "maxNewTokens": 0 }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_generation_failure_is_surfaced() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(FailingGenerator), Duration::from_secs(10)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/icebreakers")
            .set_json(serde_json::json!({}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_generation_timeout() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(SlowGenerator), Duration::from_millis(50)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/icebreakers")
            .set_json(serde_json::json!({}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[actix_web::test]
    async fn test_health_and_head_probe() {
        let app = test::init_service(
            App::new()
                .app_data(state(Arc::new(TemplateGenerator::default()), Duration::from_secs(10)))
                .configure(configure),
        )
        .await;

        let health: HealthResponse =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.backend, "template");

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::HEAD)
            .uri("/api/icebreakers")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

//! App Router

use std::sync::Arc;

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};

use crate::{healthcheck, home, observability, state::State};

/// Routes that read or refresh the promotion cache.
pub(crate) fn app_router() -> Router {
    Router::new()
        .get(home::show::handler)
        .post(home::submit::handler)
}

/// Full service router with middleware, metrics and API docs.
pub(crate) fn build(state: Arc<State>) -> Router {
    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(observability::request_logging)
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(app_router());

    let doc = OpenApi::new("Larder", env!("CARGO_PKG_VERSION")).merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}

#[cfg(test)]
mod tests {
    use larder_app::domain::{promotions::MockPromotionsService, refresh::MockRefresher};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        healthcheck::HealthResponse,
        test_helpers::{state_with, strict_recipes_mock},
    };

    use super::*;

    fn idle_service() -> Service {
        let mut promotions = MockPromotionsService::new();
        let mut refresher = MockRefresher::new();

        promotions.expect_read_promotions().never();
        refresher.expect_run_cycle().never();

        Service::new(build(state_with(
            promotions,
            refresher,
            strict_recipes_mock(),
        )))
    }

    #[tokio::test]
    async fn healthcheck_is_routed_through_request_logging() -> TestResult {
        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&idle_service())
            .await;

        let body: HealthResponse = res.take_json().await?;

        assert_eq!(body.status, "ok");
        assert!(
            res.headers().contains_key("x-request-id"),
            "request logging should tag responses"
        );

        Ok(())
    }

    #[tokio::test]
    async fn openapi_document_lists_the_form_routes() -> TestResult {
        let body = TestClient::get("http://example.com/api-doc/openapi.json")
            .send(&idle_service())
            .await
            .take_string()
            .await?;

        assert!(body.contains("\"/healthcheck\""), "healthcheck documented");
        assert!(body.contains("Plan Recipes"), "submit handler documented");

        Ok(())
    }
}

//! Submit Form Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::{info, warn};

use crate::{
    extensions::*,
    home::{form::RecipeForm, page::HomePage},
    state::State,
};

/// Submit Form Handler
///
/// Plans recipes around today's promotions from the selected stores (all
/// stores when none are selected). Planner errors come back in the page's
/// `error` field.
#[endpoint(
    tags("recipes"),
    summary = "Plan Recipes",
    responses(
        (status_code = StatusCode::OK, description = "Recipes planned"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unreadable form body"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Form rejected by the planner"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Promotion cache unavailable"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HomePage>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let form = RecipeForm::read(req).await?;
    let unknown_selection = form.selects_only_unknown_stores();
    let request = form.into_request();

    info!(
        stores = ?request.stores,
        preferences = request.preferences.len(),
        "planning recipes"
    );

    super::ensure_fresh(&state.app).await;

    let promotions = if unknown_selection {
        info!("no known store selected, planning without promotions");

        vec![]
    } else {
        state
            .app
            .promotions
            .read_promotions(request.stores.clone())
            .await
            .or_503("failed to read cached promotions")?
    };

    let available = promotions.len();

    match state.app.recipes.suggest(request, promotions).await {
        Ok(plan) => Ok(Json(HomePage::with_recipes(available, plan))),
        Err(error) => {
            warn!("recipe request rejected: {error}");

            res.status_code(StatusCode::UNPROCESSABLE_ENTITY);

            Ok(Json(HomePage::with_error(available, error.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use larder_app::domain::{
        promotions::MockPromotionsService,
        recipes::{
            MockRecipesService, RecipesError,
            models::{PromotedIngredient, RecipePlan},
        },
        refresh::MockRefresher,
        stores::Store,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{home_service, promotion, strict_recipes_mock};

    use super::*;

    fn cached_promotions() -> MockPromotionsService {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_read_promotions()
            .once()
            .withf(|stores| stores.is_empty())
            .returning(|_| Ok(vec![promotion(1, "Milk", Store::Kaufland)]));

        promotions
    }

    fn idle_refresher() -> MockRefresher {
        let mut refresher = MockRefresher::new();

        refresher.expect_run_cycle().never();

        refresher
    }

    #[tokio::test]
    async fn forwards_filtered_promotions_to_the_planner() -> TestResult {
        let mut promotions = cached_promotions();
        let mut recipes = MockRecipesService::new();

        promotions
            .expect_read_promotions()
            .once()
            .withf(|stores| stores == &[Store::Lidl])
            .returning(|_| Ok(vec![promotion(2, "Pasta", Store::Lidl)]));

        recipes
            .expect_suggest()
            .once()
            .withf(|request, promotions| {
                request.people == "3"
                    && request.stores == [Store::Lidl]
                    && request.preferences
                        == ["budget level: low", "vegetarian", "quick"]
                    && request.fridge_items == "eggs, butter"
                    && promotions.len() == 1
            })
            .returning(|request, promotions| {
                Ok(RecipePlan {
                    people: 3,
                    preferences: request.preferences,
                    stores: request.stores,
                    fridge_items: vec!["eggs".to_string(), "butter".to_string()],
                    promoted_ingredients: promotions
                        .into_iter()
                        .map(|p| PromotedIngredient {
                            name: p.name,
                            store: p.store,
                        })
                        .collect(),
                })
            });

        let mut res = TestClient::post("http://example.com/")
            .raw_form(
                "people=3&budget=low&veg=yes&preferences=quick&stores=lidl&stores=aldi\
                 &fridge_items=eggs%2C+butter",
            )
            .send(&home_service(promotions, idle_refresher(), recipes))
            .await;

        let page: HomePage = res.take_json().await?;
        let recipes = page.recipes.ok_or("expected recipes in the page")?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(page.promotions_available, 1);
        assert!(page.error.is_none(), "no error expected");
        assert_eq!(recipes.stores, vec!["lidl"]);
        assert_eq!(
            recipes
                .promoted_ingredients
                .iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Pasta"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn planner_errors_are_shown_to_the_user() -> TestResult {
        let mut promotions = cached_promotions();
        let mut recipes = MockRecipesService::new();

        promotions
            .expect_read_promotions()
            .once()
            .withf(|stores| stores.is_empty())
            .returning(|_| Ok(vec![]));

        recipes.expect_suggest().once().returning(|_, _| {
            Err(RecipesError::InvalidPeople {
                value: "lots".to_string(),
                max: 20,
            })
        });

        let mut res = TestClient::post("http://example.com/")
            .raw_form("people=lots")
            .send(&home_service(promotions, idle_refresher(), recipes))
            .await;

        let page: HomePage = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(
            page.error
                .as_deref()
                .is_some_and(|error| error.contains("lots")),
            "expected the planner error, got {:?}",
            page.error
        );
        assert!(page.recipes.is_none(), "no recipes on error");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_store_selection_forwards_no_promotions() -> TestResult {
        let mut recipes = MockRecipesService::new();

        recipes
            .expect_suggest()
            .once()
            .withf(|request, promotions| {
                request.stores.is_empty() && promotions.is_empty()
            })
            .returning(|request, _| {
                Ok(RecipePlan {
                    people: 2,
                    preferences: request.preferences,
                    stores: vec![],
                    fridge_items: vec!["eggs".to_string()],
                    promoted_ingredients: vec![],
                })
            });

        let mut res = TestClient::post("http://example.com/")
            .raw_form("stores=aldi&fridge_items=eggs")
            .send(&home_service(cached_promotions(), idle_refresher(), recipes))
            .await;

        let page: HomePage = res.take_json().await?;
        let recipes = page.recipes.ok_or("expected recipes in the page")?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(page.promotions_available, 0);
        assert!(
            recipes.promoted_ingredients.is_empty(),
            "Milk from Kaufland must not leak into an aldi-only selection"
        );

        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_returns_503_without_planning() -> TestResult {
        let mut promotions = cached_promotions();

        promotions
            .expect_read_promotions()
            .once()
            .returning(|_| {
                Err(larder_app::domain::promotions::PromotionsServiceError::InvalidData)
            });

        let res = TestClient::post("http://example.com/")
            .raw_form("people=2&stores=kaufland")
            .send(&home_service(
                promotions,
                idle_refresher(),
                strict_recipes_mock(),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }
}

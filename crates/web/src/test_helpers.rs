//! Test helpers.

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use larder_app::{
    calendar,
    context::AppContext,
    domain::{
        promotions::{
            MockPromotionsService,
            records::{PromotionId, PromotionRecord},
        },
        recipes::MockRecipesService,
        refresh::{MockRefresher, RefreshReport},
        stores::Store,
    },
};
use salvo::{affix_state::inject, prelude::*};

use crate::{router, state::State};

pub(crate) fn promotion(id: i64, name: &str, store: Store) -> PromotionRecord {
    PromotionRecord {
        id: PromotionId::from_i64(id),
        name: name.to_string(),
        store,
        captured_on: calendar::today(),
    }
}

pub(crate) fn empty_report() -> RefreshReport {
    RefreshReport {
        started_at: Timestamp::UNIX_EPOCH,
        duration: Duration::ZERO,
        stores: vec![],
    }
}

pub(crate) fn strict_recipes_mock() -> MockRecipesService {
    let mut recipes = MockRecipesService::new();

    recipes.expect_suggest().never();

    recipes
}

pub(crate) fn state_with(
    promotions: MockPromotionsService,
    refresher: MockRefresher,
    recipes: MockRecipesService,
) -> Arc<State> {
    State::shared(AppContext::new(
        Arc::new(promotions),
        Arc::new(refresher),
        Arc::new(recipes),
    ))
}

pub(crate) fn home_service(
    promotions: MockPromotionsService,
    refresher: MockRefresher,
    recipes: MockRecipesService,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(promotions, refresher, recipes)))
            .push(router::app_router()),
    )
}

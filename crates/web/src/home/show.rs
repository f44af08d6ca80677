//! Show Form Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{extensions::*, home::page::HomePage, state::State};

/// Show Form Handler
///
/// Returns the empty form with the stores on offer and how many promotions
/// are cached for today. Refreshes the cache first when it is empty.
#[endpoint(
    tags("recipes"),
    summary = "Recipe Form",
    responses(
        (status_code = StatusCode::OK, description = "Empty form"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Promotion cache unavailable"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HomePage>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    super::ensure_fresh(&state.app).await;

    let promotions = state
        .app
        .promotions
        .read_promotions(vec![])
        .await
        .or_503("failed to read cached promotions")?;

    Ok(Json(HomePage::empty(promotions.len())))
}

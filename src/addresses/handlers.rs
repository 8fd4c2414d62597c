use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use tracing::instrument;

use super::dto::{AddAddressRequest, EditAddressRequest};
use super::repo_types::{Address, PopulatedAddress};
use super::services;
use crate::{
    auth::AuthUser, error::Result, extractors::JsonBody, response::ApiResponse,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/addresses/user/:user_id",
            get(get_address).post(add_address),
        )
        // `me` shadows the id route, so its edit/delete still go through the id check
        .route(
            "/addresses/me",
            get(check_user_has_address)
                .patch(edit_me_address)
                .delete(delete_me_address),
        )
        .route(
            "/addresses/:address_id",
            get(get_single_address)
                .patch(edit_single_address)
                .delete(delete_address),
        )
}

#[instrument(skip(state, body))]
pub async fn add_address(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    JsonBody(body): JsonBody<AddAddressRequest>,
) -> Result<ApiResponse<Address>> {
    services::add_address(&state, &user_id, body).await
}

#[instrument(skip(state))]
pub async fn get_address(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<Address>>> {
    services::get_addresses(&state, &user_id).await
}

#[instrument(skip(state))]
pub async fn get_single_address(
    State(state): State<AppState>,
    Path(address_id): Path<String>,
) -> Result<ApiResponse<PopulatedAddress>> {
    services::get_single_address(&state, &address_id).await
}

#[instrument(skip(state, body))]
pub async fn edit_single_address(
    State(state): State<AppState>,
    Path(address_id): Path<String>,
    JsonBody(body): JsonBody<EditAddressRequest>,
) -> Result<ApiResponse<Address>> {
    services::edit_single_address(&state, &address_id, body).await
}

#[instrument(skip(state))]
pub async fn delete_address(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(address_id): Path<String>,
) -> Result<ApiResponse<()>> {
    services::delete_address(&state, user_id, &address_id).await
}

#[instrument(skip(state))]
pub async fn check_user_has_address(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<ApiResponse<Vec<Address>>> {
    services::check_user_has_address(&state, user_id).await
}

async fn edit_me_address(
    state: State<AppState>,
    body: JsonBody<EditAddressRequest>,
) -> Result<ApiResponse<Address>> {
    edit_single_address(state, Path("me".to_string()), body).await
}

async fn delete_me_address(
    state: State<AppState>,
    user: AuthUser,
) -> Result<ApiResponse<()>> {
    delete_address(state, user, Path("me".to_string())).await
}

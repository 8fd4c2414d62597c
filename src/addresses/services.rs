use tracing::{debug, info};
use uuid::Uuid;

use super::dto::{AddAddressRequest, EditAddressRequest};
use super::repo_types::{Address, PopulatedAddress};
use crate::{
    error::{ApiError, Result},
    ids::parse_object_id,
    response::ApiResponse,
    state::AppState,
};

async fn ensure_user(state: &AppState, user_id: Uuid, missing: &str) -> Result<()> {
    match state.users.find_by_id(user_id).await? {
        Some(_) => Ok(()),
        None => Err(ApiError::NotFound(missing.to_string())),
    }
}

async fn load_address(state: &AppState, address_id: Uuid) -> Result<Address> {
    state
        .addresses
        .find_by_id(address_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Address not found".into()))
}

pub async fn add_address(
    state: &AppState,
    user_id: &str,
    body: AddAddressRequest,
) -> Result<ApiResponse<Address>> {
    let user_id = parse_object_id(user_id, "User id is not valid")?;
    ensure_user(state, user_id, "User not found").await?;

    let new = body.validate()?;
    let saved = state
        .addresses
        .create(user_id, new)
        .await?
        .ok_or_else(|| ApiError::Server("Error while saving the address".into()))?;

    info!(%user_id, address_id = %saved.id, "address saved");
    Ok(ApiResponse::ok(saved, "Address saved successfully"))
}

pub async fn get_addresses(state: &AppState, user_id: &str) -> Result<ApiResponse<Vec<Address>>> {
    let user_id = parse_object_id(user_id, "Invalid User ID")?;
    ensure_user(state, user_id, "User not found").await?;

    let addresses = state.addresses.list_by_user(user_id).await?;
    if addresses.is_empty() {
        return Err(ApiError::NotFound("No addresses found for this user".into()));
    }

    debug!(%user_id, count = addresses.len(), "addresses fetched");
    Ok(ApiResponse::ok(addresses, "Addresses fetched successfully"))
}

pub async fn get_single_address(
    state: &AppState,
    address_id: &str,
) -> Result<ApiResponse<PopulatedAddress>> {
    let address_id = parse_object_id(address_id, "Invalid Address ID")?;
    let address = state
        .addresses
        .find_populated(address_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Address not found".into()))?;

    Ok(ApiResponse::ok(address, "Address fetched successfully"))
}

/// Applies the supplied fields when `body.user_id` names the current owner.
pub async fn edit_single_address(
    state: &AppState,
    address_id: &str,
    body: EditAddressRequest,
) -> Result<ApiResponse<Address>> {
    let address_id = parse_object_id(address_id, "Invalid Address ID")?;
    let address = load_address(state, address_id).await?;

    if body.user_id.as_deref() != Some(address.user_id.to_string().as_str()) {
        return Err(ApiError::Forbidden(
            "You do not have permission to edit this address".into(),
        ));
    }

    let patch = body.into_patch();
    if patch.is_empty() {
        debug!(%address_id, "no fields to change, touching updated_at only");
    } else {
        debug!(%address_id, fields = ?patch.field_names(), "updating address");
    }

    let updated = state
        .addresses
        .update_by_id(address_id, &patch)
        .await?
        .ok_or_else(|| ApiError::Server("Error while updating the address".into()))?;

    info!(%address_id, "address updated");
    Ok(ApiResponse::ok(updated, "Address updated successfully"))
}

pub async fn delete_address(
    state: &AppState,
    caller: Uuid,
    address_id: &str,
) -> Result<ApiResponse<()>> {
    let address_id = parse_object_id(address_id, "Invalid Address ID")?;
    let address = load_address(state, address_id).await?;

    if address.user_id != caller {
        return Err(ApiError::Forbidden(
            "You do not have permission to delete this address".into(),
        ));
    }

    state
        .addresses
        .delete_by_id(address_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Address not found".into()))?;

    info!(%address_id, user_id = %caller, "address deleted");
    Ok(ApiResponse::ok((), "Address deleted successfully"))
}

/// Addresses of the authenticated caller; having none is an error.
pub async fn check_user_has_address(
    state: &AppState,
    caller: Uuid,
) -> Result<ApiResponse<Vec<Address>>> {
    ensure_user(state, caller, "user not found").await?;

    let addresses = state.addresses.list_by_user(caller).await?;
    if addresses.is_empty() {
        return Err(ApiError::BadRequest("No address found in database".into()));
    }

    Ok(ApiResponse::ok(addresses, "addresses fetched successfully"))
}

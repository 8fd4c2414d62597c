mod dto;
pub mod handlers;
mod repo;
mod repo_types;
mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::{AddressStore, PgAddressStore};
pub use repo_types::{Address, AddressPatch, NewAddress, PopulatedAddress};

pub fn router() -> Router<AppState> {
    handlers::routes()
}

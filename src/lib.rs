pub mod addresses;
pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod ids;
pub mod response;
pub mod state;
pub mod users;

#[cfg(test)]
mod testing;

//! Bearer-token authentication. Tokens are issued by the account service;
//! this service only verifies them.

pub mod jwt;

pub use jwt::AuthUser;

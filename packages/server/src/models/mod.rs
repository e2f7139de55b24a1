pub mod auth;
pub mod contest;
pub mod payment;
pub mod registration;
pub mod shared;
pub mod user;

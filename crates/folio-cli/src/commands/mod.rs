pub mod auth;
pub mod contact;
pub mod edit;
pub mod show;

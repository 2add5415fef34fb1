//! Application services for the site.

pub mod auth;

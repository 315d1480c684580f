//! HTTP handlers

pub mod form;
pub mod health;
pub mod predict;
pub mod schema;

//! Inquiries domain - contact and booking forms delivered to webhooks

pub mod actions;
pub mod data;
pub mod edges;
pub mod models;

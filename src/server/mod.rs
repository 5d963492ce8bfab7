//! Translation service: HTTP surface, request handling and provider access

pub mod api;
pub mod provider;
pub mod service;

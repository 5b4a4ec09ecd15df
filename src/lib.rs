//! Shortlist - Product Recommendation Client Core
//!
//! This crate implements the client side of the Shortlist recommendation
//! service: a typed API client with bearer-token authentication and a
//! closed error taxonomy, and the question/answer flow that collects a
//! user's preferences and submits them for ranking.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Football Service API Library
//!
//! This library provides the core functionality for the football team
//! service: the team aggregate, its repositories, the team service and the
//! HTTP adapters exposing it.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;

//! Integration tests module
//!
//! This module contains the integration tests for the ArtistCalendar API,
//! organized by resource and end-to-end scenarios.

pub mod handlers;
pub mod scenarios;

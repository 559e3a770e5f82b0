//! Handler integration tests

pub mod calendar_test;
pub mod events_test;
pub mod health_test;
pub mod reviews_test;
pub mod users_test;

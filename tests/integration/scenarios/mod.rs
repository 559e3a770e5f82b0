//! End-to-end scenarios

pub mod moderation_journey_test;

//! Database repositories module
//!
//! This module contains the Postgres implementations of the storage traits

pub mod user;
pub mod event;
pub mod announcement;

// Re-export repositories
pub use user::UserRepository;
pub use event::EventRepository;
pub use announcement::AnnouncementRepository;

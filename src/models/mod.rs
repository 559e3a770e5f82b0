//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod event;
pub mod review;
pub mod announcement;
pub mod calendar;

// Re-export commonly used models
pub use user::{Profile, UserRole, ArtistStatus, CreateProfileRequest, UpdateProfileRequest, UpdateRoleRequest};
pub use event::{
    Event, EventType, EventStatus, EventDetails, EventFilter, Occurrence, Photo,
    CreateEventRequest, UpdateEventRequest, OccurrenceInput, PhotoInput, NewEvent, NewOccurrence, NewPhoto,
    PerformanceDetails, AuditionDetails, CreativeDetails, ClassDetails, FundingDetails,
};
pub use review::{Review, ReviewDecision, ReviewRequest, NewReview, ReviewOutcome};
pub use announcement::{Announcement, AnnouncementType, AnnouncementState, CreateAnnouncementRequest, UpdateAnnouncementRequest, NewAnnouncement};
pub use calendar::{CalendarParams, CalendarQuery, CalendarEntry};

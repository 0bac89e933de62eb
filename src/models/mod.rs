pub mod content;
pub mod registration;
pub mod timeslot;

//! Domain logic for the LabAR video annotation service.
//!
//! Holds the per-session annotation state model and its validation rules.
//! No I/O happens here; the API layer owns sessions and calls the mutators
//! defined in [`session`].

pub mod annotation;
pub mod error;
pub mod form;
pub mod session;
pub mod types;
pub mod video;

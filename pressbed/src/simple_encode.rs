//! Serialization of PDF objects into a [`Writer`](crate::writer::Writer).
//!
//! All encoders are implemented on the unit type [`SimpleEncoder`]. The
//! output uses single spaces between tokens and does not try to be compact.

pub mod object;
pub mod section;

pub struct SimpleEncoder;

//! # Feedback Strategies Module
//!
//! This module provides pluggable feedback strategies for the marker system.
//! Each strategy implements the [`Feedback`](crate::traits::feedback::Feedback) trait and turns a
//! merged report into a list of messages for the student.
//!
//! ## Available Strategies
//!
//! - [`rule_feedback`]: An ordered list of independent threshold rules over the merged report.

pub mod rule_feedback;

//! Command implementations behind the `grade-api`, `grade-playground` and `generate-report`
//! binaries. Each command grades, writes its JSON artifact and returns what it wrote so the
//! binary can print a transcript.

pub mod commands;
pub mod logging;
pub mod transcript;

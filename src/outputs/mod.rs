//! Output generation for the daily digest.
//!
//! # Output Structure
//!
//! ```text
//! rassegna_stampa/
//! └── rassegna_2025-05-06.md
//! ```
//!
//! One Markdown file per run, named after the run date. Re-running on the
//! same day overwrites that day's file.

pub mod markdown;

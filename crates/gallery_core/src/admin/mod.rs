//! Admin panel use-cases.
//!
//! # Responsibility
//! - Form-based create, full-record edit, delete, backup and restore.
//! - Management list and dashboard projections.

pub mod controller;

pub use controller::{parse_tags, AdminController, ExportFile, ManageItem, MemoryForm};

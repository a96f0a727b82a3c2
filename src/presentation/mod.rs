//! Presentation Module
//!
//! The boundary between the catalog and whatever draws pages. Records are
//! turned into display-ready view models here; nothing downstream formats
//! dates or renders markdown itself.

pub mod format;
pub mod view_models;
pub mod view_builder;

pub use view_builder::{home_page, interview_page, list_page, not_found_page, play_page, work_page, CardView};
pub use view_models::*;

//! # Checklist Logic
//!
//! Client-side rules for report checklists, independent of HTTP.
//!
//! ```text
//! checklist/
//! ├── answers.rs   - Draft answer state, rating scales
//! ├── progress.rs  - Completion percentages
//! └── reorder.rs   - Sort order maintenance, slugs
//! ```

pub mod answers;
pub mod progress;
pub mod reorder;

pub use answers::{parse_rating_meta, AnswerKind, DraftAnswers, DraftMedia, RatingScale};
pub use progress::{completion_percent, is_item_complete, section_percent};
pub use reorder::{slugify, Ordered};

//! Application-wide constants
//!
//! This module contains constants used throughout the application.

/// Maximum length for question and choice text in characters
pub const MAX_TEXT_LENGTH: usize = 200;

/// Width of the window, ending at the current instant, in which a question
/// counts as recently published.
pub const RECENT_WINDOW_DAYS: i64 = 1;

/// Default number of questions listed on the index page
pub const DEFAULT_LATEST_QUESTIONS_LIMIT: u64 = 5;

/// Shown on the index page when no question has been published yet
pub const NO_POLLS_MESSAGE: &str = "No polls are available.";

/// Shown on the detail page when a vote is submitted without a valid choice
pub const NO_CHOICE_MESSAGE: &str = "You didn't select a choice.";

//! Test fixtures for creating test data
#![allow(dead_code)]

use chrono::{Duration, Utc};
use polls::error::PollError;
use polls::orm::{choices, questions};
use sea_orm::DatabaseConnection;

/// Create a question published `days` from now (negative for the past).
pub async fn create_question(
    db: &DatabaseConnection,
    question_text: &str,
    days: i64,
) -> Result<questions::Model, PollError> {
    polls::question::create_question(db, question_text, Utc::now() + Duration::days(days)).await
}

/// Create a choice and cast `votes` votes for it.
pub async fn create_choice_with_votes(
    db: &DatabaseConnection,
    question_id: i32,
    choice_text: &str,
    votes: i32,
) -> Result<choices::Model, PollError> {
    let choice = polls::choice::create_choice(db, question_id, choice_text).await?;
    for _ in 0..votes {
        polls::choice::cast_vote(db, question_id, choice.id).await?;
    }
    Ok(choices::Model { votes, ..choice })
}

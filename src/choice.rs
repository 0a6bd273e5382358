//! Choice storage and vote counting.

use crate::error::{validate_text, PollError};
use crate::orm::{choices, questions};
use sea_orm::{entity::*, query::*, sea_query::Expr, ConnectionTrait};

/// Add a choice with no votes to an existing question.
pub async fn create_choice<C: ConnectionTrait>(
    db: &C,
    question_id: i32,
    choice_text: &str,
) -> Result<choices::Model, PollError> {
    let choice_text = validate_text("Choice", choice_text)?;

    if questions::Entity::find_by_id(question_id)
        .one(db)
        .await?
        .is_none()
    {
        return Err(PollError::NotFound("Question", question_id));
    }

    let choice = choices::ActiveModel {
        question_id: Set(question_id),
        choice_text: Set(choice_text),
        votes: Set(0),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(choice)
}

pub async fn find_choice<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<choices::Model>, PollError> {
    Ok(choices::Entity::find_by_id(id).one(db).await?)
}

/// Count one vote for `choice_id`.
///
/// The increment runs as a single UPDATE so concurrent votes on the same
/// choice are never lost. Fails with `NotFound` when the choice doesn't exist
/// or belongs to another question.
pub async fn cast_vote<C: ConnectionTrait>(
    db: &C,
    question_id: i32,
    choice_id: i32,
) -> Result<(), PollError> {
    let result = choices::Entity::update_many()
        .col_expr(
            choices::Column::Votes,
            Expr::col(choices::Column::Votes).add(1),
        )
        .filter(choices::Column::Id.eq(choice_id))
        .filter(choices::Column::QuestionId.eq(question_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(PollError::NotFound("Choice", choice_id));
    }

    log::debug!("Vote cast for choice {} on question {}", choice_id, question_id);
    Ok(())
}

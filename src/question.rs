//! Question storage and the queries the poll pages are built from.

use crate::error::{validate_text, PollError};
use crate::orm::{choices, questions};
use chrono::{DateTime, Utc};
use sea_orm::{entity::*, query::*, ConnectionTrait, DbErr, Select, TransactionTrait};

/// Create a question published at `pub_date`, which may be in the future.
pub async fn create_question<C: ConnectionTrait>(
    db: &C,
    question_text: &str,
    pub_date: DateTime<Utc>,
) -> Result<questions::Model, PollError> {
    let question_text = validate_text("Question", question_text)?;

    let question = questions::ActiveModel {
        question_text: Set(question_text),
        pub_date: Set(pub_date),
        ..Default::default()
    }
    .insert(db)
    .await?;

    log::debug!("Created question {} ({})", question.id, question.question_text);
    Ok(question)
}

pub async fn find_question<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<questions::Model>, PollError> {
    Ok(questions::Entity::find_by_id(id).one(db).await?)
}

/// Find a question that voters may see at `now`.
/// Unknown and not-yet-published questions both come back as `None`.
pub async fn find_published_question<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<Utc>,
) -> Result<Option<questions::Model>, PollError> {
    Ok(questions::Entity::find_by_id(id)
        .filter(questions::Column::PubDate.lte(now))
        .one(db)
        .await?)
}

pub async fn update_question_text<C: ConnectionTrait>(
    db: &C,
    id: i32,
    question_text: &str,
) -> Result<questions::Model, PollError> {
    let question_text = validate_text("Question", question_text)?;

    let question = find_question(db, id)
        .await?
        .ok_or(PollError::NotFound("Question", id))?;

    let mut question: questions::ActiveModel = question.into();
    question.question_text = Set(question_text);
    Ok(question.update(db).await?)
}

/// Delete a question and all of its choices in one transaction.
/// Returns false when no question with `id` existed.
pub async fn delete_question<C: TransactionTrait>(db: &C, id: i32) -> Result<bool, PollError> {
    let txn = db.begin().await?;

    let deleted_choices = choices::Entity::delete_many()
        .filter(choices::Column::QuestionId.eq(id))
        .exec(&txn)
        .await?;

    let deleted = questions::Entity::delete_many()
        .filter(questions::Column::Id.eq(id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    if deleted.rows_affected > 0 {
        log::info!(
            "Deleted question {} and {} choice(s)",
            id,
            deleted_choices.rows_affected
        );
    }

    Ok(deleted.rows_affected > 0)
}

/// The most recently published questions at `now`, newest first.
/// Questions scheduled for the future are left out.
pub async fn latest_questions<C: ConnectionTrait>(
    db: &C,
    now: DateTime<Utc>,
    limit: u64,
) -> Result<Vec<questions::Model>, PollError> {
    Ok(questions::Entity::find()
        .filter(questions::Column::PubDate.lte(now))
        .order_by_desc(questions::Column::PubDate)
        .order_by_desc(questions::Column::Id)
        .limit(limit)
        .all(db)
        .await?)
}

impl questions::Model {
    /// Choices ordered by vote count, highest first. Equal counts keep
    /// creation order.
    fn ranked_choices_query(&self) -> Select<choices::Entity> {
        self.find_related(choices::Entity)
            .order_by_desc(choices::Column::Votes)
            .order_by_asc(choices::Column::Id)
    }

    pub async fn ranked_choices<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Vec<choices::Model>, DbErr> {
        self.ranked_choices_query().all(db).await
    }

    /// The choice with the most votes, if the question has any choices.
    pub async fn top_choice<C: ConnectionTrait>(
        &self,
        db: &C,
    ) -> Result<Option<choices::Model>, DbErr> {
        self.ranked_choices_query().one(db).await
    }
}

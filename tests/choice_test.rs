mod common;

use common::database::setup_test_database;
use common::fixtures::{create_choice_with_votes, create_question};
use polls::choice::{cast_vote, create_choice, find_choice};
use polls::error::PollError;
use std::sync::Arc;

#[actix_rt::test]
async fn test_new_choice_starts_without_votes() {
    let db = setup_test_database().await.unwrap();
    let question = create_question(&db, "Favourite editor?", -1).await.unwrap();

    let choice = create_choice(&db, question.id, "  vim ").await.unwrap();
    assert_eq!(choice.votes, 0);
    assert_eq!(choice.choice_text, "vim");
    assert_eq!(choice.question_id, question.id);
    assert_eq!(choice.to_string(), "vim");
}

#[actix_rt::test]
async fn test_create_choice_requires_existing_question() {
    let db = setup_test_database().await.unwrap();

    let result = create_choice(&db, 404, "Nobody home").await;
    assert!(matches!(result, Err(PollError::NotFound("Question", 404))));
}

#[actix_rt::test]
async fn test_create_choice_rejects_long_text() {
    let db = setup_test_database().await.unwrap();
    let question = create_question(&db, "Long answers?", -1).await.unwrap();

    let result = create_choice(&db, question.id, &"y".repeat(201)).await;
    assert!(matches!(result, Err(PollError::Validation(_))));
}

#[actix_rt::test]
async fn test_cast_vote_increments_by_one() {
    let db = setup_test_database().await.unwrap();
    let question = create_question(&db, "Tabs or spaces?", -1).await.unwrap();
    let tabs = create_choice(&db, question.id, "Tabs").await.unwrap();
    let spaces = create_choice(&db, question.id, "Spaces").await.unwrap();

    cast_vote(&db, question.id, tabs.id).await.unwrap();
    cast_vote(&db, question.id, tabs.id).await.unwrap();
    cast_vote(&db, question.id, spaces.id).await.unwrap();

    let tabs = find_choice(&db, tabs.id).await.unwrap().unwrap();
    let spaces = find_choice(&db, spaces.id).await.unwrap().unwrap();
    assert_eq!(tabs.votes, 2);
    assert_eq!(spaces.votes, 1);
}

#[actix_rt::test]
async fn test_cast_vote_rejects_choice_of_other_question() {
    let db = setup_test_database().await.unwrap();
    let question = create_question(&db, "Mine", -1).await.unwrap();
    let other = create_question(&db, "Theirs", -1).await.unwrap();
    let foreign = create_choice_with_votes(&db, other.id, "Foreign", 0)
        .await
        .unwrap();

    let result = cast_vote(&db, question.id, foreign.id).await;
    assert!(matches!(result, Err(PollError::NotFound("Choice", _))));

    let foreign = find_choice(&db, foreign.id).await.unwrap().unwrap();
    assert_eq!(foreign.votes, 0);
}

#[actix_rt::test]
async fn test_cast_vote_unknown_choice() {
    let db = setup_test_database().await.unwrap();
    let question = create_question(&db, "Anyone?", -1).await.unwrap();

    let result = cast_vote(&db, question.id, 12345).await;
    assert!(matches!(result, Err(PollError::NotFound("Choice", 12345))));
}

#[actix_rt::test]
async fn test_concurrent_votes_are_not_lost() {
    let db = Arc::new(setup_test_database().await.unwrap());
    let question = create_question(&db, "Busy poll", -1).await.unwrap();
    let choice = create_choice(db.as_ref(), question.id, "Popular").await.unwrap();

    let (question_id, choice_id) = (question.id, choice.id);
    let handles: Vec<_> = (0..20)
        .map(|_| {
            let db = db.clone();
            actix_rt::spawn(async move { cast_vote(db.as_ref(), question_id, choice_id).await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let choice = find_choice(db.as_ref(), choice_id).await.unwrap().unwrap();
    assert_eq!(choice.votes, 20);
}

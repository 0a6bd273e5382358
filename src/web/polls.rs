//! Poll pages: index, detail, results and voting.

use crate::choice::cast_vote;
use crate::constants::{NO_CHOICE_MESSAGE, NO_POLLS_MESSAGE};
use crate::error::PollError;
use crate::middleware::csrf::VoteFormToken;
use crate::orm::{choices, questions};
use crate::question::{find_published_question, latest_questions};
use actix_session::Session;
use actix_web::{error, get, post, web, Error, HttpResponse, Responder};
use askama_actix::{Template, TemplateToResponse};
use chrono::{DateTime, Utc};
use sea_orm::{entity::*, query::*, DatabaseConnection};
use serde::Deserialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_root)
        .service(view_index)
        .service(view_detail)
        .service(view_results)
        .service(vote);
}

/// Index row for a published question
pub struct QuestionForTemplate {
    pub id: i32,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
    pub recent: bool,
}

impl QuestionForTemplate {
    fn new(question: questions::Model, now: DateTime<Utc>) -> Self {
        Self {
            recent: question.was_published_recently(now),
            id: question.id,
            question_text: question.question_text,
            pub_date: question.pub_date,
        }
    }
}

#[derive(Template)]
#[template(path = "polls/index.html")]
pub struct IndexTemplate<'a> {
    pub site_name: String,
    pub latest_question_list: Vec<QuestionForTemplate>,
    pub empty_message: &'a str,
}

#[derive(Template)]
#[template(path = "polls/detail.html")]
pub struct DetailTemplate<'a> {
    pub site_name: String,
    pub question: &'a questions::Model,
    pub choices: Vec<choices::Model>,
    pub csrf_token: String,
    pub error_message: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "polls/results.html")]
pub struct ResultsTemplate<'a> {
    pub site_name: String,
    pub question: &'a questions::Model,
    pub recent: bool,
    pub ranked_choices: Vec<choices::Model>,
    pub top_choice: Option<choices::Model>,
}

#[derive(Deserialize)]
pub struct VoteFormData {
    pub csrf_token: String,
    /// Selected choice id. Missing or unparsable values count as no selection.
    #[serde(default)]
    pub choice: Option<String>,
}

fn site_name() -> String {
    crate::app_config::get_config().site.name
}

/// Published question or a 404.
async fn get_question_or_404(
    db: &DatabaseConnection,
    question_id: i32,
    now: DateTime<Utc>,
) -> Result<questions::Model, Error> {
    find_published_question(db, question_id, now)
        .await?
        .ok_or_else(|| error::ErrorNotFound("Question not found."))
}

/// Choices in the order they were added, for the voting form.
async fn get_choices_for_form(
    db: &DatabaseConnection,
    question: &questions::Model,
) -> Result<Vec<choices::Model>, Error> {
    question
        .find_related(choices::Entity)
        .order_by_asc(choices::Column::Id)
        .all(db)
        .await
        .map_err(error::ErrorInternalServerError)
}

#[get("/")]
async fn view_root() -> impl Responder {
    HttpResponse::Found()
        .append_header(("Location", "/polls/"))
        .finish()
}

#[get("/polls/")]
pub async fn view_index(db: web::Data<DatabaseConnection>) -> Result<impl Responder, Error> {
    let now = Utc::now();
    let limit = crate::app_config::polls().latest_questions_limit;

    let latest_question_list = latest_questions(db.get_ref(), now, limit)
        .await?
        .into_iter()
        .map(|question| QuestionForTemplate::new(question, now))
        .collect();

    Ok(IndexTemplate {
        site_name: site_name(),
        latest_question_list,
        empty_message: NO_POLLS_MESSAGE,
    }
    .to_response())
}

#[get("/polls/{question_id}/")]
pub async fn view_detail(
    db: web::Data<DatabaseConnection>,
    session: Session,
    path: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let db = db.get_ref();
    let question = get_question_or_404(db, path.into_inner(), Utc::now()).await?;
    let choices = get_choices_for_form(db, &question).await?;
    let csrf_token = VoteFormToken::for_session(&session)?.into_string();

    Ok(DetailTemplate {
        site_name: site_name(),
        question: &question,
        choices,
        csrf_token,
        error_message: None,
    }
    .to_response())
}

#[get("/polls/{question_id}/results/")]
pub async fn view_results(
    db: web::Data<DatabaseConnection>,
    path: web::Path<i32>,
) -> Result<impl Responder, Error> {
    let db = db.get_ref();
    let now = Utc::now();
    let question = get_question_or_404(db, path.into_inner(), now).await?;

    let ranked_choices = question
        .ranked_choices(db)
        .await
        .map_err(error::ErrorInternalServerError)?;
    // Taken from the same read so the leader always matches the list.
    let top_choice = ranked_choices.first().cloned();

    Ok(ResultsTemplate {
        site_name: site_name(),
        recent: question.was_published_recently(now),
        question: &question,
        ranked_choices,
        top_choice,
    }
    .to_response())
}

#[post("/polls/{question_id}/vote/")]
pub async fn vote(
    db: web::Data<DatabaseConnection>,
    session: Session,
    path: web::Path<i32>,
    form: web::Form<VoteFormData>,
) -> Result<impl Responder, Error> {
    VoteFormToken::verify_submission(&session, &form.csrf_token)?;

    let db = db.get_ref();
    let question = get_question_or_404(db, path.into_inner(), Utc::now()).await?;

    let selected = form
        .choice
        .as_deref()
        .and_then(|choice| choice.trim().parse::<i32>().ok());

    let voted = match selected {
        Some(choice_id) => match cast_vote(db, question.id, choice_id).await {
            Ok(()) => true,
            Err(PollError::NotFound(..)) => false,
            Err(err) => return Err(err.into()),
        },
        None => false,
    };

    if !voted {
        // Redisplay the voting form.
        let choices = get_choices_for_form(db, &question).await?;
        return Ok(DetailTemplate {
            site_name: site_name(),
            question: &question,
            choices,
            csrf_token: form.csrf_token.to_owned(),
            error_message: Some(NO_CHOICE_MESSAGE),
        }
        .to_response());
    }

    Ok(HttpResponse::Found()
        .append_header(("Location", format!("/polls/{}/results/", question.id)))
        .finish())
}

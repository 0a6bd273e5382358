use actix_session::{config::PersistentSession, storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::http::header;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use chrono::{Duration, Utc};
use env_logger::Env;
use polls::app_config;
use polls::choice::create_choice;
use polls::db::{connect, create_schema};
use polls::question::create_question;
use rand::{distributions::Alphanumeric, Rng};
use sea_orm::DatabaseConnection;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_lib_mods();
    init_our_mods();

    let database = app_config::database();
    let db = connect(&database.url, database.max_connections)
        .await
        .context("Failed to connect to the database")?;
    create_schema(&db)
        .await
        .context("Failed to create database schema")?;

    match std::env::args().nth(1).as_deref() {
        None | Some("serve") => serve(db).await,
        Some("seed") => seed(&db).await,
        Some(other) => anyhow::bail!("Unknown command `{}`. Expected `serve` or `seed`.", other),
    }
}

async fn serve(db: DatabaseConnection) -> anyhow::Result<()> {
    let secret_key = match std::env::var("SECRET_KEY") {
        Ok(key) if key.len() >= 64 => Key::from(key.as_bytes()),
        other => {
            let random_string: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(128)
                .map(char::from)
                .collect();
            log::warn!("SECRET_KEY was invalid. Reason: {:?}\r\nSession cookies will be invalidated every time the application restarts. A secret key must be at least 64 bytes to be accepted.", other.err());
            Key::from(random_string.as_bytes())
        }
    };

    let db = Data::new(db);
    let bind_address = app_config::server().bind_address;
    log::info!("Listening on {}", bind_address);

    HttpServer::new(move || {
        // Middleware is listed in reverse execution order.
        App::new()
            .app_data(db.clone())
            .wrap(
                DefaultHeaders::new()
                    .add((header::X_FRAME_OPTIONS, "DENY"))
                    .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
                    .add(("Referrer-Policy", "strict-origin-when-cross-origin")),
            )
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_same_site(SameSite::Lax)
                    .cookie_secure(false) // Allow HTTP for development
                    .session_lifecycle(PersistentSession::default())
                    .build(),
            )
            .wrap(Logger::new("%a \"%r\" %s %T"))
            .configure(polls::web::configure)
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}

/// Insert a sample question with a few choices.
async fn seed(db: &DatabaseConnection) -> anyhow::Result<()> {
    let question = create_question(
        db,
        "¿Quién es el mejor Course Director?",
        Utc::now() - Duration::hours(1),
    )
    .await?;

    for text in ["Freddy Vega", "Juan David Castro", "Christian Van Der Henst"] {
        create_choice(db, question.id, text).await?;
    }

    log::info!("Seeded question {} with 3 choices", question.id);
    Ok(())
}

/// Initialize third party crates we rely on but don't have control over.
pub fn init_lib_mods() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

/// Initialize all local mods.
pub fn init_our_mods() {
    app_config::init();
}

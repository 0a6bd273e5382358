//! CSRF protection for the vote form.
//!
//! Each session gets one random token the first time it opens a detail page.
//! The token travels with the form as the hidden `csrf_token` field and a vote
//! is only counted when the submitted value matches the session copy.
use actix_session::Session;
use actix_web::{error, Error};
use rand::{distributions::Alphanumeric, Rng};

pub const CSRF_TOKEN_LENGTH: usize = 32;
const CSRF_SESSION_KEY: &str = "csrf_token";

/// Token embedded in the vote form of the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteFormToken(String);

impl VoteFormToken {
    fn random() -> Self {
        Self(
            rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(CSRF_TOKEN_LENGTH)
                .map(char::from)
                .collect(),
        )
    }

    /// The session's token, issued on the first detail page a visitor opens.
    pub fn for_session(session: &Session) -> Result<Self, Error> {
        if let Ok(Some(token)) = session.get::<String>(CSRF_SESSION_KEY) {
            return Ok(Self(token));
        }

        let token = Self::random();
        session
            .insert(CSRF_SESSION_KEY, &token.0)
            .map_err(|_| error::ErrorInternalServerError("Failed to store CSRF token"))?;
        Ok(token)
    }

    /// Accept a submitted vote form only if it carries this session's token.
    pub fn verify_submission(session: &Session, submitted: &str) -> Result<(), Error> {
        let expected = session
            .get::<String>(CSRF_SESSION_KEY)
            .map_err(|_| error::ErrorInternalServerError("Failed to read CSRF token"))?
            .ok_or_else(|| error::ErrorForbidden("CSRF token not found in session"))?;

        if submitted != expected {
            log::warn!("Rejected vote with a mismatched CSRF token");
            return Err(error::ErrorForbidden("Invalid CSRF token"));
        }
        Ok(())
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

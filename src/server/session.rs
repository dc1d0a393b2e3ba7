//! Cookie-backed sessions and flash messages.
//!
//! Both live in signed cookies: the client can read them but any tampering
//! invalidates the signature, and an invalid cookie reads as absent. Values
//! are JSON, base64url-encoded so they stay cookie-safe.

use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha512};

pub const SESSION_COOKIE: &str = "moodify_session";
pub const FLASH_COOKIE: &str = "moodify_flash";

/// Derive the cookie signing key from the configured secret.
///
/// SHA-512 stretches a secret of any length to the 64 bytes `Key` requires.
pub fn cookie_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Per-browser login state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub authenticated: bool,
    pub name: String,
    pub email: String,
}

impl Session {
    pub fn login(name: String, email: String) -> Self {
        Self {
            authenticated: true,
            name,
            email,
        }
    }

    /// Read the session from the jar; missing or invalid cookies give an
    /// anonymous session.
    pub fn from_jar(jar: &SignedCookieJar) -> Self {
        jar.get(SESSION_COOKIE)
            .and_then(|c| decode(c.value()))
            .unwrap_or_default()
    }

    pub fn store(&self, jar: SignedCookieJar) -> SignedCookieJar {
        jar.add(cookie(SESSION_COOKIE, encode(self)))
    }

    pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
        jar.remove(cookie(SESSION_COOKIE, String::new()))
    }

    /// Single uppercase letter shown in the avatar bubble.
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "U".to_string())
    }
}

/// Queue a message for the next rendered page.
pub fn push_flash(jar: SignedCookieJar, message: impl Into<String>) -> SignedCookieJar {
    let mut messages: Vec<String> = jar
        .get(FLASH_COOKIE)
        .and_then(|c| decode(c.value()))
        .unwrap_or_default();
    messages.push(message.into());
    jar.add(cookie(FLASH_COOKIE, encode(&messages)))
}

/// Take all queued messages, clearing them from the jar.
pub fn take_flashes(jar: SignedCookieJar) -> (SignedCookieJar, Vec<String>) {
    let messages: Vec<String> = jar
        .get(FLASH_COOKIE)
        .and_then(|c| decode(c.value()))
        .unwrap_or_default();

    if messages.is_empty() {
        (jar, messages)
    } else {
        (jar.remove(cookie(FLASH_COOKIE, String::new())), messages)
    }
}

fn cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

fn encode<T: Serialize + ?Sized>(value: &T) -> String {
    URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap_or_default())
}

fn decode<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Extractor for routes that need a logged-in user.
///
/// Anonymous requests are redirected to the login page.
pub struct RequireAuth(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
    Key: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});

        let session = Session::from_jar(&jar);
        if session.authenticated {
            Ok(RequireAuth(session))
        } else {
            tracing::debug!("Redirecting unauthenticated request for {}", parts.uri.path());
            Err(Redirect::to("/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jar(secret: &str) -> SignedCookieJar {
        SignedCookieJar::new(cookie_key(secret))
    }

    #[test]
    fn test_session_round_trips_through_jar() {
        let session = Session::login("Ada".to_string(), "ada@example.com".to_string());
        let jar = session.store(jar("secret"));
        assert_eq!(Session::from_jar(&jar), session);

        let cleared = Session::clear(jar);
        assert_eq!(Session::from_jar(&cleared), Session::default());
    }

    #[test]
    fn test_flashes_accumulate_and_drain() {
        let jar = push_flash(jar("secret"), "first");
        let jar = push_flash(jar, "second");

        let (jar, messages) = take_flashes(jar);
        assert_eq!(messages, vec!["first", "second"]);

        let (_, messages) = take_flashes(jar);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_initial() {
        assert_eq!(Session::login("émile".into(), String::new()).initial(), "É");
        assert_eq!(Session::default().initial(), "U");
    }

    #[test]
    fn test_garbage_cookie_value_decodes_to_none() {
        assert_eq!(decode::<Session>("!!not base64!!"), None);
        assert_eq!(decode::<Session>(&URL_SAFE_NO_PAD.encode(b"[1,2]")), None);
    }
}

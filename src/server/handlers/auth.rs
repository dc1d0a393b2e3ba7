//! Login and logout handlers.

use axum::{
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

use super::super::session::{take_flashes, Session};
use super::super::template_structs::{LoginTemplate, Page};
use super::helpers::render;

/// Login form fields. Missing fields read as empty.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.password.is_empty()
    }
}

fn login_response(jar: SignedCookieJar, extra: Option<&str>) -> Response {
    let session = Session::from_jar(&jar);
    let (jar, mut flashes) = take_flashes(jar);
    flashes.extend(extra.map(str::to_string));

    let template = LoginTemplate {
        title: "Sign In",
        page: Page::new("", flashes, &session),
    };
    (jar, render(&template)).into_response()
}

/// Show the login form.
pub async fn login_page(jar: SignedCookieJar) -> Response {
    login_response(jar, None)
}

/// Start a session when every field is filled in.
///
/// A body that is not a urlencoded form counts as an empty form.
pub async fn login_submit(jar: SignedCookieJar, form: Option<Form<LoginForm>>) -> Response {
    let form = form.map(|Form(form)| form).unwrap_or_default();
    if !form.is_complete() {
        return login_response(jar, Some("Please fill all fields"));
    }

    tracing::debug!("Session started for {}", form.email);
    let jar = Session::login(form.name, form.email).store(jar);
    (jar, Redirect::to("/dashboard")).into_response()
}

/// Clear the session and return to the login page.
pub async fn logout(jar: SignedCookieJar) -> impl IntoResponse {
    (Session::clear(jar), Redirect::to("/"))
}

//! Profile page handlers.

use axum::{
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

use super::super::session::{push_flash, take_flashes, RequireAuth};
use super::super::template_structs::{Page, ProfileTemplate};
use super::helpers::render;

#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Editable name and email.
pub async fn profile_page(RequireAuth(session): RequireAuth, jar: SignedCookieJar) -> Response {
    let (jar, flashes) = take_flashes(jar);

    let template = ProfileTemplate {
        title: "Profile",
        page: Page::new("", flashes, &session),
        name: session.name.clone(),
        email: session.email.clone(),
    };

    (jar, render(&template)).into_response()
}

/// Overwrite the session's name and email.
pub async fn profile_edit(
    RequireAuth(mut session): RequireAuth,
    jar: SignedCookieJar,
    Form(form): Form<ProfileForm>,
) -> Response {
    session.name = form.name;
    session.email = form.email;

    let jar = session.store(jar);
    let jar = push_flash(jar, "Profile updated successfully");
    (jar, Redirect::to("/profile")).into_response()
}

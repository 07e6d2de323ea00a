//! HTML views.
//!
//! Each outcome of a route handler maps to one [`View`]: a named template plus
//! its context. Templates live in `templates/` and are compiled by askama,
//! which HTML-escapes every interpolated value.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use registry_core::instance::InstanceForm;
use registry_core::notice::HomeNotice;

use crate::error::AppError;

#[derive(Debug, Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub user: Option<String>,
}

#[derive(Debug, Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub user: Option<String>,
    pub message: Option<&'static str>,
}

#[derive(Debug, Template)]
#[template(path = "403.html")]
pub struct ForbiddenPage {
    pub user: Option<String>,
}

/// Add/edit form. On a failed submission every field is echoed back exactly
/// as submitted; organisms and neighbours keep their raw comma-separated text.
#[derive(Debug, Default, Template)]
#[template(path = "add_instance.html")]
pub struct AddInstancePage {
    pub user: Option<String>,
    pub name: String,
    pub url: String,
    pub desc: String,
    pub twitter: String,
    pub lat: String,
    pub lon: String,
    pub organisms: String,
    pub neighbours: String,
    pub update_id: String,
    pub is_dev: bool,
    pub message: Option<String>,
}

#[derive(Debug, Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub user: Option<String>,
    pub message: String,
}

#[derive(Debug)]
pub enum View {
    Login(LoginPage),
    Index(IndexPage),
    Forbidden(ForbiddenPage),
    AddInstance(AddInstancePage),
    Error(ErrorPage),
}

impl View {
    pub fn login(user: Option<String>) -> Self {
        Self::Login(LoginPage { user })
    }

    pub fn index(user: Option<String>, notice: Option<HomeNotice>) -> Self {
        Self::Index(IndexPage {
            user,
            message: notice.map(HomeNotice::message),
        })
    }

    pub fn forbidden(user: Option<String>) -> Self {
        Self::Forbidden(ForbiddenPage { user })
    }

    /// Empty add-instance form.
    pub fn add_instance(user: Option<String>) -> Self {
        Self::AddInstance(AddInstancePage {
            user,
            ..Default::default()
        })
    }

    /// Add-instance form refilled from a submission, with an error message.
    pub fn add_instance_echo(user: Option<String>, form: &InstanceForm, message: String) -> Self {
        Self::AddInstance(AddInstancePage {
            user,
            name: form.name.clone(),
            url: form.url.clone(),
            desc: form.description.clone(),
            twitter: form.twitter.clone(),
            lat: form.latitude.clone(),
            lon: form.longitude.clone(),
            organisms: form.organisms.clone(),
            neighbours: form.neighbours.clone(),
            update_id: form.update_id.clone().unwrap_or_default(),
            is_dev: form.is_development(),
            message: Some(message),
        })
    }

    pub fn error(user: Option<String>, message: impl Into<String>) -> Self {
        Self::Error(ErrorPage {
            user,
            message: message.into(),
        })
    }

    /// Template name, as the routes refer to it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login(_) => "login",
            Self::Index(_) => "index",
            Self::Forbidden(_) => "403",
            Self::AddInstance(_) => "addInstance",
            Self::Error(_) => "error",
        }
    }

    /// Default HTTP status for this view.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Error(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        }
    }

    pub fn render(&self) -> askama::Result<String> {
        match self {
            Self::Login(page) => page.render(),
            Self::Index(page) => page.render(),
            Self::Forbidden(page) => page.render(),
            Self::AddInstance(page) => page.render(),
            Self::Error(page) => page.render(),
        }
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        match self.render() {
            Ok(html) => (self.status(), Html(html)).into_response(),
            Err(e) => AppError::Template(e).into_response(),
        }
    }
}

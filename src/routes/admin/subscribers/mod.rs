use std::fmt;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use anyhow::Context;
use chrono::Utc;

use crate::authentication::{ActionTokens, AdminUser, BULK_DELETE_ACTION, DELETE_ACTION};
use crate::domain::{SiteTimezone, Sort};
use crate::listing::{AdminListingService, PageRequest};
use crate::utils::error_chain_fmt;

mod get;
mod post;
mod render;

pub use get::subscribers_page;
pub use post::bulk_delete;

/// Presentation settings of the admin list
pub struct ListSettings {
    pub timezone: SiteTimezone,
    pub page_size: u32,
}

/// Admin list error type
#[derive(thiserror::Error)]
pub enum AdminError {
    #[error("The link you followed has expired.")]
    UnauthorizedAction,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl fmt::Debug for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for AdminError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnauthorizedAction => StatusCode::FORBIDDEN,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::UnauthorizedAction => HttpResponse::Forbidden()
                .content_type(ContentType::plaintext())
                .body(self.to_string()),
            Self::UnexpectedError(_) => HttpResponse::InternalServerError().finish(),
        }
    }
}

/// Query parameters of the admin list
#[derive(serde::Deserialize)]
pub struct ListQuery {
    page: Option<String>,
    orderby: Option<String>,
    order: Option<String>,
    action: Option<String>,
    email_id: Option<String>,
    #[serde(rename = "_wpnonce")]
    token: Option<String>,
}

impl ListQuery {
    /// Requested page, anything unparsable shows the first one
    fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }

    fn sort(&self) -> Option<Sort> {
        Sort::from_params(self.orderby.as_deref(), self.order.as_deref())
    }
}

/// Fetch the requested page and render it with fresh action tokens
async fn render_list(
    listing: &AdminListingService,
    tokens: &ActionTokens,
    settings: &ListSettings,
    query: &ListQuery,
    admin: &AdminUser,
    notice: Option<String>,
) -> Result<HttpResponse, AdminError> {
    let request = PageRequest::new(query.page(), settings.page_size, query.sort());
    let page = listing
        .list_page(&request)
        .await
        .context("Failed to fetch a page of subscribers")?;

    let now = Utc::now();
    let delete_token = tokens.issue(DELETE_ACTION, admin.username(), now);
    let bulk_token = tokens.issue(BULK_DELETE_ACTION, admin.username(), now);
    let view = render::ListView {
        page: &page,
        sort: request.sort(),
        timezone: &settings.timezone,
        delete_token: &delete_token,
        bulk_token: &bulk_token,
        notice,
    };

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(view.render()))
}

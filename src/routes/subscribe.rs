use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

use crate::domain::EmailError;
use crate::subscription::{SubscribeError, SubscriptionService};

/// Web form data, both fields are optional
#[derive(serde::Deserialize)]
pub struct FormData {
    email: Option<String>,
    source: Option<String>,
}

/// Body of a successful subscription
#[derive(serde::Serialize)]
struct Subscribed {
    message: &'static str,
}

/// Body of a rejected subscription
#[derive(serde::Serialize)]
struct ErrorBody {
    code: &'static str,
    message: &'static str,
    data: ErrorData,
}

#[derive(serde::Serialize)]
struct ErrorData {
    status: u16,
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            Self::InvalidEmail(EmailError::Malformed(_)) => "No valid email found, please try again.",
            Self::InvalidEmail(EmailError::Forbidden(_)) => "Invalid email found, please try again.",
            Self::UnexpectedError(_) => return HttpResponse::InternalServerError().finish(),
        };
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorBody {
            code: "no_email",
            message,
            data: ErrorData {
                status: status.as_u16(),
            },
        })
    }
}

/// Form extractor settings for the subscription endpoint
///
/// A body that cannot be read as a form carries no usable email, so it gets the same
/// `no_email` rejection as an empty email field.
pub fn subscribe_form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        tracing::warn!(error.message = %err, "Rejected a subscription body that is not a form");
        SubscribeError::InvalidEmail(EmailError::Malformed(String::new())).into()
    })
}

/// Public subscription handler
#[tracing::instrument(name = "Subscribe email", skip(form, service))]
pub async fn subscribe_email(
    form: web::Form<FormData>,
    service: web::Data<SubscriptionService>,
) -> Result<HttpResponse, SubscribeError> {
    let FormData { email, source } = form.into_inner();
    service
        .subscribe(email.as_deref(), source.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(Subscribed {
        message: "Successfully subscribe!",
    }))
}

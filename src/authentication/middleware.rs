use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::error::InternalError;
use actix_web::http::header::{HeaderValue, WWW_AUTHENTICATE};
use actix_web::middleware::Next;
use actix_web::{web, HttpMessage, HttpResponse};

use crate::authentication::{basic_authentication, validate_admin, AuthError};
use crate::configuration::AdminSettings;
use crate::utils::err500;

/// Reject requests that do not carry valid administrator credentials
///
/// On success the authenticated [`AdminUser`](crate::authentication::AdminUser) is stored in
/// the request extensions.
#[allow(clippy::future_not_send)]
pub async fn reject_unauthorized_admins(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> actix_web::Result<ServiceResponse<impl MessageBody>> {
    let settings = req
        .app_data::<web::Data<AdminSettings>>()
        .cloned()
        .ok_or_else(|| err500("Admin settings are not registered"))?;

    let admin = match basic_authentication(req.headers()) {
        Ok(credentials) => validate_admin(credentials, &settings).await,
        Err(e) => Err(AuthError::InvalidCredentials(e)),
    };

    match admin {
        Ok(admin) => {
            tracing::debug!(admin = admin.username(), "Admin authenticated");
            req.extensions_mut().insert(admin);
            next.call(req).await
        }
        Err(AuthError::InvalidCredentials(e)) => {
            let mut response = HttpResponse::Unauthorized().finish();
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static(r#"Basic realm="cloeve-mail""#),
            );
            Err(InternalError::from_response(e, response).into())
        }
        Err(AuthError::UnexpectedError(e)) => Err(err500(e)),
    }
}

use actix_web::web::ReqData;
use actix_web::{web, HttpResponse};
use anyhow::Context;
use chrono::Utc;

use super::{render_list, AdminError, ListQuery, ListSettings};
use crate::authentication::{ActionTokens, AdminUser, DELETE_ACTION};
use crate::domain::SubscriberId;
use crate::listing::AdminListingService;

/// Admin list GET handler, also performs single deletes
#[tracing::instrument(
    name = "Show admin subscriber list",
    skip_all,
    fields(admin = %admin.username())
)]
pub async fn subscribers_page(
    query: web::Query<ListQuery>,
    listing: web::Data<AdminListingService>,
    tokens: web::Data<ActionTokens>,
    settings: web::Data<ListSettings>,
    admin: ReqData<AdminUser>,
) -> Result<HttpResponse, AdminError> {
    let admin = admin.into_inner();

    let mut notice = None;
    if query.action.as_deref() == Some("delete") {
        let token = query.token.as_deref().unwrap_or_default();
        if !tokens.verify(DELETE_ACTION, admin.username(), token, Utc::now()) {
            tracing::warn!("Rejected a delete request carrying an invalid action token");
            return Err(AdminError::UnauthorizedAction);
        }

        // Unparsable ids are ignored, the list is shown as usual
        if let Some(id) = query.email_id.as_deref().and_then(SubscriberId::parse) {
            let deleted = listing
                .delete_one(id)
                .await
                .context("Failed to delete a subscriber")?;
            if deleted {
                notice = Some("Subscriber deleted.".to_string());
            }
        }
    }

    render_list(&listing, &tokens, &settings, &query, &admin, notice).await
}

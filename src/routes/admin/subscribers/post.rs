use actix_web::web::ReqData;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use url::form_urlencoded;

use super::{render_list, AdminError, ListQuery, ListSettings};
use crate::authentication::{ActionTokens, AdminUser, BULK_DELETE_ACTION};
use crate::domain::SubscriberId;
use crate::listing::AdminListingService;

/// Bulk action form
///
/// Parsed by hand because the checkbox field repeats under the `bulk-delete[]` key.
#[derive(Debug, Default)]
struct BulkForm {
    actions: Vec<String>,
    ids: Vec<SubscriberId>,
    token: String,
}

impl BulkForm {
    fn parse(body: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in form_urlencoded::parse(body) {
            match key.as_ref() {
                "action" | "action2" => form.actions.push(value.into_owned()),
                "bulk-delete[]" => form.ids.extend(SubscriberId::parse(&value)),
                "_wpnonce" => form.token = value.into_owned(),
                _ => {}
            }
        }
        form
    }

    /// Either of the two action selectors may carry the bulk delete
    fn is_bulk_delete(&self) -> bool {
        self.actions.iter().any(|a| a == "bulk-delete")
    }
}

/// Admin list POST handler, performs bulk deletes
#[tracing::instrument(
    name = "Apply admin bulk action",
    skip_all,
    fields(admin = %admin.username())
)]
pub async fn bulk_delete(
    query: web::Query<ListQuery>,
    body: web::Bytes,
    listing: web::Data<AdminListingService>,
    tokens: web::Data<ActionTokens>,
    settings: web::Data<ListSettings>,
    admin: ReqData<AdminUser>,
) -> Result<HttpResponse, AdminError> {
    let admin = admin.into_inner();
    let form = BulkForm::parse(&body);

    let mut notice = None;
    if form.is_bulk_delete() {
        if !tokens.verify(BULK_DELETE_ACTION, admin.username(), &form.token, Utc::now()) {
            tracing::warn!("Rejected a bulk delete request carrying an invalid action token");
            return Err(AdminError::UnauthorizedAction);
        }
        let report = listing.delete_bulk(&form.ids).await;
        notice = Some(format!("{} subscriber(s) deleted.", report.deleted.len()));
    }

    render_list(&listing, &tokens, &settings, &query, &admin, notice).await
}

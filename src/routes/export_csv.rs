use actix_web::http::header::CONTENT_DISPOSITION;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};

use crate::export::{CsvExporter, ExportError, CSV_FILENAME};

impl ResponseError for ExportError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// CSV download handler
#[tracing::instrument(name = "Download subscribers CSV", skip(exporter))]
pub async fn export_csv(exporter: web::Data<CsvExporter>) -> Result<HttpResponse, ExportError> {
    let body = exporter.export().await?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            CONTENT_DISPOSITION,
            format!("attachment; filename={CSV_FILENAME}"),
        ))
        .body(body))
}

use std::collections::HashMap;

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};

use crate::embed::{render_form, EmbedOptions};

/// Front-end script submitting the capture form asynchronously
const SCRIPT: &str = include_str!("cloeve-mail.js");

/// Embeddable form handler
///
/// Every query parameter except `source` is an embed attribute.
pub async fn embed_form(query: web::Query<HashMap<String, String>>) -> HttpResponse {
    let mut attributes = query.into_inner();
    let source = attributes.remove("source").unwrap_or_else(|| "/".into());
    let options = EmbedOptions::from_attributes(&attributes);

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render_form(&options, &source))
}

/// Front-end script handler
pub async fn embed_script() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(SCRIPT)
}

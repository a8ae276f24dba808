use actix_web::HttpResponse;

/// Liveness probe, answers 200 with an empty body
pub async fn healthcheck() -> HttpResponse {
    HttpResponse::Ok().finish()
}

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::outlet::{OutletChannel as _, OutletEndpoint, UdpOutletChannel};

#[derive(Debug, Deserialize)]
struct SelfTestRequest {
    host: String,
    port: String,
    secret: String,
}

pub fn new_routes() -> actix_web::Scope {
    web::scope("/api/outlet").route("/selftest", web::post().to(self_test_handler))
}

/// Operator-triggered test sequence. This may interleave with the scheduled
/// update at the box, both sides only emit independent datagrams.
async fn self_test_handler(request: web::Json<SelfTestRequest>) -> HttpResponse {
    let request = request.into_inner();

    tracing::info!(
        "Sending outlet test sequence to '{}', port '{}' (secret not echoed here)",
        request.host,
        request.port
    );

    let endpoint = OutletEndpoint {
        host: request.host,
        port: request.port,
        secret: request.secret,
    };

    match UdpOutletChannel.run_self_test(&endpoint).await {
        Ok(()) => HttpResponse::Ok().body("Test sequence completed."),
        Err(e) => HttpResponse::InternalServerError().body(format!("Test sequence failed: {:#}", e)),
    }
}

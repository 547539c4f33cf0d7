use rocket::http::Status;
use rocket::response::stream::{Event, EventStream};
use rocket::serde::json::Json;
use rocket::tokio::select;
use rocket::tokio::sync::broadcast::error::RecvError;
use rocket::{get, post, Shutdown, State};
use std::sync::Arc;

use crate::bootstrap::AppState;
use crate::models::{JsonRpcErrorObject, JsonRpcPayload, JsonRpcResponse, RequestArguments};
use crate::provider::ProviderError;
use crate::web::dto::{ErrorBody, GlobalSlot, ProvidersResponse, RequestOutcome};

fn error_status(e: &ProviderError) -> Status {
    match e {
        ProviderError::Transport(_) | ProviderError::Rpc { .. } => Status::BadGateway,
        ProviderError::MalformedParams { .. } => Status::BadRequest,
        ProviderError::Listener { .. } => Status::InternalServerError,
    }
}

#[post("/api/v1/request", format = "json", data = "<args>")]
pub async fn request(
    args: Json<RequestArguments>,
    app_state: &State<Arc<AppState>>,
) -> (Status, Json<RequestOutcome>) {
    match app_state.provider.request(args.into_inner()).await {
        Ok(result) => (Status::Ok, Json(RequestOutcome::Success { result })),
        Err(e) => {
            log::error!("Provider request failed: {}", e);
            (
                error_status(&e),
                Json(RequestOutcome::Failure {
                    error: ErrorBody::from(&e),
                }),
            )
        }
    }
}

/// JSON-RPC envelope in, envelope out (the `sendAsync` surface).
#[post("/rpc", format = "json", data = "<payload>")]
pub async fn rpc(
    payload: Json<JsonRpcPayload>,
    app_state: &State<Arc<AppState>>,
) -> Json<JsonRpcResponse> {
    let payload = payload.into_inner();
    let id = payload.id.clone();

    match app_state.provider.send_async(payload).await {
        Ok(response) => Json(response),
        Err(e) => {
            log::error!("sendAsync failed: {}", e);
            Json(JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: None,
                error: Some(JsonRpcErrorObject {
                    code: e.code(),
                    message: e.to_string(),
                    data: None,
                }),
            })
        }
    }
}

#[get("/api/v1/providers")]
pub fn providers(app_state: &State<Arc<AppState>>) -> Json<ProvidersResponse> {
    let global_slot = app_state.page.ethereum().map(|p| GlobalSlot {
        is_meta_mask: p.is_meta_mask(),
        selected_address: p.selected_address(),
        chain_id: p.chain_id(),
        network_version: p.network_version(),
    });
    let announcements = app_state
        .page
        .announcements()
        .into_iter()
        .map(|detail| detail.info)
        .collect();

    Json(ProvidersResponse {
        global_slot,
        announcements,
    })
}

/// Server-sent stream of provider events.
#[get("/api/v1/events")]
pub fn events(app_state: &State<Arc<AppState>>, mut end: Shutdown) -> EventStream![] {
    let mut rx = app_state.events.subscribe();
    EventStream! {
        loop {
            let event = select! {
                msg = rx.recv() => match msg {
                    Ok(event) => event,
                    Err(RecvError::Closed) => break,
                    Err(RecvError::Lagged(skipped)) => {
                        log::warn!("Event stream lagged, {} event(s) dropped", skipped);
                        continue;
                    }
                },
                _ = &mut end => break,
            };
            let name = event.event.clone();
            yield Event::json(&event).event(name);
        }
    }
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}

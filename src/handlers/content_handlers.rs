use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::USER_AGENT, HeaderMap},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::Stream;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::models::site_models::{MockupRecord, SiteModule, DEFAULT_MOCKUPS, MODULES};
use crate::utils::store_links::{detect_platform, has_any_link, resolve_store_url};
use crate::AppState;

#[derive(Serialize)]
pub struct BrandingResponse {
    pub site_logo_url: String,
    pub global_play_store_url: String,
    pub global_app_store_url: String,
}

/// One gallery entry with its outbound link already resolved for the
/// requesting client.
#[derive(Serialize)]
pub struct GalleryEntry {
    #[serde(flatten)]
    pub record: MockupRecord,
    pub store_url: String,
    pub published: bool,
}

pub async fn get_branding(State(state): State<Arc<AppState>>) -> Json<BrandingResponse> {
    let config = state.store.read();
    Json(BrandingResponse {
        site_logo_url: config.site_logo_url,
        global_play_store_url: config.global_play_store_url,
        global_app_store_url: config.global_app_store_url,
    })
}

/// Public mockup gallery. Store links resolve against the caller's
/// User-Agent; an empty store shows the stock gallery.
pub async fn get_mockups(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<Vec<GalleryEntry>> {
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let platform = detect_platform(user_agent);

    let config = state.store.read();
    let records = if config.mockups.is_empty() {
        DEFAULT_MOCKUPS.clone()
    } else {
        config.mockups.clone()
    };

    let entries = records
        .into_iter()
        .map(|record| {
            let store_url = resolve_store_url(&record, &config, platform);
            let published = has_any_link(&record, &config);
            GalleryEntry {
                record,
                store_url,
                published,
            }
        })
        .collect();
    Json(entries)
}

pub async fn get_modules() -> Json<Vec<SiteModule>> {
    Json(MODULES.to_vec())
}

/// SSE stream of payload-less change notifications. Clients re-fetch the
/// content endpoints when an event arrives.
pub async fn events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.store.subscribe();
    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(()) => {
                    let event = Event::default().event("content-updated").data("");
                    return Some((Ok(event), rx));
                }
                // dropped notifications only mean the client re-reads once
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}

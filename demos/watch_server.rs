//! Long-poll watch server example
//!
//! Serves a single in-memory versioned resource. Plain GETs return the
//! current revision immediately; conditional GETs long-poll until the
//! revision advances or the requested wait elapses.
//!
//! Run with: cargo run --example watch_server
//!
//! Try it:
//!
//! ```text
//! curl -i http://localhost:3000/resource
//! curl -i -H 'If-None-Match: <revision>' -H 'Prefer: wait=10' http://localhost:3000/resource
//! curl -i -X PUT -d 'new content' http://localhost:3000/resource
//! ```

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use watch_axum_http::{Revision, Watch};

#[derive(Clone, Debug)]
struct Document {
    revision: Revision,
    content: String,
}

#[derive(Clone)]
struct AppState {
    tx: watch::Sender<Document>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let initial = Document {
        revision: Revision::new("1")?,
        content: "hello".to_string(),
    };
    let (tx, _rx) = watch::channel(initial);

    let app = Router::new()
        .route("/resource", get(get_resource).put(put_resource))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { tx });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("listening on http://127.0.0.1:3000");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn get_resource(State(state): State<AppState>, Watch(watch): Watch) -> Response {
    let mut rx = state.tx.subscribe();

    let Some(watch) = watch else {
        return document_response(&rx.borrow());
    };

    tracing::info!(
        revision = %watch.last_known_revision(),
        timeout_millis = watch.timeout_millis(),
        "long-polling"
    );

    // Answer immediately if the client is already behind.
    if rx.borrow().revision != *watch.last_known_revision() {
        let doc = rx.borrow().clone();
        return document_response(&doc);
    }

    let waited = tokio::time::timeout(watch.timeout(), async {
        loop {
            if rx.changed().await.is_err() {
                break;
            }
            if rx.borrow().revision != *watch.last_known_revision() {
                break;
            }
        }
    })
    .await;

    match waited {
        Ok(()) => {
            let doc = rx.borrow().clone();
            document_response(&doc)
        }
        Err(_) => StatusCode::NOT_MODIFIED.into_response(),
    }
}

async fn put_resource(State(state): State<AppState>, body: String) -> Response {
    state.tx.send_modify(|doc| {
        let next = doc
            .revision
            .as_str()
            .parse::<u64>()
            .map(|n| n + 1)
            .unwrap_or(0);
        if let Ok(revision) = Revision::new(next.to_string()) {
            doc.revision = revision;
        }
        doc.content = body;
    });

    let doc = state.tx.borrow().clone();
    tracing::info!(revision = %doc.revision, "updated resource");
    document_response(&doc)
}

fn document_response(doc: &Document) -> Response {
    (
        [(header::ETAG, doc.revision.as_str().to_string())],
        axum::Json(json!({
            "revision": doc.revision,
            "content": doc.content,
        })),
    )
        .into_response()
}

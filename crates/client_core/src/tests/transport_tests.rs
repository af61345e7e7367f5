use super::*;

use std::sync::Arc;

use anyhow::Result;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Clone)]
struct CaptureState<T> {
    tx: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> CaptureState<T> {
    fn new() -> (Self, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                tx: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
        )
    }

    async fn capture(&self, value: T) {
        if let Some(tx) = self.tx.lock().await.take() {
            let _ = tx.send(value);
        }
    }
}

async fn spawn_server(app: Router) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn lookup_posts_the_document_and_returns_the_recommendation() {
    let (state, payload_rx) = CaptureState::<LookupRequest>::new();
    let app = Router::new()
        .route(
            LOOKUP_PATH,
            post(
                |State(state): State<CaptureState<LookupRequest>>,
                 Json(payload): Json<LookupRequest>| async move {
                    state.capture(payload).await;
                    Json(LookupResponse {
                        recomendacion: Some("Acudir a cita".to_string()),
                    })
                },
            ),
        )
        .with_state(state);
    let base_url = spawn_server(app).await.expect("spawn server");

    let backend = HttpSurveyBackend::new(base_url);
    let document = DocumentId::parse("1032456789").expect("valid id");
    let recommendation = backend.lookup(&document).await.expect("lookup");

    assert_eq!(recommendation.as_deref(), Some("Acudir a cita"));
    let payload = payload_rx.await.expect("payload");
    assert_eq!(payload.id, "1032456789");
}

#[tokio::test]
async fn lookup_surfaces_the_error_body_of_a_rejection() {
    let app = Router::new().route(
        LOOKUP_PATH,
        post(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorBody::new("Documento no encontrado")),
            )
        }),
    );
    let base_url = spawn_server(app).await.expect("spawn server");

    let backend = HttpSurveyBackend::new(base_url);
    let document = DocumentId::parse("42").expect("valid id");
    let err = backend.lookup(&document).await.expect_err("must fail");

    assert_eq!(err.backend_message(), Some("Documento no encontrado"));
}

#[tokio::test]
async fn lookup_without_an_error_body_reports_the_status() {
    let app = Router::new().route(
        LOOKUP_PATH,
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::default())) }),
    );
    let base_url = spawn_server(app).await.expect("spawn server");

    let backend = HttpSurveyBackend::new(base_url);
    let document = DocumentId::parse("42").expect("valid id");
    let err = backend.lookup(&document).await.expect_err("must fail");

    match err {
        TransportError::Status { status } => assert_eq!(status, 500),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn submit_sends_the_ordered_values_triple() {
    let (state, payload_rx) = CaptureState::<SubmitRequest>::new();
    let app = Router::new()
        .route(
            SUBMIT_PATH,
            post(
                |State(state): State<CaptureState<SubmitRequest>>,
                 Json(payload): Json<SubmitRequest>| async move {
                    state.capture(payload).await;
                    Json(serde_json::json!({ "ok": true }))
                },
            ),
        )
        .with_state(state);
    let base_url = spawn_server(app).await.expect("spawn server");

    let backend = HttpSurveyBackend::new(base_url);
    let submission = SurveySubmission {
        document: DocumentId::parse("1032456789").expect("valid id"),
        answer: shared::domain::SurveyAnswer::AppointmentRequested,
        comment: "ok".to_string(),
    };
    backend.submit(&submission).await.expect("submit");

    let payload = payload_rx.await.expect("payload");
    assert_eq!(payload.values, ["1032456789", "1", "ok"]);
}

#[tokio::test]
async fn submit_surfaces_the_error_body_of_a_rejection() {
    let app = Router::new().route(
        SUBMIT_PATH,
        post(|| async {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody::new("Encuesta cerrada")),
            )
        }),
    );
    let base_url = spawn_server(app).await.expect("spawn server");

    let backend = HttpSurveyBackend::new(base_url);
    let submission = SurveySubmission {
        document: DocumentId::parse("42").expect("valid id"),
        answer: shared::domain::SurveyAnswer::NoActionTaken,
        comment: String::new(),
    };
    let err = backend.submit(&submission).await.expect_err("must fail");

    assert_eq!(err.backend_message(), Some("Encuesta cerrada"));
}

#[tokio::test]
async fn unreachable_backend_maps_to_a_network_error() {
    // Nothing listens on the discard port.
    let backend = HttpSurveyBackend::new("http://127.0.0.1:9");
    let document = DocumentId::parse("42").expect("valid id");
    let err = backend.lookup(&document).await.expect_err("must fail");

    match &err {
        TransportError::Network { .. } => {}
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.backend_message(), None);
}

#[tokio::test]
async fn trailing_slashes_in_the_base_url_are_tolerated() {
    let app = Router::new().route(
        LOOKUP_PATH,
        post(|| async { Json(LookupResponse { recomendacion: None }) }),
    );
    let base_url = spawn_server(app).await.expect("spawn server");

    let backend = HttpSurveyBackend::new(format!("{base_url}/"));
    let document = DocumentId::parse("42").expect("valid id");
    let recommendation = backend.lookup(&document).await.expect("lookup");
    assert_eq!(recommendation, None);
}

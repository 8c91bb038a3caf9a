use crate::api::{load_lesson, LessonBackend};
use crate::models::{ApiRequest, ApiResponse, RequestKind};
use crossbeam_channel::{Receiver, Sender};
use std::io;
use std::thread;

pub fn spawn_api_worker<B: LessonBackend + 'static>(
    backend: B,
    api_tx: Sender<ApiResponse>,
    api_rx: Receiver<ApiRequest>,
) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("lingo-client::api_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to start API worker runtime: {}", e);
                    return;
                }
            };

            while let Ok(request) = api_rx.recv() {
                log::debug!("Worker received {:?} request", request.kind());
                let response = rt.block_on(handle_request(&backend, request));
                if api_tx.send(response).is_err() {
                    break;
                }
            }
            log::info!("Worker channel disconnected, exiting");
        })
}

pub async fn handle_request<B: LessonBackend + ?Sized>(
    backend: &B,
    request: ApiRequest,
) -> ApiResponse {
    let kind = request.kind();
    let result = match request {
        ApiRequest::SignIn(body) => backend.sign_in(&body).await.map(ApiResponse::SignedIn),
        ApiRequest::SignUp(body) => backend.sign_up(&body).await.map(ApiResponse::SignedUp),
        ApiRequest::LoadLesson {
            lesson_id,
            page_size,
        } => load_lesson(backend, lesson_id, page_size)
            .await
            .map(ApiResponse::LessonLoaded),
        ApiRequest::LoadVocabularyPage {
            lesson_id,
            page,
            size,
        } => backend
            .vocabulary(lesson_id, page, size)
            .await
            .map(|page| ApiResponse::VocabularyPage { lesson_id, page }),
    };

    result.unwrap_or_else(|e| {
        log::warn!("{:?} request failed: {}", kind, e);
        ApiResponse::Error {
            request: kind,
            error: e.to_string(),
        }
    })
}

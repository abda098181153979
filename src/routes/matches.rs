use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{AnswerCollector, Matcher, Presenter, Step};
use crate::models::{
    AnswerMap, ErrorResponse, FindMatchesRequest, FindMatchesResponse, HealthResponse,
    QuestionnaireResponse, SelectOptionRequest, SessionStateResponse,
};
use crate::services::{PoolCache, SessionStore, ShelterApiClient};
use std::sync::Arc;
use uuid::Uuid;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub shelter: Arc<ShelterApiClient>,
    pub pool_cache: Arc<PoolCache>,
    pub sessions: Arc<SessionStore>,
    pub matcher: Matcher,
    pub presenter: Presenter,
    pub default_species: String,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/questionnaire", web::get().to(get_questionnaire))
        .route("/questionnaire/sessions", web::post().to(create_session))
        .route("/questionnaire/sessions/{id}", web::get().to(get_session))
        .route(
            "/questionnaire/sessions/{id}/select",
            web::post().to(select_option),
        )
        .route("/questionnaire/sessions/{id}/back", web::post().to(go_back))
        .route(
            "/questionnaire/sessions/{id}/reset",
            web::post().to(reset_session),
        )
        .route("/matches/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let backend_healthy = state.shelter.health_check().await.unwrap_or(false);

    let status = if backend_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Static questionnaire definition for clients rendering prompts
///
/// GET /api/v1/questionnaire
async fn get_questionnaire(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(QuestionnaireResponse {
        questions: state.matcher.questionnaire().questions().to_vec(),
    })
}

/// Open a new questionnaire session
///
/// POST /api/v1/questionnaire/sessions
async fn create_session(state: web::Data<AppState>) -> impl Responder {
    let id = state.sessions.create().await;

    // The session was just created, so it must still be there
    match state.sessions.get(&id).await {
        Some(session) => {
            let collector = session.lock().await;
            HttpResponse::Created().json(session_state(id, &collector))
        }
        None => HttpResponse::InternalServerError().json(ErrorResponse {
            error: "Session creation failed".to_string(),
            message: "Session expired immediately after creation".to_string(),
            status_code: 500,
        }),
    }
}

/// Current state of a questionnaire session
///
/// GET /api/v1/questionnaire/sessions/{id}
async fn get_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    match state.sessions.get(&id).await {
        Some(session) => {
            let collector = session.lock().await;
            HttpResponse::Ok().json(session_state(id, &collector))
        }
        None => session_not_found(id),
    }
}

/// Record an answer and advance the session
///
/// POST /api/v1/questionnaire/sessions/{id}/select
///
/// Request body:
/// ```json
/// {
///   "questionIndex": 0,
///   "optionId": "apartment"
/// }
/// ```
async fn select_option(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    req: web::Json<SelectOptionRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let id = path.into_inner();
    let session = match state.sessions.get(&id).await {
        Some(session) => session,
        None => return session_not_found(id),
    };

    let mut collector = session.lock().await;
    match collector.select_option(req.question_index, &req.option_id) {
        Ok(()) => HttpResponse::Ok().json(session_state(id, &collector)),
        Err(e) => {
            tracing::info!("Rejected selection for session {}: {}", id, e);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid selection".to_string(),
                message: e.to_string(),
                status_code: 400,
            })
        }
    }
}

/// Step the session back one question
///
/// POST /api/v1/questionnaire/sessions/{id}/back
async fn go_back(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    match state.sessions.get(&id).await {
        Some(session) => {
            let mut collector = session.lock().await;
            collector.go_back();
            HttpResponse::Ok().json(session_state(id, &collector))
        }
        None => session_not_found(id),
    }
}

/// Discard all answers and restart the session
///
/// POST /api/v1/questionnaire/sessions/{id}/reset
async fn reset_session(state: web::Data<AppState>, path: web::Path<Uuid>) -> impl Responder {
    let id = path.into_inner();

    match state.sessions.get(&id).await {
        Some(session) => {
            let mut collector = session.lock().await;
            collector.reset();
            collector.start();
            HttpResponse::Ok().json(session_state(id, &collector))
        }
        None => session_not_found(id),
    }
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "sessionId": "uuid",
///   "answers": {"living": "apartment"},
///   "species": "dog",
///   "limit": 5
/// }
/// ```
///
/// Exactly one of `sessionId` / `answers` must be present.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Resolve the answer map from the session store or the inline payload
    let answers: AnswerMap = match (&req.session_id, &req.answers) {
        (Some(session_id), None) => {
            let session = match state.sessions.get(session_id).await {
                Some(session) => session,
                None => return session_not_found(*session_id),
            };
            let collector = session.lock().await;
            if !collector.is_complete() {
                return HttpResponse::Conflict().json(ErrorResponse {
                    error: "Questionnaire incomplete".to_string(),
                    message: format!(
                        "Session {} has {} of {} answers",
                        session_id,
                        collector.answers().len(),
                        collector.questionnaire().len()
                    ),
                    status_code: 409,
                });
            }
            collector.answers().clone()
        }
        (None, Some(map)) => AnswerMap::from(map.clone()),
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing answers".to_string(),
                message: "Provide exactly one of sessionId or answers".to_string(),
                status_code: 400,
            });
        }
    };

    let species = req
        .species
        .clone()
        .unwrap_or_else(|| state.default_species.clone());

    tracing::info!("Finding matches for species: {}", species);

    // Pool snapshot: cache first, then the shelter backend. A fetch failure
    // is surfaced as an error so clients can tell it apart from a
    // successful empty result.
    let pool = match state.pool_cache.get(&species).await {
        Some(pool) => pool,
        None => match state.shelter.list_available(&species).await {
            Ok(candidates) => state.pool_cache.insert(&species, candidates).await,
            Err(e) => {
                tracing::error!("Failed to fetch candidate pool for {}: {}", species, e);
                return HttpResponse::BadGateway().json(ErrorResponse {
                    error: "Failed to load candidates".to_string(),
                    message: e.to_string(),
                    status_code: 502,
                });
            }
        },
    };

    tracing::debug!("Pool for {} holds {} candidates", species, pool.len());

    // A per-request limit narrows the default matcher configuration
    let matcher = match req.limit {
        Some(limit) => Matcher::new(state.matcher.questionnaire(), limit as usize),
        None => state.matcher,
    };

    let result = match matcher.compute_matches(&answers, pool.as_ref().clone()) {
        Ok(result) => result,
        Err(e) => {
            tracing::info!("Rejected answer map: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid answers".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    // A completed server session is discarded once its run has produced a
    // result; a new questionnaire starts a new session
    if let Some(session_id) = req.session_id {
        state.sessions.remove(&session_id).await;
    }

    let response = FindMatchesResponse {
        matches: state.presenter.present(&result.matches),
        total_candidates: result.total_candidates,
        vetoed_candidates: result.vetoed_candidates,
    };

    tracing::info!(
        "Returning {} matches (pool: {}, vetoed: {})",
        response.matches.len(),
        result.total_candidates,
        result.vetoed_candidates
    );

    HttpResponse::Ok().json(response)
}

fn session_not_found(id: Uuid) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse {
        error: "Session not found".to_string(),
        message: format!("No questionnaire session {} (it may have expired)", id),
        status_code: 404,
    })
}

fn session_state(id: Uuid, collector: &AnswerCollector) -> SessionStateResponse {
    let (step, question_index) = match collector.step() {
        Step::Intro => ("intro", None),
        Step::Question(i) => ("question", Some(i)),
        Step::Summary => ("summary", None),
    };

    let question = question_index
        .and_then(|i| collector.questionnaire().question(i))
        .copied();

    SessionStateResponse {
        session_id: id,
        step: step.to_string(),
        question_index,
        question,
        answers: collector.answers().clone(),
        complete: collector.is_complete(),
    }
}

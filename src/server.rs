use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, post, web};
use log::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::dto::{ServiceStatusDto, TranscriptDto, TranscriptParams};
use crate::error::ApiError;
use crate::transcript::{TranscriptResult, TranscriptSegment};
use crate::video;
use crate::youtube::{TranscriptProvider, YoutubeConfig, YoutubeTranscriptApi};

pub const SERVICE_NAME: &str = "YouTube Summarizer Backend";
const PROVIDER_UNAVAILABLE: &str = "youtube transcript provider not available on server";

pub struct AppState {
    /// `None` when the provider failed to initialize; the service still runs.
    pub provider: Option<Box<dyn TranscriptProvider>>,
    pub languages: Vec<String>,
}

impl AppState {
    pub fn new(provider: Option<Box<dyn TranscriptProvider>>, languages: Vec<String>) -> Self {
        Self {
            provider,
            languages,
        }
    }

    pub fn provider_available(&self) -> bool {
        self.provider.is_some()
    }

    async fn fetch_transcript(&self, video_id: &str) -> Result<TranscriptResult, ApiError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| ApiError::Provider(PROVIDER_UNAVAILABLE.to_string()))?;

        let snippets = provider
            .fetch(video_id, &self.languages)
            .await
            .map_err(|e| {
                error!("Transcript fetch failed for {video_id}: {:?}", e.cause);
                ApiError::Provider(e.to_string())
            })?;

        let segments = snippets.into_iter().map(TranscriptSegment::from).collect();
        Ok(TranscriptResult::from_segments(segments))
    }
}

#[get("/")]
pub async fn index(data: web::Data<AppState>) -> impl Responder {
    debug!("Status endpoint called");
    HttpResponse::Ok().json(ServiceStatusDto {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        youtube_transcript_available: data.provider_available(),
    })
}

#[get("/health")]
pub async fn health_check() -> impl Responder {
    debug!("Health check endpoint called");
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy"
    }))
}

#[get("/api/transcript")]
pub async fn transcript_query(
    data: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    debug!("Transcript request received (GET)");
    let params = TranscriptParams::from_pairs(&query);
    transcript_response(&data, &params).await
}

#[post("/api/transcript")]
pub async fn transcript_body(
    data: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    debug!("Transcript request received (POST): {} bytes", body.len());

    // Anything that isn't a JSON object of strings counts as no parameters.
    let params = serde_json::from_slice::<TranscriptParams>(&body).unwrap_or_else(|e| {
        debug!("Ignoring unparsable request body: {e}");
        TranscriptParams::default()
    });
    transcript_response(&data, &params).await
}

async fn transcript_response(
    state: &AppState,
    params: &TranscriptParams,
) -> Result<HttpResponse, ApiError> {
    let Some(input) = params.input() else {
        warn!("Transcript request without url or video_id");
        return Err(ApiError::MissingInput);
    };

    let video_id = video::normalize(input).map_err(|e| {
        warn!("Rejecting transcript request: {e}");
        ApiError::from(e)
    })?;

    let result = state.fetch_transcript(&video_id).await?;
    info!(
        "Transcript fetched for {}: {} segments, {} characters, {:.2}s",
        video_id,
        result.segments.len(),
        result.text.len(),
        result.duration
    );

    Ok(HttpResponse::Ok().json(TranscriptDto::new(video_id, result)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(health_check)
        .service(transcript_query)
        .service(transcript_body);
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    info!("Starting {SERVICE_NAME} v{}", env!("CARGO_PKG_VERSION"));

    let youtube_config = YoutubeConfig::default();
    let languages = youtube_config.languages.clone();
    let provider: Option<Box<dyn TranscriptProvider>> = match YoutubeTranscriptApi::new(youtube_config) {
        Ok(api) => {
            info!("YouTube transcript provider initialized, languages: {}", languages.join(", "));
            Some(Box::new(api))
        }
        Err(e) => {
            warn!("YouTube transcript provider unavailable, serving in degraded mode: {e}");
            None
        }
    };

    let app_state = web::Data::new(AppState::new(provider, languages));

    info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(web::PayloadConfig::default().limit(64 * 1024)) // 64KB
            .wrap(cors())
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

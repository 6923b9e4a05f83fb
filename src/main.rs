use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use campus_icebreaker::config::{LoggingSettings, Settings};
use campus_icebreaker::core::IcebreakerAssembler;
use campus_icebreaker::models::{MeetupContext, RawProfile};
use campus_icebreaker::routes::{self, icebreakers::AppState};
use campus_icebreaker::services;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "icebreaker-service", version, about = "Icebreaker generation service for CampusLink meetups")]
struct Cli {
    /// Configuration file (defaults to config/default.toml + config/local.toml)
    #[arg(long, env = "ICEBREAKER_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on, overrides server.port
    #[arg(long)]
    port: Option<u16>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Generate icebreakers for a built-in pair of students and exit
    Sample,
}

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors, including a missing request body
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(logging: &LoggingSettings, debug: bool) {
    let level = if debug { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    // Logging is configured from the settings, so a config error is reported on stderr
    let mut settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings.logging, cli.debug);

    if let Some(port) = cli.port {
        settings.server.port = port;
    }

    info!("Configuration loaded successfully");

    let generator = services::from_settings(&settings.generator).map_err(|e| {
        error!("Failed to initialize text generator: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    let assembler = IcebreakerAssembler::new(generator, settings.generator.max_new_tokens);

    info!(
        "Text generator initialized (backend: {}, budget: {} tokens)",
        assembler.backend_name(),
        assembler.max_new_tokens()
    );

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings, assembler).await,
        Command::Sample => run_sample(&assembler).await,
    }
}

async fn serve(settings: Settings, assembler: IcebreakerAssembler) -> std::io::Result<()> {
    let app_state = AppState {
        assembler,
        generation_timeout: Duration::from_secs(settings.server.generation_timeout_secs),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

async fn run_sample(assembler: &IcebreakerAssembler) -> std::io::Result<()> {
    let user_a = RawProfile {
        name: Some("Alex".to_string()),
        campus: Some("Central Campus".to_string()),
        interests: Some(vec!["AI".to_string(), "Music".to_string(), "Photography".to_string()]),
        languages: Some(vec!["English".to_string(), "Spanish".to_string()]),
        goals: Some(vec!["Graduate with honors".to_string(), "Make new friends".to_string()]),
        personality: Some("Outgoing and creative".to_string()),
    };

    let user_b = RawProfile {
        name: Some("Jordan".to_string()),
        campus: Some("Central Campus".to_string()),
        interests: Some(vec!["Machine Learning".to_string(), "Travel".to_string(), "Music".to_string()]),
        languages: Some(vec!["English".to_string(), "French".to_string()]),
        goals: Some(vec!["Internship experience".to_string(), "Expand network".to_string()]),
        personality: Some("Thoughtful and analytical".to_string()),
    };

    let ctx = MeetupContext::new(Some("Next Friday".to_string()), Some("Campus Coffee Shop".to_string()));

    let result = assembler
        .generate_icebreakers(&user_a, &user_b, &ctx)
        .await
        .map_err(|e| {
            error!("Failed to generate sample icebreakers: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
        })?;

    for (i, starter) in result.conversation_starters.iter().enumerate() {
        info!("Starter {}: \"{}\"", i + 1, starter);
    }
    info!("Activity: \"{}\"", result.activity);
    info!("Shared Topic: \"{}\"", result.shared_topic);
    info!("Raw response:\n{}", result.raw_response);

    Ok(())
}

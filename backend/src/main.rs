use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use futures::{sink::SinkExt, stream::StreamExt};
use land_core::land::persistence::LandRecord;
use land_core::{Board, EngineConfig, LandError, Point, Tag};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use uuid::Uuid;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Format an engine error as a JSON message for the frontend
fn format_error(code: &str, message: &str, severity: &str) -> String {
    format!("ERROR_UPDATE:{}", json!({
        "code": code,
        "message": message,
        "severity": severity
    }))
}

fn land_error(e: &LandError) -> String {
    let (code, severity) = match e {
        LandError::DegenerateHull { .. } => ("DEGENERATE_HULL", "warning"),
        LandError::SequencingUnresolved { .. } => ("SEQUENCING_UNRESOLVED", "error"),
        LandError::UnderpopulatedRegion { .. } => ("UNDERPOPULATED_REGION", "warning"),
        LandError::UnknownLand(_) => ("UNKNOWN_LAND", "error"),
        LandError::Persistence(_) => ("PERSISTENCE", "error"),
    };
    format_error(code, &e.to_string(), severity)
}

// Application State
struct AppState {
    board: Arc<RwLock<Board>>,
}

impl AppState {
    // A panic mid-command never leaves the board half-written (all mutations
    // commit at the end), so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Board> {
        self.board.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Board> {
        self.board.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn load_config() -> EngineConfig {
    match std::env::var("LAND_CONFIG") {
        Ok(path) => match EngineConfig::load(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                warn!("Could not read config {}: {}; using defaults", path, e);
                EngineConfig::default()
            }
        },
        Err(_) => EngineConfig::default(),
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = load_config();
    let shared_state = Arc::new(AppState {
        board: Arc::new(RwLock::new(Board::new(&config))),
    });

    let app = Router::new()
        .route("/", get(root))
        .route("/lands", get(lands_handler))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    let addr_text = std::env::var("LAND_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = addr_text
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("LAND_ADDR {}: {}", addr_text, e)))?;

    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn root() -> &'static str {
    "Hello from Land Backend!"
}

async fn lands_handler(State(state): State<Arc<AppState>>) -> Json<Vec<LandRecord>> {
    let board = state.read();
    Json(board.lands().lands().map(LandRecord::from).collect())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session = Uuid::new_v4();
    info!("Client {} connected", session);
    let (mut sender, mut receiver) = socket.split();

    let initial = render_update(&state.read());
    if sender.send(Message::Text(initial)).await.is_err() {
        return;
    }

    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => {
                debug!("Client {} sent: {}", session, text);
                // Guard must be gone before the next await.
                let reply = {
                    let mut board = state.write();
                    handle_command(&mut board, &text)
                };
                if sender.send(Message::Text(reply)).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    info!("Client {} disconnected", session);
}

#[derive(Deserialize)]
struct RevealCmd {
    x: f64,
    y: f64,
    radius: Option<f64>,
    tag: Tag,
}

#[derive(Deserialize)]
struct EraseCmd {
    x: f64,
    y: f64,
    threshold: Option<f64>,
}

fn render_update(board: &Board) -> String {
    let json = serde_json::to_string(&board.snapshot()).unwrap_or_else(|_| "{}".into());
    format!("RENDER_UPDATE:{}", json)
}

fn bad_request(command: &str, e: serde_json::Error) -> String {
    warn!("Failed to parse {} command: {}", command, e);
    format_error("BAD_REQUEST", &format!("Malformed {} payload: {}", command, e), "warning")
}

/// Run one `COMMAND:payload` message against the board and build the reply.
fn handle_command(board: &mut Board, text: &str) -> String {
    let (command, payload) = text.split_once(':').unwrap_or((text, ""));

    match command {
        "AMBIENT_ADD" => match serde_json::from_str::<Vec<Point>>(payload) {
            Ok(points) => {
                let added = board.add_ambient(points);
                info!("Added {} ambient point(s)", added);
                render_update(board)
            }
            Err(e) => bad_request(command, e),
        },
        "REVEAL" => match serde_json::from_str::<RevealCmd>(payload) {
            Ok(cmd) => match board.reveal(&Point::new(cmd.x, cmd.y), cmd.radius, cmd.tag) {
                Ok(outcome) => {
                    info!(
                        "Reveal {:?}: land {}, {} ambient consumed, {} returned",
                        outcome.merge.kind, outcome.merge.land, outcome.consumed, outcome.returned
                    );
                    render_update(board)
                }
                Err(e) => {
                    warn!("Reveal failed: {}", e);
                    land_error(&e)
                }
            },
            Err(e) => bad_request(command, e),
        },
        "ERASE" => match serde_json::from_str::<EraseCmd>(payload) {
            Ok(cmd) => match board.erase(&Point::new(cmd.x, cmd.y), cmd.threshold) {
                Ok(_) => render_update(board),
                Err(e) => {
                    warn!("Erase failed: {}", e);
                    land_error(&e)
                }
            },
            Err(e) => bad_request(command, e),
        },
        "SAVE" => match board.save_lands() {
            Ok(json) => format!("LANDS_DATA:{}", json),
            Err(e) => land_error(&e),
        },
        "LOAD" => match board.load_lands(payload) {
            Ok(_) => render_update(board),
            Err(e) => {
                warn!("Load failed: {}", e);
                land_error(&e)
            }
        },
        "STATE" => render_update(board),
        _ => {
            warn!("Unknown command: {}", command);
            format_error("UNKNOWN_COMMAND", &format!("Unknown command '{}'", command), "warning")
        }
    }
}

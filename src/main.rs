use std::sync::Arc;

use boardsync::config::SyncConfig;
use boardsync::net::canvas::HttpCanvasStore;
use boardsync::sync::engine::{Session, SyncEngine};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let board_id = std::env::var("BOARD_ID").expect("BOARD_ID required");
    let user_id = std::env::var("USER_ID").unwrap_or_else(|_| "anonymous".into());

    let store = HttpCanvasStore::from_env().expect("canvas store client init failed");
    let engine = SyncEngine::new(
        Session { board_id: board_id.clone(), user_id },
        SyncConfig::from_env(),
        Arc::new(store),
    );

    engine.open().await.expect("board open failed");
    {
        let scene = engine.scene();
        let scene = scene.read().await;
        tracing::info!(
            %board_id,
            layers = scene.layers.len(),
            shapes = scene.shapes.len(),
            "board opened; watching for remote changes"
        );
    }

    tokio::signal::ctrl_c().await.expect("ctrl-c handler failed");
    engine.close();
    tracing::info!(%board_id, "board closed");
}

//! Application state shared across Axum route handlers.

use db::session_code::SessionCode;
use sea_orm::DatabaseConnection;
use tokio::sync::watch;

/// Central application state: the database connection plus the receiving
/// end of the rotating-code channel published by the `CodeRotator`.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    code_rx: watch::Receiver<SessionCode>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, code_rx: watch::Receiver<SessionCode>) -> Self {
        Self { db, code_rx }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Cloned connection for spawned tasks that need ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    /// Snapshot of the code currently on display.
    pub fn current_code(&self) -> SessionCode {
        self.code_rx.borrow().clone()
    }
}

//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::PostRepository;
use quill_infra::database::{self, InMemoryPostRepository, PostgresPostRepository};

use crate::chat::ChatClient;
use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub chat: Option<Arc<ChatClient>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let posts: Arc<dyn PostRepository> = if let Some(db_config) = &config.database {
            match database::connect(db_config).await {
                Ok(conn) => Arc::new(PostgresPostRepository::new(conn)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Arc::new(InMemoryPostRepository::new())
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            Arc::new(InMemoryPostRepository::new())
        };

        let chat = match &config.chat {
            Some(chat_config) => Some(Arc::new(ChatClient::new(chat_config.clone()))),
            None => {
                tracing::warn!("OPENROUTER_API_KEY not set. Chat endpoint will report upstream unconfigured.");
                None
            }
        };

        tracing::info!("Application state initialized");

        Self { posts, chat }
    }
}

pub mod database;

use refrd::{AppState, Config, build_router, services::jwt, services::storage::ObjectStorage};
use reqwest::Client;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use uuid::Uuid;

/// HTTP test application wrapper
///
/// Manages an axum server running on a random port for HTTP testing. Each
/// test gets its own server instance to allow parallel test execution.
///
/// The database pool is created lazily, so request paths that are rejected
/// before touching the database (authentication, validation, upload
/// filtering) can be exercised without a running PostgreSQL.
pub struct TestApp {
    /// Server base URL (e.g., "http://127.0.0.1:54321")
    pub address: String,
    /// HTTP client for making requests
    pub client: Client,
    /// Application config
    pub config: Config,
}

impl TestApp {
    /// Create a new HTTP test app with the server on a random port.
    pub async fn new() -> Self {
        let config = Config::default();

        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect_lazy(config.database.connection_string().expose_secret())
            .expect("Failed to build lazy pool");

        let storage = ObjectStorage::from_config(&config.storage).await;
        let state = AppState::new(pool, storage, config.clone());

        let app = build_router(state);

        // Bind to random port (port 0 tells OS to assign available port)
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        // Start server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give server time to start
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            address,
            client,
            config,
        }
    }

    /// Get the full URL for an API endpoint
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Mints a bearer token signed with the app's configured secret.
    pub fn bearer_token(&self) -> String {
        jwt::generate_jwt(
            Uuid::now_v7(),
            self.config.auth.jwt_secret.expose_secret(),
            self.config.auth.token_ttl_minutes,
        )
        .expect("Failed to generate test token")
    }
}

//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p tubely-api --test thumbnails_test`.
//! Each test app gets its own in-memory SQLite database and assets directory.

#![allow(dead_code)]

pub mod auth;
pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tubely_api::setup::routes;
use tubely_api::AppState;
use tubely_core::models::{NewVideo, Video};
use tubely_core::{AppConfig, BaseConfig, Config, StorageBackend};
use tubely_db::{VideoRepository, VideoStore};
use tubely_storage::{create_storage, Storage};
use uuid::Uuid;

/// Origin every generated thumbnail URL starts with.
pub const TEST_BASE_URL: &str = "http://localhost:8091";

/// Upload bound used by the test apps.
pub const TEST_MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Test application: server, repositories, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub router: Router,
    pub videos: VideoRepository,
    pub storage: Arc<dyn Storage>,
    pub assets_root: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Insert a video owned by `owner`.
    pub async fn create_video(&self, owner: Uuid) -> Video {
        self.videos
            .create_video(NewVideo {
                title: "Boots".to_string(),
                description: "A video about boots".to_string(),
                user_id: owner,
            })
            .await
            .expect("Failed to create video")
    }

    pub async fn reload(&self, video_id: Uuid) -> Video {
        self.videos
            .get_video(video_id)
            .await
            .expect("Failed to load video")
            .expect("Video disappeared")
    }

    /// Number of files in the local assets directory.
    pub fn stored_files(&self) -> usize {
        count_files(&self.assets_root)
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(Result::ok).count())
        .unwrap_or(0)
}

/// Path part of an absolute thumbnail URL, for requests against the test server.
pub fn url_path(url: &str) -> &str {
    url.strip_prefix(TEST_BASE_URL)
        .unwrap_or_else(|| panic!("URL {} does not start with {}", url, TEST_BASE_URL))
}

pub fn upload_path(video_id: impl std::fmt::Display) -> String {
    format!("/api/thumbnail_upload/{}", video_id)
}

/// Setup test app with an isolated DB and the requested storage backend.
pub async fn setup_test_app(backend: StorageBackend) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let assets_root = temp_dir.path().join("assets");

    let config = create_test_config(backend, assets_root.clone());

    let pool = tubely_db::connect_pool(config.database_url())
        .await
        .expect("Failed to connect to test database");
    tubely_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    let videos = VideoRepository::new(pool);

    let storage = create_storage(&config)
        .await
        .expect("Failed to create storage");

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(videos.clone()),
        storage.clone(),
    ));

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let router = app.clone();
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        router,
        videos,
        storage,
        assets_root,
        _temp_dir: temp_dir,
    }
}

fn create_test_config(backend: StorageBackend, assets_root: PathBuf) -> Config {
    Config(Box::new(AppConfig {
        base: BaseConfig {
            server_host: "localhost".to_string(),
            server_port: 8091,
            cors_origins: vec!["*".to_string()],
            jwt_secret: auth::TEST_JWT_SECRET.to_string(),
            environment: "test".to_string(),
        },
        database_url: "sqlite::memory:".to_string(),
        storage_backend: backend,
        assets_root,
        max_upload_size_bytes: TEST_MAX_UPLOAD_BYTES,
    }))
}

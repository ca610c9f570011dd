use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tubely_core::models::{NewVideo, Video};
use tubely_core::AppError;
use uuid::Uuid;

/// Lookup and update of video records.
///
/// The upload pipeline depends on this trait rather than on `VideoRepository`, so it
/// can be exercised against other stores in tests.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Fetch a video by ID. `Ok(None)` when no such record exists.
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Write back every mutable field of `video` and bump `updated_at`.
    ///
    /// Returns the record as persisted. A record that no longer exists is
    /// `AppError::NotFound`.
    async fn update_video(&self, video: &Video) -> Result<Video, AppError>;

    async fn create_video(&self, new_video: NewVideo) -> Result<Video, AppError>;
}

#[derive(sqlx::FromRow)]
struct VideoRow {
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    title: String,
    description: String,
    user_id: String,
    thumbnail_url: Option<String>,
    video_url: Option<String>,
}

impl TryFrom<VideoRow> for Video {
    type Error = AppError;

    fn try_from(row: VideoRow) -> Result<Self, Self::Error> {
        let parse = |field: &str, value: &str| {
            Uuid::parse_str(value).map_err(|e| {
                AppError::Internal(format!("Stored video {} is not a UUID: {}", field, e))
            })
        };

        Ok(Video {
            id: parse("id", &row.id)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            title: row.title,
            description: row.description,
            user_id: parse("user_id", &row.user_id)?,
            thumbnail_url: row.thumbnail_url,
            video_url: row.video_url,
        })
    }
}

#[derive(Clone)]
pub struct VideoRepository {
    pool: SqlitePool,
}

impl VideoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    #[tracing::instrument(skip(self))]
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let row = sqlx::query_as::<_, VideoRow>(
            r#"
            SELECT id, created_at, updated_at, title, description, user_id,
                   thumbnail_url, video_url
            FROM videos
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Video::try_from).transpose()
    }

    #[tracing::instrument(skip(self, video), fields(video_id = %video.id))]
    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        let updated_at = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE videos
            SET title = ?, description = ?, thumbnail_url = ?, video_url = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(updated_at)
        .bind(video.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Video {} not found", video.id)));
        }

        Ok(Video {
            updated_at,
            ..video.clone()
        })
    }

    #[tracing::instrument(skip(self, new_video), fields(user_id = %new_video.user_id))]
    async fn create_video(&self, new_video: NewVideo) -> Result<Video, AppError> {
        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title: new_video.title,
            description: new_video.description,
            user_id: new_video.user_id,
            thumbnail_url: None,
            video_url: None,
        };

        sqlx::query(
            r#"
            INSERT INTO videos (id, created_at, updated_at, title, description, user_id,
                                thumbnail_url, video_url)
            VALUES (?, ?, ?, ?, ?, ?, NULL, NULL)
            "#,
        )
        .bind(video.id.to_string())
        .bind(video.created_at)
        .bind(video.updated_at)
        .bind(&video.title)
        .bind(&video.description)
        .bind(video.user_id.to_string())
        .execute(&self.pool)
        .await?;

        tracing::debug!(video_id = %video.id, "Video created");

        Ok(video)
    }
}

//! Application state for site-server

use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use shared::error::AppError;
use sqlx::postgres::PgPoolOptions;

use crate::BoxError;
use crate::config::Config;
use crate::db::{ContentStore, PgStore};
use crate::storage::{ObjectStore, S3ObjectStore};
use crate::translate::{Translator, WalkRules, WorkersAiTranslator};

/// Shared application state
///
/// Every backend is optional; handlers report a missing one per request.
#[derive(Clone)]
pub struct AppState {
    /// Relational content store (pages, menu items, reservations)
    pub db: Option<Arc<dyn ContentStore>>,
    /// Image bucket
    pub objects: Option<Arc<dyn ObjectStore>>,
    /// Italian → English translator for page documents
    pub translator: Option<Arc<dyn Translator>>,
    /// Rules for the auto-translate walk
    pub walk_rules: Arc<WalkRules>,
    /// Admin bearer secret
    pub admin_token: String,
    /// Origin for public image URLs
    pub public_base_url: Option<String>,
}

impl AppState {
    /// Connect every configured backend
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let db: Option<Arc<dyn ContentStore>> = match &config.database_url {
            Some(url) => {
                let pool = PgPoolOptions::new().max_connections(10).connect(url).await?;
                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Database connected, migrations applied");
                Some(Arc::new(PgStore::new(pool)))
            }
            None => None,
        };

        let objects: Option<Arc<dyn ObjectStore>> = match &config.s3_bucket {
            Some(bucket) => {
                let aws_config =
                    aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
                let mut s3_config = aws_sdk_s3::config::Builder::from(&aws_config);
                if let Some(endpoint) = &config.s3_endpoint_url {
                    s3_config = s3_config.endpoint_url(endpoint).force_path_style(true);
                }
                let client = S3Client::from_conf(s3_config.build());
                tracing::info!(bucket = %bucket, "Object store configured");
                Some(Arc::new(S3ObjectStore::new(client, bucket.clone())))
            }
            None => None,
        };

        let translator: Option<Arc<dyn Translator>> = config.ai.as_ref().map(|ai| {
            tracing::info!(model = %ai.model, "Auto-translation enabled");
            Arc::new(WorkersAiTranslator::new(reqwest::Client::new(), ai)) as Arc<dyn Translator>
        });

        Ok(Self {
            db,
            objects,
            translator,
            walk_rules: Arc::new(WalkRules::default()),
            admin_token: config.admin_token.clone(),
            public_base_url: config.public_base_url.clone(),
        })
    }

    /// State over explicit backends (tests, embedding)
    pub fn with_backends(
        db: Option<Arc<dyn ContentStore>>,
        objects: Option<Arc<dyn ObjectStore>>,
        translator: Option<Arc<dyn Translator>>,
        admin_token: impl Into<String>,
    ) -> Self {
        Self {
            db,
            objects,
            translator,
            walk_rules: Arc::new(WalkRules::default()),
            admin_token: admin_token.into(),
            public_base_url: None,
        }
    }

    /// Content store or `DATABASE_URL missing`
    pub fn db(&self) -> Result<&dyn ContentStore, AppError> {
        self.db
            .as_deref()
            .ok_or_else(|| AppError::config_missing("DATABASE_URL missing"))
    }

    /// Object store or `BUCKET binding missing`
    pub fn objects(&self) -> Result<&dyn ObjectStore, AppError> {
        self.objects
            .as_deref()
            .ok_or_else(|| AppError::config_missing("BUCKET binding missing"))
    }
}

//! SQLite persistence for submitted documents

use chrono::Utc;
use shared_types::{StoredDocument, ValidateDocumentRequest};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use crate::error::ServerError;

#[derive(Clone)]
pub struct DocumentStore {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct DbDocument {
    document_id: String,
    pdf_document: String,
    required_strings: String,
    validate_strings: String,
    created_at: String,
}

impl DocumentStore {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        tracing::info!("Connecting to database: {}", database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Self::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Single-connection in-memory database; the connection is never recycled
    /// because closing it would drop every table.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        Self::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        tracing::info!("Running database migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                document_id TEXT NOT NULL,
                pdf_document TEXT NOT NULL,
                required_strings TEXT NOT NULL,
                validate_strings TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_documents_document_id ON documents(document_id)
            "#,
        )
        .execute(pool)
        .await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Persist a request. Ids are not unique; resubmitting keeps both rows.
    pub async fn insert(&self, req: &ValidateDocumentRequest) -> Result<StoredDocument, ServerError> {
        let required_json = serde_json::to_string(&req.required_strings)
            .map_err(|e| ServerError::InvalidRequest(format!("Invalid required_strings: {}", e)))?;
        let validate_json = serde_json::to_string(&req.validate_strings)
            .map_err(|e| ServerError::InvalidRequest(format!("Invalid validate_strings: {}", e)))?;
        let created_at = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO documents (document_id, pdf_document, required_strings, validate_strings, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&req.document_id)
        .bind(&req.document)
        .bind(&required_json)
        .bind(&validate_json)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        tracing::info!("Stored document: {}", req.document_id);

        Ok(StoredDocument {
            document: req.document.clone(),
            document_id: req.document_id.clone(),
            required_strings: req.required_strings.clone(),
            validate_strings: req.validate_strings.clone(),
            created_at,
        })
    }

    /// Every stored submission for `document_id`, oldest first.
    pub async fn find_by_document_id(
        &self,
        document_id: &str,
    ) -> Result<Vec<StoredDocument>, ServerError> {
        let rows: Vec<DbDocument> = sqlx::query_as(
            r#"
            SELECT document_id, pdf_document, required_strings, validate_strings, created_at
            FROM documents
            WHERE document_id = ?
            ORDER BY id
            "#,
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(StoredDocument::try_from).collect()
    }
}

impl TryFrom<DbDocument> for StoredDocument {
    type Error = ServerError;

    fn try_from(row: DbDocument) -> Result<Self, Self::Error> {
        let required_strings = serde_json::from_str(&row.required_strings)
            .map_err(|e| ServerError::Internal(format!("Corrupt required_strings: {}", e)))?;
        let validate_strings = serde_json::from_str(&row.validate_strings)
            .map_err(|e| ServerError::Internal(format!("Corrupt validate_strings: {}", e)))?;

        Ok(StoredDocument {
            document: row.pdf_document,
            document_id: row.document_id,
            required_strings,
            validate_strings,
            created_at: row.created_at,
        })
    }
}

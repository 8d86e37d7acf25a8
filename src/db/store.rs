//! SQLite favorites store
use std::{future::Future, pin::Pin, str::FromStr, sync::Arc, time::Duration};

use futures::{stream::BoxStream, StreamExt};
use log::{debug, info};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, SqlitePool,
};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::schema::SQLITE_INIT;
use crate::{
    errors::GitScoutError,
    model::{GitHubAccount, Owner},
};

/// Persistent table of favorite repositories.
pub trait FavoritesStore: Sync + Send {
    /// Insert `account`, replacing any row with the same identifier.
    /// Returns the identifier of the row.
    fn insert_favorite(
        &self,
        account: GitHubAccount,
    ) -> Pin<Box<dyn Future<Output = Result<i64, GitScoutError>> + Send + '_>>;

    /// Whole table, emitted now and again after every change.
    fn get_all_favorites(&self) -> BoxStream<'static, Result<Vec<GitHubAccount>, GitScoutError>>;

    /// Delete the row matching `account`. Nothing happens if there is none.
    fn delete_favorite(
        &self,
        account: GitHubAccount,
    ) -> Pin<Box<dyn Future<Output = Result<(), GitScoutError>> + Send + '_>>;
}

/// Row of the `github_repository` table
#[derive(Debug, FromRow)]
struct FavoriteRow {
    /// Generated identifier
    id: i64,
    /// Full name
    name: Option<String>,
    /// Owner, as JSON
    owner: Option<String>,
    /// Primary language
    language: Option<String>,
    /// Stars
    stargazers_count: Option<i64>,
    /// Watchers
    watchers_count: Option<i64>,
    /// Forks
    forks_count: Option<i64>,
    /// Open issues
    open_issues_count: Option<i64>,
}

impl TryFrom<FavoriteRow> for GitHubAccount {
    type Error = serde_json::Error;

    fn try_from(row: FavoriteRow) -> Result<Self, Self::Error> {
        let owner = row
            .owner
            .map(|owner| serde_json::from_str::<Owner>(&owner))
            .transpose()?;
        Ok(GitHubAccount {
            id: Some(row.id),
            name: row.name,
            owner,
            repository_language: row.language,
            stargazers_count: row.stargazers_count,
            watchers_count: row.watchers_count,
            forks_count: row.forks_count,
            open_issues_count: row.open_issues_count,
        })
    }
}

/// [`FavoritesStore`] over a sqlx SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteFavoritesStore {
    /// Connection pool
    pool: SqlitePool,

    /// Bumped after every write, wakes up readers
    changes: Arc<watch::Sender<u64>>,
}

impl SqliteFavoritesStore {
    /// Open (and create if needed) the database at `database_url`.
    /// # Errors
    /// Error if the URL is invalid, the database can't be opened or the schema fails
    pub async fn open(database_url: &str) -> Result<Self, GitScoutError> {
        let connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        // an in-memory database lives as long as its connection
        let pool_opts = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new()
        };
        let pool = pool_opts.connect_with(connect_opts).await?;
        Self::with_pool(pool).await
    }

    /// Use an existing pool, applying the schema.
    /// # Errors
    /// Error if the schema can't be applied
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, GitScoutError> {
        apply_schema(&pool).await?;
        info!("Favorites store initialized");
        let (changes, _) = watch::channel(0);
        Ok(Self {
            pool,
            changes: Arc::new(changes),
        })
    }

    /// Underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Wake up every live favorites list
    fn notify(&self) {
        self.changes.send_modify(|version| *version += 1);
    }
}

/// Run each statement of the schema
async fn apply_schema(pool: &SqlitePool) -> Result<(), GitScoutError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

/// All favorites, oldest first
async fn fetch_all(pool: &SqlitePool) -> Result<Vec<GitHubAccount>, GitScoutError> {
    let rows: Vec<FavoriteRow> = sqlx::query_as(
        r#"
        SELECT id, name, owner, language, stargazers_count, watchers_count, forks_count, open_issues_count
        FROM github_repository
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;
    let accounts = rows
        .into_iter()
        .map(GitHubAccount::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(accounts)
}

impl FavoritesStore for SqliteFavoritesStore {
    fn insert_favorite(
        &self,
        account: GitHubAccount,
    ) -> Pin<Box<dyn Future<Output = Result<i64, GitScoutError>> + Send + '_>> {
        Box::pin(async move {
            let owner = account
                .owner
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?;
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT OR REPLACE INTO github_repository (
                    id, name, owner, language, stargazers_count, watchers_count, forks_count, open_issues_count
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                RETURNING id
                "#,
            )
            .bind(account.id)
            .bind(account.name)
            .bind(owner)
            .bind(account.repository_language)
            .bind(account.stargazers_count)
            .bind(account.watchers_count)
            .bind(account.forks_count)
            .bind(account.open_issues_count)
            .fetch_one(&self.pool)
            .await?;
            debug!("Stored favorite #{id}");
            self.notify();
            Ok(id)
        })
    }

    fn get_all_favorites(&self) -> BoxStream<'static, Result<Vec<GitHubAccount>, GitScoutError>> {
        let pool = self.pool.clone();
        WatchStream::new(self.changes.subscribe())
            .then(move |_| {
                let pool = pool.clone();
                async move { fetch_all(&pool).await }
            })
            .boxed()
    }

    fn delete_favorite(
        &self,
        account: GitHubAccount,
    ) -> Pin<Box<dyn Future<Output = Result<(), GitScoutError>> + Send + '_>> {
        Box::pin(async move {
            // a record without identifier never matches a stored row
            let Some(id) = account.id else {
                debug!("Skipping delete of unsaved '{}'", account.display_name());
                return Ok(());
            };
            let result = sqlx::query("DELETE FROM github_repository WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await?;
            if result.rows_affected() > 0 {
                debug!("Deleted favorite #{id}");
                self.notify();
            }
            Ok(())
        })
    }
}

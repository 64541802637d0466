//! Postgres post store using Diesel.
//!
//! Connections come from an r2d2 pool built from [`PostgresConfig`]. Every
//! call checks out one connection on the blocking thread pool; a unit of work
//! runs inside one database transaction on that connection. Pending
//! migrations are applied when the repository is created.
//!
//! Failed operations are not retried.

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tokio::task;

use crate::api::{Page, PageRequest, PostId};
use crate::db::repo_config::PostgresConfig;
use crate::db::repository::{
    PostRepository, PostStore, RepositoryError, RepositoryResult, UnitOfWork,
};
use crate::models::Post;

mod models;
mod schema;

use models::{NewPostRow, PostChangeset, PostRow};
use schema::posts;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Diesel-backed post repository.
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Build the pool and bring the schema up to date. Blocks; call it from
    /// `spawn_blocking` when on the async runtime.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(Some(config.min_idle))
            .connection_timeout(config.connect_timeout())
            .idle_timeout(Some(config.idle_timeout()))
            .test_on_check_out(true)
            .build(ConnectionManager::<PgConnection>::new(&config.url))
            .map_err(|e| {
                RepositoryError::from(e)
                    .in_operation("build_pool")
                    .with_details(format!("max_connections={}", config.max_connections))
            })?;

        let mut conn = pool
            .get()
            .map_err(|e| RepositoryError::from(e).in_operation("migrate"))?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| {
                RepositoryError::internal(format!("migration failed: {}", e)).in_operation("migrate")
            })?
            .len();
        drop(conn);

        tracing::info!(
            max_connections = config.max_connections,
            migrations_applied = applied,
            "postgres post store ready"
        );

        Ok(Self { pool })
    }

    /// Run `f` on a pooled connection off the async runtime.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| RepositoryError::internal(format!("blocking task failed: {}", e)))?
        .map_err(|e| {
            if !e.is_not_found() {
                tracing::warn!(operation, error = %e, "postgres operation failed");
            }
            e.in_operation(operation)
        })
    }
}

impl PostStore for PgConnection {
    fn save(&mut self, post: Post) -> RepositoryResult<Post> {
        let row = match post.id {
            None => diesel::insert_into(posts::table)
                .values(NewPostRow {
                    title: &post.title,
                    content: &post.content,
                })
                .returning(PostRow::as_returning())
                .get_result(self)?,
            Some(id) => diesel::update(posts::table.find(id.value()))
                .set(PostChangeset {
                    title: &post.title,
                    content: &post.content,
                })
                .returning(PostRow::as_returning())
                .get_result(self)
                .optional()?
                .ok_or_else(|| RepositoryError::post_not_found(id).in_operation("save"))?,
        };
        Ok(row.into())
    }

    fn find_by_id(&mut self, id: PostId) -> RepositoryResult<Option<Post>> {
        let row = posts::table
            .find(id.value())
            .select(PostRow::as_select())
            .first::<PostRow>(self)
            .optional()?;
        Ok(row.map(Post::from))
    }

    fn find_all(&mut self, request: PageRequest) -> RepositoryResult<Page<Post>> {
        let total: i64 = posts::table.count().get_result(self)?;
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);

        let rows = posts::table
            .select(PostRow::as_select())
            .order(posts::post_id.asc())
            .offset(offset)
            .limit(i64::from(request.size))
            .load::<PostRow>(self)?;

        let content = rows.into_iter().map(Post::from).collect();
        Ok(Page::new(content, request, total.max(0) as u64))
    }

    fn delete_by_id(&mut self, id: PostId) -> RepositoryResult<bool> {
        let deleted = diesel::delete(posts::table.find(id.value())).execute(self)?;
        Ok(deleted > 0)
    }
}

#[async_trait]
impl PostRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn find_by_id(&self, id: PostId) -> RepositoryResult<Option<Post>> {
        self.with_conn("find_by_id", move |conn| PostStore::find_by_id(conn, id))
            .await
    }

    async fn find_all(&self, request: PageRequest) -> RepositoryResult<Page<Post>> {
        // Count and slice must observe the same snapshot.
        self.with_conn("find_all", move |conn| {
            conn.build_transaction()
                .read_only()
                .repeatable_read()
                .run(|tx| PostStore::find_all(tx, request))
        })
        .await
    }

    async fn in_transaction(&self, work: UnitOfWork) -> RepositoryResult<Post> {
        self.with_conn("in_transaction", move |conn| {
            conn.transaction::<Post, RepositoryError, _>(|tx| work(tx))
        })
        .await
    }
}

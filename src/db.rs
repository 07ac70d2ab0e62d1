//! Connection pool plumbing for the SQLite store.
//!
//! The pool is built once at process start and handed to repositories
//! explicitly; there is no implicit module-level connection state.

use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;

/// Shared r2d2 connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// A single pooled connection.
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Builds a connection pool for the given SQLite database path.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder().build(manager)
}

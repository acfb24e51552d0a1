//! Database drivers. The runner hands a driver one statement at a time, in order, and stops at
//! the first failure.

pub mod cassandra;
pub mod dryrun;
pub mod placeholders;
pub mod postgres;

pub use cassandra::Cassandra;
pub use dryrun::DryRun;
pub use placeholders::Params;
pub use postgres::Postgres;

use async_trait::async_trait;

use crate::error::Result;

/// A database backend that scripts are executed against.
#[async_trait]
pub trait Driver: Send {
    /// Connects to the server, using the administrative credentials.
    async fn connect(&mut self) -> Result<()>;

    /// Closes the connection, if any.
    async fn disconnect(&mut self);

    /// Executes a single statement.
    async fn exec(&mut self, sql: &str) -> Result<()>;

    /// Creates (or recreates) the target database and leaves the driver connected to it.
    async fn create_database(&mut self, params: &Params) -> Result<()>;
}

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use scylla::statement::Consistency;
use scylla::{ExecutionProfile, Session, SessionBuilder};

use super::{Driver, Params};
use crate::error::{Error, Result};

/// The default CQL native protocol port.
pub const DEFAULT_PORT: u16 = 9042;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(60);

/// A Cassandra driver. The target database is a keyspace, and statements run at quorum
/// consistency.
pub struct Cassandra {
    node: String,
    session: Option<Session>,
}

impl Cassandra {
    /// Creates a new, unconnected driver.
    pub fn new(host: String, port: u16) -> Self {
        Self { node: format!("{}:{}", host, port), session: None }
    }

    fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or_else(|| Error::Database("Not connected to cassandra".into()))
    }
}

#[async_trait]
impl Driver for Cassandra {
    async fn connect(&mut self) -> Result<()> {
        debug!("Connecting to cassandra at {}", self.node);
        let profile = ExecutionProfile::builder().consistency(Consistency::Quorum).build();
        let session = SessionBuilder::new()
            .known_node(&self.node)
            .connection_timeout(CONNECT_TIMEOUT)
            .default_execution_profile_handle(profile.into_handle())
            .build()
            .await
            .map_err(|err| Error::Database(format!("Failed to connect to {}: {}", self.node, err)))?;
        self.session = Some(session);
        Ok(())
    }

    async fn disconnect(&mut self) {
        self.session = None;
    }

    async fn exec(&mut self, cql: &str) -> Result<()> {
        self.session()?.query(cql, ()).await.map_err(|err| Error::Database(err.to_string()))?;
        Ok(())
    }

    async fn create_database(&mut self, params: &Params) -> Result<()> {
        self.exec(&params.substitute("DROP KEYSPACE IF EXISTS ${DB_NAME}")).await?;
        self.exec(&params.substitute(
            "CREATE KEYSPACE ${DB_NAME} WITH REPLICATION = { 'class': 'SimpleStrategy','replication_factor': 1} AND DURABLE_WRITES =  true",
        ))
        .await
    }
}

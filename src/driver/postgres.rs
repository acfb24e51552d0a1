use async_trait::async_trait;
use log::{debug, info, warn};
use tokio_postgres::config::SslMode;
use tokio_postgres::{Client, NoTls};

use super::{Driver, Params};
use crate::error::{Error, Result};

/// The default PostgreSQL port.
pub const DEFAULT_PORT: u16 = 5432;
/// The default administrative user.
pub const DEFAULT_ADMIN_USER: &str = "postgres";

/// A PostgreSQL driver. It connects as an administrative user to create the target database and
/// its owner role, then reconnects to the new database to run scripts.
pub struct Postgres {
    host: String,
    port: u16,
    admin_user: String,
    admin_password: Option<String>,
    admin_db: Option<String>,
    client: Option<Client>,
}

impl Postgres {
    /// Creates a new, unconnected driver.
    pub fn new(
        host: String,
        port: u16,
        admin_user: Option<String>,
        admin_password: Option<String>,
        admin_db: Option<String>,
    ) -> Self {
        Self {
            host,
            port,
            admin_user: admin_user.unwrap_or_else(|| DEFAULT_ADMIN_USER.to_string()),
            admin_password,
            admin_db,
            client: None,
        }
    }

    /// Connects to the given database, or the admin user's default database if none.
    async fn connect_to(&mut self, dbname: Option<&str>) -> Result<()> {
        let mut config = tokio_postgres::Config::new();
        config.host(&self.host).port(self.port).user(&self.admin_user).ssl_mode(SslMode::Disable);
        if let Some(dbname) = dbname {
            config.dbname(dbname);
        }
        if let Some(password) = &self.admin_password {
            config.password(password);
        }

        debug!("Connecting to postgres at {}:{} as {}", self.host, self.port, self.admin_user);
        let (client, connection) = config.connect(NoTls).await?;
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                warn!("Postgres connection failed: {}", err);
            }
        });
        self.client = Some(client);
        Ok(())
    }

    fn client(&self) -> Result<&Client> {
        self.client.as_ref().ok_or_else(|| Error::Database("Not connected to postgres".into()))
    }

    async fn role_exists(&self, role: &str) -> Result<bool> {
        let row = self.client()?.query_opt("SELECT 1 FROM pg_roles WHERE rolname = $1", &[&role]).await?;
        Ok(row.is_some())
    }
}

#[async_trait]
impl Driver for Postgres {
    async fn connect(&mut self) -> Result<()> {
        let admin_db = self.admin_db.clone();
        self.connect_to(admin_db.as_deref()).await
    }

    async fn disconnect(&mut self) {
        self.client = None;
    }

    async fn exec(&mut self, sql: &str) -> Result<()> {
        Ok(self.client()?.batch_execute(sql).await?)
    }

    async fn create_database(&mut self, params: &Params) -> Result<()> {
        if !params.user.is_empty() && !self.role_exists(&params.user).await? {
            info!("Creating role {}", params.user);
            self.exec(&params.substitute("CREATE USER ${DB_USER} WITH ENCRYPTED PASSWORD '${DB_PASS}'"))
                .await?;
        }
        self.exec(&params.substitute("DROP DATABASE IF EXISTS ${DB_NAME}")).await?;
        self.exec(&params.substitute(
            "CREATE DATABASE ${DB_NAME} ENCODING = \"UTF8\" CONNECTION LIMIT = -1",
        ))
        .await?;
        if !params.user.is_empty() {
            self.exec(&params.substitute("GRANT CONNECT, TEMP on database ${DB_NAME} to ${DB_USER}"))
                .await?;
        }

        self.disconnect().await;
        self.connect_to(Some(&params.name)).await
    }
}

use clap::Parser;
use serde_derive::Deserialize;

use crate::driver::{cassandra, postgres, Cassandra, Driver, DryRun, Params, Postgres};
use crate::error::{Error, Result};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "dbinit")]
#[command(about = "Creates a database and runs the SQL scripts of a folder against it")]
pub struct Args {
    /// Database backend
    #[arg(value_parser = ["postgres", "cassandra", "dryrun"])]
    pub backend: String,

    /// Server address, as host or host:port
    pub host: String,

    /// Name of the database (or keyspace) to create
    pub db_name: String,

    /// Folder holding the scripts, or a changelog manifest
    pub scripts: String,

    /// Owner of the new database, also substituted for ${DB_USER}
    #[arg(requires = "db_pass")]
    pub db_user: Option<String>,

    /// Password of the owner, also substituted for ${DB_PASS}
    pub db_pass: Option<String>,

    /// Administrative user to connect as (postgres only)
    #[arg(long, value_name = "USER")]
    pub admin_user: Option<String>,

    /// Password of the administrative user (postgres only)
    #[arg(long, value_name = "PASSWORD")]
    pub admin_password: Option<String>,

    /// Database to connect to before creating the target one (postgres only)
    #[arg(long, value_name = "DB")]
    pub admin_db: Option<String>,

    /// Log filter, e.g. info or dbinit=debug
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}

/// The database backend to run scripts against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Postgres,
    Cassandra,
    DryRun,
}

/// Runtime settings. Built from defaults, then `DBINIT_*` environment variables, then
/// command-line arguments.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub backend: Backend,
    pub host: String,
    pub db_name: String,
    pub db_user: String,
    pub db_pass: String,
    pub scripts: String,
    pub admin_user: Option<String>,
    pub admin_password: Option<String>,
    pub admin_db: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn new(args: Args) -> Result<Self> {
        let c = config::Config::builder()
            .set_default("host", "localhost")?
            .set_default("db_user", "")?
            .set_default("db_pass", "")?
            .set_default("log_level", "info")?

            .add_source(config::Environment::with_prefix("DBINIT"))

            .set_override("backend", args.backend)?
            .set_override("host", args.host)?
            .set_override("db_name", args.db_name)?
            .set_override("scripts", args.scripts)?
            .set_override_option("db_user", args.db_user)?
            .set_override_option("db_pass", args.db_pass)?
            .set_override_option("admin_user", args.admin_user)?
            .set_override_option("admin_password", args.admin_password)?
            .set_override_option("admin_db", args.admin_db)?
            .set_override_option("log_level", args.log_level)?;

        Ok(c.build()?.try_deserialize()?)
    }

    /// Returns the target database settings.
    pub fn params(&self) -> Params {
        Params::new(&self.db_name, &self.db_user, &self.db_pass)
    }

    /// Builds the configured driver.
    pub fn driver(&self) -> Result<Box<dyn Driver>> {
        Ok(match self.backend {
            Backend::Postgres => {
                let (host, port) = parse_host_port(&self.host, postgres::DEFAULT_PORT)?;
                Box::new(Postgres::new(
                    host,
                    port,
                    self.admin_user.clone(),
                    self.admin_password.clone(),
                    self.admin_db.clone(),
                ))
            }
            Backend::Cassandra => {
                let (host, port) = parse_host_port(&self.host, cassandra::DEFAULT_PORT)?;
                Box::new(Cassandra::new(host, port))
            }
            Backend::DryRun => Box::new(DryRun::new()),
        })
    }
}

/// Splits a host[:port] address, using the default port if none is given.
pub fn parse_host_port(host_port: &str, default_port: u16) -> Result<(String, u16)> {
    let parts: Vec<&str> = host_port.split(':').collect();
    match parts.as_slice() {
        [host] => Ok((host.to_string(), default_port)),
        [host, port] => Ok((host.to_string(), parse_port(port)?)),
        _ => Err(Error::Config(format!("Invalid host name {}", host_port))),
    }
}

fn parse_port(port: &str) -> Result<u16> {
    let port: i64 = port.parse().map_err(|err| Error::Config(format!("Invalid port {}: {}", port, err)))?;
    if port <= 0 || port > u16::MAX as i64 {
        return Err(Error::Config(format!("Port value {} is out of range", port)));
    }
    Ok(port as u16)
}

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::info;

use super::{Driver, Params};
use crate::error::Result;

/// A driver that runs nothing. It records executed statements instead, and can be cloned to
/// inspect them after handing it to a runner.
#[derive(Clone, Debug, Default)]
pub struct DryRun {
    executed: Arc<Mutex<Vec<String>>>,
}

impl DryRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the statements executed so far, in order.
    pub fn executed(&self) -> Result<Vec<String>> {
        Ok(self.executed.lock()?.clone())
    }
}

#[async_trait]
impl Driver for DryRun {
    async fn connect(&mut self) -> Result<()> {
        info!("Dry run, not connecting to any database");
        Ok(())
    }

    async fn disconnect(&mut self) {}

    async fn exec(&mut self, sql: &str) -> Result<()> {
        self.executed.lock()?.push(sql.to_string());
        Ok(())
    }

    async fn create_database(&mut self, _params: &Params) -> Result<()> {
        Ok(())
    }
}

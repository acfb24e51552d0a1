use std::path::PathBuf;

use log::info;

use crate::driver::{Driver, Params};
use crate::error::Result;
use crate::script::{extract_file, resolve};

/// Creates the target database and runs every resolved script against it, statement by
/// statement. The first error aborts the run; nothing already executed is rolled back.
pub struct Runner {
    driver: Box<dyn Driver>,
    params: Params,
    scripts: PathBuf,
}

impl Runner {
    /// Creates a new runner for the given driver, database settings and scripts folder.
    pub fn new(driver: Box<dyn Driver>, params: Params, scripts: impl Into<PathBuf>) -> Self {
        Self { driver, params, scripts: scripts.into() }
    }

    /// Runs the initialization, returning the number of statements executed. The driver is
    /// disconnected on every path once connected.
    pub async fn run(&mut self) -> Result<usize> {
        self.driver.connect().await?;
        let result = self.initialize().await;
        self.driver.disconnect().await;
        result
    }

    async fn initialize(&mut self) -> Result<usize> {
        self.driver.create_database(&self.params).await?;

        let files = resolve(&self.scripts)?;
        info!("Found {} scripts in {}", files.len(), self.scripts.display());

        let mut executed = 0;
        for file in files {
            info!("Executing statements from {}...", file.display());
            for statement in extract_file(&file)? {
                self.driver.exec(&self.params.substitute(&statement)).await?;
                executed += 1;
            }
        }
        Ok(executed)
    }
}

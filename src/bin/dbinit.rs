use clap::Parser;
use dbinit::config::{Args, Config};
use dbinit::error::Result;
use dbinit::Runner;
use log::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new(Args::parse())?;
    env_logger::Builder::new().parse_filters(&config.log_level).init();

    info!("Using {:?} driver...", config.backend);
    let mut runner = Runner::new(config.driver()?, config.params(), &config.scripts);
    match runner.run().await {
        Ok(executed) => {
            info!("Executed {} statements into {}", executed, config.db_name);
            Ok(())
        }
        Err(err) => {
            error!("{}", err);
            Err(err)
        }
    }
}

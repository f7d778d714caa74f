use contextual_logger::settings::*;
use contextual_logger::{LOGGER, LogConfig, log_debug, log_info};
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    LOGGER.dict_config(LogConfig::default())?;

    let project_settings = parse_settings(cli.settings.as_deref())?;
    LOGGER.dict_config(project_settings.log.clone())?;
    log_debug!("{project_settings:?}");

    if !(cli.listen || project_settings.listener.enabled) {
        log_info!("logging configured, no config listener requested");
        return Ok(());
    }

    let listener = LOGGER.listen(project_settings.listener.port, None).await?;
    log_info!("accepting logging configuration on {}", listener.local_addr());

    signal::ctrl_c().await?;
    LOGGER.stop_listening();
    listener.join().await;
    log_info!("config listener stopped");

    Ok(())
}

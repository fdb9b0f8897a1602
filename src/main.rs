use still_life::{config::AppConfig, StillLifeApp};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    log::info!("Loading textures from {}", config.asset_dir.display());

    StillLifeApp::new(config)?.run()
}

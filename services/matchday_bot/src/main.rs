mod clients;
mod config;
mod run;
mod state_store;

use anyhow::Result;
use clients::football_data::FootballDataClient;
use clients::twitter::TwitterClient;
use config::Config;
use dotenv::dotenv;
use log::info;
use match_core::MessageFormatter;
use state_store::FileStateStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    info!(
        "Matchday bot starting (team {}, state file {})",
        config.team_id,
        config.state_file.display()
    );

    let source = FootballDataClient::new(
        config.football_api_base_url.clone(),
        config.football_api_key.clone(),
        config.team_id,
    );
    let publisher = TwitterClient::new(
        config.twitter_api_base_url.clone(),
        config.twitter_credentials.clone(),
    );
    let store = FileStateStore::new(config.state_file.clone());
    let formatter = MessageFormatter::new(config.post_hashtags.clone());

    run::run_once(&source, &publisher, &store, &formatter, config.team_id).await?;

    info!("Run complete");
    Ok(())
}

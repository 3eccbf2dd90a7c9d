use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use std::fs;

mod app;
mod import;
mod models;
mod report;
mod storage;
mod store;
mod ui;
mod view;

/// Suivi local de la disponibilité en carburant des stations-service.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opt {
    /// Logging level
    #[clap(long, default_value = "error")]
    level: LevelFilter,

    /// Log file path (for debugging)
    #[clap(long, default_value = ".carbu.log")]
    log_file: String,

    /// SQLite database path
    #[clap(long, default_value = "carbu.db")]
    db_path: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();

    let log_file = fs::File::create(&opt.log_file).context("can't open log file")?;

    simplelog::WriteLogger::init(opt.level, simplelog::Config::default(), log_file)
        .context("init logger")?;

    let storage = storage::Sqlite::new(&opt.db_path).await?;
    let store = store::Store::new(storage);
    let app = app::App::new(store).await?;

    ui::Ui::new(app).start().await
}

//! Binary entry point: set up logging, open the song store (importing the
//! corpus on first run) and drive the Ratatui event loop until the user exits.
use anyhow::Context;
use tarnim::{run_app, App, Catalog, Config};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_env().context("failed to resolve configuration")?;
    config
        .ensure_data_dir()
        .context("failed to create data directory")?;
    let catalog = Catalog::open(&config.db_path).context("failed to open song database")?;

    let mut app = App::new(catalog, config.corpus_path);
    app.import_if_empty();
    run_app(&mut app)
}

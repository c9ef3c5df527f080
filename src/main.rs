use color_eyre::eyre::Result;
use log::LevelFilter;
use postnuc::{App, LineConsole, Settings, logging, settings};

fn main() -> Result<()> {
    color_eyre::install()?;

    // Logger first, so a settings fallback is recorded.
    if let Err(e) = logging::init(&settings::data_dir(), LevelFilter::Info) {
        eprintln!("Logging disabled: {e}");
    }
    let settings = Settings::load();
    log::set_max_level(settings.log_level());
    log::info!("Postnuc start: {}", chrono::Local::now());
    log::debug!("Settings: {settings:#?}");

    let console = LineConsole::stdio(settings.color_output);
    let mut app = App::new(console, settings, Settings::default_path());
    app.run()?;

    Ok(())
}

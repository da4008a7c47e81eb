use musicpad::{Settings, tty, ui};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env();

    if std::env::args().skip(1).any(|arg| arg == "--tty") {
        tty::run(&settings)?;
    } else {
        ui::run(settings)?;
    }

    Ok(())
}

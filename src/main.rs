use anyhow::Context;
use bindery_app::cli::Cli;
use bindery_app::modules::books::BookService;
use bindery_kernel::Settings;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load BINDERY settings")?;

    tracing::debug!(
        env = ?settings.environment,
        store = %settings.store.path,
        "bindery starting"
    );

    let mut service = BookService::open(&settings)?;
    bindery_app::cli::run(cli, &mut service, &settings)
}

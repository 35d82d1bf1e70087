use clap::Parser;
use rushlight::build::build_site;
use rushlight::config::Config;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(clap::Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Directory the generated site is written into
    outputdir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_directory(&std::env::current_dir()?)?;
    build_site(&config, &args.outputdir)?;
    Ok(())
}

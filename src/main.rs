use anyhow::Result;
use clap::Parser;
use fractide_core::{init_logging, AppConfig};
use fractide_lib::app::App;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the automaton in
    #[arg(short, long, value_enum, default_value = "sweep")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// RNG seed override for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Skip posting even when the config enables it
    #[arg(long)]
    no_post: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    /// One run at the configured density
    Once,
    /// Sweep the density upward until a run is kept
    Sweep,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.no_post {
        config.post.enabled = false;
    }

    let mut app = App::new(config)?;
    let report = match args.mode {
        Mode::Once => app.run_once().await?,
        Mode::Sweep => app.run_sweep().await?,
    };

    if report.kept {
        println!("Kept run {} ({} frames): {}", report.id, report.frames, report.caption);
    } else {
        println!(
            "No interesting run found (last: {} frames, outcome {:?})",
            report.frames, report.outcome
        );
    }
    Ok(())
}

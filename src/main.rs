use std::io::{self, Write as _};

use automaze::{
    app::{self, AppError, MazeRequest, Overrides},
    logging, render,
    settings::Settings,
};

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "automaze")]
struct Args {
    #[clap(short, long, help = "Number of rows")]
    rows: Option<u16>,
    #[clap(short, long, help = "Number of columns")]
    cols: Option<u16>,
    #[clap(short, long, help = "Branch probability in percent (0-100)")]
    branch: Option<u8>,
    #[clap(short, long, help = "Turn probability in percent (0-100)")]
    turn: Option<u8>,
    #[clap(short, long, help = "Seed for reproducible mazes")]
    seed: Option<u64>,
    #[clap(short, long, help = "Name of a preset from the settings file")]
    preset: Option<String>,
    #[clap(long, help = "Use this settings file instead of the default one")]
    config: Option<std::path::PathBuf>,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Print generation statistics")]
    stats: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "More logging, repeat for even more")]
    verbose: u8,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    logging::init(logging::level_for_verbosity(args.verbose));

    let settings_path = match args.config.clone() {
        Some(path) => path,
        None => Settings::default_path()?,
    };

    if args.show_config_path {
        println!("{}", settings_path.display());
        return Ok(());
    }

    if args.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(());
    }

    better_panic::install();

    let settings = Settings::load(&settings_path)?;
    let overrides = Overrides {
        rows: args.rows,
        cols: args.cols,
        branch: args.branch,
        turn: args.turn,
        seed: args.seed,
        preset: args.preset,
    };
    let request = MazeRequest::resolve(&settings, &overrides)?;

    let generated = app::generate(request, app::report_progress)?;

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", render::render_text(&generated.grid))?;
    if args.stats {
        let stats = generated.stats;
        writeln!(stdout, "seed: {}", request.seed)?;
        writeln!(stdout, "generations: {}", stats.generations)?;
        writeln!(stdout, "reseeds: {} ({} forced)", stats.reseeds, stats.forced_reseeds)?;
        writeln!(stdout, "lapsed invites: {}", stats.lapsed_invites)?;
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use snapdate::{config, game, output};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "snapdate")]
#[command(about = "Read photo capture dates and build a date-guessing game")]
#[command(long_about = "\
Read photo capture dates and build a date-guessing game

The capture date comes from the EXIF DateTimeOriginal tag of each JPEG.
Images without one can be dated by hand in an answers file.

Typical workflow:

  photos/
  ├── config.toml              # Game settings (optional)
  ├── 01_farfar.jpg
  └── 02_mormor.png

  snapdate import --images photos
      → staging/game/answers.template.json   (fill in, save as answers.json)
  snapdate build --images photos --answers answers.json
      → public/data/game/data.json + images/

Date resolution (first available wins):
  EXIF DateTimeOriginal → answers file correct_date

Run 'snapdate gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Flags shared by the commands that read an images folder.
#[derive(clap::Args, Clone)]
struct ImagesArgs {
    /// Folder containing the game images (and an optional config.toml)
    #[arg(long)]
    images: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Print the capture date of each file
    Date {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Copy images and write an answers template to fill in
    Import {
        #[command(flatten)]
        source: ImagesArgs,
        /// Output directory
        #[arg(long, default_value = "staging/game")]
        out: PathBuf,
    },
    /// Copy images and write the game's data.json
    Build {
        #[command(flatten)]
        source: ImagesArgs,
        /// Output directory
        #[arg(long, default_value = "public/data/game")]
        out: PathBuf,
        /// Game identifier (overrides config)
        #[arg(long)]
        name: Option<String>,
        /// Title shown to players (overrides config)
        #[arg(long)]
        screen_name: Option<String>,
        /// Session password (overrides config)
        #[arg(long)]
        password: Option<String>,
        /// Answers file with hand-curated dates, questions and descriptions
        #[arg(long)]
        answers: Option<PathBuf>,
        /// Show what would be built without copying or writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Command::Date { files } => {
            init_thread_pool(&config::ProcessingConfig::default());
            let dates = game::read_dates(&files);
            let results: Vec<(PathBuf, Option<String>)> = files.into_iter().zip(dates).collect();
            output::print_dates(&results);
        }
        Command::Import { source, out } => {
            let game_config = load_game_config(&source.images)?;
            init_thread_pool(&game_config.processing);
            println!("==> Importing {}", source.images.display());
            let report = game::import(&source.images, &out, &game_config)?;
            output::print_import_output(&report);
        }
        Command::Build {
            source,
            out,
            name,
            screen_name,
            password,
            answers,
            dry_run,
        } => {
            let mut game_config = load_game_config(&source.images)?;
            if let Some(name) = name {
                game_config.game.name = name;
            }
            if let Some(screen_name) = screen_name {
                game_config.game.screen_name = screen_name;
            }
            if let Some(password) = password {
                game_config.game.session_password = password;
            }
            game_config.validate()?;
            init_thread_pool(&game_config.processing);

            println!("==> Building {} → {}", source.images.display(), out.display());
            let options = game::BuildOptions { answers, dry_run };
            let report = game::build(&source.images, &out, &options, &game_config)?;
            output::print_build_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `config.toml` from the images folder, or stock defaults when the
/// folder has none.
fn load_game_config(images_dir: &Path) -> Result<config::GameConfig, config::ConfigError> {
    let game_config = config::load_config(images_dir)?;
    log::debug!("Resolved config: {game_config:?}");
    Ok(game_config)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shimmer_cli::CliContext;
use shimmer_cli::commands;
use shimmer_cli::logging;
use shimmer_cli::readline;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    logging::init();
    let mut ctx = CliContext::new().map_err(|e| e.to_string())?;

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "shimmer text playground")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the view text (`\n` breaks lines)
    Text {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// Resize the view
    Size {
        #[arg(short, long)]
        width: u32,
        #[arg(short = 'H', long)]
        height: u32,
    },
    FontSize {
        size: f32,
    },
    /// e.g. `center`, `top-left`, `bottom end`
    Gravity {
        #[arg(num_args = 1..)]
        gravity: Vec<String>,
    },
    Direction {
        direction: String,
    },
    Easing {
        easing: String,
    },
    Start {
        /// Sweep period in milliseconds
        #[arg(short, long)]
        period: Option<u64>,
    },
    Stop,
    TraceColor {
        color: String,
    },
    ShimmerColor {
        color: String,
    },
    Render {
        #[arg(short, long)]
        out: PathBuf,
    },
    Play {
        #[arg(short, long, default_value_t = 60)]
        frames: u32,
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
        fps: u32,
        #[arg(short, long)]
        out_dir: PathBuf,
    },
    Status,
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    Exit,
}

#[derive(Subcommand)]
enum ConfigAction {
    Save,
}

async fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "shimmer".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Text { words }) => commands::set_text(ctx, &words),
        Some(Commands::Size { width, height }) => commands::set_size(ctx, width, height)?,
        Some(Commands::FontSize { size }) => commands::set_font_size(ctx, size)?,
        Some(Commands::Gravity { gravity }) => commands::set_gravity(ctx, &gravity.join(" "))?,
        Some(Commands::Direction { direction }) => commands::set_direction(ctx, &direction)?,
        Some(Commands::Easing { easing }) => commands::set_easing(ctx, &easing)?,
        Some(Commands::Start { period }) => commands::start(ctx, period)?,
        Some(Commands::Stop) => commands::stop(ctx),
        Some(Commands::TraceColor { color }) => commands::set_trace_color(ctx, &color)?,
        Some(Commands::ShimmerColor { color }) => commands::set_shimmer_color(ctx, &color)?,
        Some(Commands::Render { out }) => commands::render(ctx, &out)?,
        Some(Commands::Play {
            frames,
            fps,
            out_dir,
        }) => commands::play(ctx, frames, fps, &out_dir).await?,
        Some(Commands::Status) => commands::show_status(ctx),
        Some(Commands::Config { action: None }) => commands::show_config(ctx),
        Some(Commands::Config {
            action: Some(ConfigAction::Save),
        }) => commands::save_config(ctx)?,
        Some(Commands::Exit) => {
            println!("quitting...");
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

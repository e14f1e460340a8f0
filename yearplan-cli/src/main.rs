mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use yearplan_core::{FileStorage, Planner, PlannerConfig};

#[derive(Parser)]
#[command(name = "yearplan")]
#[command(about = "Paint, annotate and export a layered plan of your year")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List layers
    Layers,
    /// Add, remove, rename, hide or activate a layer
    Layer {
        #[command(subcommand)]
        action: LayerAction,
    },
    /// Paint days on the active layer
    Paint {
        /// First day (YYYY-MM-DD or "today")
        from: String,

        /// Last day, inclusive
        to: Option<String>,

        /// Switch to this color or texture before painting
        #[arg(short, long)]
        with: Option<String>,
    },
    /// Remove paint from days on the active layer, keeping notes
    Erase { from: String, to: Option<String> },
    /// Set or clear the note on a day
    Note {
        day: String,

        /// Note text; leave empty to clear
        text: Vec<String>,

        /// overflow-x, overflow-y or no-overflow
        #[arg(long)]
        overflow: Option<String>,
    },
    /// Choose the paint (a color also recolors the active layer)
    Select { code: String },
    /// Show or set the selected year
    Year { year: Option<i32> },
    /// Show or set the calendar view
    View { view: Option<String> },
    /// List colors and textures, or override a color
    Color {
        code: Option<String>,

        /// CSS color value, e.g. "#3366ff"
        value: Option<String>,
    },
    /// Print the selected year month by month
    Show {
        /// Only this month (1-12)
        #[arg(short, long)]
        month: Option<u32>,
    },
    /// Explain how a single day renders
    Day { day: String },
    /// Export a JSON snapshot
    Export {
        /// Directory to write into (defaults to the current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Replace all data with an exported JSON snapshot
    Import { path: PathBuf },
    /// Delete all stored data
    Clean {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Show configuration and paths
    Config,
}

#[derive(Subcommand)]
enum LayerAction {
    /// Add a layer and make it active
    Add {
        name: String,

        /// Layer color (defaults to the next unused one)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Remove a layer and everything painted on it
    Rm { layer: String },
    Rename { layer: String, name: String },
    /// Show or hide a layer
    Toggle { layer: String },
    /// Make a layer active
    Use { layer: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PlannerConfig::load()?;

    let log_level = config.log_level().unwrap_or_else(|e| {
        eprintln!("{}", format!("{e}, using warn").yellow());
        Level::WARN
    });

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut planner = Planner::open(FileStorage::new(config.data_path()));

    match cli.command {
        Commands::Layers => commands::layers::run(&planner),
        Commands::Layer { action } => match action {
            LayerAction::Add { name, color } => {
                commands::layer::add(&mut planner, &name, color.as_deref())
            }
            LayerAction::Rm { layer } => commands::layer::remove(&mut planner, &layer),
            LayerAction::Rename { layer, name } => {
                commands::layer::rename(&mut planner, &layer, &name)
            }
            LayerAction::Toggle { layer } => commands::layer::toggle(&mut planner, &layer),
            LayerAction::Use { layer } => commands::layer::activate(&mut planner, &layer),
        },
        Commands::Paint { from, to, with } => {
            commands::paint::paint(&mut planner, &from, to.as_deref(), with.as_deref())
        }
        Commands::Erase { from, to } => commands::paint::erase(&mut planner, &from, to.as_deref()),
        Commands::Note { day, text, overflow } => {
            commands::paint::note(&mut planner, &day, &text, overflow.as_deref())
        }
        Commands::Select { code } => commands::select::paint(&mut planner, &code),
        Commands::Year { year } => commands::select::year(&mut planner, year),
        Commands::View { view } => commands::select::view(&mut planner, view.as_deref()),
        Commands::Color { code, value } => {
            commands::select::color(&mut planner, code.as_deref(), value.as_deref())
        }
        Commands::Show { month } => commands::show::run(&planner, month),
        Commands::Day { day } => commands::day::run(&planner, &day),
        Commands::Export { dir } => commands::export::run(&planner, dir.as_deref()).map(|_| ()),
        Commands::Import { path } => commands::import::run(&mut planner, &path).await,
        Commands::Clean { force } => commands::clean::run(&mut planner, force),
        Commands::Config => commands::config::run(&config),
    }
}

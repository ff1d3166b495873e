//! masonry-grid driver - lays out an item file for a given geometry.

use clap::Parser;
use masonry_grid::geometry::{ContainerData, ElementBox, Size};
use masonry_grid::integration::recompute;
use masonry_grid::config::ResolvedConfig;
use masonry_grid::loading::{should_fetch, trigger_threshold, LoadingState};
use masonry_grid::model::{AppError, Item};
use std::path::PathBuf;
use tracing::info;

/// Masonry grid layout driver
#[derive(Parser, Debug)]
#[command(name = "mgrid")]
#[command(version)]
#[command(about = "Compute a virtualized masonry-grid layout for a JSON item list")]
pub struct Args {
    /// Path to a JSON array of items
    pub items: PathBuf,

    /// Container width in px (the grid element fills it)
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Container height in px
    #[arg(long, default_value_t = 800.0)]
    pub height: f64,

    /// Vertical scroll offset in px
    #[arg(short, long, default_value_t = 0.0)]
    pub scroll: f64,

    /// Distance from the scroll origin to the grid element in px
    #[arg(long, default_value_t = 0.0)]
    pub element_offset: f64,

    /// Fetch trigger margin in px
    #[arg(long)]
    pub trigger_margin: Option<f64>,

    /// Fixed column count (overrides the width-based formula)
    #[arg(short, long, value_parser = clap::value_parser!(usize))]
    pub columns: Option<usize>,

    /// Print the render plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Resolve configuration, install logging and read the item file.
fn prepare(args: &Args) -> Result<(ResolvedConfig, Vec<Item>), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = masonry_grid::config::load_config_with_precedence(args.config.clone())?;
        let merged = masonry_grid::config::merge_config(config_file);
        let with_env = masonry_grid::config::apply_env_overrides(merged);
        masonry_grid::config::apply_cli_overrides(with_env, args.trigger_margin, args.columns)
    };

    masonry_grid::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let items = masonry_grid::source::load_items(&args.items)?;
    Ok((config, items))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let (config, items) = prepare(&args)?;
    let derivers = config.derivers();

    let container = Size::new(args.width, args.height);
    let sample = |element_height: f64| {
        ContainerData::new(
            container,
            args.scroll,
            ElementBox::new(args.element_offset, Size::new(args.width, element_height)),
        )
    };

    // The element's rendered height is the laid-out content height.
    let first = recompute(Some(items.as_slice()), Some(&sample(0.0)), &derivers);
    let geometry = sample(first.layout.total_height);
    let frame = recompute(Some(items.as_slice()), Some(&geometry), &derivers);

    let threshold = trigger_threshold(&geometry, config.update_trigger_margin);
    let fetch_triggered =
        should_fetch(&LoadingState::default(), &geometry, config.update_trigger_margin).is_ok();

    if args.json {
        let output = serde_json::json!({
            "columnCount": frame.config.column_count,
            "gap": frame.config.gap,
            "windowMargin": frame.config.window_margin,
            "plan": frame.plan,
            "fetchTriggered": fetch_triggered,
            "loadingIndicator": config.show_loading_indicator && fetch_triggered,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "columns={} gap={} window_margin={} rows={}",
            frame.config.column_count,
            frame.config.gap,
            frame.config.window_margin,
            frame.layout.row_count()
        );
        print!("{}", frame.plan);
        match threshold {
            Some(threshold) => println!(
                "fetch {} (visible bottom {} vs threshold {})",
                if fetch_triggered { "triggered" } else { "idle" },
                geometry.visible_bottom(),
                threshold
            ),
            None => println!("fetch idle (no element)"),
        }
    }

    Ok(())
}

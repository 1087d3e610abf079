//! tessel: count the garden plots reachable in exactly N steps on an
//! infinitely repeating map.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use tessel_core::Garden;
use tessel_paths::replay_count;
use tessel_reach::render::{render_edges, render_tile_set, render_window};
use tessel_reach::{Method, Options, Survey, count_bounded, growth_series, walk};

/// Replaying the walk gets slow quickly; refuse beyond this.
const MAX_VERIFY_STEPS: u64 = 2_000;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the plots reachable in exactly STEPS steps
    Solve {
        /// Garden map: `.` plot, `#` rock, `S` start
        file: PathBuf,

        #[arg(short = 'n', long, default_value_t = 26_501_365)]
        steps: u64,

        /// Tile rings searched around the base tile at first
        #[arg(long, default_value_t = Options::default().initial_extra)]
        initial_extra: u32,

        /// Largest number of tile rings to try
        #[arg(long, default_value_t = Options::default().max_extra)]
        max_extra: u32,

        /// Treat the map as a single walled tile instead of repeating it
        #[arg(long)]
        bounded: bool,

        /// Cross-check the answer by replaying the walk step by step
        #[arg(long)]
        verify: bool,

        /// Print intermediate views of the search
        #[arg(long, value_enum)]
        show: Vec<Show>,

        /// Print how long the count took
        #[arg(short, long)]
        timings: bool,
    },
    /// Print plot and rock statistics of the map
    Census {
        file: PathBuf,
    },
    /// Print counts for a run of step budgets and their differences
    Series {
        file: PathBuf,

        #[arg(long, default_value_t = 0)]
        from: u64,

        #[arg(long)]
        to: u64,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Show {
    /// The searched window with the counted plots marked `O`
    Window,
    /// Distances of every tile of the window
    Tiles,
    /// Distance differences along the window's edges
    Diffs,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            steps,
            initial_extra,
            max_extra,
            bounded,
            verify,
            show,
            timings,
        } => {
            let garden = load(&file)?;
            let options = Options::new()
                .with_initial_extra(initial_extra)
                .with_max_extra(max_extra);
            let t0 = Instant::now();
            let count = if bounded {
                count_bounded(&garden, steps)?
            } else {
                let w = walk(&garden, steps, &options)?;
                report(&w.method, w.extra);
                if !show.is_empty() && w.extra > 0 {
                    print_views(&garden, w.extra, steps, &show);
                }
                w.count
            };
            if timings {
                eprintln!("Counted in {:?}", t0.elapsed());
            }
            println!("{count}");

            if verify {
                verify_count(&garden, steps, bounded, count)?;
            }
        }
        Commands::Census { file } => {
            let garden = load(&file)?;
            let c = garden.grid.census();
            println!("size        {} ({} cells)", garden.grid.size(), c.cells());
            println!("start       {}", garden.start);
            println!("plots       {}", c.plots);
            println!("rocks       {}", c.rocks);
            println!("even plots  {}", c.even_plots);
            println!("odd plots   {}", c.odd_plots);
        }
        Commands::Series { file, from, to } => {
            let garden = load(&file)?;
            let series = growth_series(&garden, from, to, &Options::default())?;
            let d1 = series.differences(1);
            let d2 = series.differences(2);
            println!("{:>10} {:>16} {:>12} {:>8}", "steps", "count", "diff", "diff2");
            for (i, (steps, count)) in series.iter().enumerate() {
                println!(
                    "{steps:>10} {count:>16} {:>12} {:>8}",
                    lagged(&d1, i, 1),
                    lagged(&d2, i, 2)
                );
            }
        }
    }
    Ok(())
}

fn load(path: &Path) -> Result<Garden, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("could not read {}: {e}", path.display()))?;
    Ok(Garden::parse(&text).map_err(tessel_reach::Error::from)?)
}

/// The `order`-th difference ending at row `row`, blank for the first rows.
fn lagged(diffs: &[i128], row: usize, order: usize) -> String {
    row.checked_sub(order)
        .and_then(|j| diffs.get(j))
        .map_or_else(String::new, |d| d.to_string())
}

fn report(method: &Method, extra: u32) {
    match method {
        Method::Stuck => log::info!("the start has no passable neighbor"),
        Method::Direct => log::info!("counted directly with extra = {extra}"),
        Method::Extrapolated(e) => {
            let diff = match e.section_diff.scalar() {
                Some(d) => d.to_string(),
                None => e.section_diff.to_string(),
            };
            log::info!(
                "extrapolated with extra = {extra}, section diff {diff}: {} full tiles, {} partial tiles",
                e.full_tiles,
                e.partial_tiles
            );
        }
    }
}

fn print_views(garden: &Garden, extra: u32, steps: u64, show: &[Show]) {
    let mut survey = Survey::new(garden, extra);
    for view in show {
        match view {
            Show::Window => {
                let field = survey.field();
                println!("{}\n", render_window(field, &garden.grid, &field.solutions(steps)));
            }
            Show::Tiles => println!("{}\n", render_tile_set(survey.tiles())),
            Show::Diffs => match survey.extrapolator().map(|_| ()) {
                Ok(()) => {
                    if let Some(c) = survey.classification() {
                        println!("{}\n", render_edges(c));
                    }
                }
                Err(e) => log::warn!("no diffs to show: {e}"),
            },
        }
    }
}

fn verify_count(garden: &Garden, steps: u64, bounded: bool, count: u64) -> Result<(), Box<dyn Error>> {
    if steps > MAX_VERIFY_STEPS {
        log::warn!("skipping verification: {steps} steps is more than {MAX_VERIFY_STEPS}");
        return Ok(());
    }
    let bounds = bounded.then(|| garden.grid.bounds());
    let expected = replay_count(&garden.grid, garden.start, steps, bounds);
    if expected != count {
        return Err(format!("verification failed: replay counts {expected}, solver {count}").into());
    }
    log::info!("verified against a step-by-step replay");
    Ok(())
}

use std::{io, path::PathBuf};

use mazing::{error::AppError, logging, settings::Settings, stats};
use mazing_core::{algorithms, Grid, Level, Random, Selection};

use clap::{Args as ClapArgs, Parser, Subcommand};
use rand::{Rng as _, SeedableRng as _};

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "mazing")]
struct Args {
    #[clap(short, long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(short, long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(short, long, help = "Read settings from this file instead")]
    config: Option<PathBuf>,
    #[clap(short, long, action, help = "Print debug messages to stderr")]
    verbose: bool,
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a maze and print it
    Generate(GenerateArgs),
    /// Print a maze stored as JSON, `-` reads stdin
    Decode {
        file: PathBuf,
        #[clap(long, action, help = "Draw the corner to corner path")]
        path: bool,
    },
    /// Set up a game level from a seed
    Level {
        #[clap(long)]
        seed: Option<u64>,
        #[clap(short, long)]
        rows: Option<usize>,
        #[clap(short, long)]
        columns: Option<usize>,
    },
    /// Compare the generators on many mazes
    Stats {
        #[clap(short = 'n', long, default_value_t = 100)]
        count: usize,
        #[clap(long, default_value_t = 0)]
        seed: u64,
        #[clap(short, long)]
        rows: Option<usize>,
        #[clap(short, long)]
        columns: Option<usize>,
    },
}

#[derive(ClapArgs, Debug, Default)]
struct GenerateArgs {
    #[clap(short, long)]
    rows: Option<usize>,
    #[clap(short, long)]
    columns: Option<usize>,
    #[clap(short, long, help = "Generator key (AB, BT, HK, RB, S, W) or random")]
    algorithm: Option<Selection>,
    #[clap(long)]
    seed: Option<u64>,
    #[clap(short, long, help = "Fraction of dead ends to remove, between 0 and 1")]
    braid: Option<f64>,
    #[clap(long, action, help = "Print the grid as JSON")]
    json: bool,
    #[clap(long, action, requires = "json")]
    pretty: bool,
    #[clap(long, action, help = "Draw the corner to corner path")]
    path: bool,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    logging::init(args.verbose)?;

    let settings_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(());
    }

    if args.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    let settings = Settings::load(&settings_path)?;

    match args.command.unwrap_or_else(|| Command::Generate(GenerateArgs::default())) {
        Command::Generate(generate) => run_generate(generate, &settings),
        Command::Decode { file, path } => {
            let encoded = if file.as_os_str() == "-" {
                io::read_to_string(io::stdin())?
            } else {
                std::fs::read_to_string(&file)?
            };

            let grid = Grid::from_json(&encoded)?;
            print_grid(&grid, path || settings.get_show_path())
        }
        Command::Level {
            seed,
            rows,
            columns,
        } => {
            let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
            let level = Level::generate(
                seed,
                rows.unwrap_or(settings.get_rows()),
                columns.unwrap_or(settings.get_columns()),
            )?;
            print_level(&level)
        }
        Command::Stats {
            count,
            seed,
            rows,
            columns,
        } => {
            let rows = rows.unwrap_or(settings.get_rows());
            let columns = columns.unwrap_or(settings.get_columns());

            println!("{} mazes of {}x{} per algorithm", count, rows, columns);
            for entry in stats::collect_all(count, seed, rows, columns)? {
                println!(
                    "{:<22} deadends {:>8.2}   path {:>8.2}",
                    entry.algorithm.name(),
                    entry.dead_ends,
                    entry.path_length
                );
            }
            Ok(())
        }
    }
}

fn run_generate(args: GenerateArgs, settings: &Settings) -> Result<(), AppError> {
    let selection = match args.algorithm {
        Some(selection) => selection,
        None => settings.get_algorithm()?,
    };
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("Generating with seed {}", seed);

    let mut rng = Random::seed_from_u64(seed);
    let mut grid = Grid::new(
        args.rows.unwrap_or(settings.get_rows()),
        args.columns.unwrap_or(settings.get_columns()),
    )?;

    algorithms::generate(&mut grid, selection, &mut rng);
    if let Some(braid) = args.braid.or(settings.get_braid()) {
        grid.braid(braid, &mut rng)?;
    }

    if args.json {
        println!("{}", grid.to_json(args.pretty)?);
        Ok(())
    } else {
        print_grid(&grid, args.path || settings.get_show_path())
    }
}

fn print_grid(grid: &Grid, show_path: bool) -> Result<(), AppError> {
    match grid.algorithm() {
        Some(algorithm) => println!("{} Maze", algorithm),
        None => println!("Maze"),
    }
    println!("Deadends: {}", grid.dead_ends().len());

    if !show_path {
        print!("{}", grid);
        return Ok(());
    }

    let start = grid.id(0, 0)?;
    let goal = grid.id(grid.rows() - 1, grid.columns() - 1)?;
    match grid.distances(start).path_to(grid, goal) {
        Some(path) => print!("{}", grid.render_distances(&path)),
        None => {
            log::warn!("Bottom right cell can not be reached");
            print!("{}", grid);
        }
    }
    Ok(())
}

fn print_level(level: &Level) -> Result<(), AppError> {
    let mut grid = level.grid().clone();
    let start = grid[level.start()].pos();
    let goal = grid[level.goal()].pos();
    grid.get_cell_mut(goal.0, goal.1)?.set_content("X");
    grid.get_cell_mut(start.0, start.1)?.set_content("@");

    if let Some(seed) = level.seed() {
        println!("Seed: {}", seed);
    }
    if let Some(algorithm) = level.algorithm() {
        println!("Level: {}", algorithm);
    }
    println!("Start: {:?}", start);
    println!("Goal: {:?}", goal);
    println!("Optimal moves: {}", level.optimal_moves());
    print!("{}", grid);
    Ok(())
}

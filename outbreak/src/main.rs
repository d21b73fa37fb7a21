mod render;
mod report;

use std::{io, path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use outbreak_core::{
    world::commons::{RuntimeParams, WorldParams},
    World,
};

#[derive(clap::Parser, Debug)]
#[command(name = "outbreak", about = "Watch an epidemic spread across a grid of agents")]
struct Args {
    /// number of agents seated on the field
    #[arg(long, default_value_t = 400)]
    population: usize,
    /// agents infected on day 1
    #[arg(long, default_value_t = 1)]
    initial_infected: usize,
    /// chance of transmission on contact, 0 to 1
    #[arg(long, default_value_t = 0.8)]
    transmission_chance: f64,
    /// chance an infected agent dies on the day it reaches --days-until-death, 0 to 1
    #[arg(long, default_value_t = 0.0)]
    death_chance: f64,
    #[arg(long, default_value_t = 14)]
    days_until_death: u32,
    /// portion of agents who never move, 0 to 1
    #[arg(long, default_value_t = 0.1)]
    isolation_level: f64,
    #[arg(long, default_value_t = 100)]
    days_to_recover: u32,
    /// sleep between frames, in milliseconds
    #[arg(long, default_value_t = 300)]
    interval_ms: u64,
    /// field width in cells, defaults to the terminal width
    #[arg(long)]
    width: Option<u16>,
    /// field height in cells, defaults to the terminal height minus the status line
    #[arg(long)]
    height: Option<u16>,
    /// run to extinction without rendering or frame delay
    #[arg(long)]
    headless: bool,
    /// write the per-day history to this CSV file at the end
    #[arg(long)]
    csv: Option<PathBuf>,
    /// print the final report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let (runtime_params, world_params) = build_params(&args);
    runtime_params.validate()?;
    world_params.validate()?;

    tracing::info!(
        "seating {} agents ({} infected) on a {}x{} field",
        world_params.init_n_pop,
        world_params.init_n_infected,
        world_params.field_width,
        world_params.field_height
    );

    let mut world = World::new(runtime_params, world_params);
    if args.headless {
        while !world.is_ended() {
            world.step();
        }
    } else {
        run_realtime(&mut world, Duration::from_millis(args.interval_ms))?;
    }

    if world.is_ended() {
        tracing::info!("epidemic extinguished on day {}", world.runtime_params.day);
    } else {
        tracing::info!("stopped early on day {}", world.runtime_params.day);
    }

    if let Some(path) = &args.csv {
        world
            .export(path)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("history written to {}", path.display());
    }

    let report = report::FinalReport::collect(&world);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print();
    }
    Ok(())
}

/// Renders each day, then sleeps while listening for a quit key before
/// advancing. A render failure aborts the run.
fn run_realtime(world: &mut World, interval: Duration) -> anyhow::Result<()> {
    let mut screen = render::Screen::new(io::stdout())?;
    loop {
        screen.draw(world)?;
        if world.is_ended() {
            break;
        }
        if screen.wait_for_quit(interval)? {
            break;
        }
        world.step();
    }
    Ok(())
}

fn build_params(args: &Args) -> (RuntimeParams, WorldParams) {
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let width = args.width.unwrap_or(cols);
    let height = args.height.unwrap_or_else(|| rows.saturating_sub(1).max(1));
    let runtime_params = RuntimeParams {
        transmission_chance: args.transmission_chance,
        death_chance: args.death_chance,
        days_until_death: args.days_until_death,
        isolation_level: args.isolation_level,
        days_to_recover: args.days_to_recover,
        day: 1,
    };
    let world_params = WorldParams {
        init_n_pop: args.population,
        init_n_infected: args.initial_infected,
        field_width: width as i32,
        field_height: height as i32,
    };
    (runtime_params, world_params)
}

use outbreak_core::{
    stat::{HealthCount, Totals},
    World,
};
use serde::Serialize;

const CHART_WIDTH: usize = 60;
const CHART_HEIGHT: usize = 10;

#[derive(Serialize, Debug)]
pub struct FinalReport {
    pub days: u32,
    pub population: usize,
    pub totals: Totals,
    pub peak_infected: u32,
    pub history: Vec<HealthCount>,
}

impl FinalReport {
    pub fn collect(world: &World) -> Self {
        let history = world.stat().records().to_vec();
        let peak_infected = history.iter().map(|c| c.infected).max().unwrap_or(0);
        Self {
            days: world.runtime_params.day,
            population: world.world_params.init_n_pop,
            totals: world.totals(),
            peak_infected,
            history,
        }
    }

    pub fn print(&self) {
        println!("simulated days: {}", self.days);
        println!("population:     {}", self.population);
        println!("total infected: {}", self.totals.infected);
        println!("total dead:     {}", self.totals.dead);
        println!("peak infected:  {}", self.peak_infected);
        println!();
        println!("infected per day:");
        for line in chart(&self.history, CHART_WIDTH, CHART_HEIGHT) {
            println!("{line}");
        }
    }
}

/// Down-scales the infected curve to a `width` x `height` character chart.
fn chart(history: &[HealthCount], width: usize, height: usize) -> Vec<String> {
    let series: Vec<u32> = history.iter().map(|c| c.infected).collect();
    let cols = columns(&series, width);
    let max = cols.iter().copied().max().unwrap_or(0).max(1);
    let mut lines = Vec::with_capacity(height + 2);
    for row in (1..=height).rev() {
        let threshold = max as f64 * row as f64 / height as f64;
        lines.push(
            cols.iter()
                .map(|&v| if v as f64 >= threshold { '#' } else { ' ' })
                .collect(),
        );
    }
    lines.push("-".repeat(cols.len()));
    lines.push(format!("day 1 .. day {}", series.len()));
    lines
}

/// Buckets the series into at most `width` columns, keeping each bucket's peak.
fn columns(series: &[u32], width: usize) -> Vec<u32> {
    if series.len() <= width {
        return series.to_vec();
    }
    (0..width)
        .map(|i| {
            let lo = i * series.len() / width;
            let hi = ((i + 1) * series.len() / width).max(lo + 1);
            series[lo..hi].iter().copied().max().unwrap_or(0)
        })
        .collect()
}

use std::{
    env::args,
    io::{stdin, stdout},
    process::exit,
};

use life_grid::{config::USAGE, seed, Config, Grid, SeedError, SeedSource, Sim, View};

fn build_grid(config: &Config) -> Result<Grid, SeedError> {
    let mut grid = Grid::new(config.rows, config.cols)?;
    match &config.seed {
        SeedSource::File(path) => seed::seed_from_file(&mut grid, path)?,
        SeedSource::Random(seed) => seed::seed_random(&mut grid, *seed, config.fill_rate)?,
        SeedSource::Square => seed::seed_square(&mut grid)?,
        SeedSource::Manual => seed::seed_from_input(&mut grid, stdin().lock(), &mut stdout())?,
    }
    Ok(grid)
}

pub fn main() {
    let config = Config::from_args(args().skip(1)).unwrap_or_else(|err| {
        eprintln!("[error] {err}");
        eprintln!("{USAGE}");
        exit(1);
    });

    let grid = build_grid(&config).unwrap_or_else(|err| {
        eprintln!("[error] unable to seed the grid: {err}");
        exit(1);
    });
    eprintln!(
        "[info] starting {}x{} grid with {} live cells",
        grid.rows(),
        grid.cols(),
        grid.population()
    );

    let simulation = Sim::spawn(grid, config.tick_interval);
    let view = View::spawn(simulation.handle(), config.view_refresh_interval);

    let result = view.join();
    simulation.join();
    if let Err(err) = result {
        eprintln!("[error] terminal failure: {err}");
        exit(1);
    }
}

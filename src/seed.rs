//! Ways of producing the first generation.
//!
//! Every seeder writes into a grid that already has its final dimensions and
//! addresses cells as `(row, col)`. The coordinate file format lists `col row`
//! pairs and is swapped on read; manual entry asks for `row col`.

use std::{
    fs,
    io::{BufRead, Write},
    path::Path,
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{error::SeedError, pos, Grid, Pos};

/// Parses whitespace-separated `col row` pairs.
pub fn parse_coords(text: &str) -> Result<Vec<Pos>, SeedError> {
    let mut values = text.split_whitespace().map(|token| {
        token.parse::<i32>().map_err(|_| SeedError::InvalidToken {
            token: token.to_string(),
        })
    });

    let mut result = vec![];
    while let Some(col) = values.next() {
        let col = col?;
        let row = values
            .next()
            .ok_or(SeedError::DanglingCoordinate { value: col })??;
        result.push(pos!(row, col));
    }
    Ok(result)
}

/// Marks every cell listed in `text` alive. Nothing is written unless every
/// coordinate is valid for `grid`.
pub fn seed_from_coords(grid: &mut Grid, text: &str) -> Result<(), SeedError> {
    let actives = parse_coords(text)?;
    let mut seeded = grid.clone();
    for pos in actives {
        seeded.set(pos, true)?;
    }
    grid.copy_from(&seeded)?;
    Ok(())
}

pub fn seed_from_file(grid: &mut Grid, path: impl AsRef<Path>) -> Result<(), SeedError> {
    let content = fs::read_to_string(path)?;
    seed_from_coords(grid, &content)
}

/// Gives every cell a `fill_rate` chance of being alive.
pub fn seed_random(grid: &mut Grid, seed: Option<u64>, fill_rate: f64) -> Result<(), SeedError> {
    if !(0.0..=1.0).contains(&fill_rate) {
        return Err(SeedError::InvalidFillRate(fill_rate));
    }
    let mut rng = if let Some(x) = seed {
        ChaCha8Rng::seed_from_u64(x)
    } else {
        ChaCha8Rng::from_entropy()
    };
    for pos in grid.positions().collect::<Vec<_>>() {
        grid.set(pos, rng.gen_bool(fill_rate))?;
    }
    Ok(())
}

/// The 2x2 block, a still life.
pub fn seed_square(grid: &mut Grid) -> Result<(), SeedError> {
    for pos in [pos!(1, 1), pos!(1, 2), pos!(2, 1), pos!(2, 2)] {
        grid.set(pos, true)?;
    }
    Ok(())
}

struct Tokens<R> {
    reader: R,
    pending: Vec<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        let pending = vec![];
        Self { reader, pending }
    }

    /// Next whitespace separated word, `None` at end of input.
    fn next(&mut self) -> Result<Option<String>, SeedError> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending = line.split_whitespace().rev().map(String::from).collect();
        }
        Ok(self.pending.pop())
    }
}

/// Interactive entry of `row col` cells until the user answers `n` or the
/// input ends. Cells off the grid are reported and skipped.
pub fn seed_from_input<R, W>(grid: &mut Grid, reader: R, writer: &mut W) -> Result<(), SeedError>
where
    R: BufRead,
    W: Write,
{
    let mut tokens = Tokens::new(reader);
    let mut take_input = true;

    loop {
        if take_input {
            writeln!(writer, "Input cell (row col)")?;
            let (Some(row), Some(col)) = (tokens.next()?, tokens.next()?) else {
                return Ok(());
            };
            match (row.parse::<i32>(), col.parse::<i32>()) {
                (Ok(row), Ok(col)) => {
                    if let Err(err) = grid.set(pos!(row, col), true) {
                        writeln!(writer, "{err}")?;
                    }
                }
                _ => {
                    writeln!(writer, "Invalid input.")?;
                    continue;
                }
            }
        }

        writeln!(writer, "More cells? (y/n)")?;
        let Some(answer) = tokens.next()? else {
            return Ok(());
        };
        match answer.chars().next() {
            Some('y') => take_input = true,
            Some('n') => return Ok(()),
            _ => {
                writeln!(writer, "Invalid input.")?;
                take_input = false;
            }
        }
    }
}

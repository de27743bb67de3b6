pub mod automaton;

pub use automaton::{Automaton, StepReport};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{dims::Dims, grid::Grid, progress::ProgressHandle, random::Randomness};

/// Invalid generator configuration. Nothing is generated when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("invalid maze size {rows}x{cols}, both dimensions must be positive")]
    InvalidSize { rows: i64, cols: i64 },
    #[error("{name} must be a percentage in 0..=100, got {value}")]
    InvalidProbability { name: &'static str, value: i64 },
    #[error("root {root} is outside of the maze of size {size:?}")]
    RootOutOfBounds { root: Dims, size: Dims },
}

/// Tuning of the growth automaton, both values are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenParams {
    /// Chance that an invited cell keeps growing instead of settling, and that a connected cell
    /// is revived as a seed when growth stalls.
    pub branch_probability: u8,
    /// Chance that a seed continues straight away from its parent when it can.
    pub turn_probability: u8,
}

impl GenParams {
    pub fn new(branch_probability: u8, turn_probability: u8) -> Self {
        Self {
            branch_probability,
            turn_probability,
        }
    }

    /// Builds the parameters from unchecked integers, as they come from the outside.
    pub fn checked(branch_probability: i64, turn_probability: i64) -> Result<Self, GenerationError> {
        Ok(Self {
            branch_probability: percentage("branch_probability", branch_probability)?,
            turn_probability: percentage("turn_probability", turn_probability)?,
        })
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        percentage("branch_probability", self.branch_probability as i64)?;
        percentage("turn_probability", self.turn_probability as i64)?;
        Ok(())
    }
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            branch_probability: 5,
            turn_probability: 10,
        }
    }
}

fn percentage(name: &'static str, value: i64) -> Result<u8, GenerationError> {
    match u8::try_from(value) {
        Ok(v) if v <= 100 => Ok(v),
        _ => Err(GenerationError::InvalidProbability { name, value }),
    }
}

/// Counters collected over a whole generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub generations: usize,
    pub reseeds: usize,
    pub forced_reseeds: usize,
    pub lapsed_invites: usize,
}

impl GenerationStats {
    fn record(&mut self, report: &StepReport) {
        self.generations += 1;
        self.reseeds += report.reseeded;
        self.forced_reseeds += report.forced_reseed as usize;
        self.lapsed_invites += report.lapsed_invites;
    }
}

/// Finished maze together with the statistics of its generation.
#[derive(Debug, Clone)]
pub struct Generated {
    pub grid: Grid,
    pub stats: GenerationStats,
}

/// Cellular automaton maze generator.
#[derive(Debug, Clone, Default)]
pub struct CellularGenerator {
    params: GenParams,
    root: Option<Dims>,
}

impl CellularGenerator {
    pub fn new(params: GenParams) -> Result<Self, GenerationError> {
        params.validate()?;
        Ok(Self { params, root: None })
    }

    /// Fixes the root cell instead of drawing it at random.
    pub fn with_root(mut self, root: Dims) -> Self {
        self.root = Some(root);
        self
    }

    pub fn params(&self) -> GenParams {
        self.params
    }

    /// Generates a maze of the given size (`Dims(cols, rows)`), running generations until no
    /// cell is disconnected.
    pub fn generate<R: Randomness + ?Sized>(
        &self,
        size: Dims,
        rng: &mut R,
        progress: ProgressHandle,
    ) -> Result<Generated, GenerationError> {
        if !size.all_positive() {
            return Err(GenerationError::InvalidSize {
                rows: size.row() as i64,
                cols: size.col() as i64,
            });
        }

        let root = match self.root {
            Some(root) => root,
            None => {
                let row = rng.choose_index(size.row() as usize) as i32;
                let col = rng.choose_index(size.col() as usize) as i32;
                Dims::from_row_col(row, col)
            }
        };

        let mut automaton = Automaton::new(size, root, self.params)?;
        let total = automaton.grid().len();
        progress.lock().from = total;

        log::debug!(
            "generating {}x{} maze from root {} with {:?}",
            size.row(),
            size.col(),
            root,
            self.params
        );

        let mut stats = GenerationStats::default();
        while !automaton.is_complete() {
            let report = automaton.step(rng);
            stats.record(&report);

            progress.lock().done = total - automaton.grid().count(|s| s.is_disconnected());
        }

        progress.lock().finish();
        log::debug!("maze finished after {} generations, {:?}", stats.generations, stats);

        Ok(Generated {
            grid: automaton.into_grid(),
            stats,
        })
    }
}

/// Generates a `rows` x `cols` maze with the given branch and turn percentages.
pub fn generate_maze<R: Randomness + ?Sized>(
    rows: i64,
    cols: i64,
    branch_probability: i64,
    turn_probability: i64,
    rng: &mut R,
) -> Result<Grid, GenerationError> {
    let invalid = || GenerationError::InvalidSize { rows, cols };
    let rows = i32::try_from(rows).map_err(|_| invalid())?;
    let cols = i32::try_from(cols).map_err(|_| invalid())?;
    if rows <= 0 || cols <= 0 {
        return Err(invalid());
    }

    let params = GenParams::checked(branch_probability, turn_probability)?;
    let generated = CellularGenerator::new(params)?.generate(
        Dims::from_row_col(rows, cols),
        rng,
        ProgressHandle::new(),
    )?;

    Ok(generated.grid)
}

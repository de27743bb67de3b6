use smallvec::SmallVec;

use crate::{
    dims::Dims,
    grid::{CellState, Direction, Grid},
    random::Randomness,
};

use super::{GenParams, GenerationError};

/// Outcome of a single generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Connected cells turned back into seeds before the pass.
    pub reseeded: usize,
    /// Whether growth stalled long enough that a random frontier cell was revived regardless of
    /// its draw.
    pub forced_reseed: bool,
    /// Invites that connected a new cell.
    pub accepted_invites: usize,
    /// Invites whose target was already taken by an earlier inviter.
    pub lapsed_invites: usize,
}

/// Invite decided in the first phase of a pass, applied in the second.
#[derive(Debug, Clone, Copy)]
struct Invite {
    from: Dims,
    dir: Direction,
}

/// The growth automaton, owning the grid while the maze is being generated.
///
/// Each call to [`Automaton::step`] runs one generation in two phases. The first phase reads the
/// grid exactly as it stood when the generation started and records a transition for every seed
/// and invited cell, plus the invites to deliver. The second phase applies the transitions and
/// then delivers the invites in grid order. The first invite to reach a disconnected cell connects
/// it, later ones lapse.
#[derive(Debug, Clone)]
pub struct Automaton {
    grid: Grid,
    params: GenParams,
    generations: usize,
    empty_reseeds: usize,
}

impl Automaton {
    /// Creates the automaton with every cell disconnected except `root`, which becomes the seed.
    pub fn new(size: Dims, root: Dims, params: GenParams) -> Result<Self, GenerationError> {
        params.validate()?;

        let mut grid = Grid::new(size)?;
        if !grid.is_in_bounds(root) {
            return Err(GenerationError::RootOutOfBounds { root, size });
        }
        grid.set_state(root, CellState::Seed);

        Ok(Self {
            grid,
            params,
            generations: 0,
            empty_reseeds: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn params(&self) -> GenParams {
        self.params
    }

    /// Number of generations run so far.
    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn is_complete(&self) -> bool {
        self.grid.is_complete()
    }

    /// Consecutive reseed passes that revived nothing while growth was stalled, before a frontier
    /// cell is revived regardless of the draws. A cell revived with probability `p` fails that
    /// many passes in a row with probability below `e^-16`.
    pub fn force_after(&self) -> usize {
        1600 / (self.params.branch_probability as usize + 1)
    }

    /// Runs a single generation.
    pub fn step<R: Randomness + ?Sized>(&mut self, rng: &mut R) -> StepReport {
        let mut report = StepReport::default();

        if !self.grid.has_seeds() {
            report.reseeded = self.reseed(rng);

            let stalled = !self.grid.cells().any(|cell| cell.state().is_invited());
            if report.reseeded == 0 && stalled && !self.grid.is_complete() {
                self.empty_reseeds += 1;
                if self.empty_reseeds >= self.force_after() {
                    report.forced_reseed = self.force_reseed(rng);
                    report.reseeded += report.forced_reseed as usize;
                    self.empty_reseeds = 0;
                }
            } else {
                self.empty_reseeds = 0;
            }
        }

        let (transitions, invites) = self.decide(rng);

        for (pos, state) in transitions {
            self.grid.set_state(pos, state);
        }

        for invite in invites {
            if self.deliver(invite) {
                report.accepted_invites += 1;
            } else {
                report.lapsed_invites += 1;
            }
        }

        self.generations += 1;
        log::trace!(
            "generation {}: {} connected, {:?}",
            self.generations,
            self.grid.len() - self.grid.count(CellState::is_disconnected),
            report
        );

        report
    }

    /// Phase one, reads the grid and returns the new states together with invites to deliver.
    fn decide<R: Randomness + ?Sized>(
        &self,
        rng: &mut R,
    ) -> (Vec<(Dims, CellState)>, Vec<Invite>) {
        let mut transitions = Vec::new();
        let mut invites = Vec::new();

        for cell in self.grid.cells() {
            let pos = cell.pos();
            match cell.state() {
                // joins the maze only through invites delivered in phase two
                CellState::Disconnected => {}
                CellState::Seed => {
                    let candidates = self.grid.disconnected_neighbors(pos);
                    let next = match self.choose_invite(cell.connect(), &candidates, rng) {
                        Some(dir) => CellState::Invited(dir),
                        None => CellState::Connected,
                    };
                    transitions.push((pos, next));
                }
                CellState::Invited(dir) => {
                    invites.push(Invite { from: pos, dir });
                    let next = if rng.percentage() > self.params.branch_probability {
                        CellState::Connected
                    } else {
                        CellState::Seed
                    };
                    transitions.push((pos, next));
                }
                CellState::Connected => {}
            }
        }

        (transitions, invites)
    }

    /// Picks the invite vector of a seed, `None` when it is a dead end.
    fn choose_invite<R: Randomness + ?Sized>(
        &self,
        connect: Option<Direction>,
        candidates: &SmallVec<[Direction; 4]>,
        rng: &mut R,
    ) -> Option<Direction> {
        if candidates.is_empty() {
            return None;
        }

        let straight = connect.map(Direction::opposite);
        if rng.percentage() < self.params.turn_probability {
            if let Some(dir) = straight.filter(|dir| candidates.contains(dir)) {
                return Some(dir);
            }
        }

        Some(candidates[rng.choose_index(candidates.len())])
    }

    /// Phase two, connects the invite's target if it is still disconnected.
    fn deliver(&mut self, invite: Invite) -> bool {
        let Some(target) = self.grid.neighbor_pos(invite.from, invite.dir) else {
            return false;
        };

        match self.grid.get_mut(target) {
            Some(cell) if cell.state().is_disconnected() => {
                cell.state = CellState::Seed;
                cell.connect_to(invite.dir.opposite())
            }
            _ => false,
        }
    }

    /// Revives connected cells that border a disconnected cell, each with the branch probability.
    /// Only the first disconnected neighbor of a cell is tested.
    fn reseed<R: Randomness + ?Sized>(&mut self, rng: &mut R) -> usize {
        let frontier = self.frontier();

        let mut revived = 0;
        for pos in frontier {
            if rng.percentage() <= self.params.branch_probability {
                self.grid.set_state(pos, CellState::Seed);
                revived += 1;
            }
        }

        if revived > 0 {
            log::debug!("no seeds left, revived {} connected cells", revived);
        }

        revived
    }

    /// Connected cells that border a disconnected cell, in grid order.
    fn frontier(&self) -> Vec<Dims> {
        self.grid
            .cells()
            .filter(|cell| cell.state().is_connected())
            .map(|cell| cell.pos())
            .filter(|&pos| !self.grid.disconnected_neighbors(pos).is_empty())
            .collect()
    }

    /// Revives a uniformly chosen frontier cell.
    fn force_reseed<R: Randomness + ?Sized>(&mut self, rng: &mut R) -> bool {
        let frontier = self.frontier();
        if frontier.is_empty() {
            return false;
        }

        match frontier.get(rng.choose_index(frontier.len())).copied() {
            Some(pos) => {
                log::debug!("growth stalled, forcing {} back to seed", pos);
                self.grid.set_state(pos, CellState::Seed);
                true
            }
            None => false,
        }
    }
}

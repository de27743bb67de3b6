use camaze::grid::{Direction, Grid};

pub const WALL: char = '#';
pub const FLOOR: char = ' ';
pub const ROOT: char = '@';

/// Draws the maze as text, one character per cell and one per wall between cells.
///
/// The canvas is `2 * cols + 1` characters wide and `2 * rows + 1` lines high. A wall between
/// two cells is open when one of them connected the other.
pub fn render_text(grid: &Grid) -> String {
    let (rows, cols) = (grid.rows(), grid.cols());
    let (width, height) = (2 * cols + 1, 2 * rows + 1);
    let mut canvas = vec![vec![WALL; width]; height];

    let root = grid.root().map(|cell| cell.pos());
    for pos in grid.positions() {
        let (x, y) = (2 * pos.col() as usize + 1, 2 * pos.row() as usize + 1);
        canvas[y][x] = if Some(pos) == root { ROOT } else { FLOOR };

        if grid.is_passage(pos, Direction::East) {
            canvas[y][x + 1] = FLOOR;
        }
        if grid.is_passage(pos, Direction::South) {
            canvas[y + 1][x] = FLOOR;
        }
    }

    let mut out = String::with_capacity((width + 1) * height);
    for line in canvas {
        out.extend(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use camaze::{
        dims::Dims,
        generator::{CellularGenerator, GenParams},
        progress::ProgressHandle,
        random::{RngRandomness, SequenceRandomness},
    };

    use super::*;

    fn two_by_two() -> Grid {
        CellularGenerator::new(GenParams::new(0, 0))
            .unwrap()
            .with_root(Dims(0, 0))
            .generate(Dims(2, 2), &mut SequenceRandomness::zeros(), ProgressHandle::new())
            .unwrap()
            .grid
    }

    #[test]
    fn small_maze() {
        let text = render_text(&two_by_two());
        assert_eq!(text, "#####\n#@  #\n# # #\n# # #\n#####\n");
    }

    #[test]
    fn canvas_size_and_openings() {
        let mut rng = RngRandomness::seeded(5);
        let grid = camaze::generate_maze(7, 9, 5, 10, &mut rng).unwrap();
        let text = render_text(&grid);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 15);
        assert!(lines.iter().all(|l| l.chars().count() == 19));

        // a spanning tree opens exactly one wall per edge
        let openings: usize = lines
            .iter()
            .enumerate()
            .flat_map(|(y, l)| l.chars().enumerate().map(move |(x, c)| (x, y, c)))
            .filter(|&(x, y, c)| c == FLOOR && (x % 2 == 0 || y % 2 == 0))
            .count();
        assert_eq!(openings, grid.len() - 1);
    }
}

//! Maze generation by a growing cellular automaton.
//!
//! A single root cell starts as a seed. Every generation, seeds invite one of their disconnected
//! neighbors, invited neighbors become seeds themselves and remember who connected them. When
//! growth stalls, connected cells on the frontier are revived. The result is a [`grid::Grid`]
//! whose connect vectors form a spanning tree of all cells.

pub mod array;
pub mod dims;
pub mod generator;
pub mod grid;
pub mod progress;
pub mod random;

pub use generator::{generate_maze, CellularGenerator, GenParams, GenerationError};

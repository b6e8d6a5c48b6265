//! Seeded random floor plan.
//!
//! A `COLS × ROWS` grid of cells.  Each wall slot between neighbouring cells
//! is closed with probability `WALL_CHANCE`; open slots get a weight of 1
//! (open floor) to 3 (cluttered room).  Exits sit in the middle of the west
//! and east walls.  Per-cell speed drops in smoky cells.

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use egress_core::{GridPos, VertexId};
use egress_graph::{Graph, GraphBuilder};
use egress_search::PerVertex;

pub const COLS: u32 = 16;
pub const ROWS: u32 = 9;

const WALL_CHANCE:  f64 = 0.18;
const SMOKE_CHANCE: f64 = 0.10;

pub struct Building {
    pub graph:     Graph,
    pub exits:     [VertexId; 2],
    pub fire:      VertexId,
    pub occupants: Vec<VertexId>,
    pub speed:     PerVertex,
}

pub fn build_floor(seed: u64, occupant_count: usize) -> Result<Building> {
    let mut rng = SmallRng::seed_from_u64(seed);

    let graph = GraphBuilder::grid(COLS, ROWS, |_, _| {
        (!rng.gen_bool(WALL_CHANCE)).then(|| rng.gen_range(1..=3))
    })
    .build()
    .context("floor plan failed validation")?;

    let cell = |x: i32, y: i32| {
        graph
            .vertex_at(GridPos::new(x, y))
            .with_context(|| format!("no cell at ({x}, {y})"))
    };
    let mid = ROWS as i32 / 2;
    let exits = [cell(0, mid)?, cell(COLS as i32 - 1, mid)?];
    let fire = cell(
        rng.gen_range(3..COLS as i32 - 3),
        rng.gen_range(1..ROWS as i32 - 1),
    )?;

    let occupants = (0..occupant_count)
        .map(|_| cell(rng.gen_range(0..COLS as i32), rng.gen_range(0..ROWS as i32)))
        .collect::<Result<Vec<_>>>()?;

    let speed = PerVertex(
        graph
            .vertices()
            .map(|_| if rng.gen_bool(SMOKE_CHANCE) { 0.5 } else { 1.0 })
            .collect(),
    );

    Ok(Building { graph, exits, fire, occupants, speed })
}

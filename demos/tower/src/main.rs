//! tower: evacuate one floor of an office tower while a fire spreads.
//!
//! Generates a seeded random floor plan, compares every route strategy for
//! one occupant, plans the whole floor in a batch, and finally animates the
//! hazard-aware search frame by frame as an ASCII map.

mod building;

use std::time::Instant;

use anyhow::{Context, Result};

use egress_core::{GridPos, RunId, VertexId};
use egress_graph::Graph;
use egress_plan::{Algorithm, PlanRequest, PlannerBuilder, RunObserver, RunResult, Snapshot};
use egress_search::{arrival_times, HazardTimes, PerVertex};

use building::{build_floor, COLS, ROWS};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:           u64   = 42;
const OCCUPANTS:      usize = 24;
/// Fire moves this many times slower than a walking occupant.
const SLOWDOWN:       f64   = 3.0;
/// Print every Nth animation frame.
const FRAME_INTERVAL: usize = 12;

// ── ASCII rendering ───────────────────────────────────────────────────────────

struct Map<'a> {
    graph:  &'a Graph,
    speed:  &'a PerVertex,
    exits:  &'a [VertexId],
    fire:   VertexId,
    hazard: Option<&'a HazardTimes>,
}

impl Map<'_> {
    /// `E` exit, `F` fire origin, `@` path, `~` burning at `now`,
    /// `*` settled, `+` frontier, `.` untouched.
    fn render(&self, snapshot: &Snapshot, now: f64) -> String {
        let mut out = String::new();
        for y in 0..ROWS as i32 {
            for x in 0..COLS as i32 {
                let Some(v) = self.graph.vertex_at(GridPos::new(x, y)) else {
                    out.push(' ');
                    continue;
                };
                let c = if self.exits.contains(&v) {
                    'E'
                } else if v == self.fire {
                    'F'
                } else if snapshot.path.contains(&v) {
                    '@'
                } else if self.hazard.is_some_and(|h| h.blocks(v, now)) {
                    '~'
                } else if snapshot.visited.contains(&v) {
                    '*'
                } else if snapshot.frontier.contains(&v) {
                    '+'
                } else {
                    '.'
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}

struct AsciiAnimator<'a> {
    map:    Map<'a>,
    frames: usize,
}

impl RunObserver for AsciiAnimator<'_> {
    fn on_start(&mut self, run: RunId, algorithm: Algorithm) {
        println!("── {run}: {algorithm} ──");
    }

    fn on_step(&mut self, snapshot: &Snapshot) {
        self.frames += 1;
        if snapshot.step % FRAME_INTERVAL != 0 && !snapshot.finished {
            return;
        }
        // Occupant's clock at the vertex just settled.
        let now = arrival_times(self.map.graph, &snapshot.path, self.map.speed)
            .ok()
            .and_then(|times| times.last().copied())
            .unwrap_or(0.0);
        println!(
            "frame {:>3}  settled {:>3}  frontier {:>3}",
            snapshot.step,
            snapshot.visited.len(),
            snapshot.frontier.len()
        );
        print!("{}", self.map.render(snapshot, now));
        println!();
    }

    fn on_finish(&mut self, result: &RunResult) {
        println!("{} frames; {}", self.frames, summary(result));
    }
}

fn summary(r: &RunResult) -> String {
    match r.cost {
        Some(cost) => format!(
            "escaped in {cost:.2} over {} cells, {} settled, {:.3} ms",
            r.path.len(),
            r.visited.len(),
            r.elapsed_ms()
        ),
        None => format!(
            "TRAPPED after settling {} cells, {:.3} ms",
            r.visited.len(),
            r.elapsed_ms()
        ),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== tower: egress evacuation planner ===");
    println!("Floor: {COLS}×{ROWS}  |  Occupants: {OCCUPANTS}  |  Seed: {SEED}");
    println!();

    // 1. Build the floor.
    let building = build_floor(SEED, OCCUPANTS)?;
    let graph = &building.graph;
    println!(
        "Floor plan: {} cells, {} open wall slots, fire at {}",
        graph.vertex_count(),
        graph.edge_count(),
        graph.position(building.fire).map_or_else(|| "?".into(), |p| p.to_string()),
    );

    // 2. Planner.
    let planner = PlannerBuilder::new(graph, building.speed.clone())
        .slowdown(SLOWDOWN)
        .build()?;
    let hazard = planner.hazard_times(&[building.fire])?;
    println!(
        "Hazard reaches {}/{} cells",
        hazard.table().reached(),
        graph.vertex_count()
    );
    println!();

    // 3. Every strategy for the first occupant.
    let origin = *building.occupants.first().context("floor has no occupants")?;
    println!(
        "Occupant 0 at {}:",
        graph.position(origin).map_or_else(|| "?".into(), |p| p.to_string())
    );
    for algorithm in Algorithm::ALL.into_iter().filter(|a| a.is_route()) {
        let request = PlanRequest::new(algorithm, origin, building.exits)
            .with_hazard([building.fire]);
        let result = planner.plan(&request)?;
        println!("  {:<16} {}", algorithm.as_str(), summary(&result));
    }
    println!();

    // 4. The whole floor, batched.
    let t0 = Instant::now();
    let requests: Vec<_> = building
        .occupants
        .iter()
        .map(|&o| {
            PlanRequest::new(Algorithm::HazardAStar, o, building.exits).with_hazard([building.fire])
        })
        .collect();
    let results = planner.plan_batch(&requests);
    let mut escaped = 0;
    let mut trapped = 0;
    for result in results {
        if result?.is_unreachable() {
            trapped += 1;
        } else {
            escaped += 1;
        }
    }
    println!(
        "Batch: {escaped} escape, {trapped} trapped  ({:.3} ms)",
        t0.elapsed().as_secs_f64() * 1_000.0
    );
    println!();

    // 5. Animate one hazard-aware search.
    let mut animator = AsciiAnimator {
        map: Map {
            graph,
            speed: &building.speed,
            exits: &building.exits,
            fire: building.fire,
            hazard: Some(hazard.as_ref()),
        },
        frames: 0,
    };
    let request = PlanRequest::new(Algorithm::HazardDijkstra, origin, building.exits)
        .with_hazard([building.fire]);
    planner.start(&request)?.drive(&mut animator);

    Ok(())
}

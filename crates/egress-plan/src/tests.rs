//! Integration tests for egress-plan.

use egress_core::{GridPos, PlannerConfig, VertexId};
use egress_graph::{Graph, GraphBuilder};
use egress_search::Uniform;

use crate::{Algorithm, PlanRequest, Planner, PlannerBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn grid3() -> Graph {
    GraphBuilder::uniform_grid(3, 3, 1).build().unwrap()
}

fn at(g: &Graph, x: i32, y: i32) -> VertexId {
    g.vertex_at(GridPos::new(x, y)).unwrap()
}

/// Fire in the centre of a 3×3 grid, escape from (0,0) to (2,2).
fn fire_request(g: &Graph, algorithm: Algorithm) -> PlanRequest {
    PlanRequest::new(algorithm, at(g, 0, 0), [at(g, 2, 2)]).with_hazard([at(g, 1, 1)])
}

fn planner(g: &Graph, slowdown: f64) -> Planner<'_, Uniform> {
    PlannerBuilder::new(g, Uniform(1.0)).slowdown(slowdown).build().unwrap()
}

// ── Algorithm ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod algorithm {
    use crate::{Algorithm, PlanError};

    #[test]
    fn names_round_trip() {
        for a in Algorithm::ALL {
            assert_eq!(a.to_string().parse::<Algorithm>().unwrap(), a);
        }
    }

    #[test]
    fn parsing_is_lenient() {
        assert_eq!("AStar".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!(" hazard_dijkstra ".parse::<Algorithm>().unwrap(), Algorithm::HazardDijkstra);
    }

    #[test]
    fn unknown_name() {
        assert!(matches!(
            "bfs".parse::<Algorithm>(),
            Err(PlanError::UnknownAlgorithm(s)) if s == "bfs"
        ));
    }

    #[test]
    fn classification() {
        assert!(!Algorithm::Dijkstra.uses_hazard());
        assert!(Algorithm::HazardAStar.uses_hazard());
        assert!(Algorithm::HazardAStar.uses_heuristic());
        assert!(!Algorithm::HazardSpread.is_route());
    }
}

// ── Planner construction ──────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use egress_core::{HazardConfig, PlannerConfig};
    use egress_search::{PerVertex, SearchError, Uniform};

    use super::grid3;
    use crate::{PlanError, Planner, PlannerBuilder};

    #[test]
    fn builder_sets_config() {
        let g = grid3();
        let p = PlannerBuilder::new(&g, Uniform(2.0))
            .slowdown(3.0)
            .max_hops(2)
            .strict_heuristic(false)
            .build()
            .unwrap();
        assert_eq!(p.config().hazard, HazardConfig::default().with_slowdown(3.0).with_max_hops(2));
        assert!(!p.config().strict_heuristic);
        assert_eq!(p.max_velocity(), 2.0);
        assert!(!p.is_busy());
    }

    #[test]
    fn bad_slowdown_fails() {
        let g = grid3();
        let result = PlannerBuilder::new(&g, Uniform(1.0)).slowdown(-1.0).build();
        assert!(matches!(result, Err(PlanError::Search(SearchError::Config(_)))));
    }

    #[test]
    fn bad_velocity_fails() {
        let g = grid3();
        let result = Planner::new(&g, PerVertex(vec![1.0; 8]));
        assert!(matches!(
            result,
            Err(PlanError::Search(SearchError::NonPositiveVelocity { .. }))
        ));
        assert!(Planner::with_config(&g, Uniform(1.0), PlannerConfig::default()).is_ok());
    }
}

// ── One-shot planning ─────────────────────────────────────────────────────────

#[cfg(test)]
mod plan {
    use egress_core::{GridPos, PlannerConfig, VertexId};
    use egress_graph::GraphBuilder;
    use egress_search::{Outcome, SearchError, Uniform};

    use super::*;
    use crate::PlanError;

    #[test]
    fn grid_corner_to_corner() {
        let g = grid3();
        let p = planner(&g, 1.0);
        for algorithm in [Algorithm::Dijkstra, Algorithm::AStar] {
            let r = p.plan(&PlanRequest::new(algorithm, at(&g, 0, 0), [at(&g, 2, 2)])).unwrap();
            assert_eq!(r.algorithm, algorithm);
            assert_eq!(r.outcome, Outcome::Reached(at(&g, 2, 2)));
            assert_eq!(r.cost, Some(4.0));
            assert_eq!(r.path.len(), 5);
            assert_eq!(r.path[0], at(&g, 0, 0));
            assert!(r.hazard_times.is_none());
            assert!(r.elapsed_ms() >= 0.0);
            assert!(!r.is_unreachable());
        }
    }

    #[test]
    fn slow_fire_is_outrun() {
        let g = grid3();
        let p = planner(&g, 4.0);
        for algorithm in [Algorithm::HazardDijkstra, Algorithm::HazardAStar] {
            let r = p.plan(&fire_request(&g, algorithm)).unwrap();
            assert_eq!(r.path.len(), 5, "{algorithm}");
            assert!(!r.path.contains(&at(&g, 1, 1)));
            assert_eq!(r.cost, Some(4.0));

            let hazard = r.hazard_times.as_ref().unwrap();
            let times = egress_search::arrival_times(&g, &r.path, &Uniform(1.0)).unwrap();
            for (&v, &t) in r.path.iter().zip(&times).skip(1) {
                assert!(t < hazard.time(v).unwrap());
            }
        }
    }

    #[test]
    fn fast_fire_traps_the_occupant() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let r = p.plan(&fire_request(&g, Algorithm::HazardDijkstra)).unwrap();
        assert!(r.is_unreachable());
        assert_eq!(r.outcome, Outcome::Exhausted);
        assert_eq!(r.visited, vec![at(&g, 0, 0)]);
        assert_eq!(r.cost, None);
    }

    #[test]
    fn unreachable_visits_the_component() {
        // Wall between column 0 and the rest.
        let g = GraphBuilder::grid(3, 3, |a, b| (a.x == b.x || a.x != 0).then_some(1))
            .build()
            .unwrap();
        let p = Planner::new(&g, Uniform(1.0)).unwrap();
        let r = p
            .plan(&PlanRequest::new(Algorithm::Dijkstra, at(&g, 0, 0), [at(&g, 2, 2)]))
            .unwrap();
        assert!(r.is_unreachable());
        let mut visited = r.visited.clone();
        visited.sort();
        assert_eq!(visited, vec![at(&g, 0, 0), at(&g, 0, 1), at(&g, 0, 2)]);
    }

    #[test]
    fn strict_heuristic_rejects_teleporters() {
        let mut b = GraphBuilder::new();
        let x = b.add_vertex_at("x", GridPos::new(0, 0));
        let y = b.add_vertex_at("y", GridPos::new(4, 0));
        b.add_edge(x, y, 1);
        let g = b.build().unwrap();
        let req = PlanRequest::new(Algorithm::AStar, x, [y]);

        let strict = Planner::new(&g, Uniform(1.0)).unwrap();
        assert!(matches!(
            strict.plan(&req),
            Err(PlanError::Search(SearchError::InadmissibleHeuristic { .. }))
        ));
        // Dijkstra does not care.
        assert!(strict.plan(&PlanRequest::new(Algorithm::Dijkstra, x, [y])).is_ok());

        let lax_config = PlannerConfig { strict_heuristic: false, ..PlannerConfig::default() };
        let lax = Planner::with_config(&g, Uniform(1.0), lax_config).unwrap();
        assert_eq!(lax.plan(&req).unwrap().cost, Some(1.0));
    }

    #[test]
    fn admissibility_is_remembered() {
        let g = grid3();
        let p = planner(&g, 1.0);
        assert!(p.heuristic_is_admissible());
        let requests = vec![fire_request(&g, Algorithm::AStar); 4];
        assert!(p.plan_batch(&requests).iter().all(Result::is_ok));
        assert!(p.heuristic_is_admissible());

        let mut b = GraphBuilder::new();
        let x = b.add_vertex_at("x", GridPos::new(0, 0));
        let y = b.add_vertex_at("y", GridPos::new(3, 0));
        b.add_edge(x, y, 2);
        let teleport = b.build().unwrap();
        let strict = Planner::new(&teleport, Uniform(1.0)).unwrap();
        assert!(!strict.heuristic_is_admissible());
        let req = PlanRequest::new(Algorithm::HazardAStar, x, [y]);
        for _ in 0..2 {
            assert!(matches!(
                strict.plan(&req),
                Err(PlanError::Search(SearchError::InadmissibleHeuristic { weight: 2, distance: 3, .. }))
            ));
        }
    }

    #[test]
    fn invalid_requests() {
        let g = grid3();
        let p = planner(&g, 1.0);
        assert!(matches!(
            p.plan(&PlanRequest::new(Algorithm::Dijkstra, VertexId(42), [VertexId(0)])),
            Err(PlanError::Search(SearchError::UnknownVertex(VertexId(42))))
        ));
        assert!(matches!(
            p.plan(&PlanRequest::new(Algorithm::AStar, VertexId(0), Vec::new())),
            Err(PlanError::Search(SearchError::NoExits))
        ));
        assert!(matches!(
            p.plan(&fire_request(&g, Algorithm::HazardAStar).with_hazard([VertexId(99)])),
            Err(PlanError::Search(SearchError::UnknownVertex(VertexId(99))))
        ));
        let mut no_origin = PlanRequest::spread([VertexId(0)]);
        no_origin.algorithm = Algorithm::Dijkstra;
        assert!(matches!(
            p.plan(&no_origin),
            Err(PlanError::MissingOrigin(Algorithm::Dijkstra))
        ));
    }

    #[test]
    fn batch_preserves_order() {
        let g = grid3();
        let p = planner(&g, 4.0);
        let requests = vec![
            PlanRequest::new(Algorithm::Dijkstra, at(&g, 0, 0), [at(&g, 2, 2)]),
            PlanRequest::new(Algorithm::AStar, at(&g, 2, 2), [at(&g, 2, 2)]),
            PlanRequest::new(Algorithm::Dijkstra, VertexId(77), [at(&g, 2, 2)]),
            fire_request(&g, Algorithm::HazardAStar),
        ];
        let results = p.plan_batch(&requests);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().cost, Some(4.0));
        assert_eq!(results[1].as_ref().unwrap().path, vec![at(&g, 2, 2)]);
        assert!(results[2].is_err());
        assert_eq!(results[3].as_ref().unwrap().algorithm, Algorithm::HazardAStar);
    }

    #[test]
    fn run_ids_increase() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let req = PlanRequest::new(Algorithm::Dijkstra, VertexId(0), [VertexId(1)]);
        let a = p.plan(&req).unwrap();
        let b = p.plan(&req).unwrap();
        assert!(b.run > a.run);
    }
}

// ── Progressive runs ──────────────────────────────────────────────────────────

#[cfg(test)]
mod progressive {
    use egress_core::VertexId;
    use egress_search::Outcome;

    use super::*;
    use crate::{NoopObserver, PlanError, RunObserver, RunResult, Snapshot};

    #[test]
    fn snapshots_grow_then_stop() {
        let g = GraphBuilder::uniform_grid(4, 4, 1).build().unwrap();
        let p = Planner::new(&g, Uniform(1.0)).unwrap();
        let mut run = p
            .start(&PlanRequest::new(Algorithm::Dijkstra, VertexId(0), [VertexId(15)]))
            .unwrap();

        let mut snapshots = Vec::new();
        while let Some(s) = run.step() {
            snapshots.push(s);
        }
        assert!(run.step().is_none());
        assert!(run.is_finished());

        assert!(snapshots.len() <= g.vertex_count());
        assert!(snapshots.windows(2).all(|w| w[0].visited.len() <= w[1].visited.len()));
        assert!(snapshots.windows(2).all(|w| w[0].elapsed <= w[1].elapsed));
        for (i, s) in snapshots.iter().enumerate() {
            assert_eq!(s.step, i + 1);
            assert_eq!(s.finished, i + 1 == snapshots.len());
            assert_eq!(s.path.first(), Some(&VertexId(0)));
            assert_eq!(s.path.last(), s.settled.as_ref());
            assert!(s.frontier.iter().all(|v| !s.visited.contains(v)));
        }

        let last = snapshots.last().unwrap();
        let result = run.result().unwrap();
        assert_eq!(result.path, last.path);
        assert_eq!(result.visited, last.visited);
        assert_eq!(result.steps, snapshots.len());
        assert_eq!(result.cost, Some(6.0));
    }

    #[test]
    fn first_snapshot_is_the_origin() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let mut run = p.start(&PlanRequest::new(Algorithm::AStar, at(&g, 0, 0), [at(&g, 2, 2)])).unwrap();
        let first = run.step().unwrap();
        assert_eq!(first.settled, Some(at(&g, 0, 0)));
        assert_eq!(first.path, vec![at(&g, 0, 0)]);
        assert_eq!(first.visited, vec![at(&g, 0, 0)]);
        assert_eq!(first.frontier, vec![at(&g, 1, 0), at(&g, 0, 1)]);
        assert!(!first.finished);
    }

    #[test]
    fn unreachable_run_ends_on_its_last_settle() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let mut run = p.start(&fire_request(&g, Algorithm::HazardDijkstra)).unwrap();
        let only = run.step().unwrap();
        assert!(only.finished);
        assert_eq!(only.settled, Some(at(&g, 0, 0)));
        assert!(only.frontier.is_empty());
        assert!(run.step().is_none());
        let result = run.result().unwrap();
        assert_eq!(result.steps, 1);
        assert!(result.is_unreachable());
    }

    #[test]
    fn snapshot_counts_stay_within_vertex_count() {
        let cut = GridPos::new(2, 2);
        let open = grid3();
        let walled = GraphBuilder::grid(3, 3, |a, b| (a != cut && b != cut).then_some(1))
            .build()
            .unwrap();
        for g in [&open, &walled] {
            for slowdown in [1.0, 3.0, 4.0] {
                let p = planner(g, slowdown);
                for algorithm in Algorithm::ALL {
                    let request = if algorithm.is_route() {
                        fire_request(g, algorithm)
                    } else {
                        PlanRequest::spread([at(g, 1, 1)])
                    };
                    let snapshots: Vec<_> = p.start(&request).unwrap().collect();
                    assert!(
                        snapshots.len() <= g.vertex_count(),
                        "{algorithm} at slowdown {slowdown}: {} snapshots",
                        snapshots.len()
                    );
                    assert!(snapshots.last().is_some_and(|s| s.finished));
                }
            }
        }
    }

    #[test]
    fn second_start_is_rejected() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let req = PlanRequest::new(Algorithm::Dijkstra, at(&g, 0, 0), [at(&g, 2, 2)]);

        let mut first = p.start(&req).unwrap();
        first.step();
        assert!(p.is_busy());
        assert!(matches!(p.start(&req), Err(PlanError::ReentrantRun)));

        // The active run is untouched.
        assert_eq!(first.steps(), 1);
        let result = first.finish();
        assert_eq!(result.cost, Some(4.0));
        assert!(!p.is_busy());
        assert!(p.start(&req).is_ok());
    }

    #[test]
    fn dropping_cancels() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let req = PlanRequest::new(Algorithm::Dijkstra, at(&g, 0, 0), [at(&g, 2, 2)]);
        let mut run = p.start(&req).unwrap();
        run.step();
        drop(run);
        assert!(!p.is_busy());
        assert!(p.start(&req).is_ok());
    }

    #[test]
    fn finishing_frees_the_slot_before_drop() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let req = PlanRequest::new(Algorithm::Dijkstra, at(&g, 0, 0), [at(&g, 0, 0)]);
        let mut run = p.start(&req).unwrap();
        assert!(run.step().unwrap().finished);
        assert!(!p.is_busy());
        let second = p.start(&req);
        assert!(second.is_ok());
        assert!(run.result().is_some());
    }

    #[test]
    fn failed_start_frees_the_slot() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let bad = PlanRequest::new(Algorithm::Dijkstra, VertexId(99), [VertexId(0)]);
        assert!(p.start(&bad).is_err());
        assert!(!p.is_busy());
    }

    #[test]
    fn plan_runs_alongside_a_progressive_run() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let req = PlanRequest::new(Algorithm::Dijkstra, at(&g, 0, 0), [at(&g, 2, 2)]);
        let _active = p.start(&req).unwrap();
        assert_eq!(p.plan(&req).unwrap().cost, Some(4.0));
    }

    #[test]
    fn hazard_spread_animation() {
        let g = grid3();
        let p = planner(&g, 2.0);
        let run = p.start(&PlanRequest::spread([at(&g, 1, 1)])).unwrap();
        let snapshots: Vec<_> = run.collect();
        assert_eq!(snapshots.len(), 9);
        assert_eq!(snapshots[0].visited, vec![at(&g, 1, 1)]);
        assert_eq!(snapshots[4].visited.len(), 5);
        assert_eq!(snapshots[8].visited.len(), 9);
        assert!(snapshots[8].finished);
        assert!(snapshots[..8].iter().all(|s| !s.finished));
    }

    #[test]
    fn hazard_spread_result() {
        let g = grid3();
        let p = planner(&g, 2.0);
        let r = p.plan(&PlanRequest::spread([at(&g, 1, 1)])).unwrap();
        assert_eq!(r.outcome, Outcome::Exhausted);
        assert!(r.path.is_empty());
        assert!(!r.is_unreachable());
        assert_eq!(r.cost, None);
        let hazard = r.hazard_times.unwrap();
        assert_eq!(hazard.time(at(&g, 0, 0)), Some(4.0));
        let mut engulfed: Vec<_> = hazard.engulfed_by(2.0).collect();
        engulfed.sort();
        let mut expected = vec![at(&g, 1, 1), at(&g, 1, 0), at(&g, 0, 1), at(&g, 2, 1), at(&g, 1, 2)];
        expected.sort();
        assert_eq!(engulfed, expected);
    }

    #[derive(Default)]
    struct Recorder {
        starts:   usize,
        steps:    Vec<usize>,
        finishes: Vec<RunResult>,
    }

    impl RunObserver for Recorder {
        fn on_start(&mut self, _run: egress_core::RunId, algorithm: Algorithm) {
            assert_eq!(algorithm, Algorithm::AStar);
            self.starts += 1;
        }

        fn on_step(&mut self, snapshot: &Snapshot) {
            self.steps.push(snapshot.step);
        }

        fn on_finish(&mut self, result: &RunResult) {
            self.finishes.push(result.clone());
        }
    }

    #[test]
    fn drive_reports_everything() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let req = PlanRequest::new(Algorithm::AStar, at(&g, 0, 0), [at(&g, 2, 2)]);
        let mut rec = Recorder::default();
        let result = p.start(&req).unwrap().drive(&mut rec);

        assert_eq!(rec.starts, 1);
        assert_eq!(rec.steps, (1..=result.steps).collect::<Vec<_>>());
        assert_eq!(rec.finishes.len(), 1);
        assert_eq!(rec.finishes[0].path, result.path);
        assert!(!p.is_busy());
    }

    #[test]
    fn drive_after_manual_steps() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let req = PlanRequest::new(Algorithm::Dijkstra, at(&g, 0, 0), [at(&g, 2, 2)]);
        let mut run = p.start(&req).unwrap();
        run.step();
        run.step();
        let result = run.drive(&mut NoopObserver);
        assert_eq!(result.cost, Some(4.0));
    }
}

// ── Hazard cache ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod hazard_cache {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn same_sources_share_one_table() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let a = p.hazard_times(&[VertexId(4), VertexId(0)]).unwrap();
        let b = p.hazard_times(&[VertexId(0), VertexId(4), VertexId(0)]).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn new_sources_recompute() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let a = p.hazard_times(&[VertexId(4)]).unwrap();
        let b = p.hazard_times(&[VertexId(0)]).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_ne!(a.time(VertexId(0)), b.time(VertexId(0)));
        let c = p.hazard_times(&[VertexId(4)]).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(a, c);
    }

    #[test]
    fn invalidate_forces_recompute() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let a = p.hazard_times(&[VertexId(4)]).unwrap();
        p.invalidate_hazard();
        let b = p.hazard_times(&[VertexId(4)]).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a, b);
    }

    #[test]
    fn runs_use_the_cached_table() {
        let g = grid3();
        let p = planner(&g, 4.0);
        let cached = p.hazard_times(&[at(&g, 1, 1)]).unwrap();
        let r = p.plan(&fire_request(&g, Algorithm::HazardDijkstra)).unwrap();
        assert!(Arc::ptr_eq(&cached, r.hazard_times.as_ref().unwrap()));
    }

    #[test]
    fn no_sources_means_no_cutoff() {
        let g = grid3();
        let p = planner(&g, 1.0);
        let req = PlanRequest::new(Algorithm::HazardDijkstra, at(&g, 0, 0), [at(&g, 2, 2)]);
        let r = p.plan(&req).unwrap();
        assert_eq!(r.cost, Some(4.0));
        assert!(!r.hazard_times.unwrap().has_hazard());
    }

    #[test]
    fn config_reaches_the_table() {
        let g = grid3();
        let config = PlannerConfig::default();
        let p = Planner::with_config(&g, Uniform(1.0), config.clone()).unwrap();
        assert_eq!(p.hazard_times(&[]).unwrap().config(), &config.hazard);
    }
}

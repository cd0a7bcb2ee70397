use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::board::{Board, Mark, Position};
use crate::error::EngineError;
use crate::log;
use super::searcher::{RootScore, Searcher};

/// Result of one root decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best: RootScore,
    /// Every completed root branch, in candidate order.
    pub scores: Vec<RootScore>,
    pub candidates: usize,
    pub failures: usize,
    pub timed_out: bool,
}

/// Raises the shared stop flag when dropped, so blocking searches wind down
/// whether the decision finished, timed out, or was itself cancelled.
struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.0)
    }

    fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

impl Drop for StopSignal {
    fn drop(&mut self) {
        self.raise();
    }
}

/// Fans root candidates out to independent blocking tasks and reduces their scores.
///
/// Each task owns a clone of the board and searches with a full window, so no
/// bounds are shared between root branches.
#[derive(Debug, Clone)]
pub struct ParallelCoordinator {
    searcher: Searcher,
    worker_count: usize,
}

impl ParallelCoordinator {
    pub fn new(searcher: Searcher, worker_count: usize) -> Self {
        Self {
            searcher,
            worker_count: worker_count.max(1),
        }
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Picks the best move for `side`. With a `timeout`, branches still running
    /// at the deadline are stopped and the best completed branch is returned.
    pub async fn choose_move(
        &self,
        board: &Board,
        side: Mark,
        timeout: Option<Duration>,
    ) -> Result<SearchOutcome, EngineError> {
        let candidates = self.searcher.candidates(board);
        let searcher = self.searcher;
        let snapshot = Arc::new(board.clone());

        self.run_root_branches(candidates, side, timeout, move |position, stop| {
            searcher.score_root_move_until(Board::clone(&snapshot), position, side, stop)
        })
        .await
    }

    async fn run_root_branches<F>(
        &self,
        candidates: Vec<Position>,
        side: Mark,
        timeout: Option<Duration>,
        score_branch: F,
    ) -> Result<SearchOutcome, EngineError>
    where
        F: Fn(Position, &AtomicBool) -> Result<i64, EngineError> + Send + Sync + 'static,
    {
        let started = Instant::now();
        let deadline = timeout.map(|t| started + t);
        if candidates.is_empty() {
            return Err(EngineError::NoMovesAvailable);
        }

        let score_branch = Arc::new(score_branch);
        let stop = StopSignal::new();
        let permits = Arc::new(Semaphore::new(self.worker_count));
        let mut tasks = JoinSet::new();

        for (index, position) in candidates.iter().copied().enumerate() {
            let score_branch = Arc::clone(&score_branch);
            let flag = stop.flag();
            let permits = Arc::clone(&permits);

            tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| EngineError::WorkerFailure(e.to_string()))?;
                let score = tokio::task::spawn_blocking(move || score_branch(position, &flag))
                    .await
                    .map_err(|e| EngineError::WorkerFailure(e.to_string()))??;
                Ok::<_, EngineError>((index, RootScore::new(position, score)))
            });
        }

        let mut completed: Vec<(usize, RootScore)> = Vec::with_capacity(candidates.len());
        let mut failures = 0;
        let mut timed_out = false;

        loop {
            let joined = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, tasks.join_next()).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        timed_out = true;
                        stop.raise();
                        tasks.abort_all();
                        break;
                    }
                },
                None => tasks.join_next().await,
            };

            let Some(joined) = joined else {
                break;
            };

            match joined {
                Ok(Ok(entry)) => completed.push(entry),
                Ok(Err(e)) => {
                    failures += 1;
                    log!("[search] Root branch failed: {}", e);
                }
                Err(e) => {
                    failures += 1;
                    log!("[search] Root task did not complete: {}", e);
                }
            }
        }

        completed.sort_by_key(|(index, _)| *index);
        let scores: Vec<RootScore> = completed.into_iter().map(|(_, score)| score).collect();

        let mut best: Option<RootScore> = None;
        for candidate in &scores {
            if candidate.improves_on(best.as_ref(), side) {
                best = Some(*candidate);
            }
        }

        let Some(best) = best else {
            if timed_out {
                log!(
                    "[search] Timed out after {:?} with no completed branch out of {}",
                    started.elapsed(),
                    candidates.len()
                );
                return Err(EngineError::SearchTimedOut);
            }
            return Err(EngineError::SearchFailure(failures));
        };

        log!(
            "[search] {:?} picks {} score {} ({}/{} branches, {} failed{}) in {:?}",
            side,
            best.position,
            best.score,
            scores.len(),
            candidates.len(),
            failures,
            if timed_out { ", timed out" } else { "" },
            started.elapsed()
        );

        Ok(SearchOutcome {
            best,
            scores,
            candidates: candidates.len(),
            failures,
            timed_out,
        })
    }
}

use egress_search::SearchError;
use thiserror::Error;

use crate::Algorithm;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("a progressive run is already active on this planner")]
    ReentrantRun,

    #[error("unknown algorithm {0:?}")]
    UnknownAlgorithm(String),

    #[error("{0} needs an origin")]
    MissingOrigin(Algorithm),

    #[error(transparent)]
    Search(#[from] SearchError),
}

pub type PlanResult<T> = Result<T, PlanError>;

mod common;
mod heuristics;
mod metrics;

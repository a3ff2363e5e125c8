//! Chart output models

use std::path::PathBuf;

/// Files written by one chart render
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPaths {
    pub trend: PathBuf,
    pub histogram: PathBuf,
}

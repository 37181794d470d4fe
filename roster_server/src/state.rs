use std::sync::Arc;

use roster_core::solver::MicroLpSolver;
use roster_core::ScheduleEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ScheduleEngine<MicroLpSolver>>,
}

impl AppState {
    pub fn new(engine: ScheduleEngine<MicroLpSolver>) -> Self {
        AppState {
            engine: Arc::new(engine),
        }
    }
}

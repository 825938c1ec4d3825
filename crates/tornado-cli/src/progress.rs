use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;
use tornado::analysis::progress::{Progress, ProgressCallback};
use tracing::{debug, info};

const SPINNER_TICK_MS: u64 = 80;

/// Shows workflow progress as a stderr spinner and mirrors every event to the log.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: ProgressBar,
}

impl CliProgressHandler {
    pub fn new(visible: bool) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_draw_target(if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        });
        pb.set_style(spinner_style());
        Self { pb }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();
        Box::new(move |progress: Progress| match progress {
            Progress::PhaseStart { name } => {
                info!(phase = name, "Phase started.");
                pb.set_message(name);
                pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            }
            Progress::MoleculeStart { index, total } => {
                debug!("Analyzing molecule {}/{}", index + 1, total);
                pb.set_message(format!("Molecule {}/{}", index + 1, total));
            }
            Progress::PhaseFinish => {
                debug!("Phase finished.");
                pb.disable_steady_tick();
            }
        })
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

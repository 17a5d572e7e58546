//! Progress reporting for discussion runs

use colored::Colorize;
use council_application::DiscussionProgress;
use council_domain::{DiscussionState, Role, Round};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Reports progress with one bar per round and a spinner for the final draft
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
    draft_spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
            draft_spinner: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscussionProgress for ProgressReporter {
    fn on_round_start(&self, round: usize, speakers: usize) {
        let pb = self.multi.add(ProgressBar::new(speakers as u64));
        pb.set_style(Self::round_style());
        pb.set_prefix(format!("Round {}", round));
        pb.set_message("Starting...");

        *self
            .round_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_turn_complete(&self, _round: usize, role: &Role) {
        if let Some(pb) = self
            .round_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            pb.set_message(format!("{} {}", "v".green(), role.name));
            pb.inc(1);
        }
    }

    fn on_round_complete(&self, round: &Round) {
        if let Some(pb) = self
            .round_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pb.finish_with_message(format!("Round {} complete!", round.round).green().to_string());
        }
    }

    fn on_finalize_start(&self, editor: &Role) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix("Final draft");
        pb.set_message(format!("{} is writing...", editor.name));
        pb.enable_steady_tick(Duration::from_millis(100));

        *self
            .draft_spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_state_change(&self, _session_id: &str, state: DiscussionState) {
        if !state.is_terminal() {
            return;
        }

        let round_bar = self
            .round_bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let spinner = self
            .draft_spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        match state {
            DiscussionState::Finalized => {
                if let Some(pb) = spinner {
                    pb.finish_with_message("done".green().to_string());
                }
            }
            _ => {
                for pb in [round_bar, spinner].into_iter().flatten() {
                    pb.abandon_with_message("aborted".red().to_string());
                }
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl DiscussionProgress for SimpleProgress {
    fn on_round_start(&self, round: usize, speakers: usize) {
        println!(
            "{} {} ({} speakers)",
            "->".cyan(),
            format!("Round {}", round).bold(),
            speakers
        );
    }

    fn on_turn_complete(&self, _round: usize, role: &Role) {
        println!("  {} {}", "v".green(), role.name);
    }

    fn on_round_complete(&self, _round: &Round) {
        println!();
    }

    fn on_finalize_start(&self, editor: &Role) {
        println!("{} {} ({})", "->".cyan(), "Final draft".bold(), editor.name);
    }
}

//! Progress spinner shown while the model is thinking
//!
//! The animation runs as its own task and is owned by whoever started it.
//! Stopping sends on a oneshot channel and then joins the task, so the
//! spinner line is always cleared before the caller prints anything else.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const FRAME_INTERVAL: Duration = Duration::from_millis(300);

const DETECTIVE_FRAMES: &[&str] = &[
    "🔍(•‿•)",
    " 🔍( •‿•)",
    "  🔍(  •‿•",
    "   🔍(   •‿•",
    "   🔍(   -‿-",
    "  🔍(  •‿•",
    " 🔍( •‿•)",
    "🔍(•‿•)",
    // final frame, shown only if the bar is finished without clearing
    "",
];

pub struct Spinner {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl Spinner {
    /// Start animating on stdout, next to the game text.
    ///
    /// Hidden when stdout is not a terminal or `NO_COLOR` is set.
    pub fn start(message: &str) -> Self {
        let visible = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::start_with(message, visible)
    }

    pub fn start_with(message: &str, visible: bool) -> Self {
        let bar = spinner_bar(visible);

        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(DETECTIVE_FRAMES)
            .template("{msg} {spinner}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());

        let (stop, mut stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(FRAME_INTERVAL);
            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = ticker.tick() => bar.tick(),
                }
            }
            bar.finish_and_clear();
        });

        Self { stop, task }
    }

    /// Signal the animation to end and wait until its line is cleared
    pub async fn stop(self) {
        // The task only exits on this signal, so a send error means it already panicked
        let _ = self.stop.send(());
        if let Err(e) = self.task.await {
            tracing::debug!("Spinner task ended abnormally: {}", e);
        }
    }
}

fn spinner_bar(visible: bool) -> ProgressBar {
    if visible {
        ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout())
    } else {
        ProgressBar::hidden()
    }
}

/// Run `work` with a spinner, stopping it whether `work` succeeds or not
pub async fn spin_while<F: Future>(message: &str, work: F) -> F::Output {
    let spinner = Spinner::start(message);
    let output = work.await;
    spinner.stop().await;
    output
}

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::provider::LoadProgress;

pub fn render_progress(progress: LoadProgress) -> String {
    format!("Loading countries... {}/{}", progress.current, progress.total)
}

/// Prints loading progress until the provider drops its sender.
pub fn start_progress_reporter(mut rx: UnboundedReceiver<LoadProgress>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(progress) = rx.recv().await {
            println!("{}", render_progress(progress));
        }
    })
}

use crate::channels::traits::{Channel, Comment};
use std::sync::Arc;

/// Run `ch.listen` on its own task.
///
/// The listener fills `tx` while the consumer works through earlier comments.
/// The task resolves when the stream ends; an `Err` means the session is over.
pub fn spawn_listener(
    ch: Arc<dyn Channel>,
    tx: tokio::sync::mpsc::Sender<Comment>,
) -> tokio::task::JoinHandle<anyhow::Result<()>> {
    tokio::spawn(async move {
        let component = format!("channel:{}", ch.name());
        tracing::debug!(component, "channel listener starting");

        let result = ch.listen(tx).await;
        match &result {
            Ok(()) => tracing::info!("Channel {} stream closed", ch.name()),
            Err(e) => tracing::error!("Channel {} stream failed: {e}", ch.name()),
        }
        result
    })
}

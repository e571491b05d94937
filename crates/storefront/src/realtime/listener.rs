//! Background task bridging `PostgreSQL` notifications into the [`ChangeFeed`].

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgListener;
use tokio::task::JoinHandle;

use tehtehair_core::ChangeEvent;

use super::{CHANGE_CHANNEL, ChangeFeed};

/// Pause before reconnecting after the listener connection drops.
const RESTART_DELAY: Duration = Duration::from_secs(5);

/// Spawn the listener task.
///
/// The task runs for the life of the process. Whenever the dedicated
/// listener connection fails it is re-established after [`RESTART_DELAY`];
/// events raised while disconnected are lost, and pages pick up the
/// current state on their next change or reload.
pub fn spawn(pool: PgPool, feed: ChangeFeed) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Err(e) = listen(&pool, &feed).await {
                tracing::error!(
                    error = %e,
                    retry_in_secs = RESTART_DELAY.as_secs(),
                    "Change listener stopped"
                );
            }
            tokio::time::sleep(RESTART_DELAY).await;
        }
    })
}

/// Hold one `LISTEN` connection and forward everything it receives.
async fn listen(pool: &PgPool, feed: &ChangeFeed) -> Result<(), sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(CHANGE_CHANNEL).await?;
    tracing::info!(channel = CHANGE_CHANNEL, "Change listener connected");

    loop {
        let notification = listener.recv().await?;
        dispatch(feed, notification.payload());
    }
}

/// Parse one notification payload and publish it.
///
/// Malformed payloads are logged and dropped.
pub(crate) fn dispatch(feed: &ChangeFeed, payload: &str) -> Option<ChangeEvent> {
    match ChangeEvent::from_payload(payload) {
        Ok(event) => {
            let delivered = feed.publish(event);
            tracing::debug!(
                table = %event.table,
                kind = ?event.kind,
                subscribers = delivered,
                "Change published"
            );
            Some(event)
        }
        Err(e) => {
            tracing::warn!(error = %e, payload, "Ignoring malformed change notification");
            None
        }
    }
}

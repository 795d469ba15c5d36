use std::future::Future;

use anyhow::{anyhow, Result};
use log::error;
use tokio::task::JoinSet;

/// Long-running surfaces (bot dispatcher, HTTP server).
pub type ServiceTasks = JoinSet<Result<()>>;

/// Waits for `shutdown`, or for the first service that stops on its own.
///
/// A service stopping before shutdown is an error even when it returned `Ok`.
pub async fn wait_for_shutdown(
    tasks: &mut ServiceTasks,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    if tasks.is_empty() {
        return Err(anyhow!("no service was started"));
    }

    tokio::select! {
        _ = shutdown => Ok(()),
        Some(joined) = tasks.join_next() => match joined {
            Ok(Ok(())) => Err(anyhow!("a service stopped before shutdown")),
            Ok(Err(err)) => Err(err.context("a service failed")),
            Err(err) => Err(anyhow!("a service panicked: {err}")),
        },
    }
}

/// Joins whatever is still running, logging failures.
pub async fn drain(tasks: &mut ServiceTasks) {
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(err)) => error!("Error: {:?}", err),
            Err(err) => error!("Error: {:?}", err),
        }
    }
}

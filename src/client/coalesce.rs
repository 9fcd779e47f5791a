//! Snapshot coalescing
//!
//! Aggregators publish a full snapshot after every change. A display only
//! needs the latest one, so `coalescing` returns a `Client` that waits one
//! batch period after the first snapshot of a burst, then forwards only the
//! newest snapshot received in the meantime. Superseded snapshots are
//! dropped. As soon as the downstream receiver goes away the task ends,
//! even while idle or mid-batch; its receiver is dropped and the upstream
//! publisher unregisters the client on its next delivery.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::debug;

use super::pubsub_client::Client;
use crate::utils::error::Result;
use crate::utils::sync;

pub fn coalescing<T>(batch_period: Duration, downstream: UnboundedSender<T>) -> Result<Client<T>>
where
    T: Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<T>();
    let client = Client::new(tx);
    let client_id = client.id;

    sync::spawn("coalescing client", async move {
        loop {
            let mut latest = tokio::select! {
                received = rx.recv() => match received {
                    Some(value) => value,
                    None => break,
                },
                _ = downstream.closed() => break,
            };
            if !batch_period.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(batch_period) => {}
                    _ = downstream.closed() => break,
                }
            }
            while let Ok(newer) = rx.try_recv() {
                latest = newer;
            }
            if downstream.send(latest).is_err() {
                break;
            }
        }
        debug!("Coalescing loop closed for {client_id}");
    })?;

    Ok(client)
}

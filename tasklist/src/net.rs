//! Networking coordinator for wiring the TUI to the remote todo service.
//!
//! This module bridges the synchronous TUI event loop (crossterm poll-based)
//! with the async [`TodoApi`]. It spawns a background tokio task that accepts
//! [`NetCommand`]s and reports back through [`NetEvent`]s.
//!
//! # Architecture
//!
//! ```text
//! TUI (main thread)  ←── NetEvent ───  tokio background tasks
//!                     ─── NetCommand →
//! ```
//!
//! Each dispatched [`Ticket`] runs on its own tokio task and is never
//! cancelled, so settlements can reach the TUI in a different order than
//! their tickets were issued.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::client::TodoApi;
use crate::controller::{self, Settlement, Ticket};

/// Commands sent from the TUI main loop to the networking background tasks.
#[derive(Debug)]
pub enum NetCommand {
    /// Run one request against the remote service.
    Dispatch(Ticket),
    /// Stop accepting commands. Requests already in flight still settle.
    Shutdown,
}

/// Events sent from the networking background tasks to the TUI main loop.
#[derive(Debug)]
pub enum NetEvent {
    /// A dispatched request finished, successfully or not.
    Settled(Settlement),
}

/// Configuration for the networking layer.
#[derive(Debug, Clone)]
pub struct NetConfig {
    /// Channel capacity for command/event mpsc channels.
    pub channel_capacity: usize,
}

/// Default channel capacity for commands and events.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Spawn the networking background task and return channel handles.
///
/// A capacity of zero is treated as one. Must be called from within a tokio
/// runtime.
pub fn spawn_net<A>(
    api: Arc<A>,
    config: &NetConfig,
) -> (mpsc::Sender<NetCommand>, mpsc::Receiver<NetEvent>)
where
    A: TodoApi + 'static,
{
    // tokio rejects zero-capacity bounded channels.
    let capacity = config.channel_capacity.max(1);
    let (cmd_tx, cmd_rx) = mpsc::channel::<NetCommand>(capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<NetEvent>(capacity);

    tokio::spawn(async move {
        command_handler(api, cmd_rx, evt_tx).await;
    });

    (cmd_tx, evt_rx)
}

/// Background task: handle commands from the TUI main loop.
///
/// Every [`NetCommand::Dispatch`] gets its own task so that a slow request
/// never holds up the ones issued after it.
async fn command_handler<A>(
    api: Arc<A>,
    mut cmd_rx: mpsc::Receiver<NetCommand>,
    evt_tx: mpsc::Sender<NetEvent>,
) where
    A: TodoApi + 'static,
{
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            NetCommand::Dispatch(ticket) => {
                let api = Arc::clone(&api);
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    let generation = ticket.generation;
                    let settlement = controller::execute(api.as_ref(), ticket).await;
                    if evt_tx.send(NetEvent::Settled(settlement)).await.is_err() {
                        // TUI dropped; nobody left to settle with.
                        tracing::debug!(generation, "settlement dropped, event channel closed");
                    }
                });
            }
            NetCommand::Shutdown => {
                tracing::info!("net command handler shutting down");
                break;
            }
        }
    }
}

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;

/// Domain events emitted after successful mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    CountRecorded {
        id: i64,
        code: String,
        counted_units: i64,
        computed_total: f64,
    },
    CountDeleted {
        id: i64,
    },
    CatalogEntryUpserted {
        description: String,
    },
    CatalogEntryRemoved {
        description: String,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Drains the event channel, logging each event. Runs until every sender
/// handle is dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    while let Some(event) = receiver.recv().await {
        match &event {
            Event::CountRecorded {
                id,
                code,
                counted_units,
                computed_total,
            } => {
                info!(id, %code, counted_units, computed_total, "count recorded");
            }
            Event::CountDeleted { id } => info!(id, "count deleted"),
            Event::CatalogEntryUpserted { description } => {
                info!(%description, "catalog entry upserted");
            }
            Event::CatalogEntryRemoved { description } => {
                info!(%description, "catalog entry removed");
            }
        }
    }
}

//! Command dispatcher.
//!
//! Runs [`Command`]s against a [`Backend`] as background tasks and delivers
//! the results to the event loop as [`Message`]s, in completion order.

use crate::api::Backend;
use crate::app::{Command, Message};
use tokio::sync::mpsc::UnboundedSender;

/// Spawns one task per command; nothing is awaited or cancelled.
#[derive(Debug, Clone)]
pub struct Dispatcher<B: Backend> {
    backend: B,
    tx: UnboundedSender<Message>,
}

impl<B: Backend> Dispatcher<B> {
    pub fn new(backend: B, tx: UnboundedSender<Message>) -> Self {
        Self { backend, tx }
    }

    /// Run every command in order.
    pub fn dispatch_all(&self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.dispatch(command);
        }
    }

    /// Spawn the request for `command`.
    ///
    /// # Details
    /// Must be called from within a tokio runtime. If the receiver is gone the
    /// result is dropped.
    pub fn dispatch(&self, command: Command) {
        tracing::debug!(?command, "dispatch");
        let backend = self.backend.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let message = match command {
                Command::FetchPage(query) => Message::Page(backend.fetch_page(&query).await),
                Command::ExportCsv(query) => Message::Export(backend.export_csv(&query).await),
                Command::FetchDetail(id) => {
                    let result = backend.fetch_detail(&id).await;
                    Message::Detail { id, result }
                }
                Command::SearchArticles { side, term } => Message::Links {
                    side,
                    result: backend.search_articles(&term).await,
                },
            };
            if tx.send(message).is_err() {
                tracing::debug!("event loop gone, dropping response");
            }
        });
    }
}

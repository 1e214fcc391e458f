//! Entry point for applications.

use std::sync::Arc;

use crate::bound::Bound;
use crate::client::TrelloClient;
use crate::collections::Boards;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::requests;
use crate::transport::Transport;
use crate::types::Member;

/// The member the token belongs to.
const ME: &str = "me";

/// Owns the client and exposes the top of the object graph.
///
/// ```no_run
/// use trello_core::Trello;
///
/// let trello = Trello::new("app-key")?;
/// trello.authorize("member-token");
/// let boards = trello.boards()?;
/// if let Some(board) = boards.get("Roadmap") {
///     for list in &board.lists()? {
///         println!("{}: {} cards", list.name, list.cards()?.len());
///     }
/// }
/// # Ok::<(), trello_core::ApiError>(())
/// ```
#[derive(Debug)]
pub struct Trello {
    client: TrelloClient,
}

impl Trello {
    pub fn new(application_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: TrelloClient::new(ClientConfig::new(application_key))?,
        })
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            client: TrelloClient::with_transport(config, transport),
        }
    }

    pub fn authorize(&self, token: impl Into<String>) {
        self.client.authorize(token);
    }

    pub fn deauthorize(&self) {
        self.client.deauthorize();
    }

    /// Boards of the authenticated member.
    pub fn boards(&self) -> Result<Boards<'_>> {
        Boards::fetch(&self.client, (), &requests::boards_for_member(ME))
    }

    /// The authenticated member, `None` if the API does not know them.
    pub fn me(&self) -> Result<Option<Bound<'_, Member>>> {
        self.client.request_bound(&requests::member(ME))
    }

    pub fn client(&self) -> &TrelloClient {
        &self.client
    }
}

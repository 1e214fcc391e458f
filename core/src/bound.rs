//! Entities paired with the client that fetched them.

use std::fmt;
use std::ops::Deref;

use crate::client::TrelloClient;

/// An entity together with the client it was decoded by.
///
/// Navigation accessors live on `Bound<'c, T>` so that further requests go
/// through the same authenticated client. The client is not part of the
/// entity's identity: `Debug` and `PartialEq` only look at the entity.
#[derive(Clone, Copy)]
pub struct Bound<'c, T> {
    client: &'c TrelloClient,
    entity: T,
}

impl<'c, T> Bound<'c, T> {
    pub fn new(client: &'c TrelloClient, entity: T) -> Self {
        Self { client, entity }
    }

    pub fn client(&self) -> &'c TrelloClient {
        self.client
    }

    pub fn entity(&self) -> &T {
        &self.entity
    }

    pub fn into_inner(self) -> T {
        self.entity
    }
}

impl<T> Deref for Bound<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.entity
    }
}

impl<T: fmt::Debug> fmt::Debug for Bound<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.entity.fmt(f)
    }
}

impl<T: PartialEq> PartialEq for Bound<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity
    }
}

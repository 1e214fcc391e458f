//! Collections fetched in a single round trip.
//!
//! # Design
//! A `Collection` is composed of the client, the parent it was fetched for
//! and the bound elements; it is not a growable sequence. Lookups are
//! case-sensitive exact matches returning the first hit or `None`. `add`
//! methods create the element remotely and do not touch the elements already
//! held; fetch the collection again to see the new element.

use std::slice;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::bound::Bound;
use crate::client::TrelloClient;
use crate::error::Result;
use crate::requests::{self, ApiRequest};
use crate::types::{
    Attachment, Board, Card, CheckList, Label, LabelColor, List, Member, NewAttachment, NewCard,
    NewCheckItem, Organization,
};

/// Elements of type `T` fetched for a parent of type `P`.
#[derive(Debug)]
pub struct Collection<'c, T, P = ()> {
    client: &'c TrelloClient,
    parent: P,
    items: Vec<Bound<'c, T>>,
}

pub type Boards<'c> = Collection<'c, Board>;
pub type Lists<'c> = Collection<'c, List>;
pub type Cards<'c> = Collection<'c, Card, List>;
pub type Members<'c> = Collection<'c, Member>;
pub type Organizations<'c> = Collection<'c, Organization>;
pub type Labels<'c> = Collection<'c, Label, Card>;
pub type BoardLabels<'c> = Collection<'c, Label>;
pub type Attachments<'c> = Collection<'c, Attachment, Card>;
pub type CheckLists<'c> = Collection<'c, CheckList, Card>;

impl<'c, T: DeserializeOwned, P> Collection<'c, T, P> {
    /// Run `request` once and bind every decoded element. A 404 gives an
    /// empty collection.
    pub fn fetch(client: &'c TrelloClient, parent: P, request: &ApiRequest) -> Result<Self> {
        let items = client.request_all(request)?;
        debug!(path = %request.template, count = items.len(), "fetched collection");
        Ok(Self {
            client,
            parent,
            items,
        })
    }
}

impl<'c, T, P> Collection<'c, T, P> {
    pub fn client(&self) -> &'c TrelloClient {
        self.client
    }

    pub fn parent(&self) -> &P {
        &self.parent
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Bound<'c, T>> {
        self.items.iter()
    }

    /// Element at `index` in the order the API returned them.
    pub fn at(&self, index: usize) -> Option<&Bound<'c, T>> {
        self.items.get(index)
    }

    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&Bound<'c, T>> {
        self.items.iter().find(|item| predicate(item.entity()))
    }

    pub fn into_vec(self) -> Vec<Bound<'c, T>> {
        self.items
    }
}

impl<'a, 'c, T, P> IntoIterator for &'a Collection<'c, T, P> {
    type Item = &'a Bound<'c, T>;
    type IntoIter = slice::Iter<'a, Bound<'c, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'c, T, P> IntoIterator for Collection<'c, T, P> {
    type Item = Bound<'c, T>;
    type IntoIter = std::vec::IntoIter<Bound<'c, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Name lookups
// ---------------------------------------------------------------------------

impl<'c> Boards<'c> {
    pub fn get(&self, name: &str) -> Option<&Bound<'c, Board>> {
        self.find(|board| board.name == name)
    }
}

impl<'c> Lists<'c> {
    pub fn get(&self, name: &str) -> Option<&Bound<'c, List>> {
        self.find(|list| list.name == name)
    }
}

impl<'c> Members<'c> {
    /// Member with this username.
    pub fn get(&self, username: &str) -> Option<&Bound<'c, Member>> {
        self.find(|member| member.username == username)
    }

    pub fn by_full_name(&self, full_name: &str) -> Option<&Bound<'c, Member>> {
        self.find(|member| member.full_name == full_name)
    }
}

impl<'c> Organizations<'c> {
    pub fn get(&self, name: &str) -> Option<&Bound<'c, Organization>> {
        self.find(|org| org.name == name)
    }
}

impl<'c, P> Collection<'c, Label, P> {
    pub fn get(&self, name: &str) -> Option<&Bound<'c, Label>> {
        self.find(|label| label.name == name)
    }

    pub fn by_color(&self, color: LabelColor) -> Option<&Bound<'c, Label>> {
        self.find(|label| label.color == Some(color))
    }
}

impl<'c> Attachments<'c> {
    pub fn get(&self, name: &str) -> Option<&Bound<'c, Attachment>> {
        self.find(|attachment| attachment.name == name)
    }
}

impl<'c> CheckLists<'c> {
    pub fn get(&self, name: &str) -> Option<&Bound<'c, CheckList>> {
        self.find(|checklist| checklist.name == name)
    }
}

// ---------------------------------------------------------------------------
// Remote creation
// ---------------------------------------------------------------------------

impl<'c> Cards<'c> {
    pub fn get(&self, name: &str) -> Option<&Bound<'c, Card>> {
        self.find(|card| card.name == name)
    }

    /// First card whose "PLD" task id equals `task_id`. Each card costs two
    /// requests (its board, then the board's field definitions).
    pub fn find_by_task_id(&self, task_id: i64) -> Result<Option<&Bound<'c, Card>>> {
        for card in &self.items {
            if card.inner_system_task_id()? == task_id {
                return Ok(Some(card));
            }
        }
        Ok(None)
    }

    /// Create `card` in this collection's list.
    ///
    /// The list id is taken from the parent list. Returns `Ok(None)` without
    /// any request when the card has no name.
    pub fn add(&self, card: &NewCard) -> Result<Option<Bound<'c, Card>>> {
        let card = NewCard {
            list_id: self.parent.id.clone(),
            ..card.clone()
        };
        let Some(request) = requests::add_card(&card) else {
            debug!(list = %self.parent.id, "skipping card without name or list");
            return Ok(None);
        };
        self.client.request_bound(&request)
    }
}

impl<'c> Labels<'c> {
    /// Attach a label, by lower-cased name, to the parent card.
    pub fn add(&self, label: &Label) -> Result<()> {
        self.client.request(&requests::add_label(&self.parent.id, label))
    }
}

impl<'c> Attachments<'c> {
    pub fn add(&self, attachment: &NewAttachment) -> Result<()> {
        self.client
            .request(&requests::add_attachment(&self.parent.id, attachment))
    }
}

impl<'c> CheckLists<'c> {
    pub fn add(&self, name: &str) -> Result<()> {
        self.client
            .request(&requests::add_checklist(&self.parent.id, name))
    }
}

impl<'c> Bound<'c, CheckList> {
    /// Append an item to this checklist. The held `check_items` are not updated.
    pub fn add_item(&self, item: &NewCheckItem) -> Result<()> {
        self.client()
            .request(&requests::add_check_item(&self.id, item))
    }
}

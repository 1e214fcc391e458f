//! Navigation accessors. Every call is a fresh round trip through the
//! client the entity was bound to.

use tracing::instrument;

use crate::bound::Bound;
use crate::collections::{
    Attachments, BoardLabels, Boards, Cards, CheckLists, Labels, Lists, Members, Organizations,
};
use crate::error::Result;
use crate::requests;
use crate::types::{Board, Card, CustomField, List, Member, Organization};

impl<'c> Bound<'c, Board> {
    #[instrument(level = "debug", skip(self), fields(board = %self.id))]
    pub fn lists(&self) -> Result<Lists<'c>> {
        Lists::fetch(self.client(), (), &requests::lists_for_board(&self.id))
    }

    /// Custom field definitions of the board; empty when the board has none.
    #[instrument(level = "debug", skip(self), fields(board = %self.id))]
    pub fn custom_fields(&self) -> Result<Vec<CustomField>> {
        Ok(self
            .client()
            .request_for(&requests::custom_fields_for_board(&self.id))?
            .unwrap_or_default())
    }

    pub fn members(&self) -> Result<Members<'c>> {
        Members::fetch(self.client(), (), &requests::members_of_board(&self.id))
    }

    pub fn labels(&self) -> Result<BoardLabels<'c>> {
        BoardLabels::fetch(self.client(), (), &requests::labels_for_board(&self.id))
    }
}

impl<'c> Bound<'c, List> {
    #[instrument(level = "debug", skip(self), fields(list = %self.id))]
    pub fn cards(&self) -> Result<Cards<'c>> {
        Cards::fetch(
            self.client(),
            self.entity().clone(),
            &requests::cards_for_list(&self.id),
        )
    }
}

impl<'c> Bound<'c, Card> {
    /// The board the card belongs to, or `None` if it is gone.
    #[instrument(level = "debug", skip(self), fields(card = %self.id))]
    pub fn board(&self) -> Result<Option<Bound<'c, Board>>> {
        self.client().request_bound(&requests::board(&self.board_id))
    }

    pub fn labels(&self) -> Result<Labels<'c>> {
        Labels::fetch(
            self.client(),
            self.entity().clone(),
            &requests::labels_of_card(&self.id),
        )
    }

    pub fn checklists(&self) -> Result<CheckLists<'c>> {
        CheckLists::fetch(
            self.client(),
            self.entity().clone(),
            &requests::checklists_of_card(&self.id),
        )
    }

    pub fn attachments(&self) -> Result<Attachments<'c>> {
        Attachments::fetch(
            self.client(),
            self.entity().clone(),
            &requests::attachments_of_card(&self.id),
        )
    }

    pub fn members(&self) -> Result<Members<'c>> {
        Members::fetch(self.client(), (), &requests::members_of_card(&self.id))
    }
}

impl<'c> Bound<'c, Member> {
    pub fn organizations(&self) -> Result<Organizations<'c>> {
        Organizations::fetch(
            self.client(),
            (),
            &requests::organizations_for_member(&self.username),
        )
    }

    pub fn boards(&self) -> Result<Boards<'c>> {
        Boards::fetch(self.client(), (), &requests::boards_for_member(&self.username))
    }
}

impl<'c> Bound<'c, Organization> {
    pub fn members(&self) -> Result<Members<'c>> {
        Members::fetch(self.client(), (), &requests::members_of_organization(&self.name))
    }

    pub fn boards(&self) -> Result<Boards<'c>> {
        Boards::fetch(self.client(), (), &requests::boards_of_organization(&self.name))
    }
}

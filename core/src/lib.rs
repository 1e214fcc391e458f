//! Typed client for the Trello REST API.
//!
//! # Overview
//! A single `TrelloClient` turns `ApiRequest` values into plain-data
//! `HttpRequest`s, hands them to a `Transport`, validates the returned
//! `HttpResponse` and decodes the body. Decoded entities come back wrapped in
//! `Bound`, which pairs the entity with the client that fetched it so its
//! navigation accessors (`board.lists()`, `list.cards()`, ...) can issue the
//! next request through the same authenticated client.
//!
//! # Design
//! - `Trello` is the entry point: `Trello::new(key)`, `authorize(token)`, `boards()`.
//! - Every navigation accessor performs a fresh round trip. Nothing is cached.
//! - Collections are fetched in one call on construction and own their
//!   elements; `add` on a collection creates remotely and leaves the fetched
//!   elements untouched.
//! - HTTP 404 on a read is an empty result (`Ok(None)` or an empty collection),
//!   401 is `ApiError::Authentication`, every other non-200 is `ApiError::Request`.

pub mod auth;
pub mod bound;
pub mod client;
pub mod collections;
pub mod config;
pub mod custom_field;
pub mod error;
pub mod http;
pub mod navigation;
pub mod requests;
pub mod transport;
pub mod trello;
pub mod types;

pub use auth::Authenticator;
pub use bound::Bound;
pub use client::TrelloClient;
pub use collections::{
    Attachments, BoardLabels, Boards, Cards, CheckLists, Collection, Labels, Lists, Members,
    Organizations,
};
pub use config::ClientConfig;
pub use custom_field::CustomFieldValue;
pub use error::{ApiError, Result};
pub use http::{FilePart, HttpBody, HttpMethod, HttpRequest, HttpResponse};
pub use requests::{ApiBody, ApiRequest};
pub use transport::{ReqwestTransport, Transport};
pub use trello::Trello;
pub use types::{
    Attachment, AttachmentPayload, Board, Card, CheckItem, CheckItemState, CheckList,
    CustomField, CustomFieldItem, CustomFieldType, Label, LabelColor, List, Member, NewAttachment,
    NewCard, NewCheckItem, Organization,
};

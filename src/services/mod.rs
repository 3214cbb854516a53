pub mod auth;
pub mod changeset;
pub mod embeds;

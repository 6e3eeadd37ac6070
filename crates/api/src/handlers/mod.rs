pub mod auth;
pub mod cards;
pub mod decks;
pub mod reports;
pub mod study;
pub mod tags;

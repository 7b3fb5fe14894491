//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate read-modify-write cycles over the notes store.
//! - Keep view/controller and CLI layers decoupled from storage details.

pub mod note_service;

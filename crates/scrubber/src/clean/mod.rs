//! Safe removal of selected files.
//!
//! Removal goes through a [`RemovalBackend`] chosen once at startup: the
//! platform trash, or permanent unlink. Confirmation gates go through a
//! [`Prompter`] so they can be scripted.

pub mod backend;
pub mod engine;
pub mod prompt;

pub use backend::{
    ensure_trash_dir, home_trash_dir, select_backend, PermanentBackend, RemovalBackend, TrashBackend,
};
pub use engine::{DeleteOptions, DeleteOutcome, DeleteReport, Deleter};
pub use prompt::{Prompter, ScriptedPrompter, TerminalPrompter};

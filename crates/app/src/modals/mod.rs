//! Modal dialogs for the application.
//!
//! Destructive actions go through a dialog so the user confirms them first.

pub mod confirm_dialog;

pub use confirm_dialog::ConfirmDialog;

use egui::Context;

/// Trait for modal dialogs.
pub trait Modal {
    /// Update and render the modal. Returns true if the modal should close.
    fn update(&mut self, ctx: &Context) -> bool;

    /// Returns true if the modal is currently open.
    fn is_open(&self) -> bool;

    /// Open the modal.
    fn open(&mut self);

    /// Close the modal.
    fn close(&mut self);
}

/// Result from a modal dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalResult<T> {
    /// User hasn't made a decision yet
    Pending,
    /// User confirmed
    Confirmed(T),
    /// User cancelled
    Cancelled,
}

//! Yes/no confirmation dialog.

use super::{Modal, ModalResult};
use egui::{Align2, Area, Context, Id, Key, Vec2};

pub const CLEAR_HISTORY_QUESTION: &str = "Are you sure you want to clear your prompt history?";

pub struct ConfirmDialog {
    is_open: bool,
    question: String,
    result: ModalResult<()>,
    /// Dialog ID for egui
    id: Id,
}

impl ConfirmDialog {
    pub fn new(id: impl std::hash::Hash, question: impl Into<String>) -> Self {
        Self {
            is_open: false,
            question: question.into(),
            result: ModalResult::Pending,
            id: Id::new(id),
        }
    }

    /// Record the user's answer and close.
    pub fn answer(&mut self, confirmed: bool) {
        self.result = if confirmed {
            ModalResult::Confirmed(())
        } else {
            ModalResult::Cancelled
        };
        self.is_open = false;
    }

    /// Take the answer, leaving the dialog pending again.
    pub fn take_result(&mut self) -> ModalResult<()> {
        std::mem::replace(&mut self.result, ModalResult::Pending)
    }
}

impl Modal for ConfirmDialog {
    fn update(&mut self, ctx: &Context) -> bool {
        if !self.is_open {
            return false;
        }

        let mut answer = None;

        // Dim the rest of the window
        Area::new(self.id.with("overlay"))
            .anchor(Align2::LEFT_TOP, Vec2::ZERO)
            .show(ctx, |ui| {
                let screen_rect = ctx.screen_rect();
                ui.allocate_response(screen_rect.size(), egui::Sense::click());
                ui.painter()
                    .rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(160));
            });

        egui::Window::new("Please confirm")
            .id(self.id.with("window"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.set_min_width(320.0);
                ui.add_space(8.0);
                ui.label(&self.question);
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        answer = Some(true);
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            answer = Some(false);
        }

        match answer {
            Some(confirmed) => {
                self.answer(confirmed);
                true
            }
            None => false,
        }
    }

    fn is_open(&self) -> bool {
        self.is_open
    }

    fn open(&mut self) {
        self.is_open = true;
        self.result = ModalResult::Pending;
    }

    fn close(&mut self) {
        self.answer(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_dialog_creation() {
        let dialog = ConfirmDialog::new("test", "Delete everything?");
        assert!(!dialog.is_open());
        assert_eq!(dialog.question, "Delete everything?");
        assert_eq!(dialog.result, ModalResult::Pending);
    }

    #[test]
    fn test_answer_closes_and_result_is_taken_once() {
        let mut dialog = ConfirmDialog::new("test", CLEAR_HISTORY_QUESTION);
        dialog.open();
        assert!(dialog.is_open());

        dialog.answer(true);
        assert!(!dialog.is_open());
        assert_eq!(dialog.take_result(), ModalResult::Confirmed(()));
        assert_eq!(dialog.take_result(), ModalResult::Pending);
    }

    #[test]
    fn test_close_counts_as_cancel() {
        let mut dialog = ConfirmDialog::new("test", "Discard draft?");
        dialog.open();
        dialog.close();
        assert_eq!(dialog.take_result(), ModalResult::Cancelled);
        assert_eq!(dialog.question, "Discard draft?");
    }

    #[test]
    fn test_reopening_resets_stale_answer() {
        let mut dialog = ConfirmDialog::new("test", CLEAR_HISTORY_QUESTION);
        dialog.open();
        dialog.answer(false);
        dialog.open();
        assert_eq!(dialog.take_result(), ModalResult::Pending);
    }
}

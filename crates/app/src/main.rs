use eframe::egui;
use parking_lot::Mutex;
use shared::preferences::Theme;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

mod accessibility;
mod export;
mod history;
mod modals;
mod notifications;
mod overlays;
mod state;
mod store;
mod utils;

use export::ShareTarget;
use modals::Modal;
use overlays::{Key, KeyPress, Overlay};
use shared::events::NotificationKind;
use state::AppState;
use store::PreferenceStore;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = utils::load_settings_or_default();
    let store = PreferenceStore::open(utils::preferences_path()).shared();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 520.0]),
        vsync: true,
        ..Default::default()
    };
    eframe::run_native(
        "Plott",
        options,
        Box::new(move |cc| {
            let system_theme = cc.integration_info.system_theme.map(|t| match t {
                eframe::Theme::Dark => Theme::Dark,
                eframe::Theme::Light => Theme::Light,
            });
            let state = AppState::new(settings, store, system_theme);
            state.start_probe();
            Box::new(PlottApp {
                state: Arc::new(Mutex::new(state)),
            })
        }),
    )
}

struct PlottApp {
    state: Arc<Mutex<AppState>>,
}

impl eframe::App for PlottApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut s = self.state.lock();
        let now = Instant::now();

        s.tick(now);

        // Keep polling while requests are in flight or toasts are pending
        if s.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        } else if let Some(expiry) = s.notifications.next_expiry() {
            ctx.request_repaint_after(expiry.saturating_duration_since(now));
        }

        apply_style(ctx, &s);

        if !s.clear_dialog.is_open() {
            for press in take_key_presses(ctx) {
                s.handle_key(press);
            }
        }

        render_header(&mut s, ctx);
        render_history_panel(&mut s, ctx);
        render_main(&mut s, ctx, now);
        render_windows(&mut s, ctx);
        render_toasts(&mut s, ctx);

        if s.clear_dialog.update(ctx) {
            s.resolve_clear_history();
        }
    }
}

fn map_key(key: egui::Key) -> Key {
    match key {
        egui::Key::Enter => Key::Enter,
        egui::Key::Slash => Key::Slash,
        egui::Key::H => Key::H,
        egui::Key::E => Key::E,
        egui::Key::Escape => Key::Escape,
        _ => Key::Other,
    }
}

/// Pull this frame's key presses out of `events`.
///
/// Modifier shortcuts are removed so focused widgets never see them
/// (a text edit would treat Ctrl+H as backspace). Plain keys stay in place.
fn drain_key_presses(events: &mut Vec<egui::Event>) -> Vec<KeyPress> {
    let mut presses = Vec::new();
    events.retain(|event| match event {
        egui::Event::Key {
            key,
            pressed: true,
            repeat: false,
            modifiers,
            ..
        } => {
            let press = KeyPress {
                key: map_key(*key),
                command: modifiers.command || modifiers.ctrl,
            };
            presses.push(press);
            !(press.command && !matches!(press.key, Key::Other | Key::Escape))
        }
        _ => true,
    });
    presses
}

fn take_key_presses(ctx: &egui::Context) -> Vec<KeyPress> {
    ctx.input_mut(|i| drain_key_presses(&mut i.events))
}

fn apply_style(ctx: &egui::Context, s: &AppState) {
    let prefs = s.accessibility.preferences();
    let mut style = (*ctx.style()).clone();
    style.visuals.window_rounding = egui::Rounding::same(12.0);
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);

    let (accent, panel) = if prefs.theme.is_dark() {
        style.visuals = egui::Visuals::dark();
        (
            egui::Color32::from_rgb(100, 180, 255),
            egui::Color32::from_rgb(30, 30, 35),
        )
    } else {
        style.visuals = egui::Visuals::light();
        (
            egui::Color32::from_rgb(50, 100, 200),
            egui::Color32::from_rgb(250, 250, 252),
        )
    };
    style.visuals.panel_fill = panel;
    style.visuals.widgets.hovered.bg_stroke = egui::Stroke::new(2.0, accent);
    style.visuals.selection.stroke = egui::Stroke::new(2.0, accent);

    if prefs.high_contrast {
        let (fg, bg) = if prefs.theme.is_dark() {
            (egui::Color32::WHITE, egui::Color32::BLACK)
        } else {
            (egui::Color32::BLACK, egui::Color32::WHITE)
        };
        style.visuals.override_text_color = Some(fg);
        style.visuals.panel_fill = bg;
        style.visuals.window_fill = bg;
        style.visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.5, fg);
        style.visuals.widgets.hovered.bg_stroke = egui::Stroke::new(3.0, fg);
        style.visuals.selection.stroke = egui::Stroke::new(3.0, fg);
    }
    ctx.set_style(style);
}

fn render_header(s: &mut AppState, ctx: &egui::Context) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.heading(egui::RichText::new("Plott").size(24.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Help").on_hover_text("Ctrl+/").clicked() {
                    s.overlays.toggle(Overlay::Help);
                }
                if ui.button("History").on_hover_text("Ctrl+H").clicked() {
                    s.overlays.toggle(Overlay::History);
                }
                if ui.button("Credits").clicked() {
                    s.overlays.toggle(Overlay::Credits);
                }
                if ui.button("Accessibility").clicked() {
                    s.overlays.toggle(Overlay::AccessibilityMenu);
                }
            });
        });
        if let Some(announcement) = s.accessibility.live_announcement() {
            ui.label(egui::RichText::new(announcement).small().weak());
        }
        ui.add_space(4.0);
    });
}

fn render_history_panel(s: &mut AppState, ctx: &egui::Context) {
    if !s.overlays.is_open(Overlay::History) {
        return;
    }
    egui::SidePanel::right("history")
        .resizable(true)
        .default_width(300.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("History");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("✕").clicked() {
                        s.overlays.close(Overlay::History);
                    }
                    if !s.history.is_empty() && ui.button("Clear").clicked() {
                        s.request_clear_history();
                    }
                });
            });
            ui.separator();

            if s.history.is_empty() {
                ui.label("No history yet");
                return;
            }

            let mut use_id = None;
            let mut star_id = None;
            let mut delete_id = None;
            egui::ScrollArea::vertical().show(ui, |ui| {
                for entry in s.history.list() {
                    ui.group(|ui| {
                        ui.label(&entry.text);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(entry.relative_time()).small().weak())
                                .on_hover_text(entry.formatted_date());
                            if ui.small_button("Use").clicked() {
                                use_id = Some(entry.id);
                            }
                            let star = if entry.starred { "★" } else { "☆" };
                            if ui.small_button(star).clicked() {
                                star_id = Some(entry.id);
                            }
                            if ui.small_button("Delete").clicked() {
                                delete_id = Some(entry.id);
                            }
                        });
                    });
                }
            });

            if let Some(id) = use_id {
                s.use_from_history(id);
            }
            if let Some(id) = star_id {
                s.history.toggle_star(id);
            }
            if let Some(id) = delete_id {
                s.history.delete(id);
            }
        });
}

fn render_main(s: &mut AppState, ctx: &egui::Context, now: Instant) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.label("Describe the diagram you want");

        let mut draft = s.prompt().to_string();
        let response = ui.add_sized(
            [ui.available_width(), 96.0],
            egui::TextEdit::multiline(&mut draft)
                .hint_text("e.g. Compare Q1 and Q2 sales by region")
                .interactive(!s.is_enhancing),
        );
        if response.changed() {
            s.set_prompt(draft);
        }

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!(
                    "{}/{} words",
                    s.word_count(),
                    s.settings.max_prompt_words
                ))
                .small()
                .weak(),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if s.is_loading { "Generating..." } else { "Generate" };
                if ui
                    .add_enabled(s.can_submit(), egui::Button::new(label))
                    .on_hover_text("Ctrl+Enter")
                    .clicked()
                {
                    s.submit();
                }
                let label = if s.is_enhancing { "Enhancing..." } else { "Enhance" };
                if ui
                    .add_enabled(s.can_enhance(), egui::Button::new(label))
                    .on_hover_text("Ctrl+E")
                    .clicked()
                {
                    s.enhance();
                }
            });
        });

        if let Some(error) = &s.error {
            ui.colored_label(egui::Color32::from_rgb(200, 60, 60), error);
        }

        ui.separator();

        if s.is_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(s.loading_message(now));
            });
            return;
        }

        render_result(s, ui);
    });
}

fn render_result(s: &mut AppState, ui: &mut egui::Ui) {
    let Some(result) = s.result.clone() else {
        return;
    };
    ui.label(&result.explanation);

    if result.charts.is_empty() {
        ui.label("No diagrams were returned for this prompt.");
        return;
    }

    ui.horizontal_wrapped(|ui| {
        for (i, chart) in result.charts.iter().enumerate() {
            let selected = s.selected_index() == Some(i);
            if ui.selectable_label(selected, &chart.chart_type).clicked() {
                s.select_chart(i);
            }
        }
    });

    let Some(chart) = s.selected_chart().cloned() else {
        return;
    };
    ui.group(|ui| {
        ui.strong(&chart.chart_type);
        ui.label(&chart.reason);
        if chart.is_embedded() {
            ui.label(egui::RichText::new("Embedded PNG image").weak());
        } else {
            ui.hyperlink_to("Open image", &chart.image);
        }
    });

    ui.horizontal(|ui| {
        let label = if s.is_downloading { "Saving..." } else { "Download" };
        if ui
            .add_enabled(!s.is_downloading, egui::Button::new(label))
            .clicked()
        {
            s.download_selected();
        }
        if ui.button("Copy image link").clicked() {
            ui.output_mut(|o| o.copied_text = chart.image.clone());
            s.notifications
                .push("Copied!", "Image link copied to clipboard", NotificationKind::Success);
        }
        if ui.button("Share").clicked() {
            s.toggle_share_menu();
        }
    });

    if s.overlays.is_open(Overlay::ShareMenu) {
        ui.horizontal(|ui| {
            for target in ShareTarget::ALL {
                if ui.button(target.label()).clicked() {
                    s.share_to(target);
                }
            }
        });
    }
}

fn render_windows(s: &mut AppState, ctx: &egui::Context) {
    let mut help_open = s.overlays.is_open(Overlay::Help);
    egui::Window::new("Keyboard shortcuts")
        .collapsible(false)
        .resizable(false)
        .open(&mut help_open)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            egui::Grid::new("shortcuts").striped(true).show(ui, |ui| {
                for (keys, what) in [
                    ("Ctrl+Enter", "Generate diagrams"),
                    ("Ctrl+E", "Enhance prompt"),
                    ("Ctrl+H", "Toggle history"),
                    ("Ctrl+/", "Toggle this help"),
                    ("Esc", "Close the open panel"),
                ] {
                    ui.monospace(keys);
                    ui.label(what);
                    ui.end_row();
                }
            });
        });
    s.overlays.set(Overlay::Help, help_open);

    let mut a11y_open = s.overlays.is_open(Overlay::AccessibilityMenu);
    egui::Window::new("Accessibility")
        .collapsible(false)
        .resizable(false)
        .open(&mut a11y_open)
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 56.0])
        .show(ctx, |ui| {
            let dark = s.accessibility.theme().is_dark();
            if ui
                .button(if dark { "Switch to light mode" } else { "Switch to dark mode" })
                .clicked()
            {
                s.accessibility.toggle_theme();
            }
            let mut high_contrast = s.accessibility.high_contrast();
            if ui.checkbox(&mut high_contrast, "High contrast").changed() {
                s.accessibility.toggle_high_contrast();
            }
        });
    s.overlays.set(Overlay::AccessibilityMenu, a11y_open);

    let mut credits_open = s.overlays.is_open(Overlay::Credits);
    egui::Window::new("Credits")
        .collapsible(false)
        .open(&mut credits_open)
        .show(ctx, |ui| {
            ui.label("Plott turns plain-language descriptions into diagrams.");
        });
    s.overlays.set(Overlay::Credits, credits_open);
}

fn render_toasts(s: &mut AppState, ctx: &egui::Context) {
    let mut dismissed = Vec::new();
    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for note in s.notifications.visible() {
                let color = match note.kind {
                    NotificationKind::Info => egui::Color32::from_rgb(70, 130, 180),
                    NotificationKind::Success => egui::Color32::from_rgb(60, 150, 90),
                    NotificationKind::Warning => egui::Color32::from_rgb(200, 150, 50),
                    NotificationKind::Error => egui::Color32::from_rgb(190, 70, 70),
                };
                egui::Frame::popup(ui.style())
                    .stroke(egui::Stroke::new(2.0, color))
                    .show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.horizontal(|ui| {
                            ui.strong(&note.title);
                            if ui.small_button("✕").clicked() {
                                dismissed.push(note.id);
                            }
                        });
                        ui.label(&note.message);
                    });
            }
        });
    for id in dismissed {
        s.notifications.dismiss(id);
    }
}

use crate::statics;
use crate::{BackupStore, ConfigStore, EditSession, Listing, ListingState, SaveOutcome, presets};
use anyhow::Context as _;
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::path::{Path, PathBuf};

pub fn run_gui() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 700.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(&title, options, Box::new(|_cc| Ok(Box::new(OcseApp::new()))))
}

/// The main application state and GUI logic.
/// Owns the opened store, the backup store, the listing snapshot, and at
/// most one edit session (the modal entry editor).
struct OcseApp {
    store: Option<ConfigStore>,
    store_dir: PathBuf,
    backups: BackupStore,
    listing: Listing,

    // Listing filters.
    filter_query: String,
    show_all: bool,

    // Active edit dialog.
    edit: Option<EditSession>,

    // Modal notice after a successful save.
    saved_notice_open: bool,

    about_open: bool,
    status: String,
    last_error: Option<String>,
    theme_dark: bool,
}

impl OcseApp {
    fn new() -> OcseApp {
        let mut app = OcseApp {
            store: None,
            store_dir: PathBuf::from(statics::STORE_DIR_DEVICE),
            backups: BackupStore::new(BackupStore::default_dir()),
            listing: Listing::empty(),
            filter_query: String::new(),
            show_all: false,
            edit: None,
            saved_notice_open: false,
            about_open: false,
            status: String::new(),
            last_error: None,
            theme_dark: true,
        };

        // On the device the store sits at a fixed path; try it right away.
        // Elsewhere this fails quietly and the user picks a directory.
        match Self::try_open_store(&app.store_dir.clone()) {
            Ok(store) => app.adopt_store(store),
            Err(e) => {
                tracing::info!("device store not available at startup: {e:#}");
                app.listing.fail(format!("{e:#}"));
            }
        }
        app
    }

    fn try_open_store(dir: &Path) -> anyhow::Result<ConfigStore> {
        ConfigStore::open(dir)
            .with_context(|| format!("opening config store at {}", dir.display()))
    }

    fn adopt_store(&mut self, store: ConfigStore) {
        self.store_dir = store.dir().to_owned();
        self.status = format!("Loaded {}", self.store_dir.display());
        self.listing.refresh(&store);
        self.store = Some(store);
        self.edit = None;
    }

    fn folder_dialog(&self) -> rfd::FileDialog {
        let mut dlg = rfd::FileDialog::new();
        if self.store_dir.is_dir() {
            dlg = dlg.set_directory(&self.store_dir);
        }
        dlg
    }

    fn open_store_dialog(&mut self) {
        let Some(dir) = self.folder_dialog().pick_folder() else {
            return;
        };
        self.open_store_at(&dir);
    }

    fn open_store_at(&mut self, dir: &Path) {
        match Self::try_open_store(dir) {
            Ok(store) => {
                self.adopt_store(store);
                self.last_error = None;
            }
            Err(e) => {
                let msg = format!("{e:#}");
                self.store = None;
                self.listing.fail(msg.as_str());
                self.last_error = Some(msg);
            }
        }
    }

    fn render_edit_dialog(&mut self, ctx: &egui::Context) {
        let Some(mut session) = self.edit.take() else {
            return;
        };

        let mut keep_open = true;
        let mut close_requested = false;

        egui::Window::new(session.key())
            .collapsible(false)
            .default_width(560.0)
            .open(&mut keep_open)
            .show(ctx, |ui| {
                let mut pretty = session.pretty();
                if ui.checkbox(&mut pretty, statics::EN_SWITCH_FORMAT).changed() {
                    // On failure the session keeps its mode, so the checkbox
                    // snaps back on the next frame.
                    if let Err(e) = session.toggle_format(pretty) {
                        self.last_error =
                            Some(format!("{}: {e}", statics::EN_ERR_INVALID_OBJECT));
                    }
                }

                ui.horizontal(|ui| {
                    if presets::is_recognized(session.key())
                        && ui.button(statics::EN_BTN_PRESET).clicked()
                    {
                        match session.apply_preset() {
                            Ok(()) => {
                                self.status = statics::EN_MSG_PRESET_APPLIED.to_string();
                                self.last_error = None;
                            }
                            Err(e) => {
                                self.last_error =
                                    Some(format!("{}: {e}", statics::EN_ERR_INVALID_OBJECT));
                            }
                        }
                    }
                    if self.backups.has_backup(session.key())
                        && ui.button(statics::EN_BTN_RESTORE).clicked()
                    {
                        match session.restore_backup(&self.backups) {
                            Ok(()) => {
                                self.status = statics::EN_MSG_RESTORED.to_string();
                                self.last_error = None;
                            }
                            Err(e) => {
                                self.last_error = Some(format!("Failed to restore: {e}"));
                            }
                        }
                    }
                });

                egui::ScrollArea::vertical().max_height(380.0).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(session.buffer_mut())
                            .code_editor()
                            .desired_width(f32::INFINITY)
                            .desired_rows(16),
                    );
                });

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button(statics::EN_BTN_SAVE).clicked()
                        && let Some(store) = self.store.as_mut()
                    {
                        match session.save(store) {
                            Ok(SaveOutcome::Saved) => {
                                self.listing.refresh(store);
                                self.status = format!("Saved {}", session.key());
                                self.saved_notice_open = true;
                                self.last_error = None;
                                close_requested = true;
                            }
                            Ok(SaveOutcome::Rejected { reason }) => {
                                self.last_error = Some(reason);
                            }
                            Err(e) => {
                                self.last_error = Some(format!("Failed to save: {e}"));
                            }
                        }
                    }
                    if ui.button(statics::EN_BTN_COPY).clicked() {
                        ui.ctx().copy_text(session.copy_text());
                        self.status = if session.pretty() {
                            statics::EN_MSG_COPIED_PRETTY.to_string()
                        } else {
                            statics::EN_MSG_COPIED_COMPACT.to_string()
                        };
                    }
                    if ui.button(statics::EN_BTN_CANCEL).clicked() {
                        session.cancel();
                        close_requested = true;
                    }
                });
            });

        if !keep_open {
            session.cancel();
        }
        if keep_open && !close_requested {
            self.edit = Some(session);
        }
    }
}

impl eframe::App for OcseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_OPEN_STORE).clicked() {
                    self.open_store_dialog();
                }

                if ui.button(statics::EN_BTN_RELOAD).clicked() {
                    let dir = self.store_dir.clone();
                    self.open_store_at(&dir);
                }

                if ui.button(statics::EN_BTN_ABOUT).clicked() {
                    self.about_open = true;
                }

                if ui.button(statics::EN_BTN_TOGGLE_THEME).clicked() {
                    self.theme_dark = !self.theme_dark;
                    if self.theme_dark {
                        ctx.set_visuals(egui::Visuals::dark());
                    } else {
                        ctx.set_visuals(egui::Visuals::light());
                    }
                }

                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        if self.about_open {
            let mut open = self.about_open;
            egui::Window::new(statics::EN_WINDOW_ABOUT)
                .collapsible(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.heading(statics::EN_ABOUT_HEADING);
                    ui.label(format!(
                        "{} {}",
                        statics::EN_ABOUT_VERSION,
                        env!("CARGO_PKG_VERSION")
                    ));
                    ui.separator();
                    ui.label(statics::EN_ABOUT_BLURB);
                    ui.monospace(self.backups.dir().display().to_string());
                    ui.separator();
                    ui.hyperlink_to(
                        format!("{} @ {}", statics::EN_PROJECT_REPO, statics::GITHUB_URL),
                        statics::GITHUB_URL,
                    );
                });
            self.about_open = open;
        }

        if self.saved_notice_open {
            let mut open = self.saved_notice_open;
            let mut close_requested = false;
            egui::Window::new(statics::EN_WINDOW_SAVED)
                .collapsible(false)
                .resizable(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(statics::EN_MSG_SAVED_RESTART);
                    ui.separator();
                    if ui.button(statics::EN_BTN_OK).clicked() {
                        close_requested = true;
                    }
                });
            if close_requested {
                open = false;
            }
            self.saved_notice_open = open;
        }

        self.render_edit_dialog(ctx);

        if let Some(err) = self.last_error.clone() {
            egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                            self.last_error = None;
                        }
                    });
                });
            });
        }

        // The bottom status bar is shown before the central panel so it
        // reserves space across the full window width.
        egui::TopBottomPanel::bottom("bottom_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let store_label = if self.store.is_some() {
                    self.store_dir.display().to_string()
                } else {
                    statics::EN_PLACEHOLDER_NO_STORE.to_string()
                };
                ui.label(store_label);
                ui.separator();
                ui.label(format!(
                    "{} {}",
                    statics::EN_LABEL_ENTRIES,
                    self.store.as_ref().map(ConfigStore::len).unwrap_or(0)
                ));
                ui.separator();
                ui.label(format!(
                    "{} {}",
                    statics::EN_LABEL_BACKUPS,
                    self.backups.count()
                ));
                if self.store.as_ref().is_some_and(ConfigStore::has_pending) {
                    ui.separator();
                    ui.colored_label(egui::Color32::YELLOW, statics::EN_BADGE_PENDING);
                }
            });
        });

        let listing_error = match self.listing.state() {
            ListingState::Error(msg) => Some(msg.clone()),
            ListingState::Entries(_) => None,
        };

        let mut open_edit_key: Option<String> = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(msg) = &listing_error {
                ui.colored_label(egui::Color32::RED, msg);
                ui.label(statics::EN_STORE_HINT);
                return;
            }

            ui.horizontal(|ui| {
                ui.label(statics::EN_LABEL_FILTER);
                ui.add(
                    egui::TextEdit::singleline(&mut self.filter_query)
                        .hint_text(statics::EN_HINT_FILTER)
                        .desired_width(220.0),
                );
                if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                    self.filter_query.clear();
                }
                ui.separator();
                ui.checkbox(&mut self.show_all, statics::EN_TOGGLE_SHOW_ALL);
            });
            ui.separator();

            let rows = self.listing.filter(&self.filter_query, self.show_all);
            if rows.is_empty() {
                ui.label(statics::EN_LIST_EMPTY);
                return;
            }

            let row_h = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
            ui.push_id("entries_table", |ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                    .column(Column::initial(60.0).resizable(false))
                    .column(Column::initial(320.0).resizable(true))
                    .column(Column::remainder().resizable(true))
                    .header(row_h, |#[allow(unused_mut)] mut header| {
                        header.col(|ui| {
                            ui.strong(statics::EN_EMPTY);
                        });
                        header.col(|ui| {
                            ui.strong(statics::EN_COL_KEY);
                        });
                        header.col(|ui| {
                            ui.strong(statics::EN_COL_VALUE);
                        });
                    })
                    .body(|#[allow(unused_mut)] mut body| {
                        for entry in rows {
                            body.row(row_h, |#[allow(unused_mut)] mut row| {
                                row.col(|ui| {
                                    if ui.small_button(statics::EN_BTN_EDIT).clicked() {
                                        open_edit_key = Some(entry.key.clone());
                                    }
                                });
                                row.col(|ui| {
                                    ui.label(&entry.key);
                                });
                                row.col(|ui| {
                                    ui.monospace(entry_preview(&entry.value));
                                });
                            });
                        }
                    });
            });
        });

        if let Some(key) = open_edit_key
            && let Some(store) = self.store.as_ref()
        {
            self.edit = Some(EditSession::open(store, &self.backups, &key));
        }
    }
}

/// Single-line preview of an entry value for the listing. Truncation is
/// char-based so multi-byte values cannot split a code point.
fn entry_preview(value: &str) -> String {
    const MAX_CHARS: usize = 80;
    let mut out = String::new();
    for (i, ch) in value.chars().enumerate() {
        if i == MAX_CHARS {
            out.push_str("...");
            return out;
        }
        out.push(if ch.is_control() { ' ' } else { ch });
    }
    out
}

use std::collections::VecDeque;

use crate::catalog::{MatchCatalog, MatchSelection};
use crate::combine::CombinedRow;
use crate::pipeline::IntervalProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Chart,
    Table,
}

pub struct AppState {
    pub screen: Screen,
    pub catalog: MatchCatalog,
    pub selected: usize,
    /// Generation of the most recent fetch request; results tagged with any other
    /// generation are dropped.
    pub generation: u64,
    pub loading: bool,
    pub profile: Option<ProfileView>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub export: ExportState,
}

/// Rows currently on screen and the match they were computed for.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub match_id: u32,
    pub profile: IntervalProfile,
}

#[derive(Debug, Clone, Default)]
pub struct ExportState {
    pub path: Option<String>,
    pub error: Option<String>,
}

impl AppState {
    pub fn new(catalog: MatchCatalog) -> Self {
        Self {
            screen: Screen::Chart,
            catalog,
            selected: 0,
            generation: 0,
            loading: false,
            profile: None,
            logs: VecDeque::new(),
            help_overlay: false,
            export: ExportState::default(),
        }
    }

    pub fn selected_match(&self) -> Option<&MatchSelection> {
        self.catalog.get(self.selected)
    }

    pub fn select_next(&mut self) -> bool {
        if self.selected + 1 < self.catalog.len() {
            self.selected += 1;
            return true;
        }
        false
    }

    pub fn select_prev(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            return true;
        }
        false
    }

    pub fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Chart => Screen::Table,
            Screen::Table => Screen::Chart,
        };
    }

    /// Starts a new fetch for the current selection and returns the command to send.
    /// Anything still in flight becomes stale.
    pub fn begin_fetch(&mut self) -> Option<ProviderCommand> {
        let selection = self.selected_match()?.clone();
        self.generation = self.generation.wrapping_add(1);
        self.loading = true;
        Some(ProviderCommand::FetchProfile {
            generation: self.generation,
            selection,
        })
    }

    /// Rows for the selected match, if they have been computed.
    pub fn current_rows(&self) -> Option<&[CombinedRow]> {
        let view = self.profile.as_ref()?;
        let selected = self.selected_match()?;
        (view.match_id == selected.id).then_some(&view.profile.rows[..])
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetProfile {
        generation: u64,
        match_id: u32,
        profile: IntervalProfile,
    },
    FetchFailed {
        generation: u64,
        error: String,
    },
    Exported {
        path: String,
    },
    ExportFailed {
        error: String,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchProfile {
        generation: u64,
        selection: MatchSelection,
    },
    Export {
        selection: MatchSelection,
        rows: Vec<CombinedRow>,
    },
}

impl ProviderCommand {
    pub fn generation(&self) -> Option<u64> {
        match self {
            ProviderCommand::FetchProfile { generation, .. } => Some(*generation),
            ProviderCommand::Export { .. } => None,
        }
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetProfile {
            generation,
            match_id,
            profile,
        } => {
            if generation != state.generation {
                state.push_log(format!("[INFO] Dropped stale result for match {match_id}"));
                return;
            }
            state.loading = false;
            state.profile = Some(ProfileView { match_id, profile });
        }
        Delta::FetchFailed { generation, error } => {
            if generation != state.generation {
                return;
            }
            // Previous rows stay on screen.
            state.loading = false;
            state.push_log(format!("[WARN] Fixture fetch failed: {error}"));
        }
        Delta::Exported { path } => {
            state.push_log(format!("[INFO] Exported {path}"));
            state.export = ExportState {
                path: Some(path),
                error: None,
            };
        }
        Delta::ExportFailed { error } => {
            state.push_log(format!("[WARN] Export failed: {error}"));
            state.export = ExportState {
                path: None,
                error: Some(error),
            };
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}

//! Application context
//!
//! Owns every open [`TranslationView`] (one tab per project), the layout
//! manager and the outbound [`BackendSink`]. Hosts create one context,
//! feed it commands and backend pushes, and render what it exposes.

use crate::layout::PanelLayoutManager;
use crate::notice::Notice;
use crate::panels::MatchPanelKind;
use crate::state::{Directive, Tab, TabRegistry, TranslationView};
use segmenta_core::{
    BackendPush, BackendRequest, BackendSink, EditorSettings, ExportKind, FilterCriteria,
    Project, SortCriteria,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Command issued by the shell (menu, toolbar, shortcut) for the selected view
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    // === Saving and navigation ===
    Save { confirm: bool, directive: Directive },
    SelectRow(usize),
    GoToSegment(u64),
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    SetRowsPerPage(u64),
    Reload,

    // === Query ===
    SetFilter(FilterCriteria),
    ClearFilter,
    SetSort(SortCriteria),

    // === Editing ===
    ToggleLock,
    CopySource,
    InsertTag(u32),
    RemoveTag(u32),
    InsertRemainingTags,
    RemoveAllTags,
    SplitSegment(usize),
    MergeNext,

    // === Candidates ===
    MachineTranslate,
    AssembleMatches,
    AssembleMatchesAll,
    MemoryMatches,
    AcceptMatch(MatchPanelKind),
    AcceptTerm,
    NextTerm,
    PreviousTerm,
    FetchProjectTerms,

    // === Reports ===
    GenerateStatistics,
    Export(ExportKind),
}

pub struct AppContext {
    settings: EditorSettings,
    sink: Arc<dyn BackendSink>,
    tabs: TabRegistry<TranslationView>,
    layout: PanelLayoutManager,
}

impl AppContext {
    pub fn new(settings: EditorSettings, sink: Arc<dyn BackendSink>) -> Self {
        let layout = PanelLayoutManager::new(&settings);
        Self {
            settings,
            sink,
            tabs: TabRegistry::new(),
            layout,
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn tabs(&self) -> &TabRegistry<TranslationView> {
        &self.tabs
    }

    pub fn layout(&self) -> &PanelLayoutManager {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut PanelLayoutManager {
        &mut self.layout
    }

    pub fn view(&self, project: &str) -> Option<&TranslationView> {
        self.tabs.get(project).map(|tab| &tab.content)
    }

    pub fn view_mut(&mut self, project: &str) -> Option<&mut TranslationView> {
        self.tabs.get_mut(project).map(|tab| &mut tab.content)
    }

    pub fn selected_view(&self) -> Option<&TranslationView> {
        self.tabs.selected().map(|tab| &tab.content)
    }

    pub fn selected_view_mut(&mut self) -> Option<&mut TranslationView> {
        self.tabs.selected_mut().map(|tab| &mut tab.content)
    }

    /// Open `project` in a new tab and request its first page. An already
    /// open project only gets its tab selected.
    pub fn open_project(&mut self, project: Project) {
        if self.tabs.contains(&project.id) {
            debug!("Project {} already open", project.id);
            self.tabs.select(&project.id);
            return;
        }

        info!("Opening project {}", project.id);
        let id = project.id.clone();
        let title = project.description.clone();
        let mut view =
            TranslationView::new(project, self.sink.clone(), self.settings.rows_per_page);
        view.initialize();
        self.tabs.add(Tab::new(id, title, view));
    }

    /// Close the tab of `project` if it may be closed. Returns whether it was.
    pub fn close_project(&mut self, project: &str) -> bool {
        match self.tabs.close(project) {
            Some(tab) => {
                self.shut_down(tab.content);
                true
            }
            None => false,
        }
    }

    /// Reconcile with the ids the host's tab strip still shows; every
    /// project that disappeared is closed on the backend.
    pub fn sync_tab_strip(&mut self, present: &[String]) {
        for tab in self.tabs.sync_with_strip(present) {
            self.shut_down(tab.content);
        }
    }

    fn shut_down(&self, mut view: TranslationView) {
        info!("Closing project {}", view.project_id());
        view.commit();
        let request = BackendRequest::CloseProject {
            project: view.project_id().to_string(),
        };
        if let Err(e) = self.sink.dispatch(request) {
            error!("Failed to close {}: {}", view.project_id(), e);
        }
    }

    /// Run `command` against the selected view; without one nothing happens
    pub fn execute(&mut self, command: EditorCommand) {
        let Some(view) = self.selected_view_mut() else {
            debug!("No project selected for {:?}", command);
            return;
        };

        match command {
            EditorCommand::Save { confirm, directive } => view.save(confirm, directive),
            EditorCommand::SelectRow(index) => view.select_row(index),
            EditorCommand::GoToSegment(number) => view.go_to_segment(number),
            EditorCommand::FirstPage => view.first_page(),
            EditorCommand::PreviousPage => view.previous_page(),
            EditorCommand::NextPage => view.next_page(),
            EditorCommand::LastPage => view.last_page(),
            EditorCommand::SetRowsPerPage(rows) => view.set_rows_per_page(rows),
            EditorCommand::Reload => view.reload(),
            EditorCommand::SetFilter(filter) => view.set_filter(filter),
            EditorCommand::ClearFilter => view.clear_filter(),
            EditorCommand::SetSort(sort) => view.set_sort(sort),
            EditorCommand::ToggleLock => view.toggle_lock(),
            EditorCommand::CopySource => view.copy_source(),
            EditorCommand::InsertTag(id) => view.insert_tag(id),
            EditorCommand::RemoveTag(id) => view.remove_tag(id),
            EditorCommand::InsertRemainingTags => view.insert_remaining_tags(),
            EditorCommand::RemoveAllTags => view.remove_all_tags(),
            EditorCommand::SplitSegment(offset) => view.split_segment(offset),
            EditorCommand::MergeNext => view.merge_next(),
            EditorCommand::MachineTranslate => view.request_machine_translation(),
            EditorCommand::AssembleMatches => view.request_assembled_matches(),
            EditorCommand::AssembleMatchesAll => view.request_assembled_matches_all(),
            EditorCommand::MemoryMatches => view.request_memory_matches(),
            EditorCommand::AcceptMatch(panel) => view.accept_match(panel),
            EditorCommand::AcceptTerm => view.accept_term(),
            EditorCommand::NextTerm => {
                view.panels_mut().terms.next();
            }
            EditorCommand::PreviousTerm => {
                view.panels_mut().terms.previous();
            }
            EditorCommand::FetchProjectTerms => view.fetch_project_terms(),
            EditorCommand::GenerateStatistics => view.generate_statistics(),
            EditorCommand::Export(kind) => view.export(kind),
        }
    }

    /// Route a push to the view of its project
    pub fn handle_push(&mut self, push: BackendPush) {
        match self.view_mut(push.project()) {
            Some(view) => view.handle_push(push),
            None => debug!("Dropping push for closed project {}", push.project()),
        }
    }

    /// Apply every push already waiting in `receiver` without blocking.
    /// Returns how many were handled.
    pub fn pump(&mut self, receiver: &mut mpsc::UnboundedReceiver<BackendPush>) -> usize {
        let mut handled = 0;
        while let Ok(push) = receiver.try_recv() {
            self.handle_push(push);
            handled += 1;
        }
        handled
    }

    /// Drain the notices of every open view
    pub fn take_notices(&mut self) -> Vec<Notice> {
        let ids: Vec<String> = self.tabs.ids().iter().map(|id| id.to_string()).collect();
        let mut notices = Vec::new();
        for id in ids {
            if let Some(view) = self.view_mut(&id) {
                notices.extend(view.take_notices());
            }
        }
        notices
    }
}

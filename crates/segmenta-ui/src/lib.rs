//! Segmenta UI Library
//!
//! Headless editing engine for the Segmenta desktop shell. The shell owns
//! the window and draws; this crate owns the state it draws.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ AppContext                                                      │
//! │   TabRegistry<TranslationView>          PanelLayoutManager      │
//! ├────────────┬───────────────────────────────┬────────────────────┤
//! │ Files      │ Editor: TranslationView       │ RightSide          │
//! │            │                               │ ┌────────────────┐ │
//! │            │  # │ Source │ Target   │ St % │ │ Memory         │ │
//! │            │  1 │ ...    │ EditBuf  │      │ ├────────────────┤ │
//! │            │  2 │ ...    │ ...      │      │ │ Machine        │ │
//! │            │                               │ ├────────────────┤ │
//! │            │  Pagination                   │ │ Terms          │ │
//! │            │                               │ └────────────────┘ │
//! └────────────┴───────────────────────────────┴────────────────────┘
//!        │ BackendRequest                        ▲ BackendPush
//!        ▼                                       │
//!    BackendSink ──────► Backend Service ────────┘
//! ```

pub mod context;
pub mod layout;
pub mod logging;
pub mod notice;
pub mod panels;
pub mod state;

// Re-exports
pub use context::{AppContext, EditorCommand};
pub use layout::{Affordance, LayoutPass, PanelId, PanelLayoutManager, ResizeEvent};
pub use logging::{init_from_settings, init_logging};
pub use notice::{Notice, NoticeLevel, Notices};
pub use panels::{MatchList, MatchPanelKind, MatchPanels, TermList};
pub use state::{
    Directive, EditBuffer, Pagination, PendingWrites, ScanTarget, Tab, TabRegistry,
    TranslationView,
};

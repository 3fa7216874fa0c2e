//! Editor state
//!
//! One [`TranslationView`] per open project, kept in a [`TabRegistry`]
//! alongside the other tabs of the shell.

mod edit_buffer;
mod pagination;
mod pending;
mod tab_registry;
mod translation_view;

pub use edit_buffer::EditBuffer;
pub use pagination::Pagination;
pub use pending::{PendingWrite, PendingWrites, Reconcile};
pub use tab_registry::{Tab, TabRegistry};
pub use translation_view::{Directive, ScanTarget, TranslationView};

//! Match panels
//!
//! The three candidate panels next to the editor: translation memory
//! matches, machine-translation (and assembled) matches, and glossary terms.
//! All three are scoped to the current segment and are cleared whenever the
//! editor moves to another one.

mod match_list;
mod term_list;

pub use match_list::MatchList;
pub use term_list::TermList;

use segmenta_core::{Match, SegmentKey, Term};

/// Which match panel an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPanelKind {
    Memory,
    Machine,
}

#[derive(Debug, Clone)]
pub struct MatchPanels {
    pub memory: MatchList,
    pub machine: MatchList,
    pub terms: TermList,
}

impl Default for MatchPanels {
    fn default() -> Self {
        Self {
            memory: MatchList::memory(),
            machine: MatchList::machine(),
            terms: TermList::new(),
        }
    }
}

impl MatchPanels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rescope all three panels to `key`, dropping their contents
    pub fn set_segment(&mut self, key: Option<SegmentKey>) {
        self.memory.set_segment(key.clone());
        self.machine.set_segment(key.clone());
        self.terms.set_segment(key);
    }

    pub fn clear(&mut self) {
        self.set_segment(None);
    }

    /// Route loaded matches to the panels showing their kinds
    pub fn load_matches(&mut self, key: &SegmentKey, matches: &[Match]) -> bool {
        let memory = self.memory.merge(key, matches);
        let machine = self.machine.merge(key, matches);
        memory && machine
    }

    pub fn load_terms(&mut self, key: &SegmentKey, terms: Vec<Term>) -> bool {
        self.terms.load(key, terms)
    }

    pub fn list(&self, kind: MatchPanelKind) -> &MatchList {
        match kind {
            MatchPanelKind::Memory => &self.memory,
            MatchPanelKind::Machine => &self.machine,
        }
    }

    pub fn list_mut(&mut self, kind: MatchPanelKind) -> &mut MatchList {
        match kind {
            MatchPanelKind::Memory => &mut self.memory,
            MatchPanelKind::Machine => &mut self.machine,
        }
    }
}

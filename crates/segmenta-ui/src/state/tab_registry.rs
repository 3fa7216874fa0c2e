//! Ordered tab container with a single selection

/// One tab and the content it hosts
#[derive(Debug, Clone)]
pub struct Tab<T> {
    pub id: String,
    pub title: String,
    pub closeable: bool,
    pub content: T,
}

impl<T> Tab<T> {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: T) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            closeable: true,
            content,
        }
    }

    pub fn pinned(mut self) -> Self {
        self.closeable = false;
        self
    }
}

/// Exactly one tab is selected whenever the registry is non-empty.
#[derive(Debug)]
pub struct TabRegistry<T> {
    tabs: Vec<Tab<T>>,
    selected: Option<String>,
}

impl<T> Default for TabRegistry<T> {
    fn default() -> Self {
        Self {
            tabs: Vec::new(),
            selected: None,
        }
    }
}

impl<T> TabRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tab and select it. A tab with an existing id is only selected.
    pub fn add(&mut self, tab: Tab<T>) {
        let id = tab.id.clone();
        if !self.contains(&id) {
            self.tabs.push(tab);
        }
        self.selected = Some(id);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tabs.iter().any(|tab| tab.id == id)
    }

    /// Select `id`; unknown ids are ignored
    pub fn select(&mut self, id: &str) {
        if self.contains(id) {
            self.selected = Some(id.to_string());
        }
    }

    /// Close `id` if it exists and is closeable. Closing the selected tab
    /// selects the first remaining one.
    pub fn close(&mut self, id: &str) -> Option<Tab<T>> {
        let position = self.tabs.iter().position(|tab| tab.id == id)?;
        if !self.tabs[position].closeable {
            return None;
        }
        Some(self.remove_at(position))
    }

    /// Drop every tab the host's tab strip no longer shows, closeable or
    /// not. Returns the removed tabs.
    pub fn sync_with_strip(&mut self, present: &[String]) -> Vec<Tab<T>> {
        let mut removed = Vec::new();
        while let Some(position) = self
            .tabs
            .iter()
            .position(|tab| !present.iter().any(|id| id == &tab.id))
        {
            removed.push(self.remove_at(position));
        }
        removed
    }

    fn remove_at(&mut self, position: usize) -> Tab<T> {
        let tab = self.tabs.remove(position);
        if self.selected.as_deref() == Some(tab.id.as_str()) {
            self.selected = self.tabs.first().map(|first| first.id.clone());
        }
        tab
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&Tab<T>> {
        let id = self.selected.as_deref()?;
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn selected_mut(&mut self) -> Option<&mut Tab<T>> {
        let id = self.selected.clone()?;
        self.tabs.iter_mut().find(|tab| tab.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Tab<T>> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Tab<T>> {
        self.tabs.iter_mut().find(|tab| tab.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.tabs.iter().map(|tab| tab.id.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab<T>> {
        self.tabs.iter()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(ids: &[&str]) -> TabRegistry<()> {
        let mut registry = TabRegistry::new();
        for id in ids {
            registry.add(Tab::new(*id, id.to_uppercase(), ()));
        }
        registry
    }

    #[test]
    fn test_add_selects_new_tab() {
        let registry = registry(&["a", "b"]);
        assert_eq!(registry.selected_id(), Some("b"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_add_existing_id_only_selects() {
        let mut registry = registry(&["a", "b"]);
        registry.add(Tab::new("a", "again", ()));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.selected_id(), Some("a"));
        assert_eq!(registry.get("a").map(|t| t.title.as_str()), Some("A"));
    }

    #[test]
    fn test_select_unknown_is_noop() {
        let mut registry = registry(&["a", "b"]);
        registry.select("zzz");
        assert_eq!(registry.selected_id(), Some("b"));
    }

    #[test]
    fn test_close_unknown_is_noop() {
        let mut registry = registry(&["a"]);
        assert!(registry.close("zzz").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_close_selected_selects_first_remaining() {
        let mut registry = registry(&["a", "b", "c"]);
        registry.select("b");
        registry.close("b");
        assert_eq!(registry.selected_id(), Some("a"));

        registry.close("a");
        assert_eq!(registry.selected_id(), Some("c"));

        registry.close("c");
        assert!(registry.is_empty());
        assert_eq!(registry.selected_id(), None);
    }

    #[test]
    fn test_close_unselected_keeps_selection() {
        let mut registry = registry(&["a", "b", "c"]);
        registry.close("a");
        assert_eq!(registry.selected_id(), Some("c"));
    }

    #[test]
    fn test_pinned_tab_not_closeable() {
        let mut registry = TabRegistry::new();
        registry.add(Tab::new("home", "Home", ()).pinned());
        assert!(registry.close("home").is_none());
        assert_eq!(registry.selected_id(), Some("home"));
    }

    #[test]
    fn test_sync_with_strip_removes_missing() {
        let mut registry = registry(&["a", "b", "c"]);
        let removed = registry.sync_with_strip(&["a".to_string()]);
        let removed: Vec<&str> = removed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(removed, vec!["b", "c"]);
        assert_eq!(registry.selected_id(), Some("a"));
    }
}

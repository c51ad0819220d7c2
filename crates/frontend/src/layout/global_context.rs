use contracts::domain::a001_log_source::Source;
use leptos::prelude::*;

/// Application-wide state shared through context
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    /// Sources known to the client, in registration order
    pub sources: RwSignal<Vec<Source>>,
    pub sources_loaded: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            sources: RwSignal::new(vec![]),
            sources_loaded: RwSignal::new(false),
        }
    }

    /// Record a source the backend has just created
    pub fn register_source(&self, source: Source) {
        log::info!("Source registered: '{}' (id {})", source.name, source.id);
        self.sources.update(|sources| merge_source(sources, source));
    }

    /// Replace the known sources with a fresh listing
    pub fn set_sources(&self, items: Vec<Source>) {
        log::debug!("Loaded {} sources", items.len());
        self.sources.set(items);
        self.sources_loaded.set(true);
    }

    /// Forget everything tied to the previous session (logout, new login)
    pub fn clear(&self) {
        self.sources.set(vec![]);
        self.sources_loaded.set(false);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Append `source`, or replace the entry with the same id.
fn merge_source(sources: &mut Vec<Source>, source: Source) {
    match sources.iter_mut().find(|known| known.id == source.id) {
        Some(known) => *known = source,
        None => sources.push(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::RecordId;

    fn source(id: i64, name: &str) -> Source {
        Source {
            id: RecordId::Int(id),
            name: name.to_string(),
            owner: RecordId::Int(1),
        }
    }

    #[test]
    fn test_merge_appends_new_source() {
        let mut sources = vec![source(1, "Syslog")];
        merge_source(&mut sources, source(2, "Nginx"));
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[1].name, "Nginx");
    }

    #[test]
    fn test_merge_replaces_same_id() {
        let mut sources = vec![source(1, "Syslog")];
        merge_source(&mut sources, source(1, "Journald"));
        assert_eq!(sources, vec![source(1, "Journald")]);
    }

    #[test]
    fn test_clear_forces_reload() {
        let owner = Owner::new();
        owner.with(|| {
            let app = AppGlobalContext::new();
            app.set_sources(vec![source(1, "Syslog")]);
            app.register_source(source(2, "Nginx"));
            assert!(app.sources_loaded.get_untracked());

            app.clear();
            assert!(app.sources.get_untracked().is_empty());
            assert!(!app.sources_loaded.get_untracked());

            // The next session starts from an empty store
            app.register_source(source(3, "Caddy"));
            assert_eq!(app.sources.get_untracked(), vec![source(3, "Caddy")]);
        });
    }
}

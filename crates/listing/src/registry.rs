use std::collections::HashMap;
use std::sync::Arc;

use crate::source::DirectorySource;

/// Explicit registry of directory sources, built at startup and passed into
/// the crawl orchestrator. Selection happens by source name per request.
#[derive(Default)]
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn DirectorySource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, source: Arc<dyn DirectorySource>) -> Option<Arc<dyn DirectorySource>> {
        self.sources.insert(source.name().to_string(), source)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn DirectorySource>> {
        self.sources.get(name).cloned()
    }

    pub fn list(&self) -> Vec<Arc<dyn DirectorySource>> {
        let mut sources: Vec<_> = self.sources.values().cloned().collect();
        sources.sort_by(|a, b| a.name().cmp(b.name()));
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::FlatEntry;
    use crate::error::ListingError;
    use crate::path::DirectoryPath;
    use crate::source::Credentials;

    struct NamedSource(&'static str);

    #[async_trait::async_trait]
    impl DirectorySource for NamedSource {
        fn name(&self) -> &str {
            self.0
        }

        fn label(&self) -> &str {
            self.0
        }

        async fn list(
            &self,
            directory: &DirectoryPath,
            _credentials: &Credentials,
        ) -> Result<FlatEntry, Vec<ListingError>> {
            Ok(FlatEntry::new(directory.basename()))
        }
    }

    #[test]
    fn get_returns_registered_source_by_name() {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(NamedSource("local")));
        registry.register(Arc::new(NamedSource("api")));

        assert!(registry.get("local").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn list_is_sorted_by_name() {
        let mut registry = SourceRegistry::new();
        registry.register(Arc::new(NamedSource("zeta")));
        registry.register(Arc::new(NamedSource("alpha")));

        let names: Vec<_> = registry.list().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}

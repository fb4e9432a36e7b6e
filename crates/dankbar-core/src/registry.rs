use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::provider::Provider;

/// Providers keyed by name, built once at startup.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn Provider>>,
    index: HashMap<String, usize>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn register(&mut self, provider: Box<dyn Provider>) -> Result<()> {
        let name = provider.name().to_string();
        if self.index.contains_key(&name) {
            bail!("duplicate provider name: {}", name);
        }
        let idx = self.providers.len();
        self.index.insert(name, idx);
        self.providers.push(provider);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Provider> {
        self.index.get(name).map(|&i| &*self.providers[i])
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolve a selection list to provider slots, preserving its order.
    ///
    /// Any unknown name fails the whole resolution; nothing is skipped.
    /// Repeated names resolve to the same provider each time.
    pub fn resolve(&self, selection: &[String]) -> Result<Vec<usize>> {
        let mut slots = Vec::with_capacity(selection.len());
        for name in selection {
            match self.index.get(name) {
                Some(&i) => slots.push(i),
                None => bail!(
                    "unknown provider name: {} (known: {})",
                    name,
                    self.names().join(", ")
                ),
            }
        }
        Ok(slots)
    }

    pub(crate) fn at(&self, slot: usize) -> &dyn Provider {
        &*self.providers[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::provider::CollectError;

    struct FakeProvider {
        name: &'static str,
    }

    impl Provider for FakeProvider {
        fn name(&self) -> &'static str {
            self.name
        }
        fn error_color(&self) -> &str {
            "#FF0000"
        }
        fn try_collect(&self) -> Result<Event, CollectError> {
            Ok(Event::new(self.name, self.name, "#fff", 35))
        }
    }

    fn registry(names: &[&'static str]) -> ProviderRegistry {
        let mut reg = ProviderRegistry::new();
        for &name in names {
            reg.register(Box::new(FakeProvider { name })).unwrap();
        }
        reg
    }

    fn selection(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn register_adds_provider() {
        let reg = registry(&["time"]);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.names(), vec!["time"]);
        assert!(reg.get("time").is_some());
        assert!(reg.get("wifi").is_none());
    }

    #[test]
    fn duplicate_name_returns_error() {
        let mut reg = registry(&["time"]);
        let err = reg.register(Box::new(FakeProvider { name: "time" }));
        assert!(err.unwrap_err().to_string().contains("duplicate provider name"));
    }

    #[test]
    fn resolve_keeps_selection_order() {
        let reg = registry(&["wifi", "battery", "time"]);
        let slots = reg.resolve(&selection(&["time", "wifi", "battery"])).unwrap();
        let names: Vec<_> = slots.iter().map(|&s| reg.at(s).name()).collect();
        assert_eq!(names, vec!["time", "wifi", "battery"]);
    }

    #[test]
    fn resolve_allows_repeats() {
        let reg = registry(&["time"]);
        assert_eq!(reg.resolve(&selection(&["time", "time"])).unwrap().len(), 2);
    }

    #[test]
    fn resolve_unknown_name_fails() {
        let reg = registry(&["wifi", "time"]);
        let err = reg
            .resolve(&selection(&["time", "cpu"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown provider name: cpu"));
        assert!(err.contains("wifi, time"));
    }

    #[test]
    fn resolve_empty_selection() {
        let reg = registry(&["time"]);
        assert!(reg.resolve(&[]).unwrap().is_empty());
        assert!(ProviderRegistry::new().is_empty());
    }
}

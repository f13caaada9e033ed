// File: src/fixture/registry.rs
//
// Unit Registry
//
// Fixture units are registered callables looked up by name; the engine
// never loads code from files. Registering under an existing name replaces
// the previous unit.

use std::collections::HashMap;

use super::FixtureContext;

/// A registered fixture unit or cleanup routine.
pub type UnitFn = Box<dyn Fn(&mut FixtureContext) -> anyhow::Result<()>>;

/// Name-keyed registry of fixture units.
#[derive(Default)]
pub struct TestRegistry {
    units: HashMap<String, UnitFn>,
}

impl TestRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, unit: F)
    where
        F: Fn(&mut FixtureContext) -> anyhow::Result<()> + 'static,
    {
        self.units.insert(name.into(), Box::new(unit));
    }

    /// Look up a unit by name.
    pub fn get(&self, name: &str) -> Option<&UnitFn> {
        self.units.get(name)
    }

    /// Whether a unit is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Number of registered units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_and_lookup() {
        let mut registry = TestRegistry::new();
        assert!(registry.is_empty());
        registry.register("unit.one", |_ctx| Ok(()));
        assert!(registry.contains("unit.one"));
        assert!(!registry.contains("unit.two"));
        assert_eq!(registry.len(), 1);
        assert!(registry.get("unit.one").is_some());
    }

    #[test]
    fn reregistration_replaces() {
        let mut registry = TestRegistry::new();
        registry.register("unit", |_ctx| Ok(()));
        registry.register("unit", |_ctx| anyhow::bail!("second"));
        assert_eq!(registry.len(), 1);
    }
}

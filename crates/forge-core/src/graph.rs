//! The build graph: an opaque, append-only sink that every node initialized
//! during one platform lifetime writes into. The platform never reads it
//! back; it exists purely so collaborator code (techs, tasks) can record
//! build activity against a shared structure.

use std::sync::Mutex;

/// One recorded entry: which node produced which event.
#[derive(Debug, Clone)]
pub struct BuildGraphEntry {
    pub node: String,
    pub event: String,
}

/// Append-only, write-shared sink, named after the project it belongs to.
#[derive(Debug)]
pub struct BuildGraph {
    name: String,
    entries: Mutex<Vec<BuildGraphEntry>>,
}

impl BuildGraph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record that `node` produced `event`. Never removes or mutates prior
    /// entries.
    pub fn record(&self, node: &str, event: impl Into<String>) {
        self.entries.lock().unwrap().push(BuildGraphEntry {
            node: node.to_string(),
            event: event.into(),
        });
    }

    /// Snapshot of every entry recorded so far, in recording order.
    pub fn entries(&self) -> Vec<BuildGraphEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_entries_in_order() {
        let graph = BuildGraph::new("demo");
        graph.record("bundles/common", "initialized");
        graph.record("bundles/common", "built");

        let entries = graph.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event, "initialized");
        assert_eq!(entries[1].event, "built");
    }

    #[test]
    fn name_is_retained() {
        let graph = BuildGraph::new("my-project");
        assert_eq!(graph.name(), "my-project");
    }
}

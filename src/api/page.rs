use indexmap::IndexMap;

/// Headless stand-in for a DOM element that hosts one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub id: String,
    /// Measured client width in pixels; zero for hidden elements.
    pub measured_width: f64,
}

/// Set of containers a host page exposes, keyed by element id.
#[derive(Debug, Clone, Default)]
pub struct Page {
    containers: IndexMap<String, Container>,
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_container(mut self, id: impl Into<String>, measured_width: f64) -> Self {
        self.add_container(id, measured_width);
        self
    }

    /// Adds or re-measures a container.
    pub fn add_container(&mut self, id: impl Into<String>, measured_width: f64) {
        let id = id.into();
        self.containers.insert(
            id.clone(),
            Container {
                id,
                measured_width,
            },
        );
    }

    pub fn remove_container(&mut self, id: &str) -> Option<Container> {
        self.containers.shift_remove(id)
    }

    #[must_use]
    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.containers.contains_key(id)
    }

    pub fn container_ids(&self) -> impl Iterator<Item = &str> {
        self.containers.keys().map(String::as_str)
    }
}

use std::sync::{Arc, Mutex, PoisonError};

/// Handle through which write handlers tell the presentation layer to drop
/// its cached rendering of a page. Paths are recorded so tests can observe
/// exactly which invalidations a handler fired.
#[derive(Clone, Default)]
pub struct Revalidator {
    paths: Arc<Mutex<Vec<String>>>,
}

impl Revalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&self, path: &str) {
        tracing::info!(path, "revalidating cached view");
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }

    /// Paths invalidated so far, oldest first.
    pub fn invalidated(&self) -> Vec<String> {
        self.paths
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::Revalidator;

    #[test]
    fn records_each_invalidation() {
        let revalidator = Revalidator::new();
        revalidator.invalidate("/dashboard/invoices");
        assert_eq!(revalidator.invalidated(), vec!["/dashboard/invoices"]);

        revalidator.invalidate("/dashboard/invoices");
        assert_eq!(revalidator.invalidated().len(), 2);
    }
}

use domain::PortfolioStore;
use std::sync::Arc;

/// Lightweight handle to the portfolio store that can be cheaply cloned across requests.
/// The store is never mutated after construction, so no lock is needed.
#[derive(Clone, Debug)]
pub struct PortfolioHandle {
    inner: Arc<PortfolioStore>,
}

impl PortfolioHandle {
    pub fn new(store: PortfolioStore) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    pub fn store(&self) -> &PortfolioStore {
        &self.inner
    }
}

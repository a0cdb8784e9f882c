use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use peratio_core::connector::{HistoryPeProvider, PeConnector};
use peratio_core::{HistoryPeSeries, PeRatioError};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(PeRatioError),
    /// Hang indefinitely (simulate a stalled provider).
    Hang,
}

#[derive(Default)]
struct InternalState {
    history_pe_rules: HashMap<String, MockBehavior<HistoryPeSeries>>,
    requests: Vec<String>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `history_pe` calls for a specific security code.
    pub async fn set_history_pe_behavior(
        &self,
        security_code: impl Into<String>,
        behavior: MockBehavior<HistoryPeSeries>,
    ) {
        let mut guard = self.state.lock().await;
        guard
            .history_pe_rules
            .insert(security_code.into(), behavior);
    }

    /// Security codes requested so far, in call order.
    pub async fn requests(&self) -> Vec<String> {
        let guard = self.state.lock().await;
        guard.requests.clone()
    }

    /// Clear all configured behaviors and the request log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.history_pe_rules.clear();
        guard.requests.clear();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn PeConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn PeConnector>, controller)
    }
}

impl PeConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_history_pe_provider(&self) -> Option<&dyn HistoryPeProvider> {
        Some(self as &dyn HistoryPeProvider)
    }
}

#[async_trait]
impl HistoryPeProvider for DynamicMockConnector {
    async fn history_pe(&self, security_code: &str) -> Result<HistoryPeSeries, PeRatioError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(security_code.to_string());
            guard.history_pe_rules.get(security_code).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(series)) => Ok(series),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(PeRatioError::unsupported("history_pe")),
        }
    }
}

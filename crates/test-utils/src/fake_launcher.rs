use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use suiterun::exec::{Attempt, ShutdownHandle, SuiteLauncher};
use suiterun::suite::SuiteDescriptor;
use suiterun::types::Termination;

/// A fake launcher that:
/// - records which suites were launched, in order
/// - reports a scripted termination per suite id (default: exit 0)
/// - can simulate a termination request arriving while a given suite runs
/// - tracks how many launches overlap
#[derive(Clone, Default)]
pub struct FakeLauncher {
    outcomes: HashMap<String, Termination>,
    interrupt_on: Option<(String, ShutdownHandle)>,
    launched: Arc<Mutex<Vec<String>>>,
    active: Arc<AtomicUsize>,
    max_active: Arc<AtomicUsize>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(mut self, id: &str, termination: Termination) -> Self {
        self.outcomes.insert(id.to_string(), termination);
        self
    }

    pub fn failing(self, id: &str, code: i32) -> Self {
        self.with_outcome(id, Termination::exited(code))
    }

    /// Request shutdown while `id` is running; that attempt comes back
    /// interrupted with SIGTERM.
    pub fn interrupt_on(mut self, id: &str, handle: ShutdownHandle) -> Self {
        self.interrupt_on = Some((id.to_string(), handle));
        self
    }

    pub fn launched(&self) -> Vec<String> {
        self.launched.lock().unwrap().clone()
    }

    pub fn launched_handle(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.launched)
    }

    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

impl SuiteLauncher for FakeLauncher {
    fn launch(
        &mut self,
        suite: &SuiteDescriptor,
    ) -> Pin<Box<dyn Future<Output = Attempt> + Send + '_>> {
        let id = suite.id().to_string();

        Box::pin(async move {
            self.launched.lock().unwrap().push(id.clone());

            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(now, Ordering::SeqCst);
            tokio::task::yield_now().await;
            self.active.fetch_sub(1, Ordering::SeqCst);

            if let Some((target, handle)) = &self.interrupt_on {
                if *target == id {
                    handle.request();
                    return Attempt::interrupted(Termination::signaled(15));
                }
            }

            let termination = self
                .outcomes
                .get(&id)
                .cloned()
                .unwrap_or_else(|| Termination::exited(0));
            Attempt::completed(termination)
        })
    }
}

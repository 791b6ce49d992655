use std::cell::RefCell;
use std::rc::Rc;

use crate::api::ChartOption;
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartEngine, ChartInstance, ChartRegion};

/// One call received by the headless engine, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Init { instance: u64, region: String },
    SetOption { instance: u64 },
    Resize { instance: u64 },
    Dispose { instance: u64 },
}

#[derive(Debug, Default)]
struct EngineState {
    calls: Vec<EngineCall>,
    next_instance: u64,
    set_option_failure: Option<String>,
}

/// Engine that draws nothing and records every call.
///
/// Used by tests and headless hosts. Options are still validated on
/// `set_option` so broken configurations surface without a real backend.
/// Clones share the same call log.
#[derive(Debug, Clone, Default)]
pub struct HeadlessEngine {
    state: Rc<RefCell<EngineState>>,
}

impl HeadlessEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `set_option` fail with `message`.
    pub fn fail_set_option(&self, message: impl Into<String>) {
        self.state.borrow_mut().set_option_failure = Some(message.into());
    }

    #[must_use]
    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.borrow().calls.clone()
    }

    #[must_use]
    pub fn init_count(&self) -> usize {
        self.count(|call| matches!(call, EngineCall::Init { .. }))
    }

    #[must_use]
    pub fn dispose_count(&self) -> usize {
        self.count(|call| matches!(call, EngineCall::Dispose { .. }))
    }

    #[must_use]
    pub fn resize_count(&self) -> usize {
        self.count(|call| matches!(call, EngineCall::Resize { .. }))
    }

    /// Instances initialized and not yet disposed.
    #[must_use]
    pub fn live_instances(&self) -> usize {
        self.init_count() - self.dispose_count()
    }

    fn count(&self, predicate: impl Fn(&EngineCall) -> bool) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    fn record(&self, call: EngineCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl ChartEngine for HeadlessEngine {
    type Instance = HeadlessInstance;

    fn init(&mut self, region: &ChartRegion) -> ChartResult<HeadlessInstance> {
        let id = {
            let mut state = self.state.borrow_mut();
            state.next_instance += 1;
            state.next_instance
        };
        self.record(EngineCall::Init {
            instance: id,
            region: region.id.clone(),
        });
        Ok(HeadlessInstance {
            id,
            engine: self.clone(),
            option: None,
        })
    }
}

/// Instance handle produced by [`HeadlessEngine`].
#[derive(Debug)]
pub struct HeadlessInstance {
    id: u64,
    engine: HeadlessEngine,
    option: Option<ChartOption>,
}

impl HeadlessInstance {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Last option applied to this instance.
    #[must_use]
    pub fn option(&self) -> Option<&ChartOption> {
        self.option.as_ref()
    }
}

impl ChartInstance for HeadlessInstance {
    fn set_option(&mut self, option: &ChartOption) -> ChartResult<()> {
        self.engine
            .record(EngineCall::SetOption { instance: self.id });
        if let Some(message) = self.engine.state.borrow().set_option_failure.clone() {
            return Err(ChartError::Engine(message));
        }
        option.validate()?;
        self.option = Some(option.clone());
        Ok(())
    }

    fn resize(&mut self) -> ChartResult<()> {
        self.engine.record(EngineCall::Resize { instance: self.id });
        Ok(())
    }

    fn dispose(self) {
        self.engine.record(EngineCall::Dispose { instance: self.id });
    }
}

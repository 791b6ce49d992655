//! Mount/unmount management for chart instances.
//!
//! A controller owns at most one engine instance for its region. Every data
//! change disposes the current instance before a new one is created, and the
//! resize listener lives exactly as long as the rendered instance.

mod resize;

pub use resize::{ListenerId, ResizeSubscription, ViewportListeners, ViewportSignal};

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::api::{ChartOption, ChartPipeline, IntradayChartBuilder, TrendChartBuilder};
use crate::error::ChartResult;
use crate::render::{ChartEngine, ChartInstance, ChartRegion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    /// No region bound.
    Unmounted,
    /// Region bound but no instance: no data yet, or data below threshold.
    MountedEmpty,
    /// A live instance is bound to the region.
    MountedRendered,
}

/// Drives one chart component: pipeline, engine instance and resize listener.
pub struct ChartController<P, E, S>
where
    P: ChartPipeline,
    E: ChartEngine,
    S: ViewportSignal + Clone,
{
    pipeline: P,
    engine: E,
    signal: S,
    region: Option<ChartRegion>,
    data: Option<Rc<[P::Point]>>,
    instance: Option<E::Instance>,
    option: Option<ChartOption>,
    resize: Option<ResizeSubscription<S>>,
}

/// Intraday valuation chart component.
pub type IntradayChart<E, S> = ChartController<IntradayChartBuilder, E, S>;

/// Historical net-value chart component.
pub type TrendChart<E, S> = ChartController<TrendChartBuilder, E, S>;

impl<P, E, S> ChartController<P, E, S>
where
    P: ChartPipeline,
    E: ChartEngine,
    S: ViewportSignal + Clone,
{
    pub fn new(pipeline: P, engine: E, signal: S) -> Self {
        Self {
            pipeline,
            engine,
            signal,
            region: None,
            data: None,
            instance: None,
            option: None,
            resize: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        match (&self.region, &self.instance) {
            (None, _) => LifecycleState::Unmounted,
            (Some(_), None) => LifecycleState::MountedEmpty,
            (Some(_), Some(_)) => LifecycleState::MountedRendered,
        }
    }

    /// Whether the component currently has visual output. With a series below
    /// threshold the component renders nothing at all.
    #[must_use]
    pub fn has_output(&self) -> bool {
        self.data
            .as_deref()
            .is_some_and(|series| self.pipeline.is_renderable(series))
    }

    /// Region the host should reserve for this component, if any.
    #[must_use]
    pub fn region_request(&self, id: impl Into<String>) -> Option<ChartRegion> {
        self.has_output()
            .then(|| ChartRegion::new(id, self.pipeline.region_height_px()))
    }

    #[must_use]
    pub fn region(&self) -> Option<&ChartRegion> {
        self.region.as_ref()
    }

    #[must_use]
    pub fn instance(&self) -> Option<&E::Instance> {
        self.instance.as_ref()
    }

    /// Option applied to the current instance.
    #[must_use]
    pub fn option(&self) -> Option<&ChartOption> {
        self.option.as_ref()
    }

    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    #[must_use]
    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Binds the screen region once it exists and renders any pending series.
    pub fn mount(&mut self, region: ChartRegion) -> ChartResult<()> {
        debug!(region = %region.id, "mount chart region");
        self.region = Some(region);
        self.refresh()
    }

    /// Replaces the series. Passing the same `Rc` again is not a change.
    pub fn set_data(&mut self, series: impl Into<Rc<[P::Point]>>) -> ChartResult<()> {
        let series = series.into();
        if self
            .data
            .as_ref()
            .is_some_and(|current| Rc::ptr_eq(current, &series))
        {
            trace!("series reference unchanged; skipping re-render");
            return Ok(());
        }
        self.data = Some(series);
        self.refresh()
    }

    /// Forwards a viewport resize to the live instance. Returns whether an
    /// instance was resized.
    pub fn handle_resize(&mut self) -> ChartResult<bool> {
        if self.resize.is_none() {
            return Ok(false);
        }
        match self.instance.as_mut() {
            Some(instance) => {
                trace!("resize chart instance");
                instance.resize()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Tears the component down: disposes the instance, drops the resize
    /// listener and unbinds the region. The series is kept for a later mount.
    pub fn unmount(&mut self) {
        self.release();
        if let Some(region) = self.region.take() {
            debug!(region = %region.id, "unmount chart region");
        }
    }

    fn refresh(&mut self) -> ChartResult<()> {
        self.release();

        let (Some(region), Some(series)) = (self.region.as_ref(), self.data.as_deref()) else {
            return Ok(());
        };
        let Some(option) = self.pipeline.build_option(series)? else {
            debug!(
                region = %region.id,
                points = series.len(),
                "series below rendering threshold; nothing to draw"
            );
            return Ok(());
        };

        let mut instance = self.engine.init(region)?;
        debug!(region = %region.id, points = series.len(), "chart instance created");
        let applied = instance.set_option(&option);
        self.instance = Some(instance);
        applied?;

        self.option = Some(option);
        self.resize = Some(ResizeSubscription::acquire(self.signal.clone(), region));
        Ok(())
    }

    fn release(&mut self) {
        self.resize = None;
        self.option = None;
        if let Some(instance) = self.instance.take() {
            instance.dispose();
            trace!("chart instance disposed");
        }
    }
}

impl<P, E, S> Drop for ChartController<P, E, S>
where
    P: ChartPipeline,
    E: ChartEngine,
    S: ViewportSignal + Clone,
{
    fn drop(&mut self) {
        self.release();
    }
}

use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use tracing::{debug, error, info};

use juliascope_core::{Complex, FractalMode, FractalParams, Julia, Mandelbrot, Viewport};

use crate::error::RenderError;
use crate::renderer::{render, RenderCancel, RenderPhase, RenderProgress, RenderResult};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Everything a pass needs, snapshotted when the pass is requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub viewport: Viewport,
    pub params: FractalParams,
    pub mode: FractalMode,
    /// Constant for Julia mode; ignored in Mandelbrot mode.
    pub julia_c: Complex,
}

/// Events of a single pass, in order.
///
/// Ends after the [`RenderPhase::Complete`] event, or early if the pass is
/// preempted. Not restartable: once drained it stays empty.
#[derive(Debug)]
pub struct RenderStream {
    generation: u64,
    rx: mpsc::Receiver<RenderProgress>,
}

impl RenderStream {
    /// Generation of the pass this stream belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Next event without blocking, for frontends polling once per frame.
    pub fn try_next(&self) -> Option<RenderProgress> {
        self.rx.try_recv().ok()
    }
}

impl Iterator for RenderStream {
    type Item = RenderProgress;

    /// Blocks until the next event, or returns `None` once the pass is over.
    fn next(&mut self) -> Option<RenderProgress> {
        self.rx.recv().ok()
    }
}

struct Job {
    generation: u64,
    request: RenderRequest,
    events: mpsc::Sender<RenderProgress>,
}

#[derive(Debug)]
struct WorkerState {
    phase: RenderPhase,
    /// Generation of the pass currently running on the worker.
    active: Option<u64>,
    /// Generation of the most recently submitted job.
    submitted: u64,
    /// Highest generation the worker has finished, cancelled or skipped.
    settled: u64,
}

struct Shared {
    state: Mutex<WorkerState>,
    changed: Condvar,
    cancel: RenderCancel,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, WorkerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn wait<'a>(&self, guard: MutexGuard<'a, WorkerState>) -> MutexGuard<'a, WorkerState> {
        self.changed
            .wait(guard)
            .unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Runs passes for one view on a dedicated worker thread.
///
/// At most one pass is in flight. [`submit`](Self::submit) preempts the
/// running pass and blocks until the worker has left it, so no event for the
/// old parameters can follow the new request.
pub struct RenderScheduler {
    shared: Arc<Shared>,
    tx: Option<mpsc::Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl RenderScheduler {
    /// Spawn the worker thread under the given name.
    pub fn spawn(name: &str) -> crate::Result<Self> {
        let shared = Arc::new(Shared {
            state: Mutex::new(WorkerState {
                phase: RenderPhase::Idle,
                active: None,
                submitted: 0,
                settled: 0,
            }),
            changed: Condvar::new(),
            cancel: RenderCancel::new(),
        });
        let (tx, rx) = mpsc::channel::<Job>();

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name(name.into())
            .spawn(move || render_worker(rx, worker_shared))
            .map_err(RenderError::WorkerSpawn)?;
        debug!(name, "Render worker spawned");

        Ok(Self {
            shared,
            tx: Some(tx),
            worker: Some(worker),
        })
    }

    /// Start a fresh pass for `request`, preempting any pass in flight.
    pub fn submit(&self, request: RenderRequest) -> crate::Result<RenderStream> {
        let tx = self.tx.as_ref().ok_or(RenderError::WorkerGone)?;
        let generation = self.shared.cancel.cancel();

        let mut state = self.shared.lock();
        while state.active.is_some() {
            state = self.shared.wait(state);
        }
        state.phase = RenderPhase::Idle;
        state.submitted = generation;
        drop(state);

        debug!(
            generation,
            mode = request.mode.label(),
            max_iter = request.params.max_iterations,
            width = request.viewport.width(),
            height = request.viewport.height(),
            "Requesting render"
        );

        let (events, rx) = mpsc::channel();
        tx.send(Job {
            generation,
            request,
            events,
        })
        .map_err(|_| RenderError::WorkerGone)?;

        Ok(RenderStream { generation, rx })
    }

    /// Cancel the pass in flight, if any, and wait for the worker to leave it.
    pub fn cancel(&self) {
        let generation = self.shared.cancel.cancel();
        let mut state = self.shared.lock();
        while state.active.is_some() {
            state = self.shared.wait(state);
        }
        // A queued job for an older generation will be skipped by the worker.
        state.submitted = state.submitted.max(generation);
        state.settled = state.settled.max(generation);
        if state.phase.is_rendering() || state.phase == RenderPhase::Idle {
            state.phase = RenderPhase::Cancelled;
        }
        drop(state);
        self.shared.changed.notify_all();
        info!(generation, "Render cancelled");
    }

    /// Block until the most recently submitted pass has completed or been
    /// cancelled, and return the resulting phase.
    pub fn wait(&self) -> RenderPhase {
        let mut state = self.shared.lock();
        while state.settled < state.submitted || state.active.is_some() {
            state = self.shared.wait(state);
        }
        state.phase
    }

    pub fn phase(&self) -> RenderPhase {
        self.shared.lock().phase
    }

    /// `true` once the latest pass has finished its fine pass.
    pub fn is_complete(&self) -> bool {
        let state = self.shared.lock();
        state.phase == RenderPhase::Complete && state.settled >= state.submitted
    }

    /// Percent of the running pass, as last reported by the worker.
    pub fn progress(&self) -> u32 {
        self.shared.cancel.progress()
    }
}

impl Drop for RenderScheduler {
    fn drop(&mut self) {
        self.shared.cancel.cancel();
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("Render worker panicked");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

fn drain_latest(initial: Job, rx: &mpsc::Receiver<Job>) -> Job {
    let mut job = initial;
    while let Ok(newer) = rx.try_recv() {
        job = newer;
    }
    job
}

/// Build the fractal for `request` and run a two-pass render.
pub fn render_for_mode<P>(
    request: &RenderRequest,
    cancel: &RenderCancel,
    generation: u64,
    on_progress: P,
) -> RenderResult
where
    P: FnMut(RenderProgress),
{
    match request.mode {
        FractalMode::Mandelbrot => render(
            &Mandelbrot::new(request.params),
            &request.viewport,
            cancel,
            generation,
            on_progress,
        ),
        FractalMode::Julia => render(
            &Julia::new(request.julia_c, request.params),
            &request.viewport,
            cancel,
            generation,
            on_progress,
        ),
    }
}

fn render_worker(rx: mpsc::Receiver<Job>, shared: Arc<Shared>) {
    debug!("Render worker started");
    while let Ok(initial) = rx.recv() {
        let job = drain_latest(initial, &rx);

        {
            let mut state = shared.lock();
            if shared.cancel.is_cancelled(job.generation) {
                debug!(generation = job.generation, "Skipping stale render request");
                state.settled = state.settled.max(job.generation);
                drop(state);
                shared.changed.notify_all();
                continue;
            }
            state.active = Some(job.generation);
            state.phase = RenderPhase::CoarsePass;
        }

        let mut current = RenderPhase::CoarsePass;
        let events = job.events;
        let result = render_for_mode(&job.request, &shared.cancel, job.generation, |progress| {
            if progress.phase != current {
                current = progress.phase;
                shared.lock().phase = current;
            }
            // The frontend may have dropped the stream; the pass still runs.
            let _ = events.send(progress);
        });

        let mut state = shared.lock();
        state.active = None;
        state.settled = state.settled.max(job.generation);
        state.phase = if result.cancelled {
            RenderPhase::Cancelled
        } else {
            RenderPhase::Complete
        };
        drop(state);
        shared.changed.notify_all();
    }
    debug!("Render worker exiting");
}

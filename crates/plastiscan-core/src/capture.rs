use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::thread::JoinHandle;
use std::time::{Duration, Instant, SystemTime};

use tracing::{info, warn};

use crate::consts::{EPSILON, LOOP_SLEEP_MS};
use crate::detector::{detect_particles, DetectorConfig};
use crate::error::{Result, ScanError};
use crate::frame::Frame;
use crate::particle::Particle;
use crate::quantify::{quantify, QuantificationReport};

/// Seam to the out-of-scope acquisition device (camera, folder, synthetic).
///
/// `read` may block; it is only ever called from the acquisition loop's own
/// thread. `Ok(None)` signals a clean end of stream.
pub trait FrameSource: Send {
    fn open(&mut self) -> Result<()>;
    fn read(&mut self) -> Result<Option<Frame>>;
    fn release(&mut self);
}

/// Lifecycle of the acquisition loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanState {
    Stopped,
    Starting,
    Running,
}

/// One history entry: a snapshot of a processed frame's particle list.
#[derive(Clone, Debug)]
pub struct FrameSample {
    pub timestamp: SystemTime,
    pub particles: Vec<Particle>,
    pub count: usize,
}

/// Composite status snapshot for readers.
#[derive(Clone, Debug)]
pub struct ScanStatistics {
    pub frame_count: u64,
    pub fps: f64,
    pub particle_count: usize,
    pub particles: Vec<Particle>,
    pub quantification: QuantificationReport,
    pub is_running: bool,
}

/// Everything the loop publishes, behind one lock so readers can never see
/// a torn mix of an old frame with new particles.
#[derive(Debug, Default)]
struct PublishedState {
    frame: Option<Frame>,
    particles: Vec<Particle>,
    frame_count: u64,
    fps: f64,
    history: VecDeque<FrameSample>,
}

struct ScannerShared {
    config: DetectorConfig,
    running: AtomicBool,
    state: Mutex<ScanState>,
    published: RwLock<PublishedState>,
    /// The source lives here while the loop is not running; the loop thread
    /// takes it at start and returns it on exit.
    source: Mutex<Option<Box<dyn FrameSource>>>,
}

/// Background particle detection over a live frame stream.
///
/// One dedicated thread runs the acquisition loop; any number of reader
/// threads may poll the published snapshots concurrently. All reader
/// accessors return owned copies, safe to hold across later iterations.
pub struct ParticleScanner {
    shared: Arc<ScannerShared>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ParticleScanner {
    pub fn new(source: Box<dyn FrameSource>, config: DetectorConfig) -> Self {
        let mut published = PublishedState::default();
        published.history = VecDeque::with_capacity(config.history_capacity);
        Self {
            shared: Arc::new(ScannerShared {
                config,
                running: AtomicBool::new(false),
                state: Mutex::new(ScanState::Stopped),
                published: RwLock::new(published),
                source: Mutex::new(Some(source)),
            }),
            handle: Mutex::new(None),
        }
    }

    /// Start the acquisition loop on its own thread.
    ///
    /// No-op while already running (the frame counter is preserved). On
    /// device failure the state machine stays `Stopped` and the error is
    /// returned.
    pub fn start(&self) -> Result<()> {
        {
            let mut state = lock(&self.shared.state);
            if *state == ScanState::Running || *state == ScanState::Starting {
                return Ok(());
            }
            *state = ScanState::Starting;
        }

        let mut source = match lock(&self.shared.source).take() {
            Some(source) => source,
            None => {
                // A previous loop thread is still winding down.
                *lock(&self.shared.state) = ScanState::Stopped;
                return Err(ScanError::DeviceUnavailable(
                    "source busy, previous session still releasing".into(),
                ));
            }
        };

        if let Err(err) = source.open() {
            warn!(error = %err, "Device acquisition failed");
            *lock(&self.shared.source) = Some(source);
            *lock(&self.shared.state) = ScanState::Stopped;
            return Err(err);
        }

        self.shared.running.store(true, Ordering::Release);
        *lock(&self.shared.state) = ScanState::Running;

        let shared = Arc::clone(&self.shared);
        let handle = std::thread::spawn(move || capture_loop(shared, source));
        *lock(&self.handle) = Some(handle);
        info!("Acquisition loop started");
        Ok(())
    }

    /// Request a cooperative stop; the in-flight frame completes first.
    /// Idempotent.
    pub fn stop(&self) {
        self.shared.running.store(false, Ordering::Release);
    }

    /// Block until the loop thread has exited. Safe to call after `stop`,
    /// or while running to wait for the source's end of stream.
    pub fn join(&self) {
        let handle = lock(&self.handle).take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }

    pub fn state(&self) -> ScanState {
        *lock(&self.shared.state)
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Latest published frame copy; `None` before the first capture.
    pub fn current_frame(&self) -> Option<Frame> {
        read(&self.shared.published).frame.clone()
    }

    /// Snapshot copy of the latest particle list.
    pub fn current_particles(&self) -> Vec<Particle> {
        read(&self.shared.published).particles.clone()
    }

    /// Quantification of the latest particle list.
    pub fn current_quantification(&self) -> QuantificationReport {
        let particles = self.current_particles();
        quantify(&particles, &self.shared.config.quantify)
    }

    /// Snapshot copy of the bounded history ring (oldest first).
    pub fn history(&self) -> Vec<FrameSample> {
        read(&self.shared.published).history.iter().cloned().collect()
    }

    pub fn frame_count(&self) -> u64 {
        read(&self.shared.published).frame_count
    }

    pub fn fps(&self) -> f64 {
        read(&self.shared.published).fps
    }

    /// One consistent composite snapshot of the session.
    pub fn statistics(&self) -> ScanStatistics {
        let guard = read(&self.shared.published);
        let particles = guard.particles.clone();
        let quantification = quantify(&particles, &self.shared.config.quantify);
        ScanStatistics {
            frame_count: guard.frame_count,
            fps: guard.fps,
            particle_count: particles.len(),
            particles,
            quantification,
            is_running: self.is_running(),
        }
    }
}

impl Drop for ParticleScanner {
    fn drop(&mut self) {
        self.stop();
        self.join();
    }
}

/// The acquisition loop body. Owns the source for the session's lifetime
/// and is the only writer of the published state.
fn capture_loop(shared: Arc<ScannerShared>, mut source: Box<dyn FrameSource>) {
    let mut last_frame_time = Instant::now();

    while shared.running.load(Ordering::Acquire) {
        let frame = match source.read() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                info!("End of frame stream");
                break;
            }
            Err(err) => {
                warn!(error = %err, "Frame read failure, stopping acquisition");
                break;
            }
        };

        // Contain per-frame pipeline failures inside this iteration; the
        // frame degrades to an empty particle list and the loop continues.
        let particles = catch_unwind(AssertUnwindSafe(|| {
            detect_particles(&frame, &shared.config)
        }))
        .unwrap_or_else(|_| {
            warn!(
                error = %ScanError::Segmentation("detection pipeline panicked".into()),
                "Dropping frame result"
            );
            Vec::new()
        });

        let now = Instant::now();
        let fps = 1.0 / (now.duration_since(last_frame_time).as_secs_f64() + EPSILON);
        last_frame_time = now;

        let sample = FrameSample {
            timestamp: SystemTime::now(),
            particles: particles.clone(),
            count: particles.len(),
        };

        // Publish frame, particles, fps, counter and history as one unit.
        {
            let mut published = write(&shared.published);
            if published.history.len() >= shared.config.history_capacity.max(1) {
                published.history.pop_front();
            }
            published.history.push_back(sample);
            published.frame = Some(frame);
            published.particles = particles;
            published.fps = fps;
            published.frame_count += 1;
        }

        // Yield briefly so the loop does not monopolize a core.
        std::thread::sleep(Duration::from_millis(LOOP_SLEEP_MS));
    }

    source.release();
    shared.running.store(false, Ordering::Release);
    *lock(&shared.source) = Some(source);
    *lock(&shared.state) = ScanState::Stopped;
    info!("Acquisition loop stopped");
}

// Poisoned locks only arise from a panicking writer; the data is a plain
// snapshot, so recover the guard rather than propagating the poison.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn read<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

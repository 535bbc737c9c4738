use {
    crate::*,
    clarity_image::RawFrame,
    std::sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    tokio::{
        runtime::Handle,
        sync::{mpsc, watch},
        task::JoinHandle,
    },
};

// capacity of the outbound report channel
const REPORT_CHANNEL_CAPACITY: usize = 4;

/// Runs a `FrameOrchestrator` on tokio's blocking pool.
///
/// Inbound frames go through a single keep-latest slot: a frame submitted
/// while another is still waiting replaces it, and the replaced frame is
/// counted as dropped. Reports come back in order over a bounded channel.
pub struct EnhanceWorker {
    slot: Arc<watch::Sender<Option<RawFrame>>>,
    reports: mpsc::Receiver<FrameReport>,
    cancel: Arc<AtomicBool>,
    dropped: Arc<AtomicU64>,
    join_handle: Option<JoinHandle<()>>,
}

impl EnhanceWorker {
    /// Start the worker. Must be called from inside a tokio runtime.
    pub fn spawn(orchestrator: FrameOrchestrator) -> Result<Self, WorkerError> {
        let runtime = Handle::try_current().map_err(|_| WorkerError::NoRuntime)?;

        let (slot, mut pending) = watch::channel::<Option<RawFrame>>(None);
        let slot = Arc::new(slot);
        let (sender, reports) = mpsc::channel::<FrameReport>(REPORT_CHANNEL_CAPACITY);
        let cancel = Arc::new(AtomicBool::new(false));
        let dropped = Arc::new(AtomicU64::new(0));

        let join_handle = runtime.spawn_blocking({
            let slot = Arc::clone(&slot);
            let cancel = Arc::clone(&cancel);
            let dropped = Arc::clone(&dropped);
            let runtime = runtime.clone();
            let mut orchestrator = orchestrator;
            move || {
                log::info!("enhance worker: started");
                let mut reported_drops = 0;
                while !cancel.load(Ordering::Relaxed) {
                    // take the waiting frame without waking anyone
                    let mut next = None;
                    slot.send_if_modified(|waiting| {
                        next = waiting.take();
                        false
                    });
                    let Some(raw) = next else {
                        if runtime.block_on(pending.changed()).is_err() {
                            break;
                        }
                        continue;
                    };

                    let mut report = orchestrator.process_next(raw);
                    let total_drops = dropped.load(Ordering::Relaxed);
                    report.dropped = total_drops - reported_drops;
                    reported_drops = total_drops;
                    log::debug!("{report}");

                    if let Err(error) = sender.blocking_send(report) {
                        log::info!("enhance worker: report receiver closed: {}", error);
                        break;
                    }
                }
                log::info!(
                    "enhance worker: stopped after {} frames",
                    orchestrator.frames_seen()
                );
            }
        });

        Ok(Self {
            slot,
            reports,
            cancel,
            dropped,
            join_handle: Some(join_handle),
        })
    }

    /// Hand a frame to the worker without blocking.
    pub fn submit(&self, frame: RawFrame) -> Result<(), WorkerError> {
        let running = self
            .join_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished());
        if self.cancel.load(Ordering::Relaxed) || !running {
            return Err(WorkerError::Closed);
        }
        if self.slot.send_replace(Some(frame)).is_some() {
            let total = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!("enhance worker: busy, replaced waiting frame ({total} dropped)");
        }
        Ok(())
    }

    /// Next report, or `None` once the worker has stopped and all reports
    /// were received.
    pub async fn recv(&mut self) -> Option<FrameReport> {
        self.reports.recv().await
    }

    pub fn try_recv(&mut self) -> Option<FrameReport> {
        self.reports.try_recv().ok()
    }

    /// Frames replaced in the slot before the worker picked them up.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn stop(&self) {
        self.cancel.store(true, Ordering::Relaxed);
        // wake the worker and discard whatever is still waiting
        self.slot.send_modify(|waiting| *waiting = None);
    }

    /// Stop the worker and wait for the frame in progress to finish.
    pub async fn shutdown(mut self) -> Result<(), WorkerError> {
        self.stop();
        // let a worker blocked on a full channel observe the closed receiver
        self.reports.close();
        while self.reports.try_recv().is_ok() {}
        match self.join_handle.take() {
            Some(handle) => handle.await.map_err(|error| WorkerError::Join(error.to_string())),
            None => Ok(()),
        }
    }
}

impl Drop for EnhanceWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};

pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// A requested frame, stamped when it fired
    Tick(Instant),
    Resize,
}

/// At most one pending frame request, shared with the input thread
#[derive(Clone, Default)]
pub struct FrameGate {
    pending: Arc<AtomicBool>,
}

impl FrameGate {
    pub fn request(&self) {
        self.pending.store(true, Ordering::Release);
    }

    pub fn cancel(&self) {
        self.pending.store(false, Ordering::Release);
    }

    /// Consume the pending request, if any
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

/// Terminal input pump and frame scheduler.
///
/// Keys and clicks are always forwarded. A `Tick` is only sent when a frame
/// was requested, at most once per tick period.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    frames: FrameGate,
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let frames = FrameGate::default();
        let shutdown = Arc::new(AtomicBool::new(false));

        let gate = frames.clone();
        let stop = Arc::clone(&shutdown);
        let worker = thread::spawn(move || {
            let mut last_tick = Instant::now();
            while !stop.load(Ordering::Acquire) {
                let timeout = tick_rate.saturating_sub(last_tick.elapsed());
                if event::poll(timeout).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(crossterm::event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        Ok(crossterm::event::Event::Mouse(mouse))
                            if matches!(mouse.kind, MouseEventKind::Down(_)) =>
                        {
                            Some(Event::Mouse(mouse))
                        }
                        Ok(crossterm::event::Event::Resize(_, _)) => Some(Event::Resize),
                        _ => None,
                    };
                    if let Some(ev) = forwarded {
                        if tx.send(ev).is_err() {
                            return;
                        }
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    last_tick = Instant::now();
                    if gate.take() && tx.send(Event::Tick(last_tick)).is_err() {
                        return;
                    }
                }
            }
        });

        Self {
            rx,
            frames,
            shutdown,
            worker: Some(worker),
        }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }

    /// Ask for one `Tick` on the next tick boundary
    pub fn request_frame(&self) {
        self.frames.request();
    }

    pub fn cancel_frame(&self) {
        self.frames.cancel();
    }

    /// Cancel any pending frame and join the input thread. No events are
    /// produced afterwards.
    pub fn stop(&mut self) {
        self.frames.cancel();
        self.shutdown.store(true, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
            log::info!("Frame scheduler stopped");
        }
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_holds_a_single_request() {
        let gate = FrameGate::default();
        assert!(!gate.take());
        gate.request();
        gate.request();
        assert!(gate.is_pending());
        assert!(gate.take());
        assert!(!gate.take());
    }

    #[test]
    fn cancel_drops_the_pending_request() {
        let gate = FrameGate::default();
        let shared = gate.clone();
        gate.request();
        shared.cancel();
        assert!(!gate.is_pending());
        assert!(!shared.take());
    }
}

use crate::error::AssetError;
use serde::Serialize;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Snapshot emitted once per completed object download. `current` grows
/// by one per event and reaches `total` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: usize,
    pub current: usize,
    /// `current / total`, rounded to the nearest integer percent.
    pub percent: u8,
}

impl Progress {
    pub fn new(current: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100
        } else {
            ((current as f64 / total as f64) * 100.0).round() as u8
        };
        Self {
            total,
            current,
            percent,
        }
    }
}

/// Lifecycle events observable by the surrounding application.
///
/// `Error` mirrors the typed error the run returns; subscribers that only
/// watch the channel still see every failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Progress(Progress),
    Done,
    Error(String),
}

/// Publishing half of the event channel. Delivery is best-effort: a
/// subscriber that hung up never fails the pipeline.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Option<UnboundedSender<Event>>,
}

impl Notifier {
    pub fn channel() -> (Self, UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A notifier with no subscriber; every event is dropped.
    pub fn disconnected() -> Self {
        Self { tx: None }
    }

    pub fn progress(&self, progress: Progress) {
        self.send(Event::Progress(progress));
    }

    pub fn done(&self) {
        self.send(Event::Done);
    }

    pub fn error(&self, error: &AssetError) {
        self.send(Event::Error(error.to_string()));
    }

    fn send(&self, event: Event) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds_to_nearest() {
        assert_eq!(Progress::new(1, 3).percent, 33);
        assert_eq!(Progress::new(2, 3).percent, 67);
        assert_eq!(Progress::new(1, 8).percent, 13);
        assert_eq!(Progress::new(0, 4).percent, 0);
        assert_eq!(Progress::new(4, 4).percent, 100);
    }

    #[test]
    fn test_percent_stays_in_bounds() {
        for total in 1..=50 {
            for current in 0..=total {
                let percent = Progress::new(current, total).percent;
                assert!(percent <= 100, "{current}/{total} gave {percent}");
            }
        }
    }

    #[tokio::test]
    async fn test_events_arrive_in_emission_order() {
        let (notifier, mut rx) = Notifier::channel();

        notifier.progress(Progress::new(1, 2));
        notifier.progress(Progress::new(2, 2));
        notifier.done();

        assert_eq!(rx.recv().await, Some(Event::Progress(Progress::new(1, 2))));
        assert_eq!(rx.recv().await, Some(Event::Progress(Progress::new(2, 2))));
        assert_eq!(rx.recv().await, Some(Event::Done));
    }

    #[tokio::test]
    async fn test_send_after_subscriber_hangup_is_silent() {
        let (notifier, rx) = Notifier::channel();
        drop(rx);

        notifier.done();
        Notifier::disconnected().progress(Progress::new(1, 1));
    }
}

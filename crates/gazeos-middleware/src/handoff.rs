//! Capture → engine hand-off queue.
//!
//! Sensor frames may arrive on a thread that does not own the navigation
//! engine.  [`handoff`] creates an unbounded multi-producer, single-consumer
//! queue: producers never block the capture callback, and the one consumer
//! processes messages strictly in arrival order.

use gazeos_types::NavError;
use tokio::sync::mpsc;

/// Create a connected sender / receiver pair.
pub fn handoff<T>() -> (HandoffSender<T>, HandoffReceiver<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (HandoffSender { tx }, HandoffReceiver { rx })
}

/// Producer half.  Clone freely; safe to use from any thread.
#[derive(Debug)]
pub struct HandoffSender<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for HandoffSender<T> {
    fn clone(&self) -> Self {
        Self { tx: self.tx.clone() }
    }
}

impl<T> HandoffSender<T> {
    /// Queue `message` without blocking.
    ///
    /// # Errors
    ///
    /// [`NavError::Channel`] once the receiver has been dropped.
    pub fn send(&self, message: T) -> Result<(), NavError> {
        self.tx
            .send(message)
            .map_err(|_| NavError::Channel("hand-off receiver dropped".to_string()))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half, owned by the thread that runs the engine.
#[derive(Debug)]
pub struct HandoffReceiver<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> HandoffReceiver<T> {
    /// Wait for the next message; `None` once every sender is gone and the
    /// queue is drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Take the next message if one is already queued.
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Stop accepting new messages; queued ones can still be received.
    pub fn close(&mut self) {
        self.rx.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn preserves_order() {
        let (tx, mut rx) = handoff();
        for i in 0..5 {
            tx.send(i).unwrap();
        }
        for i in 0..5 {
            assert_eq!(rx.recv().await, Some(i));
        }
    }

    #[tokio::test]
    async fn recv_ends_when_senders_dropped() {
        let (tx, mut rx) = handoff::<u8>();
        let tx2 = tx.clone();
        tx.send(1).unwrap();
        drop(tx);
        drop(tx2);
        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn send_after_receiver_dropped_fails() {
        let (tx, rx) = handoff::<u8>();
        drop(rx);
        assert!(tx.is_closed());
        assert!(matches!(tx.send(3), Err(NavError::Channel(_))));
    }

    #[test]
    fn producer_on_another_thread() {
        let (tx, mut rx) = handoff();
        let worker = std::thread::spawn(move || {
            for i in 0..100u32 {
                tx.send(i).unwrap();
            }
        });
        worker.join().unwrap();
        let received: Vec<u32> = std::iter::from_fn(|| rx.try_recv()).collect();
        assert_eq!(received, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn close_rejects_new_messages() {
        let (tx, mut rx) = handoff();
        tx.send("queued").unwrap();
        rx.close();
        assert!(tx.send("late").is_err());
        assert_eq!(rx.try_recv(), Some("queued"));
    }
}

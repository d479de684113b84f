//! Closable handoff channel between one producer and one consumer.
//!
//! Closing is explicit in the types: [`HandoffSender::close`] consumes the
//! sender, and [`HandoffReceiver::recv`] reports [`Delivery::Closed`] instead
//! of an absent value.

use tokio::sync::mpsc;

use crate::core::{Error, Result};

/// Open/closed state as seen by the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Open,
    Closed,
}

/// Result of a receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery<T> {
    /// A value sent by the producer
    Item(T),
    /// The producer closed the channel and every value has been delivered
    Closed,
}

impl<T> Delivery<T> {
    pub fn is_closed(&self) -> bool {
        matches!(self, Delivery::Closed)
    }

    pub fn item(&self) -> Option<&T> {
        match self {
            Delivery::Item(item) => Some(item),
            Delivery::Closed => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Delivery::Item(item) => Some(item),
            Delivery::Closed => None,
        }
    }
}

/// Create a handoff channel holding at most `capacity` in-flight values.
///
/// A capacity of zero is raised to one, the smallest slot tokio supports.
pub fn handoff<T>(capacity: usize) -> (HandoffSender<T>, HandoffReceiver<T>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (
        HandoffSender { tx },
        HandoffReceiver {
            rx,
            state: ChannelState::Open,
        },
    )
}

/// The producer's end. Not `Clone`: there is exactly one writer.
#[derive(Debug)]
pub struct HandoffSender<T> {
    tx: mpsc::Sender<T>,
}

impl<T> HandoffSender<T> {
    /// Send a value, waiting for a free slot.
    ///
    /// Fails with [`Error::ChannelClosed`] if the receiver is gone.
    pub async fn send(&self, item: T) -> Result<()> {
        self.tx.send(item).await.map_err(Error::from)
    }

    /// Close the channel. Values already sent are still delivered.
    pub fn close(self) {
        drop(self.tx);
    }

    /// Whether the receiving end has been dropped
    pub fn is_receiver_gone(&self) -> bool {
        self.tx.is_closed()
    }
}

/// The consumer's end.
#[derive(Debug)]
pub struct HandoffReceiver<T> {
    rx: mpsc::Receiver<T>,
    state: ChannelState,
}

impl<T> HandoffReceiver<T> {
    /// Wait for the next value or for closure.
    ///
    /// Once closure has been observed every later call returns
    /// [`Delivery::Closed`] without waiting.
    pub async fn recv(&mut self) -> Delivery<T> {
        if self.state == ChannelState::Closed {
            return Delivery::Closed;
        }
        match self.rx.recv().await {
            Some(item) => Delivery::Item(item),
            None => {
                self.state = ChannelState::Closed;
                Delivery::Closed
            }
        }
    }

    /// Whether this receiver has observed closure
    pub fn state(&self) -> ChannelState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_fifo_then_closed() {
        let (tx, mut rx) = handoff(1);

        let producer = tokio::spawn(async move {
            for i in 0..10 {
                tx.send(i).await.unwrap();
            }
            tx.close();
        });

        let mut received = Vec::new();
        while let Delivery::Item(i) = rx.recv().await {
            received.push(i);
        }
        producer.await.unwrap();

        assert_eq!(received, (0..10).collect::<Vec<_>>());
        assert_eq!(rx.state(), ChannelState::Closed);
    }

    #[tokio::test]
    async fn test_closed_is_terminal_and_immediate() {
        let (tx, mut rx) = handoff::<u32>(1);
        tx.close();

        for _ in 0..3 {
            let delivery = tokio::time::timeout(Duration::from_millis(100), rx.recv())
                .await
                .expect("recv on a closed channel must not block");
            assert!(delivery.is_closed());
        }
    }

    #[tokio::test]
    async fn test_pending_values_survive_close() {
        let (tx, mut rx) = handoff(4);
        tx.send("a").await.unwrap();
        tx.send("b").await.unwrap();
        tx.close();

        assert_eq!(rx.state(), ChannelState::Open);
        assert_eq!(rx.recv().await, Delivery::Item("a"));
        assert_eq!(rx.recv().await.into_option(), Some("b"));
        assert_eq!(rx.recv().await, Delivery::Closed);
        assert_eq!(rx.state(), ChannelState::Closed);
    }

    #[tokio::test]
    async fn test_send_after_receiver_dropped() {
        let (tx, rx) = handoff(0);
        drop(rx);
        assert!(tx.is_receiver_gone());
        assert!(matches!(tx.send(1).await, Err(Error::ChannelClosed)));
    }

    #[tokio::test]
    async fn test_single_slot_blocks_second_send() {
        let (tx, mut rx) = handoff(0);
        tx.send(1).await.unwrap();
        assert!(tokio::time::timeout(Duration::from_millis(20), tx.send(2))
            .await
            .is_err());
        assert_eq!(rx.recv().await.item(), Some(&1));
    }
}

//! The command channel seam between a session and the link to the receiver.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::{mpsc, oneshot};

use crate::error::TransportError;

/// Future returned by [`CommandChannel::write`].
pub type WriteFuture = Pin<Box<dyn Future<Output = Result<(), TransportError>> + Send + 'static>>;

/// Anything a session can write encoded command frames to.
pub trait CommandChannel: Send + Sync {
    /// Whether a write issued now has a chance to succeed.
    fn is_ready(&self) -> bool;

    /// Start writing one frame. The future resolves once the frame has been
    /// handed to the wire, or with the reason it could not be.
    fn write(&self, frame: Vec<u8>) -> WriteFuture;
}

/// A frame queued for the link's writer, with a slot for the write result.
#[derive(Debug)]
pub struct OutboundFrame {
    pub bytes: Vec<u8>,
    pub done: oneshot::Sender<Result<(), TransportError>>,
}

impl OutboundFrame {
    /// Report the result of the write back to the caller.
    pub fn complete(self, result: Result<(), TransportError>) {
        // The caller may have stopped waiting; nothing to do then.
        let _ = self.done.send(result);
    }
}

/// Cloneable handle over the writer side of a link.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx_sender: mpsc::Sender<OutboundFrame>,
}

impl ChannelTransport {
    /// Create a transport and the receiver its frames are delivered to.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<OutboundFrame>) {
        let (tx_sender, tx_receiver) = mpsc::channel(capacity);
        (Self { tx_sender }, tx_receiver)
    }
}

impl CommandChannel for ChannelTransport {
    fn is_ready(&self) -> bool {
        !self.tx_sender.is_closed()
    }

    fn write(&self, frame: Vec<u8>) -> WriteFuture {
        let sender = self.tx_sender.clone();
        Box::pin(async move {
            let (done, result) = oneshot::channel();
            sender
                .send(OutboundFrame { bytes: frame, done })
                .await
                .map_err(|_| TransportError::Closed)?;
            result.await.map_err(|_| TransportError::Closed)?
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_reaches_receiver() {
        let (transport, mut frames) = ChannelTransport::new(4);
        assert!(transport.is_ready());

        let write = tokio::spawn(transport.write(b"{}".to_vec()));
        let frame = frames.recv().await.unwrap();
        assert_eq!(frame.bytes, b"{}");
        frame.complete(Ok(()));

        assert!(write.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_write_reports_rejection() {
        let (transport, mut frames) = ChannelTransport::new(4);
        let write = tokio::spawn(transport.write(b"{}".to_vec()));
        frames
            .recv()
            .await
            .unwrap()
            .complete(Err(TransportError::Rejected("busy".into())));

        assert!(matches!(write.await.unwrap(), Err(TransportError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_closed_link() {
        let (transport, frames) = ChannelTransport::new(4);
        drop(frames);
        assert!(!transport.is_ready());
        assert!(matches!(transport.write(vec![1]).await, Err(TransportError::Closed)));
    }

    #[tokio::test]
    async fn test_dropped_frame_is_closed() {
        let (transport, mut frames) = ChannelTransport::new(4);
        let write = tokio::spawn(transport.write(vec![1]));
        drop(frames.recv().await.unwrap());
        assert!(matches!(write.await.unwrap(), Err(TransportError::Closed)));
    }
}

//! TCP link to a BLE bridge.
//!
//! The bridge owns the GATT connection to the receiver and relays the
//! notification characteristic over TCP, one notification per line. Writes
//! go back the same way.

use std::future::Future;
use std::io;

use omc_protocol::{NotificationCodec, CHARACTERISTIC_UUID, SERVICE_UUID};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::error::TransportError;
use crate::transport::{ChannelTransport, OutboundFrame};

/// Depth of the inbound and outbound queues.
pub const LINK_QUEUE_DEPTH: usize = 64;

/// Size of each socket read.
const READ_CHUNK: usize = 1024;

/// An open link.
#[derive(Debug)]
pub struct Link {
    /// Command channel for the session.
    pub transport: ChannelTransport,
    /// Inbound notifications, one frame per item, in arrival order.
    pub frames: mpsc::Receiver<Vec<u8>>,
    /// The task pumping the socket.
    pub task: JoinHandle<()>,
}

impl Link {
    /// Drive `future` to completion while throwing away inbound frames.
    ///
    /// The link task stops servicing writes while the inbound queue is full,
    /// so a caller that is not reading frames must use this to wait on a
    /// write.
    pub async fn discard_frames_until<F: Future>(&mut self, future: F) -> F::Output {
        tokio::pin!(future);
        loop {
            tokio::select! {
                output = &mut future => return output,
                frame = self.frames.recv() => match frame {
                    Some(frame) => trace!(bytes = frame.len(), "discarding inbound frame"),
                    None => return future.await,
                },
            }
        }
    }
}

/// Connect to a bridge and start pumping frames.
pub async fn connect(address: &str) -> io::Result<Link> {
    let stream = TcpStream::connect(address).await?;
    stream.set_nodelay(true)?;
    info!(
        address,
        service = SERVICE_UUID,
        characteristic = CHARACTERISTIC_UUID,
        "connected to bridge"
    );
    Ok(spawn_link(stream, address.to_string()))
}

/// Start pumping frames over an already connected stream.
pub fn spawn_link(stream: TcpStream, peer: String) -> Link {
    let (transport, tx_receiver) = ChannelTransport::new(LINK_QUEUE_DEPTH);
    let (frame_sender, frames) = mpsc::channel(LINK_QUEUE_DEPTH);

    let task = tokio::spawn(async move {
        match run_link(stream, tx_receiver, frame_sender).await {
            Ok(()) => info!(peer = %peer, "link closed"),
            Err(e) => warn!(peer = %peer, "link failed: {e}"),
        }
    });

    Link { transport, frames, task }
}

/// Pump the socket until either side goes away.
async fn run_link(
    mut stream: TcpStream,
    mut tx_receiver: mpsc::Receiver<OutboundFrame>,
    frame_sender: mpsc::Sender<Vec<u8>>,
) -> io::Result<()> {
    let (mut reader, mut writer) = stream.split();
    let mut codec = NotificationCodec::new();
    let mut read_buf = [0u8; READ_CHUNK];

    loop {
        tokio::select! {
            result = reader.read(&mut read_buf) => {
                let n = result?;
                if n == 0 {
                    debug!("bridge closed the connection");
                    return Ok(());
                }
                trace!(bytes = n, "read from bridge");
                codec.push(&read_buf[..n]);
                while let Some(frame) = codec.decode() {
                    if frame_sender.send(frame).await.is_err() {
                        debug!("frame receiver dropped");
                        return Ok(());
                    }
                }
            }

            outbound = tx_receiver.recv() => {
                let Some(outbound) = outbound else {
                    debug!("all transport handles dropped");
                    return Ok(());
                };
                let wire = NotificationCodec::encode(&outbound.bytes);
                let written = match writer.write_all(&wire).await {
                    Ok(()) => writer.flush().await,
                    Err(e) => Err(e),
                };
                match written {
                    Ok(()) => {
                        trace!(bytes = wire.len(), "wrote to bridge");
                        outbound.complete(Ok(()));
                    }
                    Err(e) => {
                        outbound.complete(Err(TransportError::Rejected(e.to_string())));
                        return Err(e);
                    }
                }
            }
        }
    }
}

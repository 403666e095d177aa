//! Process-level stream server
//!
//! Opens bidirectional streams: each `open_stream` call spawns one session
//! machine task plus the decode/encode pumps that translate between wire
//! frames and typed events. Sessions share nothing but the meeting id
//! registry.

use crate::collab::Collaborators;
use crate::config::StreamConfig;
use crate::session::{ClientEvent, ErrorCode, ServerEvent, SessionMachine, SessionRegistry};
use crate::wire::StreamCodec;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Client-side handle for one open stream.
///
/// Dropping `sender` half-closes the stream: the session drains in-flight
/// audio, emits its final transcription and summary, and ends. Calling
/// [`StreamHandle::abort`] (or dropping the whole handle and its receiver)
/// tears the session down immediately, discarding in-flight work.
pub struct StreamHandle {
    /// Client → server wire frames.
    pub sender: mpsc::Sender<Vec<u8>>,
    /// Server → client wire frames. Closes after the session ends.
    pub receiver: mpsc::Receiver<Vec<u8>>,
    tasks: Vec<JoinHandle<()>>,
}

impl StreamHandle {
    /// Abort the stream outright, releasing all per-session resources.
    pub fn abort(self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

pub struct StreamServer {
    collaborators: Collaborators,
    registry: Arc<SessionRegistry>,
    config: StreamConfig,
}

impl StreamServer {
    pub fn new(collaborators: Collaborators, config: StreamConfig) -> Self {
        Self {
            collaborators,
            registry: Arc::new(SessionRegistry::new()),
            config,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Open one bidirectional stream and spawn its session.
    pub fn open_stream(&self) -> StreamHandle {
        let capacity = self.config.channel_capacity.max(1);
        let (wire_in_tx, mut wire_in_rx) = mpsc::channel::<Vec<u8>>(capacity);
        let (wire_out_tx, wire_out_rx) = mpsc::channel::<Vec<u8>>(capacity);
        let (event_tx, event_rx) = mpsc::channel::<ClientEvent>(capacity);
        let (response_tx, mut response_rx) = mpsc::channel::<ServerEvent>(capacity);

        let machine = SessionMachine::new(
            self.collaborators.clone(),
            Arc::clone(&self.registry),
            &self.config,
        );
        let machine_task = tokio::spawn(machine.run(event_rx, response_tx));

        // Decode pump: wire frames → typed events. Undecodable frames answer
        // with INVALID_MESSAGE directly; they never reach the machine.
        let decode_out = wire_out_tx.clone();
        let decode_task = tokio::spawn(async move {
            while let Some(frame) = wire_in_rx.recv().await {
                match StreamCodec::decode(&frame) {
                    Ok(event) => {
                        if event_tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "undecodable client frame");
                        let event = ServerEvent::Error {
                            code: ErrorCode::InvalidMessage,
                            message: format!("undecodable message: {e}"),
                        };
                        match StreamCodec::encode(&event) {
                            Ok(frame) => {
                                if decode_out.send(frame).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => error!(error = %e, "failed to encode stream error"),
                        }
                    }
                }
            }
            // event_tx drops here: the machine sees the client half-close.
        });

        // Encode pump: typed responses → wire frames, in emission order.
        let encode_task = tokio::spawn(async move {
            while let Some(event) = response_rx.recv().await {
                match StreamCodec::encode(&event) {
                    Ok(frame) => {
                        if wire_out_tx.send(frame).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => error!(error = %e, "failed to encode server event"),
                }
            }
        });

        info!("stream opened");

        StreamHandle {
            sender: wire_in_tx,
            receiver: wire_out_rx,
            tasks: vec![machine_task, decode_task, encode_task],
        }
    }
}

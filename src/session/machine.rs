use super::events::{
    AudioChunk, ClientEvent, ErrorCode, ImportanceMarker, ServerEvent, SetupRequest,
};
use super::ledger::MarkerLedger;
use super::registry::{MeetingClaim, SessionRegistry};
use super::reorder::{Accept, ReorderBuffer};
use super::state::SessionState;
use crate::collab::{Collaborators, MetadataStore, SummarizationTrigger, TranscriptionRelay};
use crate::config::StreamConfig;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Per-session orchestrator: owns the session lifecycle, validates message
/// legality against the current state, routes inbound events to the reorder
/// buffer and marker ledger, and serializes all outbound events onto one
/// ordered response channel.
///
/// One machine = one logical thread of control. Inbound events are processed
/// strictly one at a time in arrival order, which is what gives the causal
/// ordering guarantee on the outbound channel.
pub struct SessionMachine {
    state: SessionState,
    claim: Option<MeetingClaim>,
    audio_format: Option<String>,
    reorder: ReorderBuffer,
    ledger: MarkerLedger,
    relay: TranscriptionRelay,
    trigger: SummarizationTrigger,
    store: Arc<dyn MetadataStore>,
    registry: Arc<SessionRegistry>,
    accepted_chunks: u64,
}

impl SessionMachine {
    pub fn new(
        collaborators: Collaborators,
        registry: Arc<SessionRegistry>,
        config: &StreamConfig,
    ) -> Self {
        Self {
            state: SessionState::Uninitialized,
            claim: None,
            audio_format: None,
            reorder: ReorderBuffer::new(config.reorder_window),
            ledger: MarkerLedger::new(),
            relay: TranscriptionRelay::new(collaborators.transcriber),
            trigger: SummarizationTrigger::new(collaborators.summarizer),
            store: collaborators.store,
            registry,
            accepted_chunks: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The claimed meeting id, once setup has been confirmed.
    pub fn meeting_id(&self) -> Option<&str> {
        self.claim.as_ref().map(|claim| claim.id())
    }

    pub fn audio_format(&self) -> Option<&str> {
        self.audio_format.as_deref()
    }

    /// Drive the session until the inbound channel closes.
    ///
    /// The channel closing is the client half-close: the machine finalizes
    /// (final transcription, then summary) and ends. The outbound receiver
    /// going away is a stream abort: the machine stops immediately,
    /// discarding in-flight work. The meeting id claim is released when the
    /// machine is dropped, on every exit path.
    pub async fn run(
        mut self,
        mut inbound: mpsc::Receiver<ClientEvent>,
        outbound: mpsc::Sender<ServerEvent>,
    ) {
        while let Some(event) = inbound.recv().await {
            if self.state.is_terminal() {
                // The channel is already ending; never a protocol error reply.
                debug!(state = ?self.state, "dropping event received after session end");
                continue;
            }

            for response in self.handle(event).await {
                if outbound.send(response).await.is_err() {
                    info!("outbound channel closed; aborting session");
                    return;
                }
            }
        }

        if self.state == SessionState::Active {
            self.enter(SessionState::Finalizing);
            for response in self.finalize().await {
                if outbound.send(response).await.is_err() {
                    return;
                }
            }
        }

        self.enter(SessionState::Closed);
        info!(state = ?self.state, "session ended");
    }

    async fn handle(&mut self, event: ClientEvent) -> Vec<ServerEvent> {
        match event {
            ClientEvent::Setup(request) => match self.state {
                SessionState::Uninitialized => self.on_setup(request).await,
                _ => self.violation("initial setup repeated on an active stream"),
            },
            ClientEvent::Audio(chunk) => match self.state {
                SessionState::Active => self.on_audio(chunk).await,
                _ => self.violation("audio chunk before initial setup"),
            },
            ClientEvent::Marker(marker) => match self.state {
                SessionState::Active => self.on_marker(marker),
                _ => self.violation("importance marker before initial setup"),
            },
        }
    }

    async fn on_setup(&mut self, request: SetupRequest) -> Vec<ServerEvent> {
        let requested = request.meeting_id.filter(|id| !id.is_empty());

        let claim = match self.registry.claim(requested) {
            Ok(claim) => claim,
            Err(busy) => {
                warn!(meeting_id = %busy.0, "setup rejected: meeting already streaming");
                self.enter(SessionState::Failed);
                return vec![ServerEvent::Confirmation {
                    meeting_id: busy.0.clone(),
                    success: false,
                    message: busy.to_string(),
                }];
            }
        };

        let meeting_id = claim.id().to_string();
        let message = match self.store.save(&meeting_id, &request.metadata).await {
            Ok(()) => format!("meeting {meeting_id} ready"),
            Err(e) => {
                warn!(meeting_id, error = %e, "metadata save failed during setup");
                format!("meeting {meeting_id} ready (metadata not persisted: {e:#})")
            }
        };

        self.claim = Some(claim);
        self.audio_format = Some(request.audio_format);
        self.enter(SessionState::Active);
        info!(meeting_id, "session active");

        vec![ServerEvent::Confirmation {
            meeting_id,
            success: true,
            message,
        }]
    }

    async fn on_audio(&mut self, chunk: AudioChunk) -> Vec<ServerEvent> {
        match self.reorder.accept(chunk.sequence_number, chunk.content) {
            Accept::Ready(ready) => self.forward(ready).await,
            Accept::Duplicate | Accept::Buffered => Vec::new(),
            Accept::GapSkipped {
                ready,
                skipped_from,
                resumed_at,
            } => {
                let mut responses = vec![ServerEvent::Error {
                    code: ErrorCode::AudioGap,
                    message: format!(
                        "audio gap: sequences {skipped_from}..{resumed_at} lost, resuming"
                    ),
                }];
                responses.extend(self.forward(ready).await);
                responses
            }
        }
    }

    fn on_marker(&mut self, marker: ImportanceMarker) -> Vec<ServerEvent> {
        let item_name = marker.item_name.clone();
        let position = self.ledger.append(marker);
        info!(item = %item_name, position, "importance marker recorded");

        vec![ServerEvent::MarkerAck {
            item_name,
            success: true,
            message: format!("marker recorded ({} total)", position + 1),
        }]
    }

    /// Forward in-order chunks through the transcription relay.
    async fn forward(&mut self, ready: Vec<AudioChunk>) -> Vec<ServerEvent> {
        let mut responses = Vec::new();
        for chunk in &ready {
            self.accepted_chunks += 1;
            responses.extend(self.relay.feed(chunk).await);
        }
        responses
    }

    /// Drain audio still in flight, emit the final transcription, then the
    /// summary. Skipped entirely if no chunk was ever accepted: no final
    /// transcription may precede the first accepted chunk.
    async fn finalize(&mut self) -> Vec<ServerEvent> {
        let mut responses = Vec::new();

        let (remaining, had_gap) = self.reorder.drain_remaining();
        if had_gap {
            warn!(held = remaining.len(), "unfilled audio gap at end of input");
            responses.push(ServerEvent::Error {
                code: ErrorCode::AudioGap,
                message: "audio gap unfilled at end of input".to_string(),
            });
        }
        responses.extend(self.forward(remaining).await);

        if self.accepted_chunks == 0 {
            debug!("no audio accepted; closing without final transcription");
            return responses;
        }

        let (relay_responses, full_transcript) = self.relay.finalize().await;
        responses.extend(relay_responses);

        if let Some(response) = self.trigger.run(&full_transcript).await {
            responses.push(response);
        }

        responses
    }

    fn violation(&mut self, what: &str) -> Vec<ServerEvent> {
        warn!(state = ?self.state, what, "protocol violation");
        self.enter(SessionState::Failed);
        vec![ServerEvent::Error {
            code: ErrorCode::InvalidSequence,
            message: what.to_string(),
        }]
    }

    fn enter(&mut self, next: SessionState) {
        if self.state.can_transition_to(next) {
            debug!(from = ?self.state, to = ?next, "state transition");
            self.state = next;
        } else if !self.state.is_terminal() {
            // Transitions are monotonic; a rejected one is a machine bug.
            error!(from = ?self.state, to = ?next, "illegal state transition ignored");
        }
    }
}

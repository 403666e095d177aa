use anyhow::Result;
use clap::Parser;
use meeting_stream::{
    ClientMessage, Collaborators, Config, MeetingMetadata, ServerMessage, StreamServer,
};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "meeting-stream", about = "Bidirectional meeting transcription stream")]
struct Args {
    /// Config file (without extension), e.g. config/meeting-stream
    #[arg(long, default_value = "config/meeting-stream")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("config not loaded ({e}); using defaults");
            Config::default()
        }
    };

    info!("{} v0.1.0", cfg.service.name);
    info!(
        "reorder window: {}, channel capacity: {}",
        cfg.stream.reorder_window, cfg.stream.channel_capacity
    );

    // Scripted walkthrough against the stub collaborators: one stream with
    // out-of-order audio and an importance marker.
    let server = StreamServer::new(Collaborators::stub(), cfg.stream.clone());
    let handle = server.open_stream();
    let sender = handle.sender;
    let mut receiver = handle.receiver;

    let frames = [
        serde_json::to_vec(&ClientMessage::InitialSetup {
            meeting_id: None,
            audio_format: "pcm16".to_string(),
            metadata: MeetingMetadata {
                title: "Weekly sync".to_string(),
                meeting_date: "2026-08-25".to_string(),
                attendees: vec!["alice".to_string(), "bob".to_string()],
                notes: "demo session".to_string(),
            },
        })?,
        serde_json::to_vec(&ClientMessage::AudioChunk {
            content: b"hello everyone".to_vec(),
            sequence_number: 0,
        })?,
        // Chunk 2 arrives before chunk 1; the reorder buffer corrects it.
        serde_json::to_vec(&ClientMessage::AudioChunk {
            content: b"agenda for today".to_vec(),
            sequence_number: 2,
        })?,
        serde_json::to_vec(&ClientMessage::ImportanceMarker {
            item_name: "budget decision".to_string(),
            importance_score: 5.0,
            details: "revisit in Q4".to_string(),
            timestamp_ms: 1_200,
        })?,
        serde_json::to_vec(&ClientMessage::AudioChunk {
            content: b"let us go through the".to_vec(),
            sequence_number: 1,
        })?,
    ];
    for frame in frames {
        sender.send(frame).await?;
    }
    drop(sender); // half-close: the session finalizes

    while let Some(frame) = receiver.recv().await {
        match serde_json::from_slice::<ServerMessage>(&frame)? {
            ServerMessage::Confirmation {
                meeting_id,
                success,
                message,
            } => info!(meeting_id, success, "{message}"),
            ServerMessage::PartialTranscription {
                transcript_segment,
                sequence_number,
                is_interim,
            } => info!(sequence_number, is_interim, "partial: {transcript_segment}"),
            ServerMessage::FinalTranscription { full_transcript } => {
                info!("final transcript: {full_transcript}")
            }
            ServerMessage::SummaryResult { summary_text } => info!("summary: {summary_text}"),
            ServerMessage::ImportanceAck {
                item_name, message, ..
            } => info!(item_name, "{message}"),
            ServerMessage::StreamError { code, message } => warn!(code, "{message}"),
        }
    }

    info!("stream closed");
    Ok(())
}

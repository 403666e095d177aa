// Tests for the unary companion operations.

use anyhow::Result;
use meeting_stream::{Collaborators, MeetingMetadata, MeetingService, MetadataPatch};

fn metadata(title: &str) -> MeetingMetadata {
    MeetingMetadata {
        title: title.to_string(),
        meeting_date: "2026-08-25".to_string(),
        attendees: vec!["alice".to_string()],
        notes: String::new(),
    }
}

#[tokio::test]
async fn save_metadata_assigns_an_id_when_none_is_given() -> Result<()> {
    let service = MeetingService::new(Collaborators::stub());

    let response = service.save_metadata(None, metadata("kickoff")).await;
    assert!(response.success);
    assert!(response.meeting_id.starts_with("meeting-"));
    Ok(())
}

#[tokio::test]
async fn save_metadata_is_idempotent_for_a_given_id() -> Result<()> {
    let collaborators = Collaborators::stub();
    let service = MeetingService::new(collaborators.clone());

    let first = service
        .save_metadata(Some("meeting-repeat".to_string()), metadata("v1"))
        .await;
    let second = service
        .save_metadata(Some("meeting-repeat".to_string()), metadata("v2"))
        .await;
    assert!(first.success && second.success);
    assert_eq!(first.meeting_id, second.meeting_id);

    let record = collaborators
        .store
        .get("meeting-repeat")
        .await?
        .expect("record exists");
    assert_eq!(record.metadata.title, "v2", "second save overwrites in place");
    Ok(())
}

#[tokio::test]
async fn edit_metadata_applies_partial_updates() -> Result<()> {
    let collaborators = Collaborators::stub();
    let service = MeetingService::new(collaborators.clone());

    service
        .save_metadata(Some("meeting-edit".to_string()), metadata("draft"))
        .await;

    let response = service
        .edit_metadata(
            "meeting-edit",
            MetadataPatch {
                title: Some("final title".to_string()),
                ..MetadataPatch::default()
            },
        )
        .await;
    assert!(response.success);

    let record = collaborators
        .store
        .get("meeting-edit")
        .await?
        .expect("record exists");
    assert_eq!(record.metadata.title, "final title");
    assert_eq!(record.metadata.meeting_date, "2026-08-25", "untouched field kept");
    Ok(())
}

#[tokio::test]
async fn edit_metadata_reports_unknown_meeting() -> Result<()> {
    let service = MeetingService::new(Collaborators::stub());

    let response = service
        .edit_metadata("meeting-ghost", MetadataPatch::default())
        .await;
    assert!(!response.success);
    Ok(())
}

#[tokio::test]
async fn delete_metadata_removes_the_record() -> Result<()> {
    let collaborators = Collaborators::stub();
    let service = MeetingService::new(collaborators.clone());

    service
        .save_metadata(Some("meeting-gone".to_string()), metadata("temp"))
        .await;
    let response = service.delete_metadata("meeting-gone").await;
    assert!(response.success);
    assert!(collaborators.store.get("meeting-gone").await?.is_none());

    // Deleting again reports not-found.
    let again = service.delete_metadata("meeting-gone").await;
    assert!(!again.success);
    Ok(())
}

#[tokio::test]
async fn save_importance_acks() -> Result<()> {
    let service = MeetingService::new(Collaborators::stub());

    let response = service
        .save_importance("agenda item 1", 5.0, "very important")
        .await;
    assert!(response.success);
    assert!(response.message.contains("agenda item 1"));
    Ok(())
}

#[tokio::test]
async fn transcribe_and_summarize_one_shot() -> Result<()> {
    let service = MeetingService::new(Collaborators::stub());

    let response = service
        .transcribe_and_summarize(b"quarterly numbers look good".to_vec(), "wav")
        .await;
    assert_eq!(response.transcription, "quarterly numbers look good");
    assert!(!response.summary.is_empty());
    assert!(response.error_message.is_empty());
    Ok(())
}

use chrono::{DateTime, Utc};
use uuid::Uuid;

use newsdesk::models::*;

const SQL_TIME_FMT: &str = "%Y-%m-%d %H:%M:%S%#z";

pub fn parse_time(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_str(s, SQL_TIME_FMT)
        .expect("Invalid time format in test helper")
        .with_timezone(&Utc)
}

pub fn get_seed_assignments() -> CategoryAssignments {
    let mut assignments = CategoryAssignments::new();
    assignments.assign(
        Uuid::parse_str("00000000-0000-0000-0000-0000000000a1").unwrap(),
        [
            Uuid::parse_str("00000000-0000-0000-0000-0000000000b1").unwrap(),
            Uuid::parse_str("00000000-0000-0000-0000-0000000000b2").unwrap(),
        ],
    );
    assignments.assign(
        Uuid::parse_str("00000000-0000-0000-0000-0000000000a2").unwrap(),
        [],
    );
    assignments
}

pub fn get_seed_media() -> MediaUpload {
    MediaUpload {
        file_name: "press-photo.jpg".to_string(),
        content_type: Some("image/jpeg".to_string()),
        bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
    }
}

pub fn get_seed_record_news() -> Record {
    Record {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        reporter_id: Uuid::parse_str("00000000-0000-0000-0000-000000000010").unwrap(),
        kind: RecordKind::News,
        status: ModerationStatus::Pending,
        main_headline: "City council approves budget".to_string(),
        subheadline: "The vote passed 7 to 2".to_string(),
        description: "<p>The council met on Tuesday evening.</p>".to_string(),
        media_url: Some("/media/00000000-0000-0000-0000-000000000001.jpg".to_string()),
        category_assignments: get_seed_assignments(),
        created_at: parse_time("2026-01-04 22:15:06+00"),
        updated_at: parse_time("2026-01-04 22:15:06+00"),
    }
}

/// Candidate whose every tracked field mirrors [`get_seed_record_news`].
pub fn get_seed_candidate_matching() -> EditCandidate {
    let record = get_seed_record_news();
    EditCandidate {
        reporter_id: Some(record.reporter_id),
        main_headline: Some(record.main_headline),
        subheadline: Some(record.subheadline),
        description: Some(record.description),
        category_assignments: Some(record.category_assignments),
        media: None,
    }
}

/// Fully filled candidate for creation flows, media file included.
pub fn get_seed_candidate_create() -> EditCandidate {
    EditCandidate {
        reporter_id: Some(Uuid::parse_str("00000000-0000-0000-0000-000000000010").unwrap()),
        main_headline: Some("Bridge closure announced".to_string()),
        subheadline: Some("Repairs begin next month".to_string()),
        description: Some("<p>The west bridge closes for repairs.</p>".to_string()),
        category_assignments: Some(get_seed_assignments()),
        media: Some(get_seed_media()),
    }
}

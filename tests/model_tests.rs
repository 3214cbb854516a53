mod common;

#[cfg(test)]
pub mod model_tests {
    use chrono::Duration;
    use uuid::Uuid;

    use super::common::*;

    use newsdesk::common::*;
    use newsdesk::models::*;

    #[test]
    fn test_record_kind_round_trip_success() {
        assert_eq!("news".parse::<RecordKind>(), Ok(RecordKind::News));
        assert_eq!("Blog".parse::<RecordKind>(), Ok(RecordKind::Blog));
        assert_eq!(RecordKind::News.to_string(), "news");
        assert!(RecordKind::Blog == "blog");
    }

    #[test]
    fn test_record_kind_parse_fails_on_unknown() {
        assert!("podcast".parse::<RecordKind>().is_err());
    }

    #[test]
    fn test_moderation_status_defaults_to_pending() {
        assert_eq!(ModerationStatus::default(), ModerationStatus::Pending);
    }

    #[test]
    fn test_moderation_status_round_trip_success() {
        assert_eq!(
            "approved".parse::<ModerationStatus>(),
            Ok(ModerationStatus::Approved)
        );
        assert_eq!(ModerationStatus::Rejected.to_string(), "rejected");
        assert!(ModerationStatus::Pending == "pending");
        assert!("published".parse::<ModerationStatus>().is_err());
    }

    #[test]
    fn test_category_assignments_equality_ignores_insertion_order() {
        let category = Uuid::parse_str("00000000-0000-0000-0000-0000000000a1").unwrap();
        let sub_1 = Uuid::parse_str("00000000-0000-0000-0000-0000000000b1").unwrap();
        let sub_2 = Uuid::parse_str("00000000-0000-0000-0000-0000000000b2").unwrap();

        let mut forward = CategoryAssignments::new();
        forward.assign(category, [sub_1, sub_2]);

        let mut backward = CategoryAssignments::new();
        backward.assign(category, [sub_2, sub_1]);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_category_assignments_assign_merges_subcategories() {
        let category = Uuid::parse_str("00000000-0000-0000-0000-0000000000a1").unwrap();
        let sub_1 = Uuid::parse_str("00000000-0000-0000-0000-0000000000b1").unwrap();
        let sub_2 = Uuid::parse_str("00000000-0000-0000-0000-0000000000b2").unwrap();

        let mut assignments = CategoryAssignments::new();
        assignments.assign(category, [sub_1]);
        assignments.assign(category, [sub_2, sub_1]);

        let subcategories = assignments
            .subcategories_for(category)
            .expect("Category should be present");

        assert_eq!(subcategories.len(), 2);
        assert!(subcategories.contains(&sub_1));
        assert!(subcategories.contains(&sub_2));
        assert_eq!(assignments.category_ids().count(), 1);
    }

    #[test]
    fn test_category_assignments_serde_round_trip() {
        let assignments = get_seed_assignments();

        let value = serde_json::to_value(&assignments).expect("Serialization should succeed");
        assert!(value.is_object(), "Assignments serialize as a plain map");

        let parsed: CategoryAssignments =
            serde_json::from_value(value).expect("Deserialization should succeed");
        assert_eq!(parsed, assignments);
    }

    #[test]
    fn test_change_set_is_empty_ignores_identifier() {
        let changes = ChangeSet {
            id: Some(Uuid::new_v4()),
            ..Default::default()
        };

        assert!(
            changes.is_empty(),
            "A payload carrying only the identifier updates nothing"
        );
    }

    #[test]
    fn test_change_set_is_empty_fails_on_any_field() {
        let changes = ChangeSet {
            description: Some("updated".to_string()),
            ..Default::default()
        };

        assert!(!changes.is_empty());
    }

    #[test]
    fn test_change_set_changed_fields_lists_only_set_fields() {
        let changes = ChangeSet {
            id: Some(Uuid::new_v4()),
            main_headline: Some("A headline".to_string()),
            media: Some(get_seed_media()),
            ..Default::default()
        };

        assert_eq!(changes.changed_fields(), vec!["main_headline", "media"]);
    }

    #[test]
    fn test_edit_candidate_fields_schema() {
        let fields = EditCandidate::fields();

        assert_eq!(fields.len(), 5);
        assert!(fields.contains(&"reporter_id"));
        assert!(fields.contains(&"main_headline"));
        assert!(fields.contains(&"subheadline"));
        assert!(fields.contains(&"description"));
        assert!(fields.contains(&"category_assignments"));
        assert!(
            !fields.contains(&"media"),
            "The media file rides alongside the form but is not a diffable field"
        );
    }

    #[test]
    fn test_record_insert_from_change_set_success() {
        let reporter_id = Uuid::new_v4();
        let changes = ChangeSet {
            id: None,
            reporter_id: Some(reporter_id),
            main_headline: Some("A headline".to_string()),
            subheadline: None,
            description: Some("<p>Body</p>".to_string()),
            category_assignments: Some(get_seed_assignments()),
            media: Some(get_seed_media()),
        };

        let insert = RecordInsert::from_change_set(
            RecordKind::Blog,
            changes,
            Some("/media/file.jpg".to_string()),
        )
        .expect("Complete change set should convert");

        assert_eq!(insert.reporter_id, reporter_id);
        assert_eq!(insert.kind, RecordKind::Blog);
        assert_eq!(insert.main_headline, "A headline");
        assert_eq!(
            insert.subheadline, "",
            "A missing subheadline falls back to empty text"
        );
        assert_eq!(insert.media_url.as_deref(), Some("/media/file.jpg"));
    }

    #[test]
    fn test_record_insert_fails_on_missing_fields() {
        let changes = ChangeSet {
            main_headline: Some("A headline".to_string()),
            ..Default::default()
        };

        let result = RecordInsert::from_change_set(RecordKind::News, changes, None);

        assert!(
            matches!(
                result,
                Err(ValidationError::MissingFields(fields))
                if fields == vec!["reporter_id", "description", "category_assignments"]
            ),
            "Every absent column should be reported"
        );
    }

    #[test]
    fn test_otp_challenge_expiry_boundary() {
        let now = parse_time("2026-01-04 22:15:06+00");
        let challenge = OtpChallenge {
            reporter_id: Uuid::new_v4(),
            code_hash: "$argon2id$stub".to_string(),
            expires_at: now,
            created_at: now - Duration::minutes(10),
        };

        assert!(
            challenge.is_expired_at(now),
            "A code expires exactly at its deadline"
        );
        assert!(!challenge.is_expired_at(now - Duration::seconds(1)));
        assert!(challenge.is_expired_at(now + Duration::seconds(1)));
    }

    #[test]
    fn test_reporter_iden_from_uuid_success() {
        let id = Uuid::new_v4();
        assert_eq!(ReporterIden::Id(id), ReporterIden::from(id));
    }

    #[test]
    fn test_reporter_iden_from_string_success() {
        let email = "desk@test.com".to_string();
        assert_eq!(
            ReporterIden::Email(email.clone()),
            ReporterIden::from(email)
        );
    }

    #[test]
    fn test_reporter_iden_from_ref_string_success() {
        let email = "desk@test.com".to_string();
        assert_eq!(
            ReporterIden::Email(email.clone()),
            ReporterIden::from(&email)
        );

        let _ = email;
    }

    #[test]
    fn test_reporter_iden_from_str_success() {
        let email = "desk@test.com".to_string();
        assert_eq!(
            ReporterIden::Email(email.clone()),
            ReporterIden::from(email.as_str())
        );

        let _ = email;
    }
}

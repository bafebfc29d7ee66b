#[cfg(test)]
mod tests {
    use crate::models::{CreateVoteRequest, StoreState, UpdateVoteRequest, VoteRecord};
    use crate::validation::{ValidationError, ValidationPolicy, VoteFields};
    use time::macros::datetime;
    use time::OffsetDateTime;

    fn record(id: u64, title: &str, created_at: OffsetDateTime) -> VoteRecord {
        VoteRecord { id, title: title.into(), content: None, created_at }
    }

    fn create(title: Option<&str>, content: Option<&str>) -> CreateVoteRequest {
        CreateVoteRequest {
            title: title.map(Into::into),
            content: content.map(Into::into),
        }
    }

    #[test]
    fn test_create_requires_title() {
        let policy = ValidationPolicy::lenient();
        assert_eq!((policy.create)(&create(None, Some("x"))), Err(ValidationError::TitleRequired));
        assert_eq!((policy.create)(&create(Some(""), None)), Err(ValidationError::TitleRequired));

        let fields = (policy.create)(&create(Some("A"), Some("body"))).unwrap();
        assert_eq!(fields, VoteFields { title: "A".into(), content: Some("body".into()) });
    }

    #[test]
    fn test_create_drops_empty_content() {
        let fields = (ValidationPolicy::lenient().create)(&create(Some("A"), Some(""))).unwrap();
        assert_eq!(fields.content, None);
    }

    #[test]
    fn test_update_policies() {
        let blank = UpdateVoteRequest { title: Some(String::new()), content: None };

        let lenient = (ValidationPolicy::lenient().update)(&blank).unwrap();
        assert_eq!(lenient.title, "");

        let missing = (ValidationPolicy::lenient().update)(&UpdateVoteRequest::default()).unwrap();
        assert_eq!(missing, VoteFields { title: String::new(), content: None });

        assert_eq!((ValidationPolicy::strict().update)(&blank), Err(ValidationError::TitleRequired));

        let ok = UpdateVoteRequest { title: Some("T".into()), content: Some("".into()) };
        let fields = (ValidationPolicy::strict().update)(&ok).unwrap();
        assert_eq!(fields.content.as_deref(), Some(""));
    }

    #[test]
    fn test_state_file_layout() {
        let state = StoreState {
            records: vec![record(1, "A", datetime!(2024-05-01 10:00:00 UTC))],
            next_id: 2,
        };
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["nextId"], 2);
        assert_eq!(json["votes"][0]["id"], 1);
        assert_eq!(json["votes"][0]["title"], "A");
        assert!(json["votes"][0]["content"].is_null());
        assert_eq!(json["votes"][0]["created_at"], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_reads_millisecond_timestamps() {
        let raw = r#"{
          "votes": [
            { "id": 3, "title": "Lunch", "content": "pizza", "created_at": "2024-05-01T10:00:00.123Z" }
          ],
          "nextId": 4
        }"#;
        let state: StoreState = serde_json::from_str(raw).unwrap();

        assert_eq!(state.next_id, 4);
        assert_eq!(state.records[0].content.as_deref(), Some("pizza"));
        assert_eq!(state.records[0].created_at.millisecond(), 123);
    }

    #[test]
    fn test_default_state() {
        let state = StoreState::default();
        assert!(state.records.is_empty());
        assert_eq!(state.next_id, 1);
        assert_eq!(state.max_id(), None);
    }

    #[test]
    fn test_newest_first() {
        let state = StoreState {
            records: vec![
                record(1, "old", datetime!(2024-01-01 00:00:00 UTC)),
                record(2, "new", datetime!(2024-03-01 00:00:00 UTC)),
                record(3, "mid", datetime!(2024-02-01 00:00:00 UTC)),
            ],
            next_id: 4,
        };
        let titles: Vec<_> = state.newest_first().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, ["new", "mid", "old"]);
    }

    #[test]
    fn test_newest_first_breaks_ties_by_id() {
        let at = datetime!(2024-01-01 00:00:00 UTC);
        let state = StoreState {
            records: vec![record(2, "B", at), record(3, "C", at)],
            next_id: 4,
        };
        let ids: Vec<_> = state.newest_first().iter().map(|r| r.id).collect();
        assert_eq!(ids, [3, 2]);
    }

    #[test]
    fn test_missing_request_fields_deserialize() {
        let request: CreateVoteRequest = serde_json::from_str(r#"{"content":"x"}"#).unwrap();
        assert_eq!(request.title, None);

        let request: UpdateVoteRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, UpdateVoteRequest::default());
    }
}

use shared::models::VoteId;
use time::OffsetDateTime;

/// Path ids that are not plain non-negative integers match no vote.
pub fn parse_vote_id(id: &str) -> Option<VoteId> {
    id.parse().ok()
}

pub fn unix_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_only_plain_ids() {
        assert_eq!(parse_vote_id("42"), Some(42));
        assert_eq!(parse_vote_id("0"), Some(0));
        assert_eq!(parse_vote_id("-1"), None);
        assert_eq!(parse_vote_id("abc"), None);
        assert_eq!(parse_vote_id("4.5"), None);
    }

    #[test]
    fn millis_are_recent() {
        // 2020-01-01T00:00:00Z
        assert!(unix_millis() > 1_577_836_800_000);
    }
}

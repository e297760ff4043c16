//! Identity and timestamp generation for new and mutated records.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::kind::Kind;

/// Generate a fresh, kind-prefixed identifier, e.g. `trk-018f...`.
///
/// Uuid v7 is time-ordered, so a plain `ORDER BY id` on a persisted
/// collection approximates insertion order.
pub fn new_id(kind: Kind) -> String {
    format!("{}-{}", kind.id_prefix(), Uuid::now_v7())
}

pub fn now_utc_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .expect("RFC3339 formatting for UTC timestamp should never fail")
}

#[cfg(test)]
mod tests {
    use super::new_id;
    use crate::domain::kind::Kind;

    #[test]
    fn ids_carry_the_kind_prefix_and_are_unique() {
        let a = new_id(Kind::Track);
        let b = new_id(Kind::Track);
        assert!(a.starts_with("trk-"));
        assert!(b.starts_with("trk-"));
        assert_ne!(a, b);
        assert!(new_id(Kind::Measurement).starts_with("mea-"));
    }
}

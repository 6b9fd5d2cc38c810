//! Local fallback filter for search responses the backend did not filter.

use tripdesk_core::{Candidate, EntityKind};

/// Case-insensitive substring match against the searchable attributes.
///
/// ## Matched Attributes
/// ```text
///  customer:  id, name, phone, email
///  vendor:    id, trade name, owner name, contact number
/// ```
pub fn matches(candidate: &Candidate, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .map(|value| value.to_lowercase().contains(&needle))
            .unwrap_or(false)
    };

    if candidate.id.to_lowercase().contains(&needle)
        || contains(&candidate.name)
        || contains(&candidate.phone)
    {
        return true;
    }

    match candidate.kind {
        EntityKind::Customer => contains(&candidate.email),
        EntityKind::Vendor => contains(&candidate.owner_name),
    }
}

/// Applies the fallback filter (unless `server_filtered`) and the cap.
///
/// The cap holds regardless of source.
pub fn narrow(
    candidates: Vec<Candidate>,
    query: &str,
    server_filtered: bool,
    max_results: usize,
) -> Vec<Candidate> {
    if server_filtered {
        return candidates.into_iter().take(max_results).collect();
    }

    candidates
        .into_iter()
        .filter(|c| matches(c, query))
        .take(max_results)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customers() -> Vec<Candidate> {
        vec![
            Candidate::new(EntityKind::Customer, "C-1")
                .with_name("John Smith")
                .with_phone("01711000000"),
            Candidate::new(EntityKind::Customer, "C-2")
                .with_name("Mary Jones")
                .with_email("JOHNNY@example.com"),
            Candidate::new(EntityKind::Customer, "C-3").with_name("Ali Khan"),
        ]
    }

    #[test]
    fn test_customer_matches_name_and_email() {
        let hits = narrow(customers(), "john", false, 10);
        let ids: Vec<&str> = hits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["C-1", "C-2"]);
    }

    #[test]
    fn test_matches_id_and_phone() {
        assert_eq!(narrow(customers(), "c-3", false, 10).len(), 1);
        assert_eq!(narrow(customers(), "01711", false, 10)[0].id, "C-1");
    }

    #[test]
    fn test_vendor_matches_owner_not_email() {
        let mut vendor = Candidate::new(EntityKind::Vendor, "V-1").with_name("Sky Travels");
        vendor.owner_name = Some("Rahim Uddin".to_string());
        vendor.email = Some("rahim@example.com".to_string());

        assert!(matches(&vendor, "rahim u"));
        assert!(!matches(&vendor, "example.com"));
    }

    #[test]
    fn test_server_filtered_skips_local_filter() {
        let hits = narrow(customers(), "zzz", true, 10);
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_cap_applies_to_both_sources() {
        let many: Vec<Candidate> = (0..25)
            .map(|i| Candidate::new(EntityKind::Customer, format!("C-{}", i)).with_name("John"))
            .collect();

        assert_eq!(narrow(many.clone(), "john", false, 10).len(), 10);
        assert_eq!(narrow(many, "anything", true, 10).len(), 10);
    }
}

//! Assignment list normalisation for job creation.

use std::collections::HashSet;
use uuid::Uuid;

/// Turns submitted employee ids into the distinct ids to assign.
///
/// Blank, unparseable and nil ids are skipped. Order of first appearance is
/// kept, since it determines the order of the aggregated assignee names.
pub fn normalize_employee_ids(raw: &[String]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    raw.iter()
        .filter_map(|id| Uuid::parse_str(id.trim()).ok())
        .filter(|id| !id.is_nil())
        .filter(|id| seen.insert(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(normalize_employee_ids(&[]).is_empty());
    }

    #[test]
    fn test_keeps_first_appearance_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let raw = vec![c.to_string(), a.to_string(), c.to_string(), b.to_string()];
        assert_eq!(normalize_employee_ids(&raw), vec![c, a, b]);
    }

    #[test]
    fn test_skips_falsy_entries() {
        let a = Uuid::new_v4();
        let raw = vec![
            String::new(),
            "   ".to_string(),
            Uuid::nil().to_string(),
            format!(" {a} "),
        ];
        assert_eq!(normalize_employee_ids(&raw), vec![a]);
    }
}

//! Derived-view filtering.
//!
//! [`filter_items`] is the pure function behind every list view: it takes the
//! raw collection and the view's [`FilterParams`] and returns the matching
//! entries as borrows of the raw collection, in their original order. Borrowing
//! makes it impossible for the derived view to contain anything that was not
//! loaded.
//!
//! Matching rules:
//! - the search term is a case-insensitive substring match against any of the
//!   entity's [`Filterable::search_fields`]
//! - status, region and user type are exact matches (ASCII case-insensitive)
//! - all active predicates are combined with logical AND; unset predicates match

use crate::domain::{Application, ClientUser, OperationalUser, UserSummary, UserType};

/// Client-local filter state of one view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub search_term: String,
    pub status: Option<String>,
    pub region: Option<String>,
    pub user_type: Option<String>,
}

impl FilterParams {
    /// Whether no predicate is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.status.is_none()
            && self.region.is_none()
            && self.user_type.is_none()
    }

    fn matches<T: Filterable + ?Sized>(&self, item: &T, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            let hit = item
                .search_fields()
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(needle));
            if !hit {
                return false;
            }
        }

        category_matches(self.status.as_deref(), item.status_key().as_deref())
            && category_matches(self.region.as_deref(), item.region_key())
            && category_matches(self.user_type.as_deref(), item.type_key().as_deref())
    }
}

fn category_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual.is_some_and(|actual| actual.eq_ignore_ascii_case(wanted.trim())),
    }
}

/// Exposes the fields an entity is filtered on.
pub trait Filterable {
    /// Text fields searched by the free-text term. Missing fields are `None`.
    fn search_fields(&self) -> Vec<Option<&str>>;

    /// Categorical status, compared exactly.
    fn status_key(&self) -> Option<String>;

    /// Categorical region, compared exactly.
    fn region_key(&self) -> Option<&str>;

    /// Categorical user type. Entities without one never match a type filter.
    fn type_key(&self) -> Option<String> {
        None
    }

    /// Stable identifier used to target mutations.
    fn key(&self) -> &str;
}

/// Returns the entries of `raw` matching `params`, in order.
#[must_use]
pub fn filter_items<'a, T: Filterable>(raw: &'a [T], params: &FilterParams) -> Vec<&'a T> {
    let term = params.search_term.trim().to_lowercase();
    let needle = (!term.is_empty()).then_some(term.as_str());
    raw.iter().filter(|item| params.matches(*item, needle)).collect()
}

impl Filterable for ClientUser {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.first_name.as_str()),
            Some(self.last_name.as_str()),
            Some(self.email.as_str()),
            self.phone.as_deref(),
            self.persal_id.as_deref(),
            self.region.as_deref(),
        ]
    }

    fn status_key(&self) -> Option<String> {
        Some(self.registration_status.to_string())
    }

    fn region_key(&self) -> Option<&str> {
        self.region.as_deref()
    }

    fn type_key(&self) -> Option<String> {
        Some(UserType::Client.to_string())
    }

    fn key(&self) -> &str {
        &self.id
    }
}

impl Filterable for OperationalUser {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.first_name.as_str()),
            Some(self.last_name.as_str()),
            Some(self.email.as_str()),
            self.phone.as_deref(),
            self.region.as_deref(),
        ]
    }

    fn status_key(&self) -> Option<String> {
        self.registration_status.map(|s| s.to_string())
    }

    fn region_key(&self) -> Option<&str> {
        self.region.as_deref()
    }

    fn type_key(&self) -> Option<String> {
        Some(UserType::Operational.to_string())
    }

    fn key(&self) -> &str {
        &self.id
    }
}

impl Filterable for UserSummary {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.first_name.as_str()),
            Some(self.last_name.as_str()),
            Some(self.email.as_str()),
            self.phone.as_deref(),
            self.persal_id.as_deref(),
            self.region.as_deref(),
        ]
    }

    fn status_key(&self) -> Option<String> {
        self.registration_status.map(|s| s.to_string())
    }

    fn region_key(&self) -> Option<&str> {
        self.region.as_deref()
    }

    fn type_key(&self) -> Option<String> {
        Some(self.user_type.to_string())
    }

    fn key(&self) -> &str {
        &self.id
    }
}

impl Filterable for Application {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.application_id.as_str()),
            self.applicant_name.as_deref(),
            self.applicant_email.as_deref(),
            self.device_model.as_deref(),
            self.plan_name.as_deref(),
            self.region.as_deref(),
        ]
    }

    fn status_key(&self) -> Option<String> {
        Some(self.application_status.to_string())
    }

    fn region_key(&self) -> Option<&str> {
        self.region.as_deref()
    }

    fn key(&self) -> &str {
        &self.application_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OperationalRole, RegistrationStatus};
    use rstest::rstest;

    fn client(id: &str, first: &str, status: RegistrationStatus, region: &str) -> ClientUser {
        ClientUser {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: "Ndlovu".to_string(),
            email: format!("{}@example.org", first.to_lowercase()),
            phone: Some(format!("082 555 {id:0>4}")),
            persal_id: Some(format!("PS{id:0>6}")),
            department: Some("Justice".to_string()),
            region: Some(region.to_string()),
            registration_status: status,
            created_at: None,
        }
    }

    fn sample() -> Vec<ClientUser> {
        vec![
            client("1", "Abel", RegistrationStatus::Pending, "Gauteng"),
            client("2", "Abby", RegistrationStatus::Verified, "Limpopo"),
            client("3", "Zane", RegistrationStatus::Pending, "Gauteng"),
            client("4", "Naledi", RegistrationStatus::Rejected, "Western Cape"),
        ]
    }

    fn ids(items: &[&ClientUser]) -> Vec<String> {
        items.iter().map(|u| u.id.clone()).collect()
    }

    #[test]
    fn empty_params_keep_everything_in_order() {
        let raw = sample();
        let view = filter_items(&raw, &FilterParams::default());
        assert_eq!(ids(&view), vec!["1", "2", "3", "4"]);
    }

    #[rstest]
    #[case("ab", &["1", "2"])]
    #[case("AB", &["1", "2"])]
    #[case("  zane ", &["3"])]
    #[case("ps000004", &["4"])]
    #[case("555 0002", &["2"])]
    #[case("western", &["4"])]
    #[case("nobody", &[])]
    fn search_term_is_case_insensitive_substring(#[case] term: &str, #[case] expected: &[&str]) {
        let raw = sample();
        let params = FilterParams {
            search_term: term.to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_items(&raw, &params)), expected);
    }

    #[test]
    fn predicates_combine_with_and() {
        let raw = sample();
        let params = FilterParams {
            search_term: "a".to_string(),
            status: Some("pending".to_string()),
            region: Some("GAUTENG".to_string()),
            user_type: None,
        };
        assert_eq!(ids(&filter_items(&raw, &params)), vec!["1", "3"]);

        let params = FilterParams {
            status: Some("Pending".to_string()),
            user_type: Some("operational".to_string()),
            ..Default::default()
        };
        assert!(filter_items(&raw, &params).is_empty());
    }

    #[test]
    fn region_is_exact_not_substring() {
        let raw = sample();
        let params = FilterParams {
            region: Some("Cape".to_string()),
            ..Default::default()
        };
        assert!(filter_items(&raw, &params).is_empty());
    }

    #[test]
    fn derived_view_is_a_subset_of_raw() {
        let raw = sample();
        let before = raw.clone();
        for term in ["", "a", "ab", "x", "gauteng"] {
            for status in [None, Some("Pending"), Some("Verified")] {
                let params = FilterParams {
                    search_term: term.to_string(),
                    status: status.map(ToString::to_string),
                    ..Default::default()
                };
                for item in filter_items(&raw, &params) {
                    assert!(raw.iter().any(|r| std::ptr::eq(r, item)));
                }
            }
        }
        assert_eq!(raw, before);
    }

    #[test]
    fn operational_users_without_status_never_match_status_filter() {
        let raw = vec![OperationalUser {
            id: "op-1".to_string(),
            first_name: "Sipho".to_string(),
            last_name: "Dlamini".to_string(),
            email: "sipho@example.org".to_string(),
            phone: None,
            role: OperationalRole::Support,
            region: None,
            registration_status: None,
            created_at: None,
        }];
        let params = FilterParams {
            status: Some("Verified".to_string()),
            ..Default::default()
        };
        assert!(filter_items(&raw, &params).is_empty());

        let params = FilterParams {
            user_type: Some("Operational".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_items(&raw, &params).len(), 1);
    }
}

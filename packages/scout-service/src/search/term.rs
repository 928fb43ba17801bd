use scout_domain::username;
use scout_storage::filter::{UserFilter, UserOrder};

/// How a normalized term narrows and orders candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermMatch {
	filter: Option<UserFilter>,
	exact: Option<String>,
	order: UserOrder,
}
impl TermMatch {
	/// The match predicate; `None` matches every user.
	pub fn filter(&self) -> Option<&UserFilter> {
		self.filter.as_ref()
	}

	/// Lowercased term for the exact-username tier; `None` for blank terms.
	pub fn exact(&self) -> Option<&str> {
		self.exact.as_deref()
	}

	pub fn order(&self) -> &UserOrder {
		&self.order
	}
}

/// Classifies an already normalized term.
///
/// Terms carrying username separators, or any term when name search is off, become a literal
/// `username_lower` prefix. Other terms go through the searchable-text index and prefer
/// usernames that start with the term.
pub fn match_term(term: &str, name_search_enabled: bool) -> TermMatch {
	if term.trim().is_empty() {
		return TermMatch { filter: None, exact: None, order: UserOrder::RecentActivity };
	}

	let exact = Some(username::normalize_username(term));

	if name_search_enabled && !username::has_separator(term) {
		return TermMatch {
			filter: Some(UserFilter::SearchText(term.to_string())),
			exact,
			order: UserOrder::UsernamePrefixThenRecentActivity(term.to_string()),
		};
	}

	TermMatch {
		filter: Some(UserFilter::UsernamePrefix(term.to_string())),
		exact,
		order: UserOrder::RecentActivity,
	}
}

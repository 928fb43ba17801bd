use scout_storage::filter::{UserFilter, UserOrder, UserQuery};

use crate::SearchRequest;

/// The users a caller may discover at all, as an AND-composed predicate.
///
/// The scope is never materialized. Tiers intersect it with their own filters through
/// [`UserScope::query`], which copies the base filters once per query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserScope {
	filters: Vec<UserFilter>,
}
impl UserScope {
	pub fn and(mut self, filter: UserFilter) -> Self {
		self.filters.push(filter);

		self
	}

	pub fn query<I>(&self, extra: I, order: UserOrder, limit: u32) -> UserQuery
	where
		I: IntoIterator<Item = UserFilter>,
	{
		let mut filters = self.filters.clone();

		filters.extend(extra);

		UserQuery { filters, order, limit }
	}
}

/// Builds the eligible set for `req`.
///
/// `restricted_topic_category` is the topic's category id when that category is
/// read-restricted; it only matters for topic-allowed-user lookups.
pub fn scoped_users(req: &SearchRequest, restricted_topic_category: Option<i64>) -> UserScope {
	let mut scope = UserScope::default().and(UserFilter::Active);

	if !req.include_staged_users() {
		scope = scope.and(UserFilter::NotStaged);
	}
	if !req.caller().map(|caller| caller.is_staff()).unwrap_or(false) {
		scope = scope.and(UserFilter::NotSuspended);
	}
	if !req.groups().is_empty() {
		scope = scope.and(UserFilter::MemberOfAnyGroup(req.groups().to_vec()));
	}
	if req.topic_id().is_some()
		&& req.topic_allowed_users()
		&& let Some(category_id) = restricted_topic_category
	{
		scope = scope.and(UserFilter::AdminOrCategoryMember { category_id });
	}

	scope
}

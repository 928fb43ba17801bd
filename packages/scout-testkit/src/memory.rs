//! An in-memory [`UserStore`] and [`GroupAuthorizer`] that evaluates [`UserFilter`]s the same
//! way the Postgres renderer does.

use std::{
	cmp::{Ordering, Reverse},
	collections::{BTreeSet, HashSet},
	sync::Mutex,
};

use time::OffsetDateTime;

use crate::fixtures::Dataset;
use scout_domain::{
	group_visibility::{GroupViewer, GroupVisibility},
	text_search,
};
use scout_service::{
	BoxFuture, Caller, Error, GroupAuthorizer, Result, UserStore, store::ensure_no_hidden_groups,
};
use scout_storage::{
	filter::{UserFilter, UserOrder, UserQuery},
	models::User,
};

pub struct MemoryStore {
	data: Dataset,
	now: OffsetDateTime,
	executed: Mutex<Vec<UserQuery>>,
	fail_after: Mutex<Option<usize>>,
}
impl MemoryStore {
	pub fn new(data: Dataset) -> Self {
		Self::at(data, OffsetDateTime::now_utc())
	}

	/// Evaluates suspensions against a fixed clock.
	pub fn at(data: Dataset, now: OffsetDateTime) -> Self {
		Self { data, now, executed: Mutex::new(Vec::new()), fail_after: Mutex::new(None) }
	}

	/// Every candidate query run so far, in order.
	pub fn executed_queries(&self) -> Vec<UserQuery> {
		self.executed.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	/// Makes candidate queries fail once `count` of them have succeeded.
	pub fn fail_queries_after(&self, count: usize) {
		*self.fail_after.lock().unwrap_or_else(|err| err.into_inner()) = Some(count);
	}

	fn run_query(&self, query: &UserQuery) -> Result<Vec<i64>> {
		let mut executed = self.executed.lock().unwrap_or_else(|err| err.into_inner());
		let fail_after = *self.fail_after.lock().unwrap_or_else(|err| err.into_inner());

		if fail_after.map(|count| executed.len() >= count).unwrap_or(false) {
			return Err(Error::Storage { message: "statement timeout".to_string() });
		}

		executed.push(query.clone());

		let mut matched: Vec<&User> = self
			.data
			.users
			.iter()
			.filter(|user| query.filters.iter().all(|filter| self.matches(user, filter)))
			.collect();

		matched.sort_by(|a, b| compare(a, b, &query.order));
		matched.truncate(query.limit as usize);

		Ok(matched.into_iter().map(|user| user.id).collect())
	}

	fn matches(&self, user: &User, filter: &UserFilter) -> bool {
		match filter {
			UserFilter::Active => user.active,
			UserFilter::NotStaged => !user.staged,
			UserFilter::NotSuspended => !user.is_suspended_at(self.now),
			UserFilter::MemberOfAnyGroup(group_ids) => self
				.data
				.group_users
				.iter()
				.any(|member| member.user_id == user.id && group_ids.contains(&member.group_id)),
			UserFilter::AdminOrCategoryMember { category_id } =>
				user.admin || self.category_members(*category_id, &[]).contains(&user.id),
			UserFilter::UsernameEquals(term) => user.username_lower == *term,
			UserFilter::UsernamePrefix(term) => user.username_lower.starts_with(term.as_str()),
			UserFilter::SearchText(term) => {
				let document = format!("{} {}", user.username, user.name.as_deref().unwrap_or(""));

				text_search::tokens_match(
					&text_search::search_tokens(term),
					&text_search::search_tokens(&document),
				)
			},
			UserFilter::PostedInTopic(topic_id) => self
				.data
				.posts
				.iter()
				.any(|post| post.topic_id == *topic_id && post.user_id == user.id),
			UserFilter::CategoryGroupMember { category_id, excluded_group_ids, member_cap } => self
				.category_members(*category_id, excluded_group_ids)
				.into_iter()
				.take(*member_cap as usize)
				.any(|user_id| user_id == user.id),
			UserFilter::NotIn(user_ids) => !user_ids.contains(&user.id),
		}
	}

	/// Distinct members of groups granted access to the category, ascending by user id.
	fn category_members(&self, category_id: i64, excluded_group_ids: &[i64]) -> BTreeSet<i64> {
		let granted: HashSet<i64> = self
			.data
			.category_groups
			.iter()
			.filter(|grant| grant.category_id == category_id)
			.map(|grant| grant.group_id)
			.filter(|group_id| !excluded_group_ids.contains(group_id))
			.collect();

		self.data
			.group_users
			.iter()
			.filter(|member| granted.contains(&member.group_id))
			.map(|member| member.user_id)
			.collect()
	}

	fn viewer_for(&self, caller: Option<&Caller>, group_id: i64) -> GroupViewer {
		let Some(caller) = caller else {
			return GroupViewer::anonymous();
		};
		let membership = self
			.data
			.group_users
			.iter()
			.find(|member| member.group_id == group_id && member.user_id == caller.id);

		GroupViewer {
			logged_in: true,
			admin: caller.admin,
			moderator: caller.moderator,
			member: membership.is_some(),
			owner: membership.map(|member| member.owner).unwrap_or(false),
		}
	}
}

impl UserStore for MemoryStore {
	fn select_user_ids<'a>(&'a self, query: &'a UserQuery) -> BoxFuture<'a, Result<Vec<i64>>> {
		Box::pin(async move { self.run_query(query) })
	}

	fn fetch_users<'a>(&'a self, user_ids: &'a [i64]) -> BoxFuture<'a, Result<Vec<User>>> {
		// Reverse storage order so callers cannot lean on insertion order.
		let users = self
			.data
			.users
			.iter()
			.rev()
			.filter(|user| user_ids.contains(&user.id))
			.cloned()
			.collect();

		Box::pin(async move { Ok(users) })
	}

	fn find_user<'a>(&'a self, user_id: i64) -> BoxFuture<'a, Result<Option<User>>> {
		let user = self.data.users.iter().find(|user| user.id == user_id).cloned();

		Box::pin(async move { Ok(user) })
	}

	fn topic_category_id<'a>(&'a self, topic_id: i64) -> BoxFuture<'a, Result<Option<i64>>> {
		let category_id =
			self.data.topics.iter().find(|topic| topic.id == topic_id).and_then(|topic| topic.category_id);

		Box::pin(async move { Ok(category_id) })
	}

	fn category_read_restricted<'a>(&'a self, category_id: i64) -> BoxFuture<'a, Result<bool>> {
		let restricted = self
			.data
			.categories
			.iter()
			.find(|category| category.id == category_id)
			.map(|category| category.read_restricted)
			.unwrap_or(false);

		Box::pin(async move { Ok(restricted) })
	}
}

impl GroupAuthorizer for MemoryStore {
	fn ensure_can_see_groups<'a>(
		&'a self,
		caller: Option<&'a Caller>,
		group_ids: &'a [i64],
	) -> BoxFuture<'a, Result<()>> {
		let requested: BTreeSet<i64> = group_ids.iter().copied().collect();
		let hidden: Vec<i64> = requested
			.into_iter()
			.filter(|group_id| {
				let visibility = self
					.data
					.groups
					.iter()
					.find(|group| group.id == *group_id)
					.and_then(|group| GroupVisibility::from_level(group.visibility_level));

				match visibility {
					Some(visibility) => !visibility.visible_to(&self.viewer_for(caller, *group_id)),
					None => true,
				}
			})
			.collect();

		Box::pin(async move { ensure_no_hidden_groups(&hidden) })
	}
}

fn compare(a: &User, b: &User, order: &UserOrder) -> Ordering {
	match order {
		UserOrder::Id => a.id.cmp(&b.id),
		UserOrder::RecentActivity => recency_key(a).cmp(&recency_key(b)),
		UserOrder::UsernamePrefixThenRecentActivity(term) => {
			let a_prefix = !a.username_lower.starts_with(term.as_str());
			let b_prefix = !b.username_lower.starts_with(term.as_str());

			a_prefix.cmp(&b_prefix).then_with(|| recency_key(a).cmp(&recency_key(b)))
		},
	}
}

/// `last_seen_at DESC NULLS LAST, id ASC`.
fn recency_key(user: &User) -> (bool, Reverse<Option<OffsetDateTime>>, i64) {
	(user.last_seen_at.is_none(), Reverse(user.last_seen_at), user.id)
}

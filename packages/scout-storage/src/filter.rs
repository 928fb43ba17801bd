//! A small query language over the `users` table.
//!
//! Callers compose [`UserFilter`]s with AND semantics, pick a [`UserOrder`] and a limit; the
//! rendered statement always selects `users.id` only.

use sqlx::{Postgres, QueryBuilder};

use scout_domain::{text_search, username};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserFilter {
	Active,
	NotStaged,
	/// Drops users whose suspension is still running.
	NotSuspended,
	MemberOfAnyGroup(Vec<i64>),
	/// Admins, plus members of any group granted access to the category.
	AdminOrCategoryMember { category_id: i64 },
	/// Equality on `username_lower`. The value must already be normalized.
	UsernameEquals(String),
	/// Literal prefix on `username_lower`. The value must already be normalized.
	UsernamePrefix(String),
	/// Prefix-aware match against the searchable text (username and name tokens).
	SearchText(String),
	PostedInTopic(i64),
	/// Members of groups granted access to the category, skipping `excluded_group_ids`. At most
	/// `member_cap` members (lowest ids first) are considered.
	CategoryGroupMember { category_id: i64, excluded_group_ids: Vec<i64>, member_cap: u32 },
	NotIn(Vec<i64>),
}
impl UserFilter {
	pub fn push_sql(&self, builder: &mut QueryBuilder<'static, Postgres>) {
		match self {
			Self::Active => {
				builder.push("u.active");
			},
			Self::NotStaged => {
				builder.push("NOT u.staged");
			},
			Self::NotSuspended => {
				builder.push("(u.suspended_till IS NULL OR u.suspended_till <= now())");
			},
			Self::MemberOfAnyGroup(group_ids) => {
				builder.push("u.id IN (SELECT gu.user_id FROM group_users gu WHERE gu.group_id = ANY(");
				builder.push_bind(group_ids.clone());
				builder.push("))");
			},
			Self::AdminOrCategoryMember { category_id } => {
				builder.push(
					"(u.admin OR u.id IN (\
SELECT gu.user_id \
FROM group_users gu \
JOIN category_groups cg ON cg.group_id = gu.group_id \
WHERE cg.category_id = ",
				);
				builder.push_bind(*category_id);
				builder.push("))");
			},
			Self::UsernameEquals(term) => {
				builder.push("u.username_lower = ");
				builder.push_bind(term.clone());
			},
			Self::UsernamePrefix(term) => {
				builder.push("u.username_lower LIKE ");
				builder.push_bind(username::prefix_like_pattern(term));
				builder.push(" ESCAPE '\\'");
			},
			Self::SearchText(term) => match text_search::prefix_tsquery(term) {
				Some(query) => {
					builder.push("u.search_data @@ to_tsquery('simple', ");
					builder.push_bind(query);
					builder.push(")");
				},
				None => {
					builder.push("FALSE");
				},
			},
			Self::PostedInTopic(topic_id) => {
				builder.push("EXISTS (SELECT 1 FROM posts p WHERE p.user_id = u.id AND p.topic_id = ");
				builder.push_bind(*topic_id);
				builder.push(")");
			},
			Self::CategoryGroupMember { category_id, excluded_group_ids, member_cap } => {
				builder.push(
					"u.id IN (\
SELECT DISTINCT gu.user_id \
FROM group_users gu \
JOIN category_groups cg ON cg.group_id = gu.group_id \
WHERE cg.category_id = ",
				);
				builder.push_bind(*category_id);
				builder.push(" AND NOT (gu.group_id = ANY(");
				builder.push_bind(excluded_group_ids.clone());
				builder.push(")) ORDER BY gu.user_id LIMIT ");
				builder.push_bind(i64::from(*member_cap));
				builder.push(")");
			},
			Self::NotIn(user_ids) =>
				if user_ids.is_empty() {
					builder.push("TRUE");
				} else {
					builder.push("NOT (u.id = ANY(");
					builder.push_bind(user_ids.clone());
					builder.push("))");
				},
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserOrder {
	Id,
	/// Most recently seen first, never-seen users last.
	RecentActivity,
	/// Usernames starting with the term first, then [`UserOrder::RecentActivity`].
	UsernamePrefixThenRecentActivity(String),
}
impl UserOrder {
	fn push_sql(&self, builder: &mut QueryBuilder<'static, Postgres>) {
		match self {
			Self::Id => {
				builder.push(" ORDER BY u.id ASC");
			},
			Self::RecentActivity => {
				builder.push(" ORDER BY u.last_seen_at DESC NULLS LAST, u.id ASC");
			},
			Self::UsernamePrefixThenRecentActivity(term) => {
				builder.push(" ORDER BY CASE WHEN u.username_lower LIKE ");
				builder.push_bind(username::prefix_like_pattern(term));
				builder.push(" ESCAPE '\\' THEN 0 ELSE 1 END, u.last_seen_at DESC NULLS LAST, u.id ASC");
			},
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserQuery {
	pub filters: Vec<UserFilter>,
	pub order: UserOrder,
	pub limit: u32,
}
impl UserQuery {
	pub fn to_builder(&self) -> QueryBuilder<'static, Postgres> {
		let mut builder = QueryBuilder::new("SELECT u.id FROM users u WHERE TRUE");

		for filter in &self.filters {
			builder.push(" AND ");
			filter.push_sql(&mut builder);
		}

		self.order.push_sql(&mut builder);
		builder.push(" LIMIT ");
		builder.push_bind(i64::from(self.limit));

		builder
	}
}

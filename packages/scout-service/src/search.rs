pub mod materialize;
pub mod request;
pub mod term;
pub mod visibility;

pub use request::{SearchOptions, SearchRequest};
pub use visibility::{UserScope, scoped_users};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Result, ScoutService};
use scout_storage::{
	filter::{UserFilter, UserOrder, UserQuery},
	models::User,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserItem {
	pub id: i64,
	pub username: String,
	pub name: Option<String>,
	#[serde(with = "crate::time_serde::option")]
	pub last_seen_at: Option<time::OffsetDateTime>,
}
impl From<User> for UserItem {
	fn from(user: User) -> Self {
		Self { id: user.id, username: user.username, name: user.name, last_seen_at: user.last_seen_at }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
	pub users: Vec<UserItem>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tier {
	Exact,
	Topic,
	Category,
	Global,
}
impl Tier {
	fn as_str(self) -> &'static str {
		match self {
			Self::Exact => "exact",
			Self::Topic => "topic",
			Self::Category => "category",
			Self::Global => "global",
		}
	}
}

/// Topic and category facts looked up once per request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct SearchContext {
	/// The topic's category, when it is read-restricted.
	restricted_topic_category: Option<i64>,
	/// Category whose group grants feed the category tier.
	secure_category: Option<i64>,
}

/// Ordered, deduplicated accumulator bounded by the request limit.
#[derive(Debug)]
struct Collected {
	user_ids: Vec<i64>,
	seen: HashSet<i64>,
	limit: u32,
}
impl Collected {
	fn new(limit: u32) -> Self {
		Self { user_ids: Vec::new(), seen: HashSet::new(), limit }
	}

	fn remaining(&self) -> u32 {
		let taken = u32::try_from(self.user_ids.len()).unwrap_or(u32::MAX);

		self.limit.saturating_sub(taken)
	}

	fn is_full(&self) -> bool {
		self.remaining() == 0
	}

	/// Appends unseen ids in order until the limit is reached. Returns how many were added.
	fn extend(&mut self, user_ids: impl IntoIterator<Item = i64>) -> usize {
		let mut added = 0;

		for user_id in user_ids {
			if self.is_full() {
				break;
			}
			if self.seen.insert(user_id) {
				self.user_ids.push(user_id);

				added += 1;
			}
		}

		added
	}

	/// Excludes already collected users, plus `also`, from a later tier's query.
	fn exclusion(&self, also: Option<i64>) -> UserFilter {
		let mut user_ids = self.user_ids.clone();

		if let Some(user_id) = also
			&& !self.seen.contains(&user_id)
		{
			user_ids.push(user_id);
		}

		UserFilter::NotIn(user_ids)
	}

	fn into_ids(self) -> Vec<i64> {
		self.user_ids
	}
}

impl ScoutService {
	/// Looks up users for `term` and returns their records in tier order.
	pub async fn search(&self, term: &str, options: SearchOptions) -> Result<SearchResponse> {
		let req = self.build_request(term, options).await?;
		let user_ids = self.search_ids(&req).await?;
		let users = materialize::materialize(self.store.as_ref(), &user_ids).await?;

		Ok(SearchResponse { users: users.into_iter().map(UserItem::from).collect() })
	}

	pub async fn build_request(&self, term: &str, options: SearchOptions) -> Result<SearchRequest> {
		SearchRequest::build(
			&self.cfg.search,
			self.store.as_ref(),
			self.authorizer.as_ref(),
			term,
			options,
		)
		.await
	}

	/// Runs the exact, topic, category and global tiers in order and stops as soon as the
	/// request limit is reached.
	pub async fn search_ids(&self, req: &SearchRequest) -> Result<Vec<i64>> {
		let context = self.resolve_context(req).await?;
		let scope = scoped_users(req, context.restricted_topic_category);
		let term = term::match_term(req.term(), self.cfg.search.name_search_enabled);
		let caller_id = req.caller().map(|caller| caller.id);
		let mut collected = Collected::new(req.limit());

		if let Some(exact) = term.exact() {
			let query = scope.query(
				[UserFilter::UsernameEquals(exact.to_string())],
				UserOrder::Id,
				collected.remaining(),
			);

			self.run_tier(Tier::Exact, &query, &mut collected).await?;
		}
		if collected.is_full() {
			return Ok(collected.into_ids());
		}

		if let Some(topic_id) = req.topic_id() {
			let mut filters = vec![UserFilter::PostedInTopic(topic_id), collected.exclusion(caller_id)];

			filters.extend(term.filter().cloned());

			let query = scope.query(filters, term.order().clone(), collected.remaining());

			self.run_tier(Tier::Topic, &query, &mut collected).await?;
		}
		if collected.is_full() {
			return Ok(collected.into_ids());
		}

		if let Some(category_id) = context.secure_category {
			let mut filters = vec![
				UserFilter::CategoryGroupMember {
					category_id,
					excluded_group_ids: self.cfg.search.excluded_category_group_ids.clone(),
					member_cap: self.cfg.search.category_member_cap,
				},
				collected.exclusion(caller_id),
			];

			filters.extend(term.filter().cloned());

			let query = scope.query(filters, term.order().clone(), collected.remaining());

			self.run_tier(Tier::Category, &query, &mut collected).await?;
		}
		if collected.is_full() {
			return Ok(collected.into_ids());
		}

		if let Some(filter) = term.filter() {
			let query = scope.query(
				[filter.clone(), collected.exclusion(None)],
				term.order().clone(),
				collected.remaining(),
			);

			self.run_tier(Tier::Global, &query, &mut collected).await?;
		}

		Ok(collected.into_ids())
	}

	async fn run_tier(&self, tier: Tier, query: &UserQuery, collected: &mut Collected) -> Result<()> {
		let user_ids = self.store.select_user_ids(query).await?;
		let returned = user_ids.len();
		let added = collected.extend(user_ids);

		tracing::debug!(
			tier = tier.as_str(),
			returned,
			added,
			remaining = collected.remaining(),
			"User search tier finished."
		);

		Ok(())
	}

	async fn resolve_context(&self, req: &SearchRequest) -> Result<SearchContext> {
		let topic_category = match req.topic_id() {
			Some(topic_id) => self.store.topic_category_id(topic_id).await?,
			None => None,
		};
		let restricted_topic_category = self.restricted_category(topic_category).await?;
		let restricted_category = self.restricted_category(req.category_id()).await?;

		Ok(SearchContext {
			restricted_topic_category,
			secure_category: restricted_category.or(restricted_topic_category),
		})
	}

	async fn restricted_category(&self, category_id: Option<i64>) -> Result<Option<i64>> {
		let Some(category_id) = category_id else {
			return Ok(None);
		};

		if self.store.category_read_restricted(category_id).await? {
			Ok(Some(category_id))
		} else {
			Ok(None)
		}
	}
}

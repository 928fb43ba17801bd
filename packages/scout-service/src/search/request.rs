use serde::{Deserialize, Serialize};

use crate::{Caller, Error, GroupAuthorizer, Result, UserStore};
use scout_domain::username;

/// Caller-supplied lookup options. Everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
	pub topic_id: Option<i64>,
	pub category_id: Option<i64>,
	/// Restrict candidates to users who may be added to the topic when its category is
	/// read-restricted.
	#[serde(default)]
	pub topic_allowed_users: bool,
	pub searching_user_id: Option<i64>,
	#[serde(default)]
	pub include_staged_users: bool,
	pub limit: Option<u32>,
	#[serde(default)]
	pub groups: Vec<i64>,
}

/// A validated, immutable lookup. Built once per call by [`SearchRequest::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
	term: String,
	topic_id: Option<i64>,
	category_id: Option<i64>,
	topic_allowed_users: bool,
	caller: Option<Caller>,
	include_staged_users: bool,
	limit: u32,
	groups: Vec<i64>,
}
impl SearchRequest {
	/// Normalizes the term, resolves the caller from the store and checks group visibility.
	///
	/// Group authorization happens here, before any candidate query runs.
	pub async fn build(
		cfg: &scout_config::Search,
		store: &dyn UserStore,
		authorizer: &dyn GroupAuthorizer,
		term: &str,
		options: SearchOptions,
	) -> Result<Self> {
		let limit = resolve_limit(cfg, options.limit)?;
		let caller = match options.searching_user_id {
			Some(user_id) => resolve_caller(store, user_id).await?,
			None => None,
		};
		let mut groups = options.groups;

		groups.sort_unstable();
		groups.dedup();

		if !groups.is_empty() {
			authorizer.ensure_can_see_groups(caller.as_ref(), &groups).await?;
		}

		Ok(Self {
			term: username::normalize_term(term),
			topic_id: options.topic_id,
			category_id: options.category_id,
			topic_allowed_users: options.topic_allowed_users,
			caller,
			include_staged_users: options.include_staged_users,
			limit,
			groups,
		})
	}

	/// Normalized term; empty when the caller sent a blank term.
	pub fn term(&self) -> &str {
		&self.term
	}

	pub fn topic_id(&self) -> Option<i64> {
		self.topic_id
	}

	pub fn category_id(&self) -> Option<i64> {
		self.category_id
	}

	pub fn topic_allowed_users(&self) -> bool {
		self.topic_allowed_users
	}

	pub fn caller(&self) -> Option<&Caller> {
		self.caller.as_ref()
	}

	pub fn include_staged_users(&self) -> bool {
		self.include_staged_users
	}

	pub fn limit(&self) -> u32 {
		self.limit
	}

	pub fn groups(&self) -> &[i64] {
		&self.groups
	}
}

fn resolve_limit(cfg: &scout_config::Search, requested: Option<u32>) -> Result<u32> {
	match requested {
		Some(0) => Err(Error::InvalidRequest { message: "limit must be greater than zero.".to_string() }),
		Some(limit) => Ok(limit.min(cfg.max_limit)),
		None => Ok(cfg.default_limit),
	}
}

async fn resolve_caller(store: &dyn UserStore, user_id: i64) -> Result<Option<Caller>> {
	match store.find_user(user_id).await? {
		Some(user) => Ok(Some(Caller::from(&user))),
		None => {
			tracing::warn!(user_id, "Searching user not found. Treating caller as anonymous.");

			Ok(None)
		},
	}
}

#[cfg(test)]
mod tests {
	use super::resolve_limit;
	use crate::Error;

	#[test]
	fn limit_defaults_and_clamps() {
		let cfg = scout_config::Search::default();

		assert_eq!(resolve_limit(&cfg, None).expect("Default limit."), 20);
		assert_eq!(resolve_limit(&cfg, Some(5)).expect("Explicit limit."), 5);
		assert_eq!(resolve_limit(&cfg, Some(500)).expect("Clamped limit."), 50);
	}

	#[test]
	fn zero_limit_is_rejected() {
		let cfg = scout_config::Search::default();

		assert!(matches!(resolve_limit(&cfg, Some(0)), Err(Error::InvalidRequest { .. })));
	}
}

use std::{future::Future, pin::Pin};

use sqlx::PgPool;

use crate::{Error, Result};
use scout_storage::{filter::UserQuery, groups, models::User, users};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Read-only access to user records and the context needed to scope a lookup.
pub trait UserStore
where
	Self: Send + Sync,
{
	fn select_user_ids<'a>(&'a self, query: &'a UserQuery) -> BoxFuture<'a, Result<Vec<i64>>>;

	/// Batch fetch by id. Implementations are not required to preserve input order.
	fn fetch_users<'a>(&'a self, user_ids: &'a [i64]) -> BoxFuture<'a, Result<Vec<User>>>;

	fn find_user<'a>(&'a self, user_id: i64) -> BoxFuture<'a, Result<Option<User>>>;

	fn topic_category_id<'a>(&'a self, topic_id: i64) -> BoxFuture<'a, Result<Option<i64>>>;

	fn category_read_restricted<'a>(&'a self, category_id: i64) -> BoxFuture<'a, Result<bool>>;
}

pub trait GroupAuthorizer
where
	Self: Send + Sync,
{
	/// Fails with [`Error::Authorization`] unless `caller` may see every group in `group_ids`.
	fn ensure_can_see_groups<'a>(
		&'a self,
		caller: Option<&'a Caller>,
		group_ids: &'a [i64],
	) -> BoxFuture<'a, Result<()>>;
}

/// The searching user, resolved from the store for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
	pub id: i64,
	pub admin: bool,
	pub moderator: bool,
}
impl Caller {
	pub fn is_staff(&self) -> bool {
		self.admin || self.moderator
	}
}
impl From<&User> for Caller {
	fn from(user: &User) -> Self {
		Self { id: user.id, admin: user.admin, moderator: user.moderator }
	}
}

#[derive(Clone)]
pub struct PgUserStore {
	pool: PgPool,
}
impl PgUserStore {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}
impl UserStore for PgUserStore {
	fn select_user_ids<'a>(&'a self, query: &'a UserQuery) -> BoxFuture<'a, Result<Vec<i64>>> {
		Box::pin(async move { Ok(users::select_user_ids(&self.pool, query).await?) })
	}

	fn fetch_users<'a>(&'a self, user_ids: &'a [i64]) -> BoxFuture<'a, Result<Vec<User>>> {
		Box::pin(async move { Ok(users::fetch_users_by_ids(&self.pool, user_ids).await?) })
	}

	fn find_user<'a>(&'a self, user_id: i64) -> BoxFuture<'a, Result<Option<User>>> {
		Box::pin(async move { Ok(users::find_user(&self.pool, user_id).await?) })
	}

	fn topic_category_id<'a>(&'a self, topic_id: i64) -> BoxFuture<'a, Result<Option<i64>>> {
		Box::pin(async move { Ok(users::topic_category_id(&self.pool, topic_id).await?) })
	}

	fn category_read_restricted<'a>(&'a self, category_id: i64) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move { Ok(users::category_read_restricted(&self.pool, category_id).await?) })
	}
}

#[derive(Clone)]
pub struct PgGroupAuthorizer {
	pool: PgPool,
}
impl PgGroupAuthorizer {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}
impl GroupAuthorizer for PgGroupAuthorizer {
	fn ensure_can_see_groups<'a>(
		&'a self,
		caller: Option<&'a Caller>,
		group_ids: &'a [i64],
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let hidden =
				groups::hidden_group_ids(&self.pool, caller.map(|caller| caller.id), group_ids)
					.await?;

			ensure_no_hidden_groups(&hidden)
		})
	}
}

pub fn ensure_no_hidden_groups(hidden: &[i64]) -> Result<()> {
	if hidden.is_empty() {
		return Ok(());
	}

	Err(Error::Authorization { message: format!("Caller may not see groups {hidden:?}.") })
}

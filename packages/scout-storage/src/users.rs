use sqlx::PgExecutor;

use crate::{Result, filter::UserQuery, models::User};

const USER_COLUMNS: &str = "\
id, username, username_lower, name, active, staged, admin, moderator, suspended_till, \
last_seen_at, created_at";

pub async fn select_user_ids<'e, E>(executor: E, query: &UserQuery) -> Result<Vec<i64>>
where
	E: PgExecutor<'e>,
{
	let mut builder = query.to_builder();
	let ids = builder.build_query_scalar::<i64>().fetch_all(executor).await?;

	Ok(ids)
}

/// Loads users by id. Row order is whatever the planner produces.
pub async fn fetch_users_by_ids<'e, E>(executor: E, user_ids: &[i64]) -> Result<Vec<User>>
where
	E: PgExecutor<'e>,
{
	if user_ids.is_empty() {
		return Ok(Vec::new());
	}

	let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");
	let users = sqlx::query_as::<_, User>(&sql).bind(user_ids).fetch_all(executor).await?;

	Ok(users)
}

pub async fn find_user<'e, E>(executor: E, user_id: i64) -> Result<Option<User>>
where
	E: PgExecutor<'e>,
{
	let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
	let user = sqlx::query_as::<_, User>(&sql).bind(user_id).fetch_optional(executor).await?;

	Ok(user)
}

pub async fn topic_category_id<'e, E>(executor: E, topic_id: i64) -> Result<Option<i64>>
where
	E: PgExecutor<'e>,
{
	let category_id: Option<Option<i64>> =
		sqlx::query_scalar("SELECT category_id FROM topics WHERE id = $1")
			.bind(topic_id)
			.fetch_optional(executor)
			.await?;

	Ok(category_id.flatten())
}

pub async fn category_read_restricted<'e, E>(executor: E, category_id: i64) -> Result<bool>
where
	E: PgExecutor<'e>,
{
	let restricted: Option<bool> =
		sqlx::query_scalar("SELECT read_restricted FROM categories WHERE id = $1")
			.bind(category_id)
			.fetch_optional(executor)
			.await?;

	Ok(restricted.unwrap_or(false))
}

//! Row writers used to seed the lookup tables.

use sqlx::PgExecutor;

use crate::{
	Result,
	models::{Category, CategoryGroup, Group, GroupUser, Post, Topic, User},
};

pub async fn insert_user<'e, E>(executor: E, user: &User) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
INSERT INTO users (
	id,
	username,
	username_lower,
	name,
	active,
	staged,
	admin,
	moderator,
	suspended_till,
	last_seen_at,
	created_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
	)
	.bind(user.id)
	.bind(user.username.as_str())
	.bind(user.username_lower.as_str())
	.bind(user.name.as_deref())
	.bind(user.active)
	.bind(user.staged)
	.bind(user.admin)
	.bind(user.moderator)
	.bind(user.suspended_till)
	.bind(user.last_seen_at)
	.bind(user.created_at)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn insert_group<'e, E>(executor: E, group: &Group) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query("INSERT INTO groups (id, name, visibility_level, automatic) VALUES ($1, $2, $3, $4)")
		.bind(group.id)
		.bind(group.name.as_str())
		.bind(group.visibility_level)
		.bind(group.automatic)
		.execute(executor)
		.await?;

	Ok(())
}

pub async fn insert_group_user<'e, E>(executor: E, member: &GroupUser) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
INSERT INTO group_users (group_id, user_id, owner)
VALUES ($1, $2, $3)
ON CONFLICT (group_id, user_id) DO UPDATE SET owner = EXCLUDED.owner",
	)
	.bind(member.group_id)
	.bind(member.user_id)
	.bind(member.owner)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn insert_category<'e, E>(executor: E, category: &Category) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query("INSERT INTO categories (id, name, read_restricted) VALUES ($1, $2, $3)")
		.bind(category.id)
		.bind(category.name.as_str())
		.bind(category.read_restricted)
		.execute(executor)
		.await?;

	Ok(())
}

pub async fn insert_category_group<'e, E>(executor: E, grant: &CategoryGroup) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
INSERT INTO category_groups (category_id, group_id, permission_type)
VALUES ($1, $2, $3)
ON CONFLICT (category_id, group_id) DO UPDATE SET permission_type = EXCLUDED.permission_type",
	)
	.bind(grant.category_id)
	.bind(grant.group_id)
	.bind(grant.permission_type)
	.execute(executor)
	.await?;

	Ok(())
}

pub async fn insert_topic<'e, E>(executor: E, topic: &Topic) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query("INSERT INTO topics (id, category_id, title) VALUES ($1, $2, $3)")
		.bind(topic.id)
		.bind(topic.category_id)
		.bind(topic.title.as_str())
		.execute(executor)
		.await?;

	Ok(())
}

pub async fn insert_post<'e, E>(executor: E, post: &Post) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query("INSERT INTO posts (id, topic_id, user_id, created_at) VALUES ($1, $2, $3, $4)")
		.bind(post.id)
		.bind(post.topic_id)
		.bind(post.user_id)
		.bind(post.created_at)
		.execute(executor)
		.await?;

	Ok(())
}

//! Seed data shared by the in-memory store and Postgres-backed tests.

use sqlx::PgPool;
use time::{Duration, OffsetDateTime, macros::datetime};

use crate::Result;
use scout_domain::username;
use scout_storage::{
	models::{Category, CategoryGroup, Group, GroupUser, Post, Topic, User},
	queries,
};

pub const BASE_TIME: OffsetDateTime = datetime!(2024-01-01 00:00 UTC);

/// `BASE_TIME` shifted by `minutes`.
pub fn at(minutes: i64) -> OffsetDateTime {
	BASE_TIME + Duration::minutes(minutes)
}

/// An active, unstaged, unsuspended user who has never been seen.
pub fn user(id: i64, name: &str) -> User {
	User {
		id,
		username: name.to_string(),
		username_lower: username::normalize_username(name),
		name: None,
		active: true,
		staged: false,
		admin: false,
		moderator: false,
		suspended_till: None,
		last_seen_at: None,
		created_at: BASE_TIME,
	}
}

#[derive(Clone, Debug, Default)]
pub struct Dataset {
	pub users: Vec<User>,
	pub groups: Vec<Group>,
	pub group_users: Vec<GroupUser>,
	pub categories: Vec<Category>,
	pub category_groups: Vec<CategoryGroup>,
	pub topics: Vec<Topic>,
	pub posts: Vec<Post>,
}
impl Dataset {
	pub fn with_user(mut self, user: User) -> Self {
		self.users.push(user);

		self
	}

	pub fn with_group(mut self, id: i64, name: &str, visibility_level: i16) -> Self {
		self.groups.push(Group { id, name: name.to_string(), visibility_level, automatic: false });

		self
	}

	pub fn with_member(mut self, group_id: i64, user_id: i64) -> Self {
		self.group_users.push(GroupUser { group_id, user_id, owner: false });

		self
	}

	pub fn with_owner(mut self, group_id: i64, user_id: i64) -> Self {
		self.group_users.push(GroupUser { group_id, user_id, owner: true });

		self
	}

	pub fn with_category(mut self, id: i64, read_restricted: bool) -> Self {
		self.categories.push(Category { id, name: format!("category-{id}"), read_restricted });

		self
	}

	pub fn with_category_group(mut self, category_id: i64, group_id: i64) -> Self {
		self.category_groups.push(CategoryGroup { category_id, group_id, permission_type: 1 });

		self
	}

	pub fn with_topic(mut self, id: i64, category_id: Option<i64>) -> Self {
		self.topics.push(Topic { id, category_id, title: format!("topic-{id}") });

		self
	}

	pub fn with_post(mut self, topic_id: i64, user_id: i64) -> Self {
		let id = i64::try_from(self.posts.len()).unwrap_or(i64::MAX - 1) + 1;

		self.posts.push(Post { id, topic_id, user_id, created_at: BASE_TIME });

		self
	}

	/// Inserts every row in dependency order.
	pub async fn seed_postgres(&self, pool: &PgPool) -> Result<()> {
		for user in &self.users {
			queries::insert_user(pool, user).await?;
		}
		for group in &self.groups {
			queries::insert_group(pool, group).await?;
		}
		for member in &self.group_users {
			queries::insert_group_user(pool, member).await?;
		}
		for category in &self.categories {
			queries::insert_category(pool, category).await?;
		}
		for grant in &self.category_groups {
			queries::insert_category_group(pool, grant).await?;
		}
		for topic in &self.topics {
			queries::insert_topic(pool, topic).await?;
		}
		for post in &self.posts {
			queries::insert_post(pool, post).await?;
		}

		Ok(())
	}
}

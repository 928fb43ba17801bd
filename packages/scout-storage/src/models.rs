use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
	pub id: i64,
	pub username: String,
	pub username_lower: String,
	pub name: Option<String>,
	pub active: bool,
	pub staged: bool,
	pub admin: bool,
	pub moderator: bool,
	pub suspended_till: Option<OffsetDateTime>,
	pub last_seen_at: Option<OffsetDateTime>,
	pub created_at: OffsetDateTime,
}
impl User {
	pub fn is_staff(&self) -> bool {
		self.admin || self.moderator
	}

	pub fn is_suspended_at(&self, now: OffsetDateTime) -> bool {
		self.suspended_till.map(|till| till > now).unwrap_or(false)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Group {
	pub id: i64,
	pub name: String,
	pub visibility_level: i16,
	pub automatic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct GroupUser {
	pub group_id: i64,
	pub user_id: i64,
	pub owner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Category {
	pub id: i64,
	pub name: String,
	pub read_restricted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CategoryGroup {
	pub category_id: i64,
	pub group_id: i64,
	pub permission_type: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Topic {
	pub id: i64,
	pub category_id: Option<i64>,
	pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
	pub id: i64,
	pub topic_id: i64,
	pub user_id: i64,
	pub created_at: OffsetDateTime,
}

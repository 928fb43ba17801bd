use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub search: Search,
	pub security: Security,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Result size used when a request does not carry its own limit.
	pub default_limit: u32,
	/// Upper bound applied to caller-supplied limits.
	pub max_limit: u32,
	/// Enables the searchable-text index for terms without username separators.
	pub name_search_enabled: bool,
	/// Safety bound on how many group members the category tier considers.
	pub category_member_cap: u32,
	/// Group ids that never qualify a user through the category tier.
	pub excluded_category_group_ids: Vec<i64>,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			default_limit: 20,
			max_limit: 50,
			name_search_enabled: true,
			category_member_cap: 200,
			excluded_category_group_ids: vec![10, 11, 12],
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
}

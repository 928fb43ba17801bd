pub mod search;
pub mod store;
pub mod time_serde;

mod error;

pub use error::{Error, Result};
pub use search::{
	SearchOptions, SearchRequest, SearchResponse, UserItem, UserScope, scoped_users,
	term::{TermMatch, match_term},
};
pub use store::{BoxFuture, Caller, GroupAuthorizer, PgGroupAuthorizer, PgUserStore, UserStore};

use std::sync::Arc;

use scout_config::Config;
use scout_storage::db::Db;

pub struct ScoutService {
	pub cfg: Config,
	pub store: Arc<dyn UserStore>,
	pub authorizer: Arc<dyn GroupAuthorizer>,
}
impl ScoutService {
	/// Builds a service whose store and group authorizer share the Postgres pool.
	pub fn new(cfg: Config, db: Db) -> Self {
		let store = Arc::new(PgUserStore::new(db.pool.clone()));
		let authorizer = Arc::new(PgGroupAuthorizer::new(db.pool));

		Self { cfg, store, authorizer }
	}

	pub fn with_backends(
		cfg: Config,
		store: Arc<dyn UserStore>,
		authorizer: Arc<dyn GroupAuthorizer>,
	) -> Self {
		Self { cfg, store, authorizer }
	}
}

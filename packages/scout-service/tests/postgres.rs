use std::sync::Arc;

use scout_config::{Config, Postgres, Search, Security, Service, Storage};
use scout_service::{ScoutService, SearchOptions};
use scout_storage::db::Db;
use scout_testkit::{
	MemoryStore,
	fixtures::{self, Dataset},
};

fn test_config(dsn: &str) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage { postgres: Postgres { dsn: dsn.to_string(), pool_max_conns: 2 } },
		search: Search::default(),
		security: Security { bind_localhost_only: true },
	}
}

fn dataset() -> Dataset {
	let mut anna = fixtures::user(1, "anna");
	let mut annie = fixtures::user(2, "annie");
	let mut annabel = fixtures::user(3, "annabel");
	let mut ann_lee = fixtures::user(4, "ann_lee");

	anna.last_seen_at = Some(fixtures::at(10));
	annie.last_seen_at = Some(fixtures::at(20));
	annabel.last_seen_at = Some(fixtures::at(30));
	ann_lee.last_seen_at = Some(fixtures::at(40));

	let mut staged = fixtures::user(5, "annstaged");

	staged.staged = true;

	Dataset::default()
		.with_user(anna)
		.with_user(annie)
		.with_user(annabel)
		.with_user(ann_lee)
		.with_user(staged)
		.with_group(20, "editors", 0)
		.with_member(20, 3)
		.with_category(5, true)
		.with_category_group(5, 20)
		.with_topic(100, Some(5))
		.with_post(100, 2)
}

async fn usernames(service: &ScoutService, term: &str, options: SearchOptions) -> Vec<String> {
	service
		.search(term, options)
		.await
		.expect("Search failed.")
		.users
		.into_iter()
		.map(|user| user.username)
		.collect()
}

async fn postgres_service(dsn: String, data: &Dataset) -> ScoutService {
	let cfg = test_config(&dsn);
	let db = Db::connect(&cfg.storage.postgres).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");
	data.seed_postgres(&db.pool).await.expect("Failed to seed dataset.");

	ScoutService::new(cfg, db)
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SCOUT_PG_DSN to run."]
async fn tiers_run_against_postgres() {
	let Some(base_dsn) = scout_testkit::env_dsn() else {
		eprintln!("Skipping tiers_run_against_postgres; set SCOUT_PG_DSN to run this test.");

		return;
	};

	scout_testkit::with_test_db(&base_dsn, |test_db| {
		let dsn = test_db.dsn().to_string();

		async move {
			let service = postgres_service(dsn, &dataset()).await;
			let in_topic = SearchOptions { topic_id: Some(100), ..SearchOptions::default() };

			// Exact, then category member, then global by recent activity.
			assert_eq!(usernames(&service, "anna", in_topic.clone()).await, vec!["anna", "annabel"]);
			assert_eq!(
				usernames(&service, "ann", in_topic).await,
				vec!["annie", "annabel", "ann_lee", "anna"]
			);
			assert_eq!(usernames(&service, "ann_", SearchOptions::default()).await, vec!["ann_lee"]);

			Ok(())
		}
	})
	.await
	.expect("Test database run failed.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SCOUT_PG_DSN to run."]
async fn text_search_matches_the_in_memory_store() {
	let Some(base_dsn) = scout_testkit::env_dsn() else {
		eprintln!(
			"Skipping text_search_matches_the_in_memory_store; set SCOUT_PG_DSN to run this test."
		);

		return;
	};
	let mut jo = fixtures::user(3, "jo-anne");

	jo.name = Some("Jo O'Neil".to_string());

	let data = Dataset::default()
		.with_user(fixtures::user(1, "ann.lee"))
		.with_user(fixtures::user(2, "annika"))
		.with_user(jo);

	scout_testkit::with_test_db(&base_dsn, |test_db| {
		let dsn = test_db.dsn().to_string();

		async move {
			let postgres = postgres_service(dsn.clone(), &data).await;
			let store = Arc::new(MemoryStore::new(data.clone()));
			let memory = ScoutService::with_backends(test_config(&dsn), store.clone(), store);

			assert_eq!(usernames(&postgres, "lee", SearchOptions::default()).await, vec!["ann.lee"]);
			assert_eq!(usernames(&postgres, "neil", SearchOptions::default()).await, vec!["jo-anne"]);

			for term in ["lee", "anne", "ann", "neil", "jo"] {
				assert_eq!(
					usernames(&postgres, term, SearchOptions::default()).await,
					usernames(&memory, term, SearchOptions::default()).await,
					"Backends disagree on {term:?}."
				);
			}

			Ok(())
		}
	})
	.await
	.expect("Test database run failed.");
}

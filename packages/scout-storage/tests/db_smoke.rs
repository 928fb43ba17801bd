use scout_config::Postgres;
use scout_storage::{
	db::Db,
	filter::{UserFilter, UserOrder, UserQuery},
	groups, users,
};
use scout_testkit::fixtures::{self, Dataset};

async fn bootstrapped(dsn: String) -> Db {
	let cfg = Postgres { dsn, pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	db
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SCOUT_PG_DSN to run."]
async fn lookup_tables_exist_after_bootstrap() {
	let Some(base_dsn) = scout_testkit::env_dsn() else {
		eprintln!("Skipping lookup_tables_exist_after_bootstrap; set SCOUT_PG_DSN to run this test.");

		return;
	};

	scout_testkit::with_test_db(&base_dsn, |test_db| {
		let dsn = test_db.dsn().to_string();

		async move {
			let db = bootstrapped(dsn).await;

			// Bootstrapping twice is a no-op.
			db.ensure_schema().await.expect("Failed to re-run schema.");

			for table in
				["users", "groups", "group_users", "categories", "category_groups", "topics", "posts"]
			{
				let count: i64 = sqlx::query_scalar(
					"SELECT count(*) FROM information_schema.tables WHERE table_name = $1",
				)
				.bind(table)
				.fetch_one(&db.pool)
				.await
				.expect("Failed to query schema tables.");

				assert_eq!(count, 1, "Missing table {table}.");
			}

			Ok(())
		}
	})
	.await
	.expect("Test database run failed.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SCOUT_PG_DSN to run."]
async fn user_queries_filter_and_order() {
	let Some(base_dsn) = scout_testkit::env_dsn() else {
		eprintln!("Skipping user_queries_filter_and_order; set SCOUT_PG_DSN to run this test.");

		return;
	};

	scout_testkit::with_test_db(&base_dsn, |test_db| {
		let dsn = test_db.dsn().to_string();

		async move {
			let db = bootstrapped(dsn).await;
			let mut recent = fixtures::user(2, "sam_recent");

			recent.last_seen_at = Some(fixtures::at(30));

			let mut inactive = fixtures::user(3, "sam_inactive");

			inactive.active = false;

			Dataset::default()
				.with_user(fixtures::user(1, "sam_never"))
				.with_user(recent)
				.with_user(inactive)
				.with_user(fixtures::user(4, "samxother"))
				.seed_postgres(&db.pool)
				.await
				.expect("Failed to seed dataset.");

			let query = UserQuery {
				filters: vec![
					UserFilter::Active,
					UserFilter::UsernamePrefix("sam_".to_string()),
					UserFilter::NotIn(Vec::new()),
				],
				order: UserOrder::RecentActivity,
				limit: 10,
			};
			let ids = users::select_user_ids(&db.pool, &query).await.expect("Failed to select users.");

			assert_eq!(ids, vec![2, 1]);

			let fetched =
				users::fetch_users_by_ids(&db.pool, &[4, 2]).await.expect("Failed to fetch users.");

			assert_eq!(fetched.len(), 2);
			assert!(users::find_user(&db.pool, 99).await.expect("Failed to find user.").is_none());

			Ok(())
		}
	})
	.await
	.expect("Test database run failed.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SCOUT_PG_DSN to run."]
async fn hidden_groups_follow_visibility_levels() {
	let Some(base_dsn) = scout_testkit::env_dsn() else {
		eprintln!("Skipping hidden_groups_follow_visibility_levels; set SCOUT_PG_DSN to run this test.");

		return;
	};

	scout_testkit::with_test_db(&base_dsn, |test_db| {
		let dsn = test_db.dsn().to_string();

		async move {
			let db = bootstrapped(dsn).await;
			let mut admin = fixtures::user(3, "root");

			admin.admin = true;

			Dataset::default()
				.with_user(fixtures::user(1, "member"))
				.with_user(fixtures::user(2, "stranger"))
				.with_user(admin)
				.with_group(10, "open", 0)
				.with_group(11, "signed_in", 1)
				.with_group(12, "members", 2)
				.with_group(13, "staff", 3)
				.with_group(14, "owners", 4)
				.with_member(12, 1)
				.with_owner(14, 1)
				.seed_postgres(&db.pool)
				.await
				.expect("Failed to seed dataset.");

			let requested = [10, 11, 12, 13, 14, 99];
			let anonymous = groups::hidden_group_ids(&db.pool, None, &requested)
				.await
				.expect("Failed to check groups.");
			let member = groups::hidden_group_ids(&db.pool, Some(1), &requested)
				.await
				.expect("Failed to check groups.");
			let stranger = groups::hidden_group_ids(&db.pool, Some(2), &requested)
				.await
				.expect("Failed to check groups.");
			let admin = groups::hidden_group_ids(&db.pool, Some(3), &requested)
				.await
				.expect("Failed to check groups.");

			assert_eq!(anonymous, vec![11, 12, 13, 14, 99]);
			assert_eq!(member, vec![13, 99]);
			assert_eq!(stranger, vec![12, 13, 14, 99]);
			assert_eq!(admin, vec![99]);

			Ok(())
		}
	})
	.await
	.expect("Test database run failed.");
}

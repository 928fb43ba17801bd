pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_users.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_users.sql")),
				"tables/002_groups.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_groups.sql")),
				"tables/003_group_users.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_group_users.sql")),
				"tables/004_categories.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_categories.sql")),
				"tables/005_category_groups.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_category_groups.sql")),
				"tables/006_topics.sql" =>
					out.push_str(include_str!("../../../sql/tables/006_topics.sql")),
				"tables/007_posts.sql" =>
					out.push_str(include_str!("../../../sql/tables/007_posts.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}

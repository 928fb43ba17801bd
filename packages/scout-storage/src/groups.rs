use sqlx::PgExecutor;

use crate::Result;
use scout_domain::group_visibility::GroupVisibility;

/// Returns the requested group ids the viewer may not see, ascending. Unknown ids count as
/// hidden. A `None` viewer is an anonymous caller.
pub async fn hidden_group_ids<'e, E>(
	executor: E,
	viewer_id: Option<i64>,
	group_ids: &[i64],
) -> Result<Vec<i64>>
where
	E: PgExecutor<'e>,
{
	if group_ids.is_empty() {
		return Ok(Vec::new());
	}

	let hidden: Vec<i64> = sqlx::query_scalar(
		"\
WITH requested AS (
	SELECT DISTINCT unnest($1::bigint[]) AS id
),
viewer AS (
	SELECT u.id, u.admin, u.moderator
	FROM users u
	WHERE u.id = $2
)
SELECT r.id
FROM requested r
LEFT JOIN groups g ON g.id = r.id
WHERE g.id IS NULL
	OR NOT (
		EXISTS (SELECT 1 FROM viewer v WHERE v.admin)
		OR g.visibility_level = $3
		OR (g.visibility_level = $4 AND EXISTS (SELECT 1 FROM viewer))
		OR (
			g.visibility_level = $5
			AND EXISTS (
				SELECT 1
				FROM viewer v
				WHERE v.moderator
					OR EXISTS (
						SELECT 1 FROM group_users gu WHERE gu.group_id = g.id AND gu.user_id = v.id
					)
			)
		)
		OR (g.visibility_level = $6 AND EXISTS (SELECT 1 FROM viewer v WHERE v.moderator))
		OR (
			g.visibility_level = $7
			AND EXISTS (
				SELECT 1
				FROM viewer v
				JOIN group_users gu ON gu.user_id = v.id
				WHERE gu.group_id = g.id AND gu.owner
			)
		)
	)
ORDER BY r.id",
	)
	.bind(group_ids)
	.bind(viewer_id)
	.bind(GroupVisibility::Public.level())
	.bind(GroupVisibility::LoggedOnUsers.level())
	.bind(GroupVisibility::Members.level())
	.bind(GroupVisibility::Staff.level())
	.bind(GroupVisibility::Owners.level())
	.fetch_all(executor)
	.await?;

	Ok(hidden)
}

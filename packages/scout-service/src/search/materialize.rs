use std::collections::HashMap;

use crate::{Result, UserStore};
use scout_storage::models::User;

/// Resolves `user_ids` to records in the same order.
///
/// Every id gets its input position as rank and the fetched rows are sorted by that rank; batch
/// fetches make no ordering promise. Ids that no longer resolve are skipped.
pub async fn materialize(store: &dyn UserStore, user_ids: &[i64]) -> Result<Vec<User>> {
	if user_ids.is_empty() {
		return Ok(Vec::new());
	}

	let mut ranks = HashMap::with_capacity(user_ids.len());

	for (rank, user_id) in user_ids.iter().enumerate() {
		ranks.entry(*user_id).or_insert(rank);
	}

	let mut ranked: Vec<(usize, User)> = store
		.fetch_users(user_ids)
		.await?
		.into_iter()
		.filter_map(|user| ranks.get(&user.id).map(|rank| (*rank, user)))
		.collect();

	ranked.sort_by_key(|(rank, _)| *rank);
	ranked.dedup_by_key(|(rank, _)| *rank);

	Ok(ranked.into_iter().map(|(_, user)| user).collect())
}

//! Tokenization shared by every searchable-text implementation.
//!
//! Text is split into maximal runs of alphanumeric characters, lowercased. A query matches a
//! document when every query token is a prefix of at least one document token.
//!
//! The generated `users.search_data` column applies the same split with `regexp_replace` before
//! `to_tsvector('simple', ...)`.

pub fn search_tokens(text: &str) -> Vec<String> {
	text.split(|ch: char| !ch.is_alphanumeric())
		.filter(|token| !token.is_empty())
		.map(str::to_lowercase)
		.collect()
}

/// Renders `term` as a Postgres `to_tsquery` input with prefix matching on every token.
///
/// Returns `None` when the term carries no searchable token.
pub fn prefix_tsquery(term: &str) -> Option<String> {
	let tokens = search_tokens(term);

	if tokens.is_empty() {
		return None;
	}

	Some(tokens.iter().map(|token| format!("{token}:*")).collect::<Vec<_>>().join(" & "))
}

pub fn tokens_match(query_tokens: &[String], document_tokens: &[String]) -> bool {
	!query_tokens.is_empty()
		&& query_tokens.iter().all(|query| {
			document_tokens.iter().any(|document| document.starts_with(query.as_str()))
		})
}

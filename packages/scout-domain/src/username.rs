use unicode_normalization::UnicodeNormalization;

/// Characters that only appear in structured usernames, never in display names.
pub const USERNAME_SEPARATORS: [char; 3] = ['_', '.', '-'];

const LIKE_ESCAPE: char = '\\';

/// Canonical lowercase form used for `username_lower` comparisons.
pub fn normalize_username(input: &str) -> String {
	input.nfc().collect::<String>().to_lowercase()
}

/// Normalizes a raw lookup term: surrounding whitespace and a single leading `@` are dropped.
pub fn normalize_term(raw: &str) -> String {
	let trimmed = raw.trim();
	let unprefixed = trimmed.strip_prefix('@').unwrap_or(trimmed);

	normalize_username(unprefixed.trim())
}

pub fn has_separator(term: &str) -> bool {
	term.chars().any(|ch| USERNAME_SEPARATORS.contains(&ch))
}

/// Escapes LIKE wildcards so every character of `term` matches literally.
pub fn escape_like(term: &str) -> String {
	let mut out = String::with_capacity(term.len() + 4);

	for ch in term.chars() {
		if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
			out.push(LIKE_ESCAPE);
		}

		out.push(ch);
	}

	out
}

/// `LIKE` pattern matching every value that starts with `term`. Pair with `ESCAPE '\'`.
pub fn prefix_like_pattern(term: &str) -> String {
	let mut pattern = escape_like(term);

	pattern.push('%');

	pattern
}

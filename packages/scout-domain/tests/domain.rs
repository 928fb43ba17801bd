use scout_domain::{
	group_visibility::{GroupViewer, GroupVisibility},
	text_search, username,
};

fn member() -> GroupViewer {
	GroupViewer { logged_in: true, member: true, ..GroupViewer::default() }
}

fn outsider() -> GroupViewer {
	GroupViewer { logged_in: true, ..GroupViewer::default() }
}

#[test]
fn visibility_levels_round_trip_through_storage_values() {
	for level in 0..=4 {
		let visibility = GroupVisibility::from_level(level).expect("Known visibility level.");

		assert_eq!(visibility.level(), level);
	}

	assert_eq!(GroupVisibility::from_level(9), None);
}

#[test]
fn anonymous_viewers_only_see_public_groups() {
	let anonymous = GroupViewer::anonymous();

	assert!(GroupVisibility::Public.visible_to(&anonymous));
	assert!(!GroupVisibility::LoggedOnUsers.visible_to(&anonymous));
	assert!(!GroupVisibility::Members.visible_to(&anonymous));
	assert!(!GroupVisibility::Staff.visible_to(&anonymous));
	assert!(!GroupVisibility::Owners.visible_to(&anonymous));
}

#[test]
fn members_only_groups_require_membership_or_staff() {
	assert!(GroupVisibility::Members.visible_to(&member()));
	assert!(!GroupVisibility::Members.visible_to(&outsider()));

	let moderator = GroupViewer { moderator: true, ..outsider() };

	assert!(GroupVisibility::Members.visible_to(&moderator));
	assert!(GroupVisibility::Staff.visible_to(&moderator));
	assert!(!GroupVisibility::Owners.visible_to(&moderator));
}

#[test]
fn admins_see_every_group() {
	let admin = GroupViewer { admin: true, ..outsider() };

	assert!(GroupVisibility::Owners.visible_to(&admin));
	assert!(GroupVisibility::Staff.visible_to(&admin));
}

#[test]
fn owners_only_groups_require_ownership() {
	let owner = GroupViewer { owner: true, ..member() };

	assert!(GroupVisibility::Owners.visible_to(&owner));
	assert!(!GroupVisibility::Owners.visible_to(&member()));
}

#[test]
fn separator_terms_are_username_fragments() {
	let term = username::normalize_term("@Ann.Lee");

	assert!(username::has_separator(&term));
	assert_eq!(username::prefix_like_pattern(&term), "ann.lee%");
}

#[test]
fn name_tokens_match_by_prefix() {
	let document = text_search::search_tokens("anna Anna Karenina");

	assert!(text_search::tokens_match(&text_search::search_tokens("kar"), &document));
	assert!(!text_search::tokens_match(&text_search::search_tokens("nina"), &document));
}

pub mod group_visibility;
pub mod text_search;
pub mod username;

/// Who may see a group, and therefore scope a lookup to its members.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupVisibility {
	Public,
	LoggedOnUsers,
	Members,
	Staff,
	Owners,
}
impl GroupVisibility {
	pub fn from_level(level: i16) -> Option<Self> {
		match level {
			0 => Some(Self::Public),
			1 => Some(Self::LoggedOnUsers),
			2 => Some(Self::Members),
			3 => Some(Self::Staff),
			4 => Some(Self::Owners),
			_ => None,
		}
	}

	pub fn level(self) -> i16 {
		match self {
			Self::Public => 0,
			Self::LoggedOnUsers => 1,
			Self::Members => 2,
			Self::Staff => 3,
			Self::Owners => 4,
		}
	}

	pub fn visible_to(self, viewer: &GroupViewer) -> bool {
		if viewer.admin {
			return true;
		}

		match self {
			Self::Public => true,
			Self::LoggedOnUsers => viewer.logged_in,
			Self::Members => viewer.logged_in && (viewer.moderator || viewer.member),
			Self::Staff => viewer.moderator,
			Self::Owners => viewer.logged_in && viewer.owner,
		}
	}
}

/// The caller's relationship to one specific group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupViewer {
	pub logged_in: bool,
	pub admin: bool,
	pub moderator: bool,
	pub member: bool,
	pub owner: bool,
}
impl GroupViewer {
	pub fn anonymous() -> Self {
		Self::default()
	}
}

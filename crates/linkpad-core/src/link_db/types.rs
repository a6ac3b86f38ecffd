//! Types stored in the link database.

/// Link identifier.
pub type LinkId = i64;

/// Category identifier.
pub type CategoryId = i64;

/// Fallback icon used whenever fetching or normalization yields nothing.
pub const DEFAULT_EMOJI_ICON: &str = "🔗";

/// Name given to the category seeded on first open.
pub const DEFAULT_CATEGORY_NAME: &str = "General";

/// What a link's icon value means: a literal emoji or a stored image name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Emoji,
    Image,
}

impl IconKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IconKind::Emoji => "emoji",
            IconKind::Image => "image",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "image" => IconKind::Image,
            _ => IconKind::Emoji,
        }
    }
}

/// Icon column pair as stored on a link row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkIcon {
    pub kind: IconKind,
    /// The emoji itself, or a stored icon filename.
    pub value: String,
}

impl Default for LinkIcon {
    fn default() -> Self {
        LinkIcon::emoji(DEFAULT_EMOJI_ICON)
    }
}

impl LinkIcon {
    pub fn emoji(value: impl Into<String>) -> Self {
        LinkIcon {
            kind: IconKind::Emoji,
            value: value.into(),
        }
    }

    pub fn image(stored_icon: impl Into<String>) -> Self {
        LinkIcon {
            kind: IconKind::Image,
            value: stored_icon.into(),
        }
    }
}

/// Full link row.
#[derive(Debug, Clone)]
pub struct LinkRecord {
    pub id: LinkId,
    pub title: String,
    pub url: String,
    pub icon: LinkIcon,
    pub category_id: CategoryId,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Category row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Fields for inserting a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub icon: LinkIcon,
    /// Target category; `None` places the link in the default category.
    pub category_id: Option<CategoryId>,
}

/// The known kinds of place a pin can mark. Tags that are not recognized are
/// still stored verbatim on the pin; they just display as `Other`.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Category {
    Restaurant,
    Bar,
    TouristSite,
    /// Places restricted to adults, stored under the tag `18`.
    AgeRestricted,
    Other,
}

impl Category {
    /// Maps a stored tag to its category. Total: anything unrecognized is
    /// `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "restaurant" => Category::Restaurant,
            "bar" => Category::Bar,
            "tourist-site" => Category::TouristSite,
            "18" => Category::AgeRestricted,
            _ => Category::Other,
        }
    }

    /// The canonical tag under which pins of this category are stored.
    pub fn tag(&self) -> &'static str {
        match self {
            Category::Restaurant => "restaurant",
            Category::Bar => "bar",
            Category::TouristSite => "tourist-site",
            Category::AgeRestricted => "18",
            Category::Other => "other",
        }
    }

    /// Marker and chart color, as a CSS hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Restaurant => "#6366f1",
            Category::Bar => "#ec4899",
            Category::TouristSite => "#10b981",
            Category::AgeRestricted => "#ef4444",
            Category::Other => "#f59e0b",
        }
    }
}

/// Returns the label shown on a filter chip for a raw tag: the tag with its
/// first character uppercased.
pub fn chip_label(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Which categories are currently visible. `All` is the "no filter" sentinel.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub enum CategorySelector {
    #[default]
    All,
    Only(String),
}

impl CategorySelector {
    /// Parses the selector value used by the UI, where the literal `all`
    /// means no filter.
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            CategorySelector::All
        } else {
            CategorySelector::Only(value.to_owned())
        }
    }

    pub fn matches(&self, tag: &str) -> bool {
        match self {
            CategorySelector::All => true,
            CategorySelector::Only(wanted) => wanted == tag,
        }
    }

    /// Label for the chip that selects this selector.
    pub fn label(&self) -> String {
        match self {
            CategorySelector::All => "Tout".to_owned(),
            CategorySelector::Only(tag) => chip_label(tag),
        }
    }
}

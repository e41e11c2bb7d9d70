use std::fmt;

/// The three member categories a bear is stacked from, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// `heads/`
    Heads,
    /// `bodies/`
    Bodies,
    /// `legs/`
    Legs,
}

impl Category {
    /// All categories in stacking and resolution order.
    pub const ALL: [Category; 3] = [Category::Heads, Category::Bodies, Category::Legs];

    /// Directory name used by every tier (`heads`, `bodies`, `legs`).
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Heads => "heads",
            Category::Bodies => "bodies",
            Category::Legs => "legs",
        }
    }

    /// Singular member noun used in diagnostics (`head`, `body`, `leg`).
    pub fn member_noun(self) -> &'static str {
        match self {
            Category::Heads => "head",
            Category::Bodies => "body",
            Category::Legs => "leg",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// File extension appended to every member name.
pub const MEMBER_EXT: &str = "jpg";

/// One member lookup: a category plus a bare name (no extension).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberRequest {
    /// Category subdirectory.
    pub category: Category,
    /// Base file name; `.jpg` is appended internally.
    pub name: String,
}

impl MemberRequest {
    /// Build a request for `category/name`.
    pub fn new(category: Category, name: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
        }
    }

    /// `name.jpg`
    pub fn file_name(&self) -> String {
        format!("{}.{MEMBER_EXT}", self.name)
    }

    /// `category/name.jpg`, the layout shared by all tiers.
    pub fn rel_path(&self) -> String {
        format!("{}/{}", self.category.dir_name(), self.file_name())
    }

    /// Whether the name can address a single file inside its category directory.
    ///
    /// Empty names, `.`/`..`, NUL and the platform's path separators are rejected so a
    /// lookup can never leave the tier root. Anything else is an ordinary file name.
    pub fn is_addressable(&self) -> bool {
        let n = self.name.as_str();
        !(n.is_empty()
            || n == "."
            || n == ".."
            || n.contains('\0')
            || n.chars().any(std::path::is_separator))
    }
}

impl fmt::Display for MemberRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.name)
    }
}

/// Names of the three members making up one bear.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BearRequest {
    /// Head member name.
    pub head: String,
    /// Body member name.
    pub body: String,
    /// Leg member name.
    pub leg: String,
}

impl BearRequest {
    /// Build a bear request from three member names.
    pub fn new(head: impl Into<String>, body: impl Into<String>, leg: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            body: body.into(),
            leg: leg.into(),
        }
    }

    /// Member requests in resolution order: head, body, leg.
    pub fn members(&self) -> [MemberRequest; 3] {
        [
            MemberRequest::new(Category::Heads, self.head.clone()),
            MemberRequest::new(Category::Bodies, self.body.clone()),
            MemberRequest::new(Category::Legs, self.leg.clone()),
        ]
    }
}

/// The ordered lookup locations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// The process working directory captured at startup.
    WorkingDir,
    /// The configured base directory.
    ConfiguredDir,
    /// Resources compiled into the binary.
    Bundled,
}

impl Tier {
    /// All tiers in lookup order.
    pub const ALL: [Tier; 3] = [Tier::WorkingDir, Tier::ConfiguredDir, Tier::Bundled];

    /// Prefix used for this tier's diagnostic line.
    pub fn label(self) -> &'static str {
        match self {
            Tier::WorkingDir => "In working dir:",
            Tier::ConfiguredDir => "In specified dir:",
            Tier::Bundled => "In resources:",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::WorkingDir => "working-dir",
            Tier::ConfiguredDir => "configured-dir",
            Tier::Bundled => "bundled",
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

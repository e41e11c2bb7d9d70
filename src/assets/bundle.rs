use std::{borrow::Cow, collections::BTreeMap};

use include_dir::{Dir, include_dir};

use crate::foundation::core::{Category, MEMBER_EXT, MemberRequest};

/// Root of the logical resource layout: `/members/{category}/{name}.jpg`.
pub const BUNDLE_ROOT: &str = "/members";

static MEMBERS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/members");

/// Read-only set of member resources addressed by logical path.
///
/// [`Bundle::embedded`] serves the `members/` tree compiled into the binary; tests and
/// embedders can build their own with [`Bundle::insert`].
#[derive(Clone, Debug, Default)]
pub struct Bundle {
    entries: BTreeMap<String, Cow<'static, [u8]>>,
}

impl Bundle {
    /// Bundle with the members shipped in `members/`.
    pub fn embedded() -> Self {
        let mut entries = BTreeMap::new();
        collect_embedded(&MEMBERS, &mut entries);
        Self { entries }
    }

    /// Bundle with no resources.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add or replace the resource at `category/name.jpg`.
    pub fn insert(&mut self, member: &MemberRequest, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(
            resource_path(&member.rel_path()),
            Cow::Owned(bytes.into()),
        );
    }

    /// Logical path of `member` inside the bundle.
    pub fn path_of(member: &MemberRequest) -> String {
        resource_path(&member.rel_path())
    }

    /// Bytes stored at a logical path such as `/members/heads/brown.jpg`.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.entries.get(path).map(|b| &**b)
    }

    /// Member names available for `category`, sorted.
    pub fn names(&self, category: Category) -> Vec<&str> {
        let prefix = format!("{BUNDLE_ROOT}/{}/", category.dir_name());
        let suffix = format!(".{MEMBER_EXT}");
        self.entries
            .keys()
            .filter_map(|k| k.strip_prefix(prefix.as_str()))
            .filter_map(|rest| rest.strip_suffix(suffix.as_str()))
            .filter(|name| !name.contains('/'))
            .collect()
    }
}

fn collect_embedded(
    dir: &'static Dir<'static>,
    out: &mut BTreeMap<String, Cow<'static, [u8]>>,
) {
    for file in dir.files() {
        let rel = file.path().to_string_lossy().replace('\\', "/");
        out.insert(resource_path(&rel), Cow::Borrowed(file.contents()));
    }
    for sub in dir.dirs() {
        collect_embedded(sub, out);
    }
}

fn resource_path(rel: &str) -> String {
    format!("{BUNDLE_ROOT}/{rel}")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/bundle.rs"]
mod tests;

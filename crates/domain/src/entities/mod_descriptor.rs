use crate::ModUid;

/// A loaded mod: the namespace for content it brings in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModDescriptor {
    pub uid: ModUid,
    pub name: String,
}

impl ModDescriptor {
    pub fn new(uid: ModUid, name: impl Into<String>) -> Self {
        Self {
            uid,
            name: name.into(),
        }
    }
}

use std::collections::HashSet;

/// Names barred from booking, either as customer or as passenger.
///
/// Seeded once at startup and shared read-only (`Arc<NoFlyList>`); there is
/// no API to change it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoFlyList {
    names: HashSet<String>,
}

impl NoFlyList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(["Peter", "Johannes"])
    }

    /// Exact, case-sensitive match
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// First name in `names` that is on the list, in input order
    pub fn first_listed<'a, S: AsRef<str>>(&self, names: &'a [S]) -> Option<&'a str> {
        names.iter().map(|name| name.as_ref()).find(|name| self.contains(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

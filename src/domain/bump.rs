use std::fmt;

/// Kind of version bump requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
    Pre,
}

impl BumpKind {
    /// Whether the bumped version gets staged, committed and tagged.
    ///
    /// Pre-release bumps only rewrite the files.
    pub fn is_release(&self) -> bool {
        !matches!(self, BumpKind::Pre)
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpKind::Major => write!(f, "major"),
            BumpKind::Minor => write!(f, "minor"),
            BumpKind::Patch => write!(f, "patch"),
            BumpKind::Pre => write!(f, "pre-release"),
        }
    }
}

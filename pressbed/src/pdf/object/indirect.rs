use std::fmt::Display;

/// Identifies an indirect object: object number and generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference {
    pub index: u32,
    pub generation: u16,
}

impl Reference {
    pub const fn new(index: u32, generation: u16) -> Self {
        Self { index, generation }
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.index, self.generation)
    }
}

/// Byte offsets of the objects of a PDF section.
///
/// Entry `n` describes object number `n`. Object 0 is always the head of the
/// free list. Numbers without an object in between are marked free.
#[derive(Debug, Clone, PartialEq)]
pub struct Xref(Vec<XrefEntry>);

impl Xref {
    /// Build a complete table from the objects that were written.
    pub fn from_used(mut used: Vec<UsedObject>) -> Self {
        used.sort_unstable_by_key(|u| u.number);
        let highest = used.last().map(|u| u.number).unwrap_or(0);

        let mut entries = Vec::with_capacity(highest + 1);
        entries.push(XrefEntry::Free(FreeObject {
            number: 0,
            generation: FREE_HEAD_GENERATION,
            next_free: 0,
        }));

        let mut used = used.into_iter().peekable();
        for number in 1..=highest {
            match used.next_if(|u| u.number == number) {
                Some(u) => entries.push(u.into()),
                None => entries.push(
                    FreeObject {
                        number,
                        generation: FREE_HEAD_GENERATION,
                        next_free: 0,
                    }
                    .into(),
                ),
            }
            // duplicates of a number keep the first offset
            while used.next_if(|u| u.number == number).is_some() {}
        }

        Xref(entries)
    }

    pub fn entries(&self) -> &[XrefEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn used_objects(&self) -> impl Iterator<Item = &UsedObject> {
        self.0
            .iter()
            .filter_map(|entry| if let XrefEntry::Used(u) = entry { Some(u) } else { None })
    }
}

/// Generation written for free entries that cannot be reused.
pub const FREE_HEAD_GENERATION: usize = 65535;

#[derive(Debug, Clone, PartialEq)]
pub struct FreeObject {
    /// Number of this object
    pub number: usize,
    /// Next generation number that should be used
    pub generation: usize,
    /// Next free object number
    pub next_free: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsedObject {
    /// Number of this object
    pub number: usize,
    /// The position of this object in the pdf file in bytes, starting from the
    /// beginning of the PDF.
    pub byte_offset: usize,
    pub generation: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum XrefEntry {
    Free(FreeObject),
    Used(UsedObject),
}

impl XrefEntry {
    pub fn number(&self) -> usize {
        match self {
            XrefEntry::Free(FreeObject { number, .. }) => *number,
            XrefEntry::Used(UsedObject { number, .. }) => *number,
        }
    }
}

impl From<UsedObject> for XrefEntry {
    fn from(v: UsedObject) -> Self {
        Self::Used(v)
    }
}

impl From<FreeObject> for XrefEntry {
    fn from(v: FreeObject) -> Self {
        Self::Free(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn used(number: usize, byte_offset: usize) -> UsedObject {
        UsedObject {
            number,
            byte_offset,
            generation: 0,
        }
    }

    #[test]
    fn fills_gaps_with_free_entries() {
        let xref = Xref::from_used(vec![used(3, 300), used(1, 15)]);
        assert_eq!(xref.len(), 4);
        let numbers: Vec<_> = xref.entries().iter().map(XrefEntry::number).collect();
        assert_eq!(numbers, vec![0, 1, 2, 3]);
        assert!(matches!(xref.entries()[2], XrefEntry::Free(_)));
        let offsets: Vec<_> = xref.used_objects().map(|u| u.byte_offset).collect();
        assert_eq!(offsets, vec![15, 300]);
    }

    #[test]
    fn empty_table_has_free_head() {
        let xref = Xref::from_used(vec![]);
        assert_eq!(xref.len(), 1);
        assert!(matches!(xref.entries()[0], XrefEntry::Free(FreeObject { number: 0, .. })));
    }
}

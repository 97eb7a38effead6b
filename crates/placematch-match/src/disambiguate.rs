use placematch_model::ReferenceRecord;

/// Picks one record among several sharing a normalized name.
///
/// The first record in the preferred region wins; without one, the first
/// record overall. Records with an incomplete location never count as being
/// in the preferred region.
#[derive(Debug, Clone)]
pub struct Disambiguator {
    preferred_region: String,
}

impl Disambiguator {
    pub fn new(preferred_region: impl Into<String>) -> Self {
        Self {
            preferred_region: preferred_region.into(),
        }
    }

    /// Region name that wins among records sharing a key.
    pub fn preferred_region(&self) -> &str {
        &self.preferred_region
    }

    /// Returns `None` only for an empty input.
    pub fn choose<'a, I>(&self, records: I) -> Option<&'a ReferenceRecord>
    where
        I: IntoIterator<Item = &'a ReferenceRecord>,
    {
        let mut first = None;
        for record in records {
            let preferred = record
                .region()
                .is_some_and(|region| region.name == self.preferred_region);
            if preferred {
                return Some(record);
            }
            first.get_or_insert(record);
        }
        first
    }
}

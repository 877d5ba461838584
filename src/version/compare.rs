use std::cmp::Ordering;

/// A version string decomposed into its integer segments.
///
/// Parsing is lenient: empty segments (from leading, trailing or doubled dots)
/// are dropped and any segment that is not a valid integer counts as 0.
/// Missing trailing segments compare as 0, so `1.2` and `1.2.0` are equal.
///
/// Examples:
/// - "1.021.01.00" -> [1, 21, 1, 0]
/// - "1..2." -> [1, 2]
/// - "1.beta.3" -> [1, 0, 3]
#[derive(Debug, Clone)]
pub struct VersionKey {
    segments: Vec<u64>,
}

impl VersionKey {
    pub fn parse(version: &str) -> Self {
        let segments = version
            .split('.')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.parse::<u64>().unwrap_or(0))
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }
}

impl Ord for VersionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality has to agree with `Ord`, which ignores trailing zero segments.
impl PartialEq for VersionKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionKey {}

/// Compare two optional version strings.
///
/// An absent version is older than any present one, whatever its digits.
/// Present versions are compared numerically per segment via [`VersionKey`].
pub fn compare_versions(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) if a == b => Ordering::Equal,
        (Some(a), Some(b)) => VersionKey::parse(a).cmp(&VersionKey::parse(b)),
    }
}

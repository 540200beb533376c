/// Route key derivation and route-group classification.
///
/// A job code such as `HCMBKK` expands to the POL/POD string `HCM-BKK`; the
/// part after the last `-` is the route key (`BKK`). The key selects a fixed
/// block of rows in the `POL-POD` sheet and names the secondary sheet of the
/// exported workbook.
use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

/// Separator between port of loading and port of discharge.
pub const ROUTE_SEPARATOR: char = '-';

/// A closed partition of route keys, each owning a block of route-sheet rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteGroup {
    /// East and South-East Asian ports.
    Asia,
    /// Indian subcontinent ports.
    Subcontinent,
}

impl RouteGroup {
    /// All groups, in classification order.
    pub const ALL: [Self; 2] = [Self::Asia, Self::Subcontinent];

    /// The literal route keys belonging to this group.
    pub const fn codes(self) -> &'static [&'static str] {
        match self {
            Self::Asia => &["BKK", "SHA", "HKG", "SIN", "NGB", "JKT"],
            Self::Subcontinent => &["INC", "CGP"],
        }
    }

    /// 1-based route-sheet rows read for this group.
    pub const fn rows(self) -> RangeInclusive<u32> {
        match self {
            Self::Asia => 3..=8,
            Self::Subcontinent => 12..=16,
        }
    }

    /// Number of route-derived line items this group yields.
    pub fn row_count(self) -> usize {
        self.rows().count()
    }

    /// Returns `true` if `key` is one of this group's codes (case-sensitive).
    pub fn contains(self, key: &str) -> bool {
        self.codes().contains(&key)
    }
}

impl fmt::Display for RouteGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asia => f.write_str("asia"),
            Self::Subcontinent => f.write_str("subcontinent"),
        }
    }
}

/// Builds the POL/POD string from a job code.
///
/// The job code is upper-cased; with at least six characters the result is
/// `first3-next3`, otherwise it is empty.
///
/// ```
/// use quotegen_core::route::pol_pod_from_job;
/// assert_eq!(pol_pod_from_job("hcmbkk0425"), "HCM-BKK");
/// assert_eq!(pol_pod_from_job("HCM"), "");
/// ```
pub fn pol_pod_from_job(job: &str) -> String {
    let upper: Vec<char> = job.to_uppercase().chars().collect();
    match (upper.get(0..3), upper.get(3..6)) {
        (Some(pol), Some(pod)) => {
            let pol: String = pol.iter().collect();
            let pod: String = pod.iter().collect();
            format!("{pol}{ROUTE_SEPARATOR}{pod}")
        }
        (None, _) | (_, None) => String::new(),
    }
}

/// Derives the route key: the text after the last separator, or empty when
/// there is no separator.
pub fn derive_route_key(code: &str) -> &str {
    match code.rfind(ROUTE_SEPARATOR) {
        Some(idx) => code.get(idx + ROUTE_SEPARATOR.len_utf8()..).unwrap_or(""),
        None => "",
    }
}

/// Classifies a route key into its group, if any.
pub fn classify(key: &str) -> Option<RouteGroup> {
    RouteGroup::ALL.into_iter().find(|group| group.contains(key))
}

/// Route-sheet rows for a key; empty when the key is unclassified.
pub fn route_rows(key: &str) -> Vec<u32> {
    classify(key).map(|g| g.rows().collect()).unwrap_or_default()
}

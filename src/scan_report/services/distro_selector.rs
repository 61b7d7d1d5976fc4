use crate::scan_report::domain::{Distro, Package};
use std::collections::HashMap;

/// DistroSelector service for choosing the distribution that describes a scan
///
/// Pure business logic over the package inventory; no I/O.
pub struct DistroSelector;

impl DistroSelector {
    /// Selects the distro reported by the most packages
    ///
    /// Distros are compared by their canonical string form. On a tie the
    /// distro that reached the winning count first (in slice order) is kept.
    ///
    /// # Returns
    /// `None` when no package carries a distro
    pub fn select_most_common(packages: &[Package]) -> Option<&Distro> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut selected: Option<&Distro> = None;
        let mut max_count = 0;

        for distro in packages.iter().filter_map(|p| p.distro.as_ref()) {
            let count = counts.entry(distro.to_string()).or_insert(0);
            *count += 1;

            if *count > max_count {
                max_count = *count;
                selected = Some(distro);
            }
        }

        selected
    }
}

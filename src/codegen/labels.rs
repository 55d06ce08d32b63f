//! Label allocation and backpatching
//!
//! Labels are requested before the code that needs them exists. A branch to a
//! label that has not been placed yet is emitted with a pending target and its
//! instruction index recorded here; placing the label resolves every recorded
//! site at once. Each label resolves exactly once.

use super::instruction::{Instruction, LabelId};
use rustc_hash::{FxHashMap, FxHashSet};

#[derive(Debug, Default)]
pub struct LabelTable {
    counter: usize,
    pending: FxHashMap<LabelId, Vec<usize>>,
    resolved: FxHashSet<LabelId>,
}

impl LabelTable {
    /// Allocate the next label (`L1`, `L2`, ... in request order)
    pub fn request_label(&mut self) -> LabelId {
        self.counter += 1;
        LabelId(self.counter)
    }

    pub fn is_resolved(&self, label: LabelId) -> bool {
        self.resolved.contains(&label)
    }

    /// Record that instruction `site` waits on `label`
    pub fn add_pending(&mut self, label: LabelId, site: usize) {
        assert!(
            !self.is_resolved(label),
            "{label} is already placed; branch to it directly"
        );
        self.pending.entry(label).or_default().push(site);
    }

    /// Patch every site waiting on `label` and mark it resolved
    pub fn resolve(&mut self, label: LabelId, code: &mut [Instruction]) {
        assert!(self.resolved.insert(label), "{label} resolved twice");

        for site in self.pending.remove(&label).unwrap_or_default() {
            code[site].patch_target(label);
        }
    }

    /// Labels with sites still waiting on them, in allocation order
    pub fn unresolved(&self) -> Vec<LabelId> {
        let mut labels: Vec<LabelId> = self.pending.keys().copied().collect();
        labels.sort();
        labels
    }
}

//! Cascade Summary

use reprieve::CascadeStage;

/// Counts reported by one cascade run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    per_stage: [usize; 4],

    /// Candidates read from the inventory snapshot.
    pub items_scanned: usize,

    /// Candidates that reached a stage and were flagged.
    pub items_rescued: usize,

    /// Donation offers created.
    pub offers_created: usize,
}

impl CascadeSummary {
    #[must_use]
    pub fn scanned(items_scanned: usize) -> Self {
        Self {
            items_scanned,
            ..Self::default()
        }
    }

    /// Items that reached `stage` during the run.
    #[must_use]
    pub fn count(&self, stage: CascadeStage) -> usize {
        self.per_stage.get(stage.index()).copied().unwrap_or_default()
    }

    /// Every stage with its count, earliest stage first.
    pub fn per_stage(&self) -> impl Iterator<Item = (CascadeStage, usize)> + '_ {
        CascadeStage::ALL
            .into_iter()
            .map(|stage| (stage, self.count(stage)))
    }

    pub(crate) fn record(&mut self, stage: CascadeStage, created_offer: bool) {
        if let Some(count) = self.per_stage.get_mut(stage.index()) {
            *count += 1;
        }

        self.items_rescued += 1;

        if created_offer {
            self.offers_created += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_stage_and_offers() {
        let mut summary = CascadeSummary::scanned(5);

        summary.record(CascadeStage::One, false);
        summary.record(CascadeStage::Three, true);
        summary.record(CascadeStage::Three, true);

        assert_eq!(summary.items_scanned, 5);
        assert_eq!(summary.items_rescued, 3);
        assert_eq!(summary.offers_created, 2);
        assert_eq!(summary.count(CascadeStage::One), 1);
        assert_eq!(summary.count(CascadeStage::Two), 0);
        assert_eq!(summary.count(CascadeStage::Three), 2);
    }

    #[test]
    fn per_stage_lists_every_stage_in_order() {
        let mut summary = CascadeSummary::default();

        summary.record(CascadeStage::Four, false);

        let stages: Vec<(CascadeStage, usize)> = summary.per_stage().collect();

        assert_eq!(
            stages,
            vec![
                (CascadeStage::One, 0),
                (CascadeStage::Two, 0),
                (CascadeStage::Three, 0),
                (CascadeStage::Four, 1),
            ]
        );
    }
}

use serde::Serialize;
use tracing::debug;

/// Room kept free for the "+N more" affordance whenever more than one chip exists.
pub const DEFAULT_RESERVED_PADDING: u32 = 65;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverflowPlan {
    pub visible_count: usize,
    pub has_hidden: bool,
}

/// Greedy prefix scan: the first chip that does not fit ends the visible run.
pub fn compute_visible_count(
    chip_widths: &[u32],
    container_width: u32,
    reserved_padding: u32,
) -> OverflowPlan {
    let container = u64::from(container_width);
    let padding = u64::from(reserved_padding);
    let reserve = chip_widths.len() > 1;
    let mut running = 0u64;

    for (index, width) in chip_widths.iter().enumerate() {
        let next = running + u64::from(*width);
        if next > container || (reserve && next + padding > container) {
            return OverflowPlan {
                visible_count: index,
                has_hidden: true,
            };
        }
        running = next;
    }

    OverflowPlan {
        visible_count: chip_widths.len(),
        has_hidden: false,
    }
}

/// Holds the latest measurements and recomputes the plan only when they change.
#[derive(Debug, Clone)]
pub struct OverflowCalculator {
    reserved_padding: u32,
    chip_widths: Vec<u32>,
    container_width: Option<u32>,
    plan: Option<OverflowPlan>,
    stale: bool,
}

impl Default for OverflowCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED_PADDING)
    }
}

impl OverflowCalculator {
    pub fn new(reserved_padding: u32) -> Self {
        Self {
            reserved_padding,
            chip_widths: Vec::new(),
            container_width: None,
            plan: None,
            stale: false,
        }
    }

    pub fn plan(&self) -> Option<OverflowPlan> {
        self.plan
    }

    pub fn container_width(&self) -> Option<u32> {
        self.container_width
    }

    pub fn chip_widths(&self) -> &[u32] {
        &self.chip_widths
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn set_chip_widths(&mut self, widths: Vec<u32>) -> bool {
        if self.chip_widths == widths {
            return false;
        }
        self.chip_widths = widths;
        self.stale = true;
        true
    }

    pub fn resize(&mut self, container_width: u32) -> bool {
        if self.container_width == Some(container_width) {
            return false;
        }
        self.container_width = Some(container_width);
        self.stale = true;
        true
    }

    /// Drops measurements past `len` after the list shrank and forces a recompute.
    pub fn list_changed(&mut self, len: usize) {
        self.chip_widths.truncate(len);
        self.stale = true;
    }

    /// Recomputes a stale plan unless an edit session is active.
    /// Returns the new plan when one was computed.
    pub fn refresh(&mut self, editing: bool) -> Option<OverflowPlan> {
        if !self.stale {
            return None;
        }
        if editing {
            debug!("overflow recompute deferred while editing");
            return None;
        }
        let container_width = self.container_width?;
        let plan = compute_visible_count(&self.chip_widths, container_width, self.reserved_padding);
        debug!(
            container_width,
            chips = self.chip_widths.len(),
            visible = plan.visible_count,
            hidden = plan.has_hidden,
            "overflow recomputed"
        );
        self.plan = Some(plan);
        self.stale = false;
        Some(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_nothing_hidden() {
        assert_eq!(
            compute_visible_count(&[], 100, 65),
            OverflowPlan {
                visible_count: 0,
                has_hidden: false
            }
        );
    }

    #[test]
    fn padding_check_applies_when_several_chips_exist() {
        let plan = compute_visible_count(&[40, 40, 40], 100, 65);
        assert_eq!(plan.visible_count, 0);
        assert!(plan.has_hidden);
    }

    #[test]
    fn single_chip_ignores_padding() {
        let plan = compute_visible_count(&[90], 100, 65);
        assert_eq!(plan.visible_count, 1);
        assert!(!plan.has_hidden);
    }

    #[test]
    fn single_chip_too_wide_is_hidden() {
        let plan = compute_visible_count(&[120], 100, 65);
        assert_eq!(plan.visible_count, 0);
        assert!(plan.has_hidden);
    }

    #[test]
    fn scan_stops_at_first_failing_chip() {
        // chip 1 fails (150 + 65 > 200) although chip 2 alone would fit
        let plan = compute_visible_count(&[50, 100, 10], 200, 65);
        assert_eq!(
            plan,
            OverflowPlan {
                visible_count: 1,
                has_hidden: true
            }
        );
    }

    #[test]
    fn small_trailing_chips_fit_with_padding() {
        let plan = compute_visible_count(&[50, 50, 10, 10], 200, 65);
        assert_eq!(plan.visible_count, 4);
        assert!(!plan.has_hidden);
    }

    #[test]
    fn everything_fits_in_wide_container() {
        let plan = compute_visible_count(&[10, 20, 30], 1000, 65);
        assert_eq!(plan.visible_count, 3);
        assert!(!plan.has_hidden);
    }

    #[test]
    fn calculator_defers_while_editing() {
        let mut calc = OverflowCalculator::default();
        calc.set_chip_widths(vec![40, 40]);
        calc.resize(500);
        assert_eq!(calc.refresh(true), None);
        assert!(calc.is_stale());
        let plan = calc.refresh(false).unwrap();
        assert_eq!(plan.visible_count, 2);
        assert_eq!(calc.refresh(false), None, "unchanged inputs do not recompute");
        assert_eq!(calc.plan(), Some(plan));
    }

    #[test]
    fn calculator_waits_for_container_width() {
        let mut calc = OverflowCalculator::default();
        calc.set_chip_widths(vec![40]);
        assert_eq!(calc.refresh(false), None);
        calc.resize(30);
        assert_eq!(calc.refresh(false).map(|plan| plan.visible_count), Some(0));
    }

    #[test]
    fn identical_resize_is_ignored() {
        let mut calc = OverflowCalculator::default();
        assert!(calc.resize(300));
        calc.refresh(false);
        assert!(!calc.resize(300));
        assert!(!calc.is_stale());
    }
}

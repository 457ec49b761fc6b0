use serde::Serialize;

/// What a click outside the cell should do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum OutsideClick {
    #[default]
    Ignore,
    CommitEdit,
    CloseHiddenChips,
}

/// Event sources the renderer should hold handles for. Compare with the
/// previous plan after each intent and subscribe or drop handles on change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubscriptionPlan {
    pub resize: bool,
    pub outside_click: OutsideClick,
}

impl SubscriptionPlan {
    pub fn for_state(editing: bool, hidden_chips_open: bool) -> Self {
        let outside_click = if editing {
            OutsideClick::CommitEdit
        } else if hidden_chips_open {
            OutsideClick::CloseHiddenChips
        } else {
            OutsideClick::Ignore
        };
        Self {
            resize: !editing,
            outside_click,
        }
    }

    pub fn wants_outside_click(&self) -> bool {
        self.outside_click != OutsideClick::Ignore
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_drops_resize_and_commits_on_outside_click() {
        let plan = SubscriptionPlan::for_state(true, true);
        assert!(!plan.resize);
        assert_eq!(plan.outside_click, OutsideClick::CommitEdit);
    }

    #[test]
    fn idle_cell_only_listens_for_resize() {
        let plan = SubscriptionPlan::for_state(false, false);
        assert!(plan.resize);
        assert!(!plan.wants_outside_click());
        assert_eq!(
            SubscriptionPlan::for_state(false, true).outside_click,
            OutsideClick::CloseHiddenChips
        );
    }
}

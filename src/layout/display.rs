use serde::{Deserialize, Serialize};

use crate::domain::Chip;

use super::OverflowPlan;

/// How many chips a non-editing cell shows before collapsing the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawVisibleLimit", into = "RawVisibleLimit")]
pub enum VisibleLimit {
    #[default]
    All,
    Count(usize),
    /// Follow the measured overflow plan.
    Auto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawVisibleLimit {
    Count(usize),
    Keyword(String),
}

impl TryFrom<RawVisibleLimit> for VisibleLimit {
    type Error = String;

    fn try_from(raw: RawVisibleLimit) -> Result<Self, Self::Error> {
        match raw {
            RawVisibleLimit::Count(0) => Ok(VisibleLimit::Auto),
            RawVisibleLimit::Count(count) => Ok(VisibleLimit::Count(count)),
            RawVisibleLimit::Keyword(keyword) => match keyword.as_str() {
                "all" => Ok(VisibleLimit::All),
                "auto" => Ok(VisibleLimit::Auto),
                other => Err(format!(
                    "expected a chip count, \"all\" or \"auto\", found \"{other}\""
                )),
            },
        }
    }
}

impl From<VisibleLimit> for RawVisibleLimit {
    fn from(limit: VisibleLimit) -> Self {
        match limit {
            VisibleLimit::All => RawVisibleLimit::Keyword("all".to_string()),
            VisibleLimit::Auto => RawVisibleLimit::Keyword("auto".to_string()),
            VisibleLimit::Count(count) => RawVisibleLimit::Count(count),
        }
    }
}

/// Transient split of the chip list into shown and collapsed chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipDisplay<'a> {
    pub visible: &'a [Chip],
    pub hidden: &'a [Chip],
}

impl<'a> ChipDisplay<'a> {
    pub fn split(
        chips: &'a [Chip],
        limit: VisibleLimit,
        plan: Option<OverflowPlan>,
        show_all: bool,
    ) -> Self {
        let count = if show_all {
            chips.len()
        } else {
            match limit {
                VisibleLimit::All => chips.len(),
                VisibleLimit::Count(count) => count,
                VisibleLimit::Auto => plan.map_or(chips.len(), |plan| plan.visible_count),
            }
        };
        let (visible, hidden) = chips.split_at(count.min(chips.len()));
        Self { visible, hidden }
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    /// Label of the "+N" affordance, when anything is collapsed.
    pub fn summary_label(&self) -> Option<String> {
        (!self.hidden.is_empty()).then(|| format!("+{}", self.hidden.len()))
    }
}

use crossterm::event::KeyEvent;
use tracing::debug;

use crate::domain::{Chip, ChipField};
use crate::form::{ChipError, FormStateHost};
use crate::layout::{
    ChipDisplay, ChipFieldWidthEstimator, FieldWidths, OverflowCalculator, OverflowPlan,
    VisibleLimit,
};
use crate::session::{Direction, EditSession, EditSessionController};
use crate::validation::{ValidationEngine, ValidationReport};

use super::{ChipCellConfig, ChipCellOptions, SubscriptionPlan, input::classify};

/// Events emitted by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipIntent {
    Activate(usize),
    AddNew,
    Advance(Direction),
    Focus(ChipField),
    FieldChanged(ChipField, String),
    Remove(usize),
    Resize(u32),
    /// Rendered widths of the chips, in list order.
    Measured(Vec<u32>),
    /// Backspace or Delete pressed in the focused input.
    DeleteKey,
    ToggleHiddenChips,
    OutsideClick,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ChipCellView<'a> {
    pub display: ChipDisplay<'a>,
    pub overflow: Option<OverflowPlan>,
    pub session: &'a EditSession,
    pub report: &'a ValidationReport,
    /// Input widths of the open chip, present while editing.
    pub field_widths: Option<FieldWidths>,
    pub show_hidden_chips: bool,
    pub delimiter: Option<&'a str>,
}

impl ChipCellView<'_> {
    pub fn label(&self, chip: &Chip) -> String {
        chip.label(self.delimiter)
    }
}

/// A chip list field bound to `field_name` of a host form.
#[derive(Debug, Clone)]
pub struct ChipCell {
    options: ChipCellOptions,
    controller: EditSessionController,
    overflow: OverflowCalculator,
    widths: ChipFieldWidthEstimator,
    field_widths: FieldWidths,
    show_hidden_chips: bool,
}

impl ChipCell {
    pub fn new(field_name: impl Into<String>, options: ChipCellOptions) -> Self {
        let validation = ValidationEngine::new(
            options.validation_rules.clone(),
            options.custom_validator.clone(),
        );
        let controller = EditSessionController::new(field_name, validation)
            .with_delimiter(options.delimiter.clone());
        let widths = ChipFieldWidthEstimator::new(options.text_metrics.clone())
            .with_min_widths(options.key_min_width, options.value_min_width);
        Self {
            overflow: OverflowCalculator::new(options.reserved_padding),
            controller,
            widths,
            field_widths: FieldWidths::default(),
            show_hidden_chips: false,
            options,
        }
    }

    pub fn from_config(
        field_name: impl Into<String>,
        config: &ChipCellConfig,
    ) -> Result<Self, ChipError> {
        Ok(Self::new(field_name, ChipCellOptions::from_config(config)?))
    }

    pub fn field_name(&self) -> &str {
        self.controller.field_name()
    }

    pub fn options(&self) -> &ChipCellOptions {
        &self.options
    }

    pub fn session(&self) -> &EditSession {
        self.controller.session()
    }

    pub fn report(&self) -> &ValidationReport {
        self.controller.report()
    }

    pub fn overflow_plan(&self) -> Option<OverflowPlan> {
        self.overflow.plan()
    }

    pub fn show_hidden_chips(&self) -> bool {
        self.show_hidden_chips
    }

    pub fn subscriptions(&self) -> SubscriptionPlan {
        SubscriptionPlan::for_state(self.session().is_editing(), self.show_hidden_chips)
    }

    /// Reads the host's chips on mount, or after the host changed them itself.
    pub fn sync<H: FormStateHost + ?Sized>(&mut self, host: &H) {
        let len = host.chips(self.field_name()).len();
        self.controller.revalidate(host);
        self.overflow.list_changed(len);
        self.overflow.refresh(self.session().is_editing());
    }

    pub fn handle_key<H: FormStateHost + ?Sized>(
        &mut self,
        host: &mut H,
        key: &KeyEvent,
    ) -> Result<bool, ChipError> {
        match classify(key, self.session()) {
            Some(intent) => self.handle(host, intent),
            None => Ok(false),
        }
    }

    /// Applies one intent; returns whether any state changed.
    pub fn handle<H: FormStateHost + ?Sized>(
        &mut self,
        host: &mut H,
        intent: ChipIntent,
    ) -> Result<bool, ChipError> {
        let len_before = host.chips(self.field_name()).len();
        let active_before = self.session().active_index();
        let changed = match intent {
            ChipIntent::Activate(index) => self.activate(host, index)?,
            ChipIntent::AddNew => self.add_new(host)?,
            ChipIntent::Advance(direction) => self.controller.advance(host, direction)?,
            ChipIntent::Focus(field) => self.controller.focus(field),
            ChipIntent::DeleteKey => self.shrink_focused_field(),
            ChipIntent::FieldChanged(field, text) => self.field_changed(host, field, &text)?,
            ChipIntent::Remove(index) => {
                if !self.options.editable {
                    return Ok(false);
                }
                self.controller.remove(host, index)?;
                true
            }
            ChipIntent::Resize(width) => {
                self.widths.fit_container(width);
                self.overflow.resize(width)
            }
            ChipIntent::Measured(widths) => self.overflow.set_chip_widths(widths),
            ChipIntent::ToggleHiddenChips => self.toggle_hidden_chips(),
            ChipIntent::OutsideClick => {
                if self.session().is_editing() {
                    self.controller.advance(host, Direction::Commit)?
                } else if self.show_hidden_chips {
                    self.show_hidden_chips = false;
                    true
                } else {
                    false
                }
            }
        };

        let active_after = self.session().active_index();
        if active_after != active_before
            && let Some(active) = active_after
        {
            self.estimate_active_chip(&*host, active);
        }

        let len_after = host.chips(self.field_name()).len();
        if len_after != len_before {
            self.overflow.list_changed(len_after);
        }
        self.overflow.refresh(self.session().is_editing());
        Ok(changed)
    }

    pub fn view<'a, H: FormStateHost + ?Sized>(&'a self, host: &'a H) -> ChipCellView<'a> {
        let chips = host.chips(self.field_name());
        let display = ChipDisplay::split(
            chips,
            self.options.visible_chips_max_length,
            self.overflow.plan(),
            self.options.editable,
        );
        ChipCellView {
            display,
            overflow: self.overflow.plan(),
            session: self.session(),
            report: self.report(),
            field_widths: self.session().is_editing().then_some(self.field_widths),
            show_hidden_chips: self.show_hidden_chips,
            delimiter: self.options.delimiter.as_deref(),
        }
    }

    fn activate<H: FormStateHost + ?Sized>(
        &mut self,
        host: &mut H,
        index: usize,
    ) -> Result<bool, ChipError> {
        if !self.options.editable {
            self.notify_click();
            return Ok(false);
        }
        let changed = self.controller.activate(host, index)?;
        self.notify_click();
        Ok(changed)
    }

    /// Widths of a chip on entry into edit mode come from its current content.
    fn estimate_active_chip<H: FormStateHost + ?Sized>(&mut self, host: &H, active: usize) {
        self.field_widths = host
            .chips(self.field_name())
            .get(active)
            .map(|chip| self.widths.estimate_chip(chip))
            .unwrap_or_default();
    }

    fn notify_click(&self) {
        if let Some(on_click) = &self.options.on_click {
            on_click();
        }
    }

    /// Deleting text snaps the focused input back to its minimum width until
    /// the next `FieldChanged` re-measures it.
    fn shrink_focused_field(&mut self) -> bool {
        let Some(field) = self.session().focused_field() else {
            return false;
        };
        let min = self.widths.min_width(field);
        if self.field_widths.get(field) == min {
            return false;
        }
        self.field_widths.set(field, min);
        true
    }

    fn add_new<H: FormStateHost + ?Sized>(&mut self, host: &mut H) -> Result<bool, ChipError> {
        if !self.options.editable {
            return Ok(false);
        }
        self.show_hidden_chips = false;
        self.controller.add_new(host)
    }

    fn field_changed<H: FormStateHost + ?Sized>(
        &mut self,
        host: &mut H,
        field: ChipField,
        text: &str,
    ) -> Result<bool, ChipError> {
        let changed = self.controller.field_changed(host, field, text)?;
        if changed {
            self.field_widths.set(field, self.widths.estimate(field, text));
        }
        Ok(changed)
    }

    fn toggle_hidden_chips(&mut self) -> bool {
        let allowed =
            !self.options.editable || self.options.visible_chips_max_length != VisibleLimit::Auto;
        if !allowed {
            return false;
        }
        self.show_hidden_chips = !self.show_hidden_chips;
        debug!(field = %self.field_name(), open = self.show_hidden_chips, "hidden chips toggled");
        true
    }
}

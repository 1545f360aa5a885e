//! Test harness for interaction scenarios
//!
//! Provides infrastructure for scripting a combobox the way a page would host it:
//! - A [`TestContext`] owning the root, input, trigger, content and portal parts
//! - A render pass that filters the catalog by the typed query, mounts and
//!   unmounts option parts, records their tree order, and reconciles
//! - Page state that accepts (or rejects) controlled proposals, like the demo pages
//! - [`TestHarness`] running scenario functions and turning errors and panics
//!   into [`TestResult`]s

use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use anyhow::{anyhow, ensure, Result};
use brisk_combobox::prelude::*;
use brisk_core::events::{key_codes, KeyboardEvent, PointerEvent};
use brisk_core::registry::{OptionHandle, TreeOrder};
use serde::Serialize;

/// Character list shared by the single- and multi-select demo pages
pub const CHARACTERS: &[&str] = &[
    "Peter Parker",
    "Mary Jane",
    "Norman Osborn",
    "Ben Parker",
    "Billy's Mom",
    "Harry Osborn",
    "Flash Thompson",
    "Jonah James",
    "Betty Brant",
    "Bone Saw McGraw",
    "Punk Rock Girl",
    "Fireman",
    "Hoffman",
    "Houseman",
    "Nurse",
    "Marine Corp",
];

/// Result of a scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestResult {
    /// Every expectation held
    Passed,
    /// An expectation failed or the scenario panicked
    Failed { reason: String },
}

impl TestResult {
    pub fn is_passed(&self) -> bool {
        matches!(self, TestResult::Passed)
    }
}

/// A catalog entry the page may render
#[derive(Debug, Clone)]
pub struct Item {
    pub value: String,
    pub disabled: bool,
}

/// State owned by the hosting page
#[derive(Debug, Default)]
pub struct PageState {
    pub open: bool,
    pub value: Option<Value>,
    /// Filter text, fed by the input
    pub query: String,
    /// Every open state the widget proposed
    pub open_proposals: Vec<bool>,
    /// Every value the widget proposed
    pub value_proposals: Vec<Value>,
}

/// Post-transition effects, recorded
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub scrolled: RefCell<Vec<OptionHandle>>,
    pub focus_requests: Cell<usize>,
    pub text_writes: RefCell<Vec<String>>,
}

impl TransitionHooks for RecordingHooks {
    fn scroll_into_view(&self, handle: OptionHandle) {
        self.scrolled.borrow_mut().push(handle);
    }

    fn focus_input(&self) {
        self.focus_requests.set(self.focus_requests.get() + 1);
    }

    fn input_text_changed(&self, text: &str) {
        self.text_writes.borrow_mut().push(text.to_string());
    }
}

/// Builder for a hosted combobox
#[derive(Debug, Clone)]
pub struct Scenario {
    items: Vec<Item>,
    multiple: bool,
    controlled: bool,
    accept_open: bool,
    accept_value: bool,
    initial_value: Option<Value>,
    mount_reversed: bool,
}

impl Scenario {
    /// A page rendering `values` in the given order
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: values
                .into_iter()
                .map(|value| Item {
                    value: value.into(),
                    disabled: false,
                })
                .collect(),
            multiple: false,
            controlled: false,
            accept_open: true,
            accept_value: true,
            initial_value: None,
            mount_reversed: false,
        }
    }

    /// The demo catalog
    pub fn characters() -> Self {
        Self::new(CHARACTERS.iter().copied())
    }

    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Page owns open state and value (like the demo pages)
    pub fn controlled(mut self) -> Self {
        self.controlled = true;
        self
    }

    /// Controlled page that ignores every proposal
    pub fn rejecting(mut self) -> Self {
        self.controlled = true;
        self.accept_open = false;
        self.accept_value = false;
        self
    }

    /// Controlled page that opens and closes but never accepts a value
    pub fn rejecting_values(mut self) -> Self {
        self.controlled = true;
        self.accept_value = false;
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    pub fn disable(mut self, value: &str) -> Self {
        for item in self.items.iter_mut().filter(|item| item.value == value) {
            item.disabled = true;
        }
        self
    }

    /// Mount new options last-to-first so mount order disagrees with tree order
    pub fn mount_reversed(mut self) -> Self {
        self.mount_reversed = true;
        self
    }

    pub fn build(self) -> TestContext {
        TestContext::new(self)
    }
}

/// A combobox hosted by a scripted page
pub struct TestContext {
    root: ComboboxRoot,
    input: ComboboxInput,
    trigger: ComboboxTrigger,
    content: ComboboxContent,
    portal: ComboboxPortal,
    order: Rc<TreeOrder>,
    hooks: Rc<RecordingHooks>,
    page: Rc<RefCell<PageState>>,
    mounted: RefCell<Vec<ComboboxOption>>,
    items: Vec<Item>,
    controlled: bool,
    mount_reversed: bool,
}

impl TestContext {
    fn new(scenario: Scenario) -> Self {
        let order = Rc::new(TreeOrder::new());
        let hooks = Rc::new(RecordingHooks::default());
        let initial = if scenario.multiple {
            Some(
                scenario
                    .initial_value
                    .clone()
                    .unwrap_or_else(|| Value::Multiple(Vec::new())),
            )
        } else {
            scenario.initial_value.clone()
        };
        let page = Rc::new(RefCell::new(PageState {
            value: initial.clone(),
            ..PageState::default()
        }));

        let mut props = RootProps::new()
            .multiple(scenario.multiple)
            .aria_label("Select a character")
            .document_order(order.clone())
            .hooks(hooks.clone());
        if scenario.controlled {
            props = props.open(false).value(initial);
        } else if let Some(value) = initial {
            props = props.default_value(value);
        }

        let (accept_open, accept_value) = (scenario.accept_open, scenario.accept_value);
        let page_for_open = page.clone();
        let page_for_value = page.clone();
        props = props
            .on_open_change(move |open| {
                let mut page = page_for_open.borrow_mut();
                page.open_proposals.push(open);
                if accept_open {
                    page.open = open;
                }
                if !open {
                    page.query.clear();
                }
            })
            .on_change(move |value: &Value| {
                let mut page = page_for_value.borrow_mut();
                page.value_proposals.push(value.clone());
                if accept_value {
                    page.value = Some(value.clone());
                }
            });

        let root = ComboboxRoot::new(props);
        let ctx = root.context();
        let page_for_query = page.clone();
        let input = ComboboxInput::new(ctx)
            .placeholder("Placeholder")
            .on_text_change(move |text| page_for_query.borrow_mut().query = text.to_string());

        let context = Self {
            input,
            trigger: ComboboxTrigger::new(ctx),
            content: ComboboxContent::new(ctx),
            portal: ComboboxPortal::new(ctx),
            root,
            order,
            hooks,
            page,
            mounted: RefCell::new(Vec::new()),
            items: scenario.items,
            controlled: scenario.controlled,
            mount_reversed: scenario.mount_reversed,
        };
        context.render();
        context
    }

    // =========================================================================
    // Render
    // =========================================================================

    /// One host render pass
    pub fn render(&self) {
        let ctx = self.root.context();
        if self.controlled {
            let (open, value) = {
                let page = self.page.borrow();
                (page.open, page.value.clone())
            };
            self.root.set_value_prop(value);
            self.root.set_open_prop(open);
        }

        let visible = if self.portal.is_present() {
            self.visible_items()
        } else {
            Vec::new()
        };

        {
            let mut mounted = self.mounted.borrow_mut();
            mounted.retain(|option| {
                let keep = visible.iter().any(|item| item.value == option.value());
                if !keep {
                    if let Some(handle) = option.handle() {
                        self.order.remove(handle);
                    }
                }
                keep
            });

            let mut missing: Vec<&Item> = visible
                .iter()
                .copied()
                .filter(|item| !mounted.iter().any(|option| option.value() == item.value))
                .collect();
            if self.mount_reversed {
                missing.reverse();
            }
            for item in missing {
                mounted.push(ComboboxOption::new(ctx, item.value.as_str()).disabled(item.disabled));
            }

            for option in mounted.iter() {
                let index = visible.iter().position(|item| item.value == option.value());
                if let (Some(handle), Some(index)) = (option.handle(), index) {
                    self.order.place(handle, [0, index as u32]);
                }
            }
        }

        ctx.reconcile();
    }

    fn visible_items(&self) -> Vec<&Item> {
        let query = self.page.borrow().query.to_lowercase();
        self.items
            .iter()
            .filter(|item| query.is_empty() || item.value.to_lowercase().contains(&query))
            .collect()
    }

    // =========================================================================
    // Interactions
    // =========================================================================

    pub fn type_text(&self, text: &str) {
        self.input.text_changed(text);
        self.render();
    }

    pub fn press(&self, key_code: u32) {
        self.input
            .key_down(&KeyboardEvent::from_key_code(key_code, None));
        self.render();
    }

    pub fn press_down(&self) {
        self.press(key_codes::ARROW_DOWN);
    }

    pub fn press_up(&self) {
        self.press(key_codes::ARROW_UP);
    }

    pub fn press_enter(&self) {
        self.press(key_codes::ENTER);
    }

    pub fn press_escape(&self) {
        self.press(key_codes::ESCAPE);
    }

    pub fn press_backspace(&self) {
        self.press(key_codes::BACKSPACE);
    }

    /// Escape routed through the layering host instead of the input
    pub fn escape_from_layer(&self) {
        self.content
            .escape_key_down(&KeyboardEvent::from_key_code(key_codes::ESCAPE, None));
        self.render();
    }

    pub fn click_trigger(&self) {
        self.trigger.activate(&PointerEvent::new());
        self.render();
    }

    pub fn press_outside(&self, target: OutsideTarget) {
        self.content
            .pointer_down_outside(target, &PointerEvent::new());
        self.render();
    }

    pub fn hover(&self, value: &str) -> Result<()> {
        self.with_option(value, |option| option.pointer_move(&PointerEvent::new()))?;
        self.render();
        Ok(())
    }

    pub fn click_option(&self, value: &str) -> Result<()> {
        self.with_option(value, |option| option.click(&PointerEvent::new()))?;
        self.render();
        Ok(())
    }

    fn with_option<R>(&self, value: &str, f: impl FnOnce(&ComboboxOption) -> R) -> Result<R> {
        let mounted = self.mounted.borrow();
        let option = mounted
            .iter()
            .find(|option| option.value() == value)
            .ok_or_else(|| anyhow!("option {value:?} is not rendered"))?;
        Ok(f(option))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn root(&self) -> &ComboboxRoot {
        &self.root
    }

    pub fn context(&self) -> &ComboboxContext {
        self.root.context()
    }

    pub fn input(&self) -> &ComboboxInput {
        &self.input
    }

    pub fn hooks(&self) -> &RecordingHooks {
        &self.hooks
    }

    pub fn page(&self) -> std::cell::Ref<'_, PageState> {
        self.page.borrow()
    }

    /// Change page state from outside the widget, then render
    pub fn update_page(&self, f: impl FnOnce(&mut PageState)) {
        f(&mut self.page.borrow_mut());
        self.render();
    }

    pub fn is_open(&self) -> bool {
        self.context().is_open()
    }

    pub fn highlighted(&self) -> Option<String> {
        self.context().highlighted()
    }

    pub fn text(&self) -> String {
        self.input.text()
    }

    /// Rendered option values in document order
    pub fn rendered(&self) -> Vec<String> {
        self.context()
            .snapshot()
            .values()
            .map(str::to_string)
            .collect()
    }

    /// Attributes of a rendered option
    pub fn option_attributes(&self, value: &str) -> Result<Attributes> {
        self.with_option(value, ComboboxOption::attributes)
    }

    // =========================================================================
    // Expectations
    // =========================================================================

    pub fn expect_open(&self, open: bool) -> Result<()> {
        ensure!(
            self.is_open() == open,
            "expected open = {}, got {}",
            open,
            self.is_open()
        );
        Ok(())
    }

    pub fn expect_highlighted(&self, value: Option<&str>) -> Result<()> {
        let actual = self.highlighted();
        ensure!(
            actual.as_deref() == value,
            "expected highlight {:?}, got {:?}",
            value,
            actual
        );
        Ok(())
    }

    pub fn expect_single(&self, value: Option<&str>) -> Result<()> {
        let actual = self.context().single_value();
        ensure!(
            actual.as_deref() == value,
            "expected value {:?}, got {:?}",
            value,
            actual
        );
        Ok(())
    }

    pub fn expect_selected(&self, values: &[&str]) -> Result<()> {
        let actual = self.context().selected_values();
        ensure!(
            actual == values,
            "expected selection {:?}, got {:?}",
            values,
            actual
        );
        Ok(())
    }

    pub fn expect_text(&self, text: &str) -> Result<()> {
        let actual = self.text();
        ensure!(actual == text, "expected input text {:?}, got {:?}", text, actual);
        Ok(())
    }

    pub fn expect_rendered(&self, values: &[&str]) -> Result<()> {
        let actual = self.rendered();
        ensure!(
            actual == values,
            "expected rendered options {:?}, got {:?}",
            values,
            actual
        );
        Ok(())
    }
}

/// Scenario function
pub type ScenarioFn = Box<dyn FnOnce() -> Result<()> + Send>;

/// Runs scenario functions
#[derive(Debug, Clone)]
pub struct TestHarness {
    /// Report panics as failures instead of aborting the run
    catch_panics: bool,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self { catch_panics: true }
    }
}

impl TestHarness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let panics propagate (useful under a debugger)
    pub fn propagate_panics(mut self) -> Self {
        self.catch_panics = false;
        self
    }

    /// Run one scenario
    pub fn run_test(&self, name: &str, test_fn: ScenarioFn) -> TestResult {
        let outcome = if self.catch_panics {
            match panic::catch_unwind(AssertUnwindSafe(test_fn)) {
                Ok(outcome) => outcome,
                Err(payload) => Err(anyhow!("panicked: {}", panic_message(&payload))),
            }
        } else {
            test_fn()
        };

        match outcome {
            Ok(()) => TestResult::Passed,
            Err(err) => {
                tracing::debug!("{} failed: {:#}", name, err);
                TestResult::Failed {
                    reason: format!("{err:#}"),
                }
            }
        }
    }
}

fn panic_message(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_filters_by_query() {
        let page = Scenario::characters().build();
        page.expect_rendered(&[]).unwrap();

        page.type_text("osborn");
        page.expect_open(true).unwrap();
        page.expect_rendered(&["Norman Osborn", "Harry Osborn"]).unwrap();
        page.expect_highlighted(Some("Norman Osborn")).unwrap();
    }

    #[test]
    fn test_reversed_mount_keeps_tree_order() {
        let page = Scenario::new(["a", "b", "c"]).mount_reversed().build();
        page.click_trigger();
        page.expect_rendered(&["a", "b", "c"]).unwrap();
    }

    #[test]
    fn test_closing_unmounts_options() {
        let page = Scenario::new(["a", "b"]).build();
        page.click_trigger();
        assert_eq!(page.context().option_count(), 2);
        page.click_trigger();
        assert_eq!(page.context().option_count(), 0);
    }

    #[test]
    fn test_harness_reports_errors_and_panics() {
        let harness = TestHarness::new();
        assert!(harness.run_test("ok", Box::new(|| -> Result<()> { Ok(()) })).is_passed());

        let failed = harness.run_test("err", Box::new(|| -> Result<()> { Err(anyhow!("nope")) }));
        assert_eq!(
            failed,
            TestResult::Failed {
                reason: "nope".into()
            }
        );

        let panicked = harness.run_test("panic", Box::new(|| -> Result<()> { panic!("boom") }));
        assert_eq!(
            panicked,
            TestResult::Failed {
                reason: "panicked: boom".into()
            }
        );
    }

    #[test]
    fn test_missing_option_is_an_error() {
        let page = Scenario::new(["a"]).build();
        assert!(page.hover("a").is_err());
    }
}

//! Closing the list: Escape, outside presses and the trigger

use anyhow::ensure;
use brisk_combobox::OutsideTarget;

use crate::harness::Scenario;
use crate::runner::TestSuite;

/// Create the dismissal suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("dismissal");

    suite.add("outside_press_closes", || {
        let page = Scenario::characters().value("Nurse").build();
        page.type_text("Nu");
        page.press_outside(OutsideTarget::Elsewhere);

        page.expect_open(false)?;
        // Only Escape reverts the text
        page.expect_text("Nu")
    });

    suite.add("press_on_input_or_trigger_is_ignored", || {
        let page = Scenario::characters().build();
        page.click_trigger();
        page.press_outside(OutsideTarget::Input);
        page.press_outside(OutsideTarget::Trigger);
        page.expect_open(true)
    });

    suite.add("trigger_toggles_closed", || {
        let page = Scenario::characters().build();
        page.click_trigger();
        page.click_trigger();
        page.expect_open(false)
    });

    suite.add("layer_escape_reverts_text", || {
        let page = Scenario::characters().value("Nurse").build();
        page.type_text("Nu");
        page.escape_from_layer();

        page.expect_open(false)?;
        page.expect_text("Nurse")
    });

    suite.add("escape_while_closed_is_noop", || {
        let page = Scenario::characters().value("Nurse").build();
        page.press_escape();

        page.expect_text("Nurse")?;
        ensure!(page.page().open_proposals.is_empty());
        ensure!(page.hooks().text_writes.borrow().is_empty());
        Ok(())
    });

    suite.add("escape_clears_text_in_multiple_mode", || {
        let page = Scenario::characters()
            .multiple()
            .value(vec!["Mary Jane"])
            .build();
        page.type_text("ma");
        page.press_escape();

        page.expect_open(false)?;
        page.expect_text("")?;
        page.expect_selected(&["Mary Jane"])
    });

    suite.add("closing_unmounts_options", || {
        let page = Scenario::characters().build();
        page.click_trigger();
        ensure!(page.context().option_count() == 16);

        page.press_escape();
        ensure!(page.context().option_count() == 0);
        page.expect_rendered(&[])
    });

    suite
}

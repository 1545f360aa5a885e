//! Controlled-state scenarios
//!
//! The page owns open state and value; the widget only proposes changes.

use anyhow::ensure;
use brisk_combobox::Value;

use crate::harness::Scenario;
use crate::runner::TestSuite;

/// Create the controlled suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("controlled");

    suite.add("rejected_open_stays_closed", || {
        let page = Scenario::characters().rejecting().build();
        page.click_trigger();

        page.expect_open(false)?;
        page.expect_rendered(&[])?;
        ensure!(page.page().open_proposals == [true]);
        Ok(())
    });

    suite.add("rejected_value_is_only_proposed", || {
        let page = Scenario::characters().rejecting_values().build();
        page.click_trigger();
        page.click_option("Nurse")?;

        page.expect_single(None)?;
        ensure!(page.page().value_proposals == [Value::Single("Nurse".into())]);
        Ok(())
    });

    suite.add("same_value_is_not_proposed_again", || {
        let page = Scenario::characters().controlled().build();
        page.click_trigger();
        page.click_option("Nurse")?;
        page.click_trigger();
        page.click_option("Nurse")?;

        ensure!(page.page().value_proposals.len() == 1);
        ensure!(page.page().open_proposals == [true, false, true, false]);
        page.expect_open(false)
    });

    suite.add("external_value_drives_open_highlight", || {
        let page = Scenario::characters().controlled().build();
        page.update_page(|state| state.value = Some("Fireman".into()));
        page.expect_single(Some("Fireman"))?;

        page.click_trigger();
        page.expect_highlighted(Some("Fireman"))
    });

    suite.add("external_open_is_reconciled", || {
        let page = Scenario::characters().controlled().build();
        page.update_page(|state| state.open = true);

        page.expect_open(true)?;
        page.expect_highlighted(Some("Peter Parker"))?;
        ensure!(page.page().open_proposals.is_empty());
        Ok(())
    });

    suite.add("switching_to_multiple_migrates_value", || {
        let page = Scenario::characters().value("Nurse").build();
        page.root().set_multiple(true);
        page.expect_selected(&["Nurse"])?;

        page.click_trigger();
        page.click_option("Fireman")?;
        page.expect_selected(&["Nurse", "Fireman"])?;

        page.root().set_multiple(false);
        page.expect_single(Some("Fireman"))
    });

    suite
}

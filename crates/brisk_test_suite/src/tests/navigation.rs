//! Keyboard and pointer navigation scenarios

use anyhow::ensure;

use crate::harness::Scenario;
use crate::runner::TestSuite;

/// Create the navigation suite
pub fn suite() -> TestSuite {
    let mut suite = TestSuite::new("navigation");

    suite.add("arrows_clamp_at_ends", || {
        let page = Scenario::new(["a", "b", "c"]).build();
        page.click_trigger();
        for _ in 0..5 {
            page.press_down();
        }
        page.expect_highlighted(Some("c"))?;
        for _ in 0..5 {
            page.press_up();
        }
        page.expect_highlighted(Some("a"))
    });

    suite.add("arrow_down_opens_without_moving", || {
        let page = Scenario::new(["a", "b", "c"]).build();
        page.press_down();
        page.expect_open(true)?;
        page.expect_highlighted(Some("a"))
    });

    suite.add("arrow_up_opens_on_selection", || {
        let page = Scenario::new(["a", "b", "c"]).value("b").build();
        page.press_up();
        page.expect_open(true)?;
        page.expect_highlighted(Some("b"))
    });

    suite.add("follows_document_order_not_mount_order", || {
        let page = Scenario::new(["A", "B", "C"]).mount_reversed().build();
        page.click_trigger();
        page.expect_rendered(&["A", "B", "C"])?;
        page.expect_highlighted(Some("A"))?;

        page.press_down();
        page.expect_highlighted(Some("B"))
    });

    suite.add("open_skips_disabled", || {
        let page = Scenario::new(["A", "B", "C"]).disable("A").build();
        page.click_trigger();
        page.expect_highlighted(Some("B"))
    });

    suite.add("enter_commits_disabled_but_click_does_not", || {
        let page = Scenario::new(["A", "B", "C"]).disable("B").build();
        page.click_trigger();
        page.click_option("B")?;
        page.expect_open(true)?;
        page.expect_single(None)?;

        page.press_down();
        page.expect_highlighted(Some("B"))?;
        page.press_enter();
        page.expect_open(false)?;
        page.expect_single(Some("B"))
    });

    suite.add("filtering_moves_off_disabled_highlight", || {
        let page = Scenario::characters().disable("Mary Jane").build();
        page.click_trigger();
        page.press_down();
        page.expect_highlighted(Some("Mary Jane"))?;

        page.type_text("a");
        page.expect_highlighted(Some("Peter Parker"))
    });

    suite.add("filtering_out_highlight_moves_to_first", || {
        let page = Scenario::characters().build();
        page.click_trigger();
        page.press_down();
        page.expect_highlighted(Some("Mary Jane"))?;

        page.type_text("osb");
        page.expect_highlighted(Some("Norman Osborn"))
    });

    suite.add("filtering_keeps_present_highlight", || {
        let page = Scenario::characters().build();
        page.click_trigger();
        for _ in 0..3 {
            page.press_down();
        }
        page.expect_highlighted(Some("Ben Parker"))?;

        page.type_text("parker");
        page.expect_rendered(&["Peter Parker", "Ben Parker"])?;
        page.expect_highlighted(Some("Ben Parker"))
    });

    suite.add("hover_highlights_and_scrolls", || {
        let page = Scenario::characters().build();
        page.click_trigger();
        let scrolled_before = page.hooks().scrolled.borrow().len();

        page.hover("Nurse")?;
        page.expect_highlighted(Some("Nurse"))?;
        let nurse = page.context().snapshot().handle_of("Nurse");
        ensure!(page.hooks().scrolled.borrow().last().copied() == nurse);

        // Moving within the same option does nothing
        page.hover("Nurse")?;
        ensure!(page.hooks().scrolled.borrow().len() == scrolled_before + 1);
        Ok(())
    });

    suite
}

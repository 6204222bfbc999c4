mod common;

use common::{fill_form, mounted_page, page, page_without};
use page_interactions::{ControllerConfig, ElementIds, Error, EventKind, Result, Widget};

#[test]
fn full_page_binds_every_widget() -> Result<()> {
    let (page, handle) = mounted_page()?;
    let report = handle.report();
    assert!(report.is_complete());
    assert_eq!(report.bound, Widget::ALL.to_vec());
    // 1 click + 3 hover + 1 mirror + 1 dark + 2 counter + 3 faq + 3 tabs + 5 form + 5 drag
    assert_eq!(report.listeners, 24);
    assert_eq!(page.total_listener_count(), 24);
    Ok(())
}

#[test]
fn missing_element_fails_only_its_widget() -> Result<()> {
    let mut page = page_without(r#"<span id="counter">0</span>"#)?;
    let handle = page.mount(ControllerConfig::default())?;
    let report = handle.report();

    assert!(!report.is_complete());
    assert!(!report.is_bound(Widget::Counter));
    assert_eq!(
        report.failure(Widget::Counter),
        Some(&Error::ElementNotFound {
            widget: Widget::Counter,
            id: "counter".into(),
        })
    );
    assert_eq!(report.failures.len(), 1);

    page.click("#increment")?;
    assert_eq!(page.listener_count("#increment", EventKind::Click)?, 0);

    page.click("#tab-btn-2")?;
    page.assert_class("#tab2", "active", true)?;
    Ok(())
}

#[test]
fn tab_pointing_at_missing_panel_fails_tabs_widget() -> Result<()> {
    let mut page = page_without(r#"<div class="tab-content" id="tab3">Third panel</div>"#)?;
    let handle = page.mount(ControllerConfig::default())?;
    assert_eq!(
        handle.report().failure(Widget::Tabs),
        Some(&Error::ElementNotFound {
            widget: Widget::Tabs,
            id: "tab3".into(),
        })
    );
    assert!(handle.report().is_bound(Widget::Faq));

    page.click("#tab-btn-2")?;
    page.assert_class("#tab-btn-2", "active", false)?;
    Ok(())
}

#[test]
fn missing_drag_image_is_not_a_binding_failure() -> Result<()> {
    let mut page = page_without(r#"<img id="dragImg" src="box.png" alt="box">"#)?;
    let handle = page.mount(ControllerConfig::default())?;
    assert!(handle.report().is_complete());
    Ok(())
}

#[test]
fn custom_ids_rebind_widgets() -> Result<()> {
    let html = common::PAGE_HTML
        .replace(r#"id="increment""#, r#"id="plus""#)
        .replace(r#"id="counter""#, r#"id="tally""#);
    let mut page = page_interactions::Page::from_html(&html)?;
    let ids = ElementIds {
        increment: "plus".into(),
        counter: "tally".into(),
        ..ElementIds::default()
    };
    let handle = page.mount(ControllerConfig::default().with_ids(ids))?;
    assert!(handle.report().is_bound(Widget::Counter));

    page.click("#plus")?;
    page.assert_text("#tally", "1")?;
    Ok(())
}

#[test]
fn mounting_twice_registers_every_handler_twice() -> Result<()> {
    let mut page = page()?;
    let first = page.mount(ControllerConfig::default())?;
    let second = page.mount(ControllerConfig::default())?;
    assert_ne!(first.id(), second.id());
    assert_eq!(page.mounted_count(), 2);
    assert_eq!(page.listener_count("#increment", EventKind::Click)?, 2);
    assert_eq!(page.total_listener_count(), 48);

    page.click("#increment")?;
    let counts = [
        page.controller_state(&first).map(|state| state.count),
        page.controller_state(&second).map(|state| state.count),
    ];
    assert_eq!(counts, [Some(1), Some(1)]);

    fill_form(&mut page, "Ann", "a@b.com", "abcd1234", "abcd1234")?;
    page.submit("#user-form")?;
    assert_eq!(page.pending_timers().len(), 2);
    Ok(())
}

#[test]
fn teardown_unbinds_listeners_and_cancels_timers() -> Result<()> {
    let (mut page, handle) = mounted_page()?;
    page.click("#increment")?;
    fill_form(&mut page, "Ann", "a@b.com", "abcd1234", "abcd1234")?;
    page.submit("#user-form")?;
    assert_eq!(page.pending_timers().len(), 1);

    let state = page.teardown(handle);
    assert_eq!(state.as_ref().map(|state| state.count), Some(1));
    assert_eq!(
        state.map(|state| state.form.accepted_submissions),
        Some(1)
    );
    assert_eq!(page.total_listener_count(), 0);
    assert!(page.pending_timers().is_empty());
    assert_eq!(page.mounted_count(), 0);

    page.click("#increment")?;
    page.assert_text("#counter", "1")?;
    page.advance_time(10_000)?;
    page.assert_style("#form-success", "display", "block")?;
    Ok(())
}

#[test]
fn teardown_leaves_other_mounts_bound() -> Result<()> {
    let mut page = page()?;
    let first = page.mount(ControllerConfig::default())?;
    let second = page.mount(ControllerConfig::default())?;

    let _ = page.teardown(first);
    assert_eq!(page.total_listener_count(), 24);
    page.click("#increment")?;
    page.assert_text("#counter", "1")?;
    assert_eq!(
        page.controller_state(&second).map(|state| state.count),
        Some(1)
    );
    Ok(())
}

#[test]
fn trace_records_binding_and_dispatch() -> Result<()> {
    let mut page = page_without(r#"<span id="counter">0</span>"#)?;
    page.enable_trace(true);
    page.set_trace_stderr(false);

    let handle = page.mount(ControllerConfig::default())?;
    page.click("#tab-btn-2")?;
    let _ = page.teardown(handle);

    let logs = page.take_trace_logs();
    assert!(
        logs.iter()
            .any(|line| line.starts_with("[bind] mount-1 skipped: element not found for counter"))
    );
    assert!(logs.iter().any(|line| line.contains("bound=[")));
    assert!(
        logs.iter()
            .any(|line| line.starts_with("[event] click target=#tab-btn-2")
                && line.contains("handler=tab_select"))
    );
    assert!(
        logs.iter()
            .any(|line| line.starts_with("[bind] mount-1 teardown listeners="))
    );
    Ok(())
}

#[test]
fn binding_trace_can_be_muted() -> Result<()> {
    let mut page = page()?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.set_trace_bindings(false);

    let handle = page.mount(ControllerConfig::default())?;
    page.click("#increment")?;
    let _ = page.teardown(handle);

    let logs = page.take_trace_logs();
    assert!(!logs.iter().any(|line| line.starts_with("[bind]")));
    assert!(logs.iter().any(|line| line.contains("handler=increment")));
    Ok(())
}

#[test]
fn double_mounted_faq_click_opens_item_in_both_states() -> Result<()> {
    let mut page = page()?;
    let first = page.mount(ControllerConfig::default())?;
    let second = page.mount(ControllerConfig::default())?;

    page.click("#faq-1 .faq-question")?;
    page.assert_class("#faq-1", "active", true)?;
    page.assert_text("#faq-1 span", "-")?;
    for handle in [&first, &second] {
        let open = page
            .controller_state(handle)
            .map(|state| state.faq.is_open(0));
        assert_eq!(open, Some(true));
    }
    Ok(())
}

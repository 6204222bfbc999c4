mod common;

use page_interactions::{ControllerConfig, Field, FormRules, FormValues, Page};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseError, TestCaseResult};

const INTERACTION_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/interaction_property_test.txt";
const DEFAULT_INTERACTION_PROPTEST_CASES: u32 = 64;

#[derive(Clone, Debug)]
enum WidgetAction {
    Increment,
    Decrement,
    ClickTab(usize),
    ClickFaq(usize),
    ClickFaqGlyph(usize),
}

fn interaction_proptest_cases() -> u32 {
    std::env::var("PAGE_INTERACTIONS_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_INTERACTION_PROPTEST_CASES)
}

fn widget_action_strategy() -> BoxedStrategy<WidgetAction> {
    prop_oneof![
        3 => Just(WidgetAction::Increment),
        3 => Just(WidgetAction::Decrement),
        2 => (1usize..=3).prop_map(WidgetAction::ClickTab),
        2 => (1usize..=3).prop_map(WidgetAction::ClickFaq),
        1 => (1usize..=3).prop_map(WidgetAction::ClickFaqGlyph),
    ]
    .boxed()
}

fn run_action(page: &mut Page, action: &WidgetAction) -> page_interactions::Result<()> {
    match action {
        WidgetAction::Increment => page.click("#increment"),
        WidgetAction::Decrement => page.click("#decrement"),
        WidgetAction::ClickTab(tab) => page.click(&format!("#tab-btn-{tab}")),
        WidgetAction::ClickFaq(item) => page.click(&format!("#faq-{item} .faq-question")),
        WidgetAction::ClickFaqGlyph(item) => page.click(&format!("#faq-{item} span")),
    }
}

fn fail(err: page_interactions::Error) -> TestCaseError {
    TestCaseError::fail(format!("{err:?}"))
}

fn assert_widget_invariants(actions: &[WidgetAction]) -> TestCaseResult {
    let mut page = common::page().map_err(fail)?;
    let _handle = page.mount(ControllerConfig::default()).map_err(fail)?;

    let mut expected_count = 0i64;
    let mut expected_open = [false; 3];
    let mut expected_tab = 1usize;

    for (step, action) in actions.iter().enumerate() {
        run_action(&mut page, action).map_err(fail)?;
        match action {
            WidgetAction::Increment => expected_count += 1,
            WidgetAction::Decrement => expected_count -= 1,
            WidgetAction::ClickTab(tab) => expected_tab = *tab,
            WidgetAction::ClickFaq(item) | WidgetAction::ClickFaqGlyph(item) => {
                expected_open[item - 1] = !expected_open[item - 1];
            }
        }

        let counter = page.text("#counter").map_err(fail)?;
        let color = page.style("#counter", "color").map_err(fail)?;
        let touched_counter = actions[..=step]
            .iter()
            .any(|a| matches!(a, WidgetAction::Increment | WidgetAction::Decrement));
        prop_assert_eq!(counter, expected_count.to_string());
        if touched_counter {
            let expected_color = match expected_count {
                c if c > 0 => "var(--success)",
                c if c < 0 => "var(--danger)",
                _ => "var(--primary)",
            };
            prop_assert_eq!(color, expected_color, "step {}: {:?}", step, action);
        }

        prop_assert_eq!(page.count(".tab-btn.active").map_err(fail)?, 1);
        prop_assert_eq!(page.count(".tab-content.active").map_err(fail)?, 1);
        let active_button = page
            .has_class(&format!("#tab-btn-{expected_tab}"), "active")
            .map_err(fail)?;
        let active_panel = page
            .has_class(&format!("#tab{expected_tab}"), "active")
            .map_err(fail)?;
        prop_assert!(active_button && active_panel, "step {}: tab {}", step, expected_tab);

        for (index, open) in expected_open.iter().enumerate() {
            let item = index + 1;
            let is_open = page
                .has_class(&format!("#faq-{item}"), "active")
                .map_err(fail)?;
            let glyph = page.text(&format!("#faq-{item} span")).map_err(fail)?;
            prop_assert_eq!(is_open, *open, "step {}: faq {}", step, item);
            prop_assert_eq!(glyph, if *open { "-" } else { "+" });
        }
    }

    Ok(())
}

fn email_token_strategy() -> BoxedStrategy<String> {
    vec(
        prop_oneof![
            Just('a'),
            Just('z'),
            Just('0'),
            Just('.'),
            Just('@'),
            Just(' '),
            Just('-'),
            Just('\u{00A0}'),
        ],
        0..=12,
    )
    .prop_map(|chars| chars.into_iter().collect())
    .boxed()
}

/// Direct reading of `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
fn email_reference(value: &str) -> bool {
    let plain = |part: &str| !part.is_empty() && !part.chars().any(|c| c == '@' || c.is_whitespace());
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if !plain(local) {
        return false;
    }
    // some `.` in the domain must have a non-empty label on each side
    domain
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .any(|(at, _)| plain(&domain[..at]) && plain(&domain[at + 1..]))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: interaction_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(INTERACTION_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn widget_state_stays_consistent(actions in vec(widget_action_strategy(), 1..=20)) {
        assert_widget_invariants(&actions)?;
    }

    #[test]
    fn email_rule_matches_reference(value in email_token_strategy()) {
        let rules = FormRules::new().map_err(fail)?;
        let mut values = FormValues::default();
        values.set(Field::Email, value.clone());
        let accepted = rules.is_valid(Field::Email, &values).map_err(fail)?;
        prop_assert_eq!(accepted, email_reference(&value), "value {:?}", value);
    }
}

use chipcell::{OverflowCalculator, OverflowPlan, compute_visible_count};
use proptest::prelude::*;

#[test]
fn padding_rejects_first_chip_when_several_exist() {
    let plan = compute_visible_count(&[40, 40, 40], 100, 65);
    assert_eq!(
        plan,
        OverflowPlan {
            visible_count: 0,
            has_hidden: true
        }
    );
}

#[test]
fn container_smaller_than_first_chip() {
    assert_eq!(compute_visible_count(&[30], 10, 0).visible_count, 0);
    assert!(compute_visible_count(&[30], 10, 0).has_hidden);
    assert!(!compute_visible_count(&[], 10, 0).has_hidden);
}

#[test]
fn calculator_recomputes_after_list_change() {
    let mut calc = OverflowCalculator::new(0);
    calc.set_chip_widths(vec![50, 50, 50]);
    calc.resize(120);
    assert_eq!(calc.refresh(false).unwrap().visible_count, 2);
    calc.list_changed(2);
    assert_eq!(calc.chip_widths(), &[50, 50]);
    let plan = calc.refresh(false).unwrap();
    assert_eq!(plan.visible_count, 2);
    assert!(!plan.has_hidden);
}

proptest! {
    #[test]
    fn wider_container_never_shows_fewer_chips(
        widths in prop::collection::vec(0u32..400, 0..12),
        container in 0u32..2000,
        extra in 0u32..2000,
        padding in 0u32..120,
    ) {
        let narrow = compute_visible_count(&widths, container, padding);
        let wide = compute_visible_count(&widths, container + extra, padding);
        prop_assert!(wide.visible_count >= narrow.visible_count);
    }

    #[test]
    fn plan_is_idempotent_and_bounded(
        widths in prop::collection::vec(0u32..400, 0..12),
        container in 0u32..2000,
        padding in 0u32..120,
    ) {
        let first = compute_visible_count(&widths, container, padding);
        let second = compute_visible_count(&widths, container, padding);
        prop_assert_eq!(first, second);
        prop_assert!(first.visible_count <= widths.len());
        prop_assert_eq!(first.has_hidden, first.visible_count < widths.len());
    }
}

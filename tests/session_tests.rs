use chipcell::{
    Chip, ChipError, ChipField, Direction, EditMode, EditPhase, EditSessionController,
    FormStateHost, MemoryFormHost, ValidationEngine,
};
use proptest::prelude::*;

const FIELD: &str = "labels";

fn host_with(count: usize) -> MemoryFormHost {
    MemoryFormHost::new().with_field(
        FIELD,
        (0..count)
            .map(|index| Chip::new(format!("k{index}"), format!("v{index}")))
            .collect(),
    )
}

fn controller() -> EditSessionController {
    EditSessionController::new(FIELD, ValidationEngine::default())
}

#[test]
fn next_from_last_index_ends_session() {
    let mut host = host_with(3);
    let mut ctl = controller();
    ctl.activate(&mut host, 2).unwrap();
    ctl.advance(&mut host, Direction::Next).unwrap();
    assert_eq!(ctl.session().phase(), EditPhase::Viewing);
}

#[test]
fn previous_from_first_index_ends_session_without_focus() {
    let mut host = host_with(3);
    let mut ctl = controller();
    ctl.activate(&mut host, 0).unwrap();
    ctl.advance(&mut host, Direction::Previous).unwrap();
    assert_eq!(ctl.session().mode(), EditMode::Viewing);
    assert_eq!(ctl.session().focused_field(), None);
    assert_eq!(ctl.session().active_index(), None);
}

#[test]
fn add_then_commit_restores_length() {
    let mut host = host_with(2);
    let mut ctl = controller();
    ctl.add_new(&mut host).unwrap();
    assert_eq!(ctl.session().active_index(), Some(2));
    ctl.advance(&mut host, Direction::Commit).unwrap();
    assert_eq!(host.chips(FIELD).len(), 2);
}

#[test]
fn full_keyboard_walk() {
    let mut host = host_with(2);
    let mut ctl = controller();
    ctl.activate(&mut host, 0).unwrap();
    assert_eq!(ctl.session().phase(), EditPhase::EditingKey { index: 0 });
    ctl.focus(ChipField::Value);
    assert_eq!(ctl.session().phase(), EditPhase::EditingValue { index: 0 });
    ctl.advance(&mut host, Direction::Next).unwrap();
    assert_eq!(ctl.session().phase(), EditPhase::EditingKey { index: 1 });
    ctl.advance(&mut host, Direction::Previous).unwrap();
    assert_eq!(ctl.session().phase(), EditPhase::EditingValue { index: 0 });
}

#[test]
fn removing_out_of_range_is_rejected() {
    let mut host = host_with(1);
    let mut ctl = controller();
    assert_eq!(
        ctl.remove(&mut host, 1).unwrap_err(),
        ChipError::InvalidIndex { index: 1, len: 1 }
    );
    assert_eq!(host.chips(FIELD).len(), 1);
}

#[test]
fn removing_active_chip_ends_session() {
    let mut host = host_with(3);
    let mut ctl = controller();
    ctl.activate(&mut host, 1).unwrap();
    ctl.remove(&mut host, 1).unwrap();
    assert!(!ctl.session().is_editing());
    assert_eq!(host.chips(FIELD).len(), 2);
}

#[derive(Debug, Clone)]
enum Step {
    Activate(usize),
    AddNew,
    Advance(Direction),
    Type(ChipField, String),
    Remove(usize),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..6).prop_map(Step::Activate),
        Just(Step::AddNew),
        prop_oneof![
            Just(Direction::Commit),
            Just(Direction::Next),
            Just(Direction::Previous)
        ]
        .prop_map(Step::Advance),
        (
            prop_oneof![Just(ChipField::Key), Just(ChipField::Value)],
            "[a-z]{0,2}"
        )
            .prop_map(|(field, text)| Step::Type(field, text)),
        (0usize..6).prop_map(Step::Remove),
    ]
}

proptest! {
    #[test]
    fn active_index_always_points_into_the_list(
        initial in 0usize..4,
        steps in prop::collection::vec(arb_step(), 0..40),
    ) {
        let mut host = host_with(initial);
        let mut ctl = controller();
        for step in steps {
            let result = match step {
                Step::Activate(index) => ctl.activate(&mut host, index).map(|_| ()),
                Step::AddNew => ctl.add_new(&mut host).map(|_| ()),
                Step::Advance(direction) => ctl.advance(&mut host, direction).map(|_| ()),
                Step::Type(field, text) => ctl.field_changed(&mut host, field, &text).map(|_| ()),
                Step::Remove(index) => ctl.remove(&mut host, index).map(|_| ()),
            };
            if let Err(err) = result {
                prop_assert!(matches!(err, ChipError::InvalidIndex { .. }), "unexpected error: {:?}", err);
            }
            let len = host.chips(FIELD).len();
            match ctl.session().active_index() {
                Some(index) => {
                    prop_assert!(index < len);
                    prop_assert_eq!(ctl.session().mode(), EditMode::Editing);
                    prop_assert!(ctl.session().focused_field().is_some());
                }
                None => prop_assert_eq!(ctl.session().mode(), EditMode::Viewing),
            }
        }
    }
}

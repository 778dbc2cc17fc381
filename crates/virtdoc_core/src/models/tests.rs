use super::node::{NodeKind, NodeSpec};
use super::position::{CursorPosition, Selection};

#[test]
fn heading_levels_clamp_into_supported_range() {
    assert_eq!(NodeKind::heading(0), NodeKind::Heading { level: 1 });
    assert_eq!(NodeKind::heading(2), NodeKind::Heading { level: 2 });
    assert_eq!(NodeKind::heading(9), NodeKind::Heading { level: 3 });
    assert_eq!(NodeSpec::heading(7, "Intro").kind, NodeKind::Heading { level: 3 });
}

#[test]
fn clamped_position_handles_text_non_text_and_sentinel() {
    struct Case {
        input: CursorPosition,
        len: usize,
        text_chars: Option<usize>,
        expected: CursorPosition,
    }

    let cases = [
        Case {
            input: CursorPosition::new(1, 40),
            len: 3,
            text_chars: Some(11),
            expected: CursorPosition::new(1, 11),
        },
        Case {
            input: CursorPosition::new(1, 4),
            len: 3,
            text_chars: None,
            expected: CursorPosition::new(1, 0),
        },
        Case {
            input: CursorPosition::new(12, 5),
            len: 3,
            text_chars: None,
            expected: CursorPosition::end_of_document(3),
        },
        Case {
            input: CursorPosition::new(0, 2),
            len: 0,
            text_chars: Some(5),
            expected: CursorPosition::end_of_document(0),
        },
    ];

    for case in cases {
        assert_eq!(
            case.input.clamped(case.len, case.text_chars),
            case.expected,
            "input: {:?}",
            case.input
        );
    }
}

#[test]
fn selection_normalizes_reading_order() {
    let later = CursorPosition::new(4, 1);
    let earlier = CursorPosition::new(2, 9);
    let selection = Selection::new(later, earlier);
    assert_eq!(selection.normalized(), (earlier, later));
    assert!(!selection.is_collapsed());

    let same_node = Selection::new(CursorPosition::new(2, 5), CursorPosition::new(2, 1));
    assert_eq!(
        same_node.normalized(),
        (CursorPosition::new(2, 1), CursorPosition::new(2, 5))
    );
}

use virtdoc::{CursorPosition, DocumentSession, NodeSpec, ViewConfig, VisibleWindow};

#[test]
fn facade_exposes_a_working_session() {
    let specs = vec![
        NodeSpec::heading(1, "Title"),
        NodeSpec::text("Hello world"),
        NodeSpec::formula("E = mc^2"),
    ];
    let mut session = DocumentSession::new(specs, ViewConfig::default());
    assert_eq!(session.window(), VisibleWindow { start: 0, end: 3 });
    assert_eq!(session.status_line(), "Showing 0-3 of 3 nodes");

    session.set_cursor(CursorPosition::new(1, 5));
    let formula = session.insert_formula_at_cursor();
    assert_eq!(session.document().len(), 5);
    assert_eq!(session.document().index_of(formula), Some(2));

    assert!(session.delete_node(formula));
    assert_eq!(session.document().len(), 3);
    assert_eq!(session.document().nodes()[1].content(), "Hello world");
}

#[test]
fn facade_reexports_config_helpers() {
    assert_eq!(virtdoc::config::parse_env_flag("YES"), Some(true));
    assert_eq!(virtdoc::text::char_len("数式"), 2);
    virtdoc::init_tracing();
    virtdoc::init_tracing();
}

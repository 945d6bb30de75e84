mod model_tests {
    use crate::declaration::AttributeValue;
    use crate::error::ParseError;
    use crate::model::DeclareModel;

    #[test]
    fn events_kept_in_first_seen_order() {
        let model = DeclareModel::parse("activity C\nactivity A\ntransaction B").expect("parse");
        let names: Vec<_> = model.events().iter().map(|ev| ev.name()).collect();
        assert_eq!(names, ["C", "A", "B"]);
        assert_eq!(model.event("B").expect("B defined").object_type(), "transaction");
    }

    #[test]
    fn comments_and_blank_lines_are_ignored_with_line_numbers_kept() {
        let src = "# header\n\nactivity A\n\n# more\nactivity A";
        let err = DeclareModel::parse(src).unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateEvent {
                line: 6,
                name: "A".into()
            }
        );
    }

    #[test]
    fn duplicate_event_is_fatal_regardless_of_position() {
        let err = DeclareModel::parse("activity A\nactivity B\nactivity A").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateEvent { line: 3, .. }));
    }

    #[test]
    fn reserved_words_rejected_in_event_definitions() {
        let err = DeclareModel::parse("activity and").unwrap_err();
        assert_eq!(
            err,
            ParseError::ReservedWordMisuse {
                line: 1,
                word: "and".into()
            }
        );
        let err = DeclareModel::parse("integer A").unwrap_err();
        assert_eq!(
            err,
            ParseError::ReservedWordMisuse {
                line: 1,
                word: "integer".into()
            }
        );
    }

    #[test]
    fn binding_requires_defined_event() {
        let err = DeclareModel::parse("bind A: grade").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownEvent {
                line: 1,
                name: "A".into()
            }
        );
    }

    #[test]
    fn binding_rejects_reserved_attribute_names() {
        let err = DeclareModel::parse("activity A\nbind A: grade, between").unwrap_err();
        assert_eq!(
            err,
            ParseError::ReservedWordMisuse {
                line: 2,
                word: "between".into()
            }
        );
    }

    #[test]
    fn attribute_is_shared_across_events() {
        let src = "activity A\nactivity B\nbind A: grade\nbind B: grade\ngrade: integer between 1 and 5";
        let model = DeclareModel::parse(src).expect("parse");

        assert_eq!(model.attributes().len(), 1);
        let from_a = model.event("A").unwrap().attribute("grade").unwrap();
        let from_b = model.event("B").unwrap().attribute("grade").unwrap();
        assert!(std::rc::Rc::ptr_eq(&from_a, &from_b));

        let expected = AttributeValue::IntegerRange { low: 1, high: 5 };
        assert_eq!(from_a.borrow().value(), Some(&expected));
        assert_eq!(from_b.borrow().value(), Some(&expected));
    }

    #[test]
    fn later_value_declaration_overwrites_everywhere() {
        let src = "activity A\nactivity B\nbind A: grade\nbind B: grade\n\
                   grade: integer between 1 and 5\ngrade: integer between 2 and 9";
        let model = DeclareModel::parse(src).expect("parse");
        let expected = AttributeValue::IntegerRange { low: 2, high: 9 };
        for event in ["A", "B"] {
            let attr = model.event(event).unwrap().attribute("grade").unwrap();
            assert_eq!(attr.borrow().value(), Some(&expected));
        }
    }

    #[test]
    fn value_declaration_for_unbound_attribute_is_skipped() {
        // A typo in the attribute list must not halt the compile.
        let src = "activity A\nbind A: grade\ngrade, grode: integer between 1 and 5";
        let model = DeclareModel::parse(src).expect("warn-and-continue parse");
        assert!(model.attribute("grode").is_none());
        assert!(model.attribute("grade").unwrap().borrow().value().is_some());
    }

    #[test]
    fn unparsable_value_is_fatal() {
        let src = "activity A\nbind A: grade\ngrade: integer between one and five";
        let err = DeclareModel::parse(src).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnparsableValue {
                line: 3,
                text: "integer between one and five".into()
            }
        );
    }

    #[test]
    fn unclassifiable_line_is_fatal() {
        let err = DeclareModel::parse("activity A\nthis is not a line").unwrap_err();
        assert!(matches!(err, ParseError::UnclassifiedLine { line: 2, .. }));
    }

    #[test]
    fn constraint_segments_populate_slots_in_order() {
        let src = "activity A\nactivity B\n\
                   Response[A,B] |A.grade=3|B.grade>5|1,5,s\n\
                   Response[A,B] |A.grade=3";
        let model = DeclareModel::parse(src).expect("parse");
        let [full, short] = model.constraints() else {
            panic!("expected two constraints");
        };
        assert_eq!(full.activation_condition(), Some("A.grade=3"));
        assert_eq!(full.correlation_condition(), Some("B.grade>5"));
        assert_eq!(full.time_window(), Some("1,5,s"));
        assert_eq!(short.activation_condition(), Some("A.grade=3"));
        assert_eq!(short.correlation_condition(), None);
        assert_eq!(short.time_window(), None);
    }

    #[test]
    fn constraint_referencing_undefined_event_is_fatal() {
        let err = DeclareModel::parse("activity A\nResponse[A, B]").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownEvent {
                line: 2,
                name: "B".into()
            }
        );
    }

    #[test]
    fn full_example_model() {
        let src = "\
activity A                                  # defining an event
bind A: grade
bind A: mark, name
activity B
bind B: grade, mark, name
grade, mark: integer between 1 and 5
name: x, y, z, v

Response[A, B] |A.grade = 3 |B.grade > 5 |1,5,s
Response[A, B] |A.grade <= 4 | A.name is y | 0,s";
        // Trailing comments are not part of the grammar; strip them the way
        // an authoring front-end would before compiling.
        let src: String = src
            .lines()
            .map(|l| l.split('#').next().unwrap_or(l).trim_end())
            .collect::<Vec<_>>()
            .join("\n");

        let model = DeclareModel::parse(&src).expect("parse");
        assert_eq!(model.events().len(), 2);
        assert_eq!(model.attributes().len(), 3);
        assert_eq!(model.constraints().len(), 2);
        assert_eq!(
            model.event("B").unwrap().attributes().len(),
            3,
            "B binds grade, mark and name"
        );
    }
}

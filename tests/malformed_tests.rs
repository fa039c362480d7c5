use container_codec::{
    from_str, from_str_into, from_str_with_options, CodecOptions, DelimiterPolicy, Deserializer,
    Error, FormatRegistry, FormatSpec, Shape,
};
use std::collections::{BTreeMap, HashMap, LinkedList};

fn strict() -> CodecOptions {
    CodecOptions::new().with_delimiters(DelimiterPolicy::Strict)
}

#[test]
fn test_missing_open_leaves_target_empty() {
    let mut v: Vec<i32> = Vec::new();
    let err = from_str_into("1,2,3>", &mut v).unwrap_err();
    assert_eq!(
        err,
        Error::MalformedOpen {
            line: 1,
            col: 1,
            expected: '<',
            found: "'1'".to_string(),
        }
    );
    assert!(v.is_empty());
}

#[test]
fn test_missing_open_does_not_consume() {
    let mut de = Deserializer::from_str("[1,2]");
    assert!(matches!(
        de.decode::<Vec<i32>>(),
        Err(Error::MalformedOpen { expected: '<', .. })
    ));
    assert_eq!(de.remaining(), "[1,2]");
}

#[test]
fn test_missing_close() {
    let mut v: Vec<i32> = Vec::new();
    let err = from_str_into("<1,2,3", &mut v).unwrap_err();
    assert_eq!(
        err,
        Error::MalformedClose {
            line: 1,
            col: 7,
            expected: '>',
            found: "end of input".to_string(),
        }
    );
    assert_eq!(v, vec![1, 2, 3]);

    assert!(matches!(
        from_str::<(u8, u8)>("(1,2"),
        Err(Error::MalformedClose { expected: ')', .. })
    ));
}

#[test]
fn test_truncated_input_is_unclosed() {
    for input in ["<", "<1,", "< 1,\n", "<1,,"] {
        match from_str::<Vec<i32>>(input) {
            Err(Error::MalformedClose { expected, found, .. }) => {
                assert_eq!(expected, '>');
                assert_eq!(found, "end of input");
            }
            other => panic!("Expected MalformedClose for {:?}, got {:?}", input, other),
        }
    }
    assert_eq!(
        from_str::<(u8, u8)>("(1"),
        Err(Error::malformed_close(1, 3, ')', None))
    );
    assert_eq!(
        from_str::<(u8, u8)>("(1,"),
        Err(Error::malformed_close(1, 4, ')', None))
    );

    // The innermost open container is the one reported as unclosed.
    assert!(matches!(
        from_str::<Vec<(u8, Vec<u8>)>>("<(1,<"),
        Err(Error::MalformedClose { expected: '>', .. })
    ));
    assert!(matches!(
        from_str::<HashMap<u8, u8>>("{(1,"),
        Err(Error::MalformedClose { expected: ')', .. })
    ));

    // A value that is present but not a `T` is still an element error.
    assert!(matches!(
        from_str::<Vec<i32>>("<1,>"),
        Err(Error::ElementDecode { .. })
    ));
}

#[test]
fn test_missing_delimiter() {
    match from_str::<Vec<i32>>("<1 2>") {
        Err(Error::MalformedDelimiter {
            line,
            col,
            expected,
            found,
        }) => {
            assert_eq!((line, col), (1, 3));
            assert_eq!(expected, ',');
            assert_eq!(found, "' '");
        }
        other => panic!("Expected MalformedDelimiter, got {:?}", other),
    }

    // Structural characters are not preceded by whitespace.
    assert!(matches!(
        from_str::<Vec<i32>>("<1 ,2>"),
        Err(Error::MalformedDelimiter { .. })
    ));
    assert!(matches!(
        from_str::<(u8, u8)>("(1 2)"),
        Err(Error::MalformedDelimiter { expected: ',', .. })
    ));
}

#[test]
fn test_element_decode_failure() {
    match from_str::<Vec<i32>>("<1,abc,3>") {
        Err(Error::ElementDecode {
            line,
            col,
            type_name,
            msg,
        }) => {
            assert_eq!((line, col), (1, 4));
            assert_eq!(type_name, "i32");
            assert!(msg.contains("abc"));
        }
        other => panic!("Expected ElementDecode, got {:?}", other),
    }

    assert!(matches!(
        from_str::<Vec<u8>>("<1,300>"),
        Err(Error::ElementDecode { .. })
    ));
    assert!(matches!(
        from_str::<Vec<String>>(r#"<"open>"#),
        Err(Error::ElementDecode { .. })
    ));
}

#[test]
fn test_wrong_nested_shape() {
    // A mapping expects pairs; bare scalars do not open one.
    assert!(matches!(
        from_str::<HashMap<i32, i32>>("{1,2}"),
        Err(Error::MalformedOpen { expected: '(', .. })
    ));
    assert!(matches!(
        from_str::<Vec<Vec<i32>>>("<<1>,2>"),
        Err(Error::MalformedOpen { expected: '<', .. })
    ));
}

#[test]
fn test_unregistered_shape() {
    let options = CodecOptions::new().with_registry(FormatRegistry::empty());
    assert_eq!(
        from_str_with_options::<LinkedList<i32>>("[1]", &options),
        Err(Error::UnsupportedShape("linked_sequence".to_string()))
    );
}

#[test]
fn test_lenient_skips_redundant_delimiters() {
    assert_eq!(from_str::<Vec<i32>>("<1,,2>").unwrap(), vec![1, 2]);
    assert_eq!(from_str::<Vec<i32>>("<,1>").unwrap(), vec![1]);
    assert_eq!(from_str::<Vec<i32>>("<1, ,2>").unwrap(), vec![1, 2]);
    assert!(matches!(
        from_str::<Vec<i32>>("<1,>"),
        Err(Error::ElementDecode { .. })
    ));
}

#[test]
fn test_strict_rejects_redundant_delimiters() {
    let options = strict();
    assert_eq!(
        from_str_with_options::<Vec<i32>>("<1,,2>", &options),
        Err(Error::malformed_delimiter(1, 4, ',', Some(',')))
    );
    assert!(matches!(
        from_str_with_options::<Vec<i32>>("<,1>", &options),
        Err(Error::MalformedDelimiter { line: 1, col: 2, .. })
    ));
    assert_eq!(
        from_str_with_options::<Vec<i32>>("<1, 2>", &options).unwrap(),
        vec![1, 2]
    );
}

#[test]
fn test_delimiter_equal_to_close() {
    // With delimiter and close the same character, the close always wins.
    let spec = FormatSpec::new('<', '>', '>');
    assert!(!spec.is_well_formed());
    let options = CodecOptions::new().with_format(Shape::SEQUENCE, spec);
    assert!(matches!(
        options.registry.validate(),
        Err(Error::InvalidFormat { .. })
    ));

    let mut de = Deserializer::with_options("<1>2>", &options);
    let v: Vec<i32> = de.decode().unwrap();
    assert_eq!(v, vec![1]);
    assert_eq!(de.remaining(), "2>");
}

#[test]
fn test_depth_limit() {
    let options = CodecOptions::new().with_max_depth(2);
    match from_str_with_options::<Vec<Vec<Vec<i32>>>>("<<<1>>>", &options) {
        Err(Error::DepthLimitExceeded { limit, col, .. }) => {
            assert_eq!(limit, 2);
            assert_eq!(col, 3);
        }
        other => panic!("Expected DepthLimitExceeded, got {:?}", other),
    }
    assert_eq!(
        from_str_with_options::<Vec<Vec<i32>>>("<<1>>", &options).unwrap(),
        vec![vec![1]]
    );

    // Pairs count toward the limit like any other container.
    let roomy = CodecOptions::new().with_max_depth(3);
    let nested: BTreeMap<u8, Vec<u8>> = from_str_with_options("{(1,<>)}", &roomy).unwrap();
    assert_eq!(nested[&1], Vec::<u8>::new());
    assert!(matches!(
        from_str_with_options::<BTreeMap<u8, Vec<u8>>>("{(1,<>)}", &options),
        Err(Error::DepthLimitExceeded { .. })
    ));
}

#[test]
fn test_failed_stream_until_cleared() {
    let mut de = Deserializer::from_str("[1] <5>");
    assert!(matches!(
        de.decode::<Vec<i32>>(),
        Err(Error::MalformedOpen { .. })
    ));
    assert!(de.is_failed());
    assert_eq!(de.decode::<LinkedList<i32>>(), Err(Error::StreamFailed));
    assert!(matches!(
        de.elements::<i32>(Shape::SEQUENCE),
        Err(Error::StreamFailed)
    ));

    de.clear_failed();
    let list: LinkedList<i32> = de.decode().unwrap();
    assert_eq!(list.into_iter().collect::<Vec<_>>(), vec![1]);
    let v: Vec<i32> = de.decode().unwrap();
    assert_eq!(v, vec![5]);
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = from_str::<Vec<i32>>("<1,2").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Malformed container at line 1, column 5: expected '>' to close, found end of input"
    );
    assert!(err.is_malformed());

    let err = from_str::<Vec<i32>>("\n  <1,x>").unwrap_err();
    assert!(err.to_string().contains("line 2, column 6"));
}

use synopsis_core::{validate, RejectionReason};

#[test]
fn accepts_http_and_https_and_keeps_text_verbatim() {
    let cases = [
        "https://example.com/post",
        "http://example.com",
        "HTTPS://Example.COM/Path/",
        "https://example.com/a?b=c&d=e#frag",
        "http://localhost:8080/",
    ];
    for case in cases {
        let address = validate(case).unwrap_or_else(|err| panic!("{case}: {err:?}"));
        assert_eq!(address.as_str(), case);
    }
}

#[test]
fn trims_surrounding_whitespace_only() {
    let address = validate("  \thttps://example.com/post/ \n").unwrap();
    assert_eq!(address.as_str(), "https://example.com/post/");
}

#[test]
fn empty_and_blank_input_is_rejected_as_empty() {
    assert_eq!(validate(""), Err(RejectionReason::EmptyInput));
    assert_eq!(validate("   \n\t"), Err(RejectionReason::EmptyInput));
}

#[test]
fn unparseable_text_is_malformed() {
    assert_eq!(validate("not a url"), Err(RejectionReason::MalformedAddress));
    assert_eq!(validate("example.com/post"), Err(RejectionReason::MalformedAddress));
    assert_eq!(validate("https://"), Err(RejectionReason::MalformedAddress));
}

#[test]
fn other_schemes_are_unsupported() {
    assert_eq!(
        validate("ftp://example.com"),
        Err(RejectionReason::UnsupportedScheme)
    );
    assert_eq!(
        validate("mailto:someone@example.com"),
        Err(RejectionReason::UnsupportedScheme)
    );
    assert_eq!(
        validate("file:///etc/hosts"),
        Err(RejectionReason::UnsupportedScheme)
    );
}

#[test]
fn rejection_messages_are_user_facing() {
    assert_eq!(RejectionReason::EmptyInput.to_string(), "Please enter a blog URL");
    assert_eq!(
        RejectionReason::MalformedAddress.to_string(),
        "Please enter a valid URL (must start with http:// or https://)"
    );
}

//! A small JSON-shaped grammar, mixing left recursion (numbers, string
//! bodies), right recursion (pair lists), and nesting.

use rearley::{parse, rules, Grammar};

#[static_init::dynamic]
static INIT_LOGGER: () = {
    let _ = env_logger::builder().format_timestamp(None).try_init();
};

fn json_grammar() -> Grammar {
    Grammar::new(rules! {
        start  => [ value ];

        value  => [ string ];
        value  => [ number ];
        value  => [ object ];

        object => [ '{' pairs '}' ];
        pairs  => [ pair ];
        pairs  => [ pair ',' pairs ];
        pair   => [ string ':' value ];

        string => [ '"' chars '"' ];
        chars  => [ ];
        chars  => [ chars 'a' ];

        number => [ digit ];
        number => [ number digit ];
        digit  => [ '0' ];
        digit  => [ '1' ];
        digit  => [ '2' ];
        digit  => [ '3' ];
    })
}

#[test]
fn scalar_values() {
    let gram = json_grammar();

    assert!(parse(&gram, "0"));
    assert!(parse(&gram, "0123"));
    assert!(parse(&gram, "\"\""));
    assert!(parse(&gram, "\"aaa\""));
    assert!(!parse(&gram, ""));
    assert!(!parse(&gram, "\"a"));
}

#[test]
fn objects() {
    let gram = json_grammar();

    assert!(parse(&gram, "{\"a\":0}"));
    assert!(parse(&gram, "{\"a\":\"aaaaaaaaa\",\"a\":0123}"));
    assert!(parse(&gram, "{\"\":{\"a\":1}}"));

    assert!(!parse(&gram, "{}"));
    assert!(!parse(&gram, "{\"a\"}"));
    assert!(!parse(&gram, "{\"a\":0,}"));
    assert!(!parse(&gram, "{\"a\":0"));
}

//! Custom container formats and shapes.
//!
//! Run with: cargo run --example custom_registry

use container_codec::{
    from_str_with_options, to_string_with_options, CodecOptions, Container, DelimiterPolicy,
    Deserializer, Element, FormatRegistry, Result, SeqWriter, Serializer, Shape, StopSet,
};
use std::error::Error;

/// A last-in first-out stack, written top first.
#[derive(Debug, Default, PartialEq)]
struct Stack(Vec<i32>);

impl Container for Stack {
    const SHAPE: Shape = Shape::new("stack");
    type Item = i32;

    fn insert_item(&mut self, item: i32) {
        self.0.insert(0, item);
    }

    fn write_items(&self, out: &mut SeqWriter<'_, '_>) -> Result<()> {
        for item in self.0.iter().rev() {
            out.element(item)?;
        }
        Ok(())
    }
}

impl Element for Stack {
    fn encode(&self, ser: &mut Serializer<'_>, _stop: StopSet) -> Result<()> {
        ser.write_container(self)
    }

    fn decode(de: &mut Deserializer<'_>, _stop: StopSet) -> Result<Self> {
        let mut stack = Stack::default();
        de.decode_into(&mut stack)?;
        Ok(stack)
    }
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();

    // Registries can be loaded from configuration
    let registry: FormatRegistry = serde_json::from_str(
        r#"{
            "sequence": {"open": "[", "close": "]", "delim": ";"},
            "pair": {"open": "<", "close": ">", "delim": "="},
            "mapping": {"open": "{", "close": "}", "delim": ","},
            "stack": {"open": "|", "close": "|", "delim": " "}
        }"#,
    )?;
    println!("Registered shapes:");
    for (shape, spec) in registry.iter() {
        println!("  {:<10} {}..{} delim {:?}", shape, spec.open, spec.close, spec.delim);
    }
    println!();

    // A stack format with the same open and close is accepted but flagged
    if let Err(e) = registry.validate() {
        println!("Note: {}\n", e);
    }

    let options = CodecOptions::new()
        .with_registry(registry)
        .with_delimiters(DelimiterPolicy::Strict);

    let pairs = vec![(1, 2), (3, 4)];
    let text = to_string_with_options(&pairs, &options)?;
    println!("Pairs: {}", text);
    let back: Vec<(i32, i32)> = from_str_with_options(&text, &options)?;
    assert_eq!(back, pairs);

    let stack = Stack(vec![1, 2, 3]);
    let text = to_string_with_options(&stack, &options)?;
    println!("Stack: {}", text);
    let back: Stack = from_str_with_options(&text, &options)?;
    assert_eq!(back, stack);

    // Strict delimiters reject redundant separators
    match from_str_with_options::<Vec<i32>>("[1;;2]", &options) {
        Ok(v) => println!("unexpected success: {:?}", v),
        Err(e) => println!("Strict: {}", e),
    }

    println!("✓ Custom formats round-trip");
    Ok(())
}

//! Basic container encoding and decoding.
//!
//! Run with: cargo run --example simple

use container_codec::{from_str, to_string, Deserializer};
use std::collections::{BTreeMap, LinkedList};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let scores: BTreeMap<String, Vec<u32>> = [
        ("Alice Johnson".to_string(), vec![91, 85, 78]),
        ("bob".to_string(), vec![]),
    ]
    .into_iter()
    .collect();

    // Encode
    let text = to_string(&scores)?;
    println!("Encoded:\n{}\n", text);

    // Decode back
    let scores_back: BTreeMap<String, Vec<u32>> = from_str(&text)?;
    assert_eq!(scores, scores_back);
    println!("✓ Round-trip successful\n");

    // Several values on one stream
    let mut de = Deserializer::from_str("[1,2,3] (x,4.5) <true,false>");
    let list: LinkedList<i32> = de.decode()?;
    let pair: (char, f64) = de.decode()?;
    let flags: Vec<bool> = de.decode()?;
    println!("list = {:?}\npair = {:?}\nflags = {:?}\n", list, pair, flags);

    // Malformed input is reported with its position
    match from_str::<Vec<i32>>("<1,2 3>") {
        Ok(v) => println!("unexpected success: {:?}", v),
        Err(e) => println!("Error: {}", e),
    }

    Ok(())
}

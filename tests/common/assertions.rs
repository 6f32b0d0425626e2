//! Custom assertions for integration tests
//!
//! Helpers for validating rendered docblocks and the CLI's JSON output.

use serde_json::Value;

/// Assert that output is valid JSON and return parsed value
pub fn assert_valid_json(output: &str, context: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON ({}): {}\nOutput:\n{}",
            context, e, output
        )
    })
}

/// Lines of a block that start with the given tag, after the comment prefix
pub fn tag_lines<'a>(block: &'a str, tag: &str) -> Vec<&'a str> {
    block
        .lines()
        .filter(|line| line.trim_start_matches([' ', '*', '/']).starts_with(tag))
        .collect()
}

/// Assert the number of rows carrying a tag
pub fn assert_tag_count(block: &str, tag: &str, expected: usize) {
    let found = tag_lines(block, tag).len();
    assert_eq!(
        found, expected,
        "Expected {} '{}' rows but found {}\nBlock:\n{}",
        expected, tag, found, block
    );
}

/// Assert that placeholders are numbered 1..=count in order of appearance
pub fn assert_sequential_placeholders(snippet: &str) -> usize {
    let numbers = placeholder_numbers(snippet);
    let expected: Vec<usize> = (1..=numbers.len()).collect();
    assert_eq!(
        numbers, expected,
        "Placeholders are not sequential\nSnippet:\n{}",
        snippet
    );
    numbers.len()
}

/// Indices of every `${N:` tab-stop, skipping escaped dollars
pub fn placeholder_numbers(snippet: &str) -> Vec<usize> {
    let mut numbers = Vec::new();
    let mut chars = snippet.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '$' if chars.peek() == Some(&'{') => {
                chars.next();
                let mut digits = String::new();
                while let Some(d) = chars.next_if(|c| c.is_ascii_digit()) {
                    digits.push(d);
                }
                if let Ok(number) = digits.parse() {
                    numbers.push(number);
                }
            }
            _ => {}
        }
    }
    numbers
}

/// Assert that every row of a section starts its named column at the same offset
pub fn assert_column_aligned(rows: &[&str], column: &str) {
    let offsets: Vec<usize> = rows
        .iter()
        .map(|row| {
            row.find(column)
                .unwrap_or_else(|| panic!("Column '{}' missing from row: {}", column, row))
        })
        .collect();
    assert!(
        offsets.windows(2).all(|w| w[0] == w[1]),
        "Column '{}' is not aligned: {:?}\nRows:\n{}",
        column,
        offsets,
        rows.join("\n")
    );
}

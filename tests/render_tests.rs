//! Rendering tests: declaration line in, documentation comment out
//!
//! These go through `generate` and `render_line`, so every test covers the
//! tokenizer, the language detector and the renderer together.
//!
//! ```bash
//! cargo test --test render_tests
//! ```

mod common;

use common::{assert_column_aligned, assert_sequential_placeholders, assert_tag_count, tag_lines};
use docblock_engine::{
    generate, parse_line, render, render_line, strip_placeholders, CommentDelimiters, CommentStyle,
    Lang, LineEnding, NullablePolicy, Settings,
};

fn text(lang: Lang, line: &str, settings: &Settings) -> String {
    render_line(lang, line, settings).text()
}

// ============================================================================
// Block structure
// ============================================================================

#[test]
fn function_block_has_description_params_and_return() {
    let snippet =
        generate("javascript", "function foo(arg1, arg2) {", &Settings::default()).unwrap();
    assert_eq!(
        snippet,
        "/**\n\
         \x20* ${1:[foo description]}\n\
         \x20*\n\
         \x20* @param   {${2:[type]}}  arg1  ${3:[arg1 description]}\n\
         \x20* @param   {${4:[type]}}  arg2  ${5:[arg2 description]}\n\
         \x20*\n\
         \x20* @return  {${6:[type]}}  ${7:[return description]}\n\
         \x20*/"
    );
}

#[test]
fn variable_block_is_description_only_without_a_variable_tag() {
    let snippet = generate("js", "let foo;", &Settings::default()).unwrap();
    assert_eq!(snippet, "/**\n * ${1:[foo description]}\n */");
    assert_tag_count(&snippet, "@param", 0);
    assert_tag_count(&snippet, "@return", 0);
}

#[test]
fn variable_tags_where_the_language_uses_them() {
    let block = text(Lang::Php, "private ?Logger $logger = null;", &Settings::default());
    assert_eq!(
        block,
        "/**\n * [$logger description]\n *\n * @var  Logger|null\n */"
    );

    let block = text(Lang::Scss, "$primary-color: #ff0000 !default;", &Settings::default());
    assert_eq!(
        block,
        "/**\n * [$primary-color description]\n *\n * @type  {[type]}\n */"
    );
}

#[test]
fn unrecognized_line_renders_an_unnamed_description() {
    let block = text(Lang::Php, "}", &Settings::default());
    assert_eq!(block, "/**\n * [description]\n */");
}

#[test]
fn placeholders_are_numbered_in_order() {
    let lines = [
        ("php", "public function find(int $id, array $options = []): User {"),
        (
            "typescript",
            "export async function getUser(id: string, cache?: boolean): Promise<User> {",
        ),
        ("c", "static char *copy_name(const char *src, size_t len) {"),
        ("scss", "@mixin theme($theme-color: #333, $args...) {"),
    ];
    for (lang, line) in lines {
        let snippet = generate(lang, line, &Settings::default()).unwrap();
        let count = assert_sequential_placeholders(&snippet);
        assert!(count >= 3, "{}: only {} placeholders", line, count);
    }
}

#[test]
fn snippet_strips_to_the_displayed_text() {
    let lines = [
        (Lang::Php, r"function handle(\App\Http\Request $request): \App\Http\Response {"),
        (Lang::JavaScript, "function retry(task, onError = () => {}, times = 3) {"),
        (Lang::Java, "public <T> Map<String, List<T>> group(List<T> items, String... keys) {"),
    ];
    for (lang, line) in lines {
        let block = render_line(lang, line, &Settings::default());
        assert_eq!(strip_placeholders(&block.snippet()), block.text(), "{}", line);
    }
}

#[test]
fn rendering_the_same_record_twice_is_identical() {
    let lines = [
        (Lang::C, "static char *copy_name(const char *src, size_t len) {"),
        (Lang::Cpp, "bool Widget::resize(const Size &size) {"),
        (Lang::Java, "public <T> Map<String, List<T>> group(List<T> items, String... keys) {"),
        (Lang::Php, "public function find(?int $id, array $options = []): ?User {"),
        (Lang::JavaScript, "function retry(task, onError = () => {}, times = 3) {"),
        (Lang::TypeScript, "const total = (items: Item[]): number => {"),
        (Lang::Scss, "$primary-color: #ff0000 !default;"),
    ];
    let settings = Settings::default();
    for (lang, line) in lines {
        let symbol = parse_line(lang, line, &settings);
        let first = render(&symbol, lang.grammar(), &settings);
        let second = render(&symbol, lang.grammar(), &settings);
        assert_eq!(first.snippet(), second.snippet(), "{}", line);
        assert_eq!(first.text(), second.text(), "{}", line);
        assert_eq!(parse_line(lang, line, &settings), symbol, "{}", line);
    }
}

// ============================================================================
// Alignment
// ============================================================================

#[test]
fn parameter_columns_are_aligned() {
    let block = text(
        Lang::Php,
        "public function find(int $id, array $options = []): User {",
        &Settings::default(),
    );
    let rows = tag_lines(&block, "@param");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], " * @param   int    $id       [$id description]");
    assert_eq!(rows[1], " * @param   array  $options  [$options description]");
    assert_column_aligned(&rows, "[$");
    assert_eq!(
        tag_lines(&block, "@return"),
        vec![" * @return  User  [return description]"]
    );
}

#[test]
fn column_spacing_widens_every_gutter() {
    let settings = Settings {
        column_spacing: 4,
        ..Default::default()
    };
    let block = text(Lang::Php, "function greet($name) {", &settings);
    assert_eq!(
        tag_lines(&block, "@param"),
        vec![" * @param     [type]    $name    [$name description]"]
    );
}

#[test]
fn return_row_can_be_disabled() {
    let settings = Settings {
        default_return_tag: false,
        ..Default::default()
    };
    let block = text(Lang::JavaScript, "function foo(a) {", &settings);
    assert_tag_count(&block, "@return", 0);
    assert_eq!(
        tag_lines(&block, "@param"),
        vec![" * @param  {[type]}  a  [a description]"]
    );
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn nullable_policy_through_generate() {
    let line = "function load(?int $id) {";

    let union = strip_placeholders(&generate("php", line, &Settings::default()).unwrap());
    assert!(union.contains(" * @param   int|null  $id  [$id description]"));

    let settings = Settings {
        nullable_types: NullablePolicy::Mixed,
        ..Default::default()
    };
    let mixed = strip_placeholders(&generate("php", line, &settings).unwrap());
    assert!(mixed.contains(" * @param   mixed  $id  [$id description]"));
}

#[test]
fn alternate_style_uses_line_comments() {
    let settings = Settings {
        comment_style: CommentStyle::Alternate,
        ..Default::default()
    };
    let block = text(Lang::C, "int add(int a, int b) {", &settings);
    assert_eq!(
        block,
        [
            "/// [add description]",
            "///",
            "/// @param   int  a  [a description]",
            "/// @param   int  b  [b description]",
            "///",
            "/// @return  int  [return description]",
        ]
        .join("\n")
    );
}

#[test]
fn line_ending_override() {
    let settings = Settings {
        line_ending: Some(LineEnding::Crlf),
        ..Default::default()
    };
    let block = text(Lang::JavaScript, "function foo(a) {", &settings);
    assert!(block.contains("\r\n"));
    assert_eq!(block.matches('\n').count(), block.matches("\r\n").count());
}

#[test]
fn comment_override_replaces_delimiters() {
    let mut settings = Settings::default();
    settings.comments.insert(
        "php".to_string(),
        CommentDelimiters::new("/*", " ** ", " */"),
    );
    let block = text(Lang::Php, "$count = 0;", &settings);
    assert_eq!(
        block,
        "/*\n ** [$count description]\n **\n ** @var  [type]\n */"
    );

    // Other languages keep their own delimiters
    let block = text(Lang::JavaScript, "let foo;", &settings);
    assert!(block.starts_with("/**\n"));
}

#[test]
fn unknown_language_is_an_error() {
    let err = generate("cobol", "let foo;", &Settings::default()).unwrap_err();
    assert!(err.to_string().contains("cobol"));
}

//! Subcommand bodies and their output formatting.
//!
//! Every writer takes `&mut dyn Write` so tests can capture output in a
//! buffer instead of stdout.

use std::fs;
use std::io::Write;
use std::path::Path;

use eyre::{Context, Result};
use selq::dom::{Document, ElementSpec};
use selq::{Engine, TokenSequence};

use crate::error::CliError;

/// Read a JSON element tree from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid element
/// spec.
pub fn load_document(path: &Path) -> Result<Document> {
    let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read tree file {}", path.display()))?;
    let spec: ElementSpec = serde_json::from_str(&raw)
        .wrap_err_with(|| format!("failed to parse tree file {}", path.display()))?;
    let document = Document::from_spec(spec);
    tracing::debug!(path = %path.display(), elements = document.len(), "loaded tree");
    Ok(document)
}

/// Write one `<kind>\t<text>` line per token.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_tokens(writer: &mut dyn Write, tokens: &TokenSequence) -> Result<()> {
    for token in tokens {
        writeln!(writer, "{}\t{}", token.kind().as_str(), token.text())
            .wrap_err_with(|| format!("failed to write token `{}`", token.text()))?;
    }
    Ok(())
}

/// Tokenize `selector` and print its tokens.
///
/// # Errors
///
/// Returns an error if the selector cannot be tokenized or output fails.
pub fn run_tokenize(writer: &mut dyn Write, engine: &Engine, selector: &str) -> Result<()> {
    let tokens = engine
        .tokenize(selector)
        .wrap_err_with(|| format!("failed to tokenize `{selector}`"))?;
    write_tokens(writer, &tokens)
}

/// Search `document` and print the path of every match.
///
/// # Errors
///
/// Returns an error if the selector cannot be evaluated or output fails.
pub fn run_search(
    writer: &mut dyn Write,
    engine: &Engine,
    document: &Document,
    selector: &str,
) -> Result<()> {
    let found = engine
        .search(selector, Some(&document.root()))
        .wrap_err_with(|| format!("failed to evaluate `{selector}`"))?;
    for node in &found {
        writeln!(writer, "{}", node.path()).wrap_err("failed to write search result")?;
    }
    Ok(())
}

/// Print the nearest element at or above `from` that matches `selector`.
///
/// Nothing is printed when no element up to the document root matches.
///
/// # Errors
///
/// Returns [`CliError::UnknownNode`] (wrapped) when no element carries the
/// id `from`, or an error if the selector cannot be evaluated.
pub fn run_closest(
    writer: &mut dyn Write,
    engine: &Engine,
    document: &Document,
    from: &str,
    selector: &str,
) -> Result<()> {
    let start = document
        .element_by_id(from)
        .ok_or_else(|| CliError::UnknownNode(from.to_string()))?;
    let found = engine
        .element_satisfies(&start, selector, &document.root())
        .wrap_err_with(|| format!("failed to evaluate `{selector}`"))?;
    if let Some(node) = found {
        writeln!(writer, "{}", node.path()).wrap_err("failed to write closest match")?;
    }
    Ok(())
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests require explicit failures")]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn engine() -> Engine {
        Engine::new().expect("engine should build")
    }

    fn page() -> Document {
        Document::from_spec(
            ElementSpec::new("div").with_id("page").with_child(
                ElementSpec::new("ul")
                    .with_class("menu")
                    .with_child(ElementSpec::new("li").with_id("first"))
                    .with_child(ElementSpec::new("li").with_class("last")),
            ),
        )
    }

    fn output(run: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buffer = Vec::new();
        run(&mut buffer).expect("command should succeed");
        String::from_utf8(buffer).expect("output should be utf-8")
    }

    #[rstest]
    fn tokens_print_kind_and_text(engine: Engine) {
        let out = output(|w| run_tokenize(w, &engine, "div#page  .menu li"));
        assert_eq!(out, "name and id\tdiv#page\nclass\t.menu\nname\tli\n");
    }

    #[rstest]
    fn search_prints_paths_in_result_order(engine: Engine) {
        let document = page();
        let out = output(|w| run_search(w, &engine, &document, "#page li"));
        assert_eq!(
            out,
            "div#page > ul.menu > li#first\ndiv#page > ul.menu > li.last\n"
        );
    }

    #[rstest]
    fn closest_prints_nearest_ancestor(engine: Engine) {
        let document = page();
        let out = output(|w| run_closest(w, &engine, &document, "first", "div ul"));
        assert_eq!(out, "div#page > ul.menu\n");
        let out = output(|w| run_closest(w, &engine, &document, "first", "section"));
        assert!(out.is_empty());
    }

    #[rstest]
    fn closest_rejects_unknown_ids(engine: Engine) {
        let document = page();
        let err = run_closest(&mut Vec::<u8>::new(), &engine, &document, "nope", "li")
            .expect_err("unknown id should fail");
        assert_eq!(err.to_string(), "no element with id `nope` in the tree");
    }

    #[rstest]
    fn unsupported_selectors_carry_context(engine: Engine) {
        let err = run_tokenize(&mut Vec::<u8>::new(), &engine, "a:hover")
            .expect_err("pseudo-class should fail");
        assert_eq!(err.to_string(), "failed to tokenize `a:hover`");
    }

    #[test]
    fn load_document_reads_json_trees() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"tag": "ul", "children": [{{"tag": "li", "id": "x"}}]}}"#)
            .expect("write tree");
        let document = load_document(file.path()).expect("tree should load");
        assert_eq!(document.element_by_id("x").map(|n| n.path()).as_deref(), Some("ul > li#x"));
    }

    #[test]
    fn load_document_reports_the_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write tree");
        let err = load_document(file.path()).expect_err("invalid json should fail");
        assert!(err.to_string().starts_with("failed to parse tree file"));
    }
}

//! The compilation pipeline.
//!
//! Runs lex → parse → build → normalize over one source text, converting
//! stage-local errors into unified diagnostics. A stage with errors never
//! hands its output to the next stage. The pipeline takes source text, not
//! a path to read: file I/O belongs to the caller.

use std::path::PathBuf;
use tracing::debug;
use wireframe_ast::foundation::{SourceMap, Span};
use wireframe_ast::{builder, Diagnostic, ErrorKind};
use wireframe_ir::{normalize, IrDocument, Viewport};
use wireframe_layout::RenderTree;
use wireframe_lexer::tokenize;
use wireframe_parser::parse_document;

/// Output of a successful compilation.
#[derive(Debug, Clone)]
pub struct Compilation {
    /// The normalized, versioned IR
    pub ir: IrDocument,
    /// Source map for formatting any later diagnostics
    pub source_map: SourceMap,
    /// Non-blocking diagnostics (warnings, notes)
    pub warnings: Vec<Diagnostic>,
}

/// Compile one document from source text.
///
/// `path` is only used for diagnostics; the source is never read from disk.
pub fn compile_source(
    path: impl Into<PathBuf>,
    source: impl Into<String>,
) -> Result<Compilation, Vec<Diagnostic>> {
    let source = source.into();
    let mut source_map = SourceMap::new();
    let file_id = source_map.add_file(path.into(), source.clone());

    debug!(bytes = source.len(), "lexing");
    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(err) => {
            let range = err.span();
            let span = Span::new(file_id, range.start as u32, range.end as u32, 0);
            return Err(vec![Diagnostic::error(
                ErrorKind::Syntax,
                Some(span),
                err.to_string(),
            )]);
        }
    };

    debug!(tokens = tokens.len(), "parsing");
    let raw = match parse_document(&tokens, file_id) {
        Ok(raw) => raw,
        Err(errors) => {
            return Err(errors
                .into_iter()
                .map(|err| Diagnostic::error(ErrorKind::Syntax, Some(err.span), err.message))
                .collect());
        }
    };

    let ast = builder::build(raw);
    debug!(
        screens = ast.screens.len(),
        defines = ast.defines.len(),
        "normalizing"
    );
    let normalized = normalize(&ast)?;

    Ok(Compilation {
        ir: normalized.document,
        source_map,
        warnings: normalized.warnings,
    })
}

/// Compile and lay out in one call.
pub fn compile_and_layout(
    path: impl Into<PathBuf>,
    source: impl Into<String>,
    viewport: Viewport,
) -> Result<(Compilation, RenderTree), Vec<Diagnostic>> {
    let compilation = compile_source(path, source)?;
    let tree = wireframe_layout::layout(&compilation.ir, viewport);
    Ok((compilation, tree))
}

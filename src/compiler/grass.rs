//! compiler::grass
//!
//! Compiler backend built on the `grass` crate.
//!
//! # Option mapping
//!
//! - include paths become grass load paths, in order
//! - [`SyntaxMode::Sass`] selects the indented grammar
//! - `compressed` maps to grass's compressed emitter; `nested`, `expanded`
//!   and `compact` all map to its expanded emitter, the only other one grass
//!   has
//! - grass always formats numbers with 10 digits of precision; other values
//!   are accepted and logged

use std::path::{Path, PathBuf};

use ::grass::{InputSyntax, Options, OutputStyle as GrassStyle};

use super::source_map::{append_reference, relative_to, SourceMapDocument};
use super::{Compiler, CompilerError, CompilerOptions, CompilerOutput, SourceMapOptions, Transpiler};
use crate::core::types::{OutputStyle, SyntaxMode};

/// Number precision grass uses regardless of configuration.
pub const GRASS_PRECISION: u32 = 10;

/// The grass compiler backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrassCompiler;

impl Compiler for GrassCompiler {
    fn construct(&self, options: &CompilerOptions) -> Result<Box<dyn Transpiler>, CompilerError> {
        for path in &options.include_paths {
            if path.exists() && !path.is_dir() {
                return Err(CompilerError::Construction(format!(
                    "include path '{}' is not a directory",
                    path.display()
                )));
            }
        }

        if options.precision != GRASS_PRECISION {
            tracing::warn!(
                requested = options.precision,
                used = GRASS_PRECISION,
                "grass uses a fixed number precision; requested precision ignored"
            );
        }

        let style = match options.output_style {
            OutputStyle::Compressed => GrassStyle::Compressed,
            OutputStyle::Expanded | OutputStyle::Nested => GrassStyle::Expanded,
            OutputStyle::Compact => {
                tracing::warn!("grass has no compact emitter, using expanded");
                GrassStyle::Expanded
            }
        };

        let syntax = match options.syntax {
            SyntaxMode::Scss => InputSyntax::Scss,
            SyntaxMode::Sass => InputSyntax::Sass,
        };

        let grass_options = Options::default()
            .style(style)
            .input_syntax(syntax)
            .load_paths(options.include_paths.as_slice());

        Ok(Box::new(GrassTranspiler {
            options: grass_options,
            input_path: options.input_path.clone(),
            source_map: options.source_map.clone(),
        }))
    }
}

/// A configured grass compile.
#[derive(Debug)]
pub struct GrassTranspiler {
    options: Options<'static>,
    input_path: Option<PathBuf>,
    source_map: SourceMapOptions,
}

impl GrassTranspiler {
    /// `source_path` is the source as named from the map's location.
    fn document(
        &self,
        source: &str,
        source_path: Option<&Path>,
        css_file: Option<&Path>,
    ) -> SourceMapDocument {
        let doc = SourceMapDocument::new(source_path, css_file);
        if self.source_map.contents {
            doc.with_contents(source)
        } else {
            doc
        }
    }
}

impl Transpiler for GrassTranspiler {
    fn execute(&self, source: &str) -> Result<CompilerOutput, CompilerError> {
        let mut css = ::grass::from_string(source.to_owned(), &self.options)
            .map_err(|e| CompilerError::Compilation(e.to_string()))?;

        if !self.source_map.enabled() {
            return Ok(CompilerOutput {
                css,
                ..Default::default()
            });
        }

        let encode_err = |e: serde_json::Error| {
            CompilerError::Compilation(format!("failed to encode source map: {e}"))
        };

        if self.source_map.embedded {
            let url = self
                .document(source, self.input_path.as_deref(), None)
                .to_data_url()
                .map_err(encode_err)?;
            append_reference(&mut css, &url);
            return Ok(CompilerOutput {
                css,
                ..Default::default()
            });
        }

        let Some(filename) = self.source_map.filename.clone() else {
            return Ok(CompilerOutput {
                css,
                ..Default::default()
            });
        };

        let css_file = css_file_for(&filename);
        let map_dir = filename.parent().unwrap_or(Path::new(""));
        let source_path = self
            .input_path
            .as_deref()
            .map(|input| relative_to(input, map_dir));
        let content = self
            .document(source, source_path.as_deref(), css_file.as_deref())
            .to_json()
            .map_err(encode_err)?;

        if !self.source_map.omit_url {
            if let Some(name) = filename.file_name() {
                append_reference(&mut css, &name.to_string_lossy());
            }
        }

        Ok(CompilerOutput {
            css,
            source_map_filename: Some(filename),
            source_map_content: Some(content),
        })
    }
}

/// `out.css.map` describes `out.css`.
fn css_file_for(map_file: &Path) -> Option<PathBuf> {
    let name = map_file.file_name()?.to_string_lossy();
    name.strip_suffix(crate::core::source_map::SIDECAR_SUFFIX)
        .map(|css| map_file.with_file_name(css))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const NESTED: &str = "a { b { color: red; } }";

    fn construct(options: &CompilerOptions) -> Box<dyn Transpiler> {
        GrassCompiler.construct(options).expect("construct grass")
    }

    #[test]
    fn compiles_scss() {
        let out = construct(&CompilerOptions::default()).execute(NESTED).unwrap();
        assert_eq!(out.css, "a b {\n  color: red;\n}\n");
        assert!(out.source_map_filename.is_none());
        assert!(out.source_map_content.is_none());
    }

    #[test]
    fn compressed_style() {
        let options = CompilerOptions {
            output_style: OutputStyle::Compressed,
            ..Default::default()
        };
        let out = construct(&options).execute(NESTED).unwrap();
        assert!(out.css.starts_with("a b{color:red}"));
    }

    #[test]
    fn sass_syntax() {
        let options = CompilerOptions {
            syntax: SyntaxMode::Sass,
            ..Default::default()
        };
        let out = construct(&options).execute("a\n  color: red\n").unwrap();
        assert!(out.css.contains("color: red;"));
    }

    #[test]
    fn malformed_source_is_compilation_error() {
        let err = construct(&CompilerOptions::default())
            .execute("a { color: red")
            .unwrap_err();
        assert!(matches!(err, CompilerError::Compilation(_)));
    }

    #[test]
    fn include_path_file_is_construction_error() {
        let temp = TempDir::new().expect("create temp dir");
        let file = temp.path().join("not-a-dir");
        std::fs::write(&file, "").unwrap();

        let options = CompilerOptions {
            include_paths: vec![file],
            ..Default::default()
        };
        let err = GrassCompiler.construct(&options).err().expect("should fail");
        assert!(matches!(err, CompilerError::Construction(_)));
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn missing_include_path_is_accepted() {
        let options = CompilerOptions {
            include_paths: vec![PathBuf::from("/nonexistent/gassc/include")],
            ..Default::default()
        };
        assert!(GrassCompiler.construct(&options).is_ok());
    }

    #[test]
    fn resolves_imports_from_include_paths() {
        let temp = TempDir::new().expect("create temp dir");
        std::fs::write(temp.path().join("_colors.scss"), "$brand: #123456;").unwrap();

        let options = CompilerOptions {
            include_paths: vec![temp.path().to_path_buf()],
            ..Default::default()
        };
        let out = construct(&options)
            .execute("@import 'colors';\na { color: $brand; }")
            .unwrap();
        assert!(out.css.contains("#123456"));
    }

    #[test]
    fn embedded_map_is_appended_to_css() {
        let options = CompilerOptions {
            input_path: Some(PathBuf::from("site.scss")),
            source_map: SourceMapOptions {
                contents: true,
                omit_url: true,
                embedded: true,
                filename: None,
            },
            ..Default::default()
        };
        let out = construct(&options).execute(NESTED).unwrap();
        assert!(out
            .css
            .contains("/*# sourceMappingURL=data:application/json;charset=utf-8;base64,"));
        assert!(out.source_map_filename.is_none());
        assert!(out.source_map_content.is_none());
    }

    #[test]
    fn sidecar_map_is_returned_separately() {
        let options = CompilerOptions {
            input_path: Some(PathBuf::from("site.scss")),
            source_map: SourceMapOptions {
                contents: true,
                omit_url: true,
                embedded: false,
                filename: Some(PathBuf::from("out/site.css.map")),
            },
            ..Default::default()
        };
        let out = construct(&options).execute(NESTED).unwrap();
        assert!(!out.css.contains("sourceMappingURL"));
        assert_eq!(out.source_map_filename, Some(PathBuf::from("out/site.css.map")));

        let content = out.source_map_content.unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["file"], "site.css");
        assert_eq!(json["sources"][0], "../site.scss");
        assert_eq!(json["sourcesContent"][0], NESTED);
    }

    #[test]
    fn sidecar_reference_comment_when_url_not_omitted() {
        let options = CompilerOptions {
            source_map: SourceMapOptions {
                contents: false,
                omit_url: false,
                embedded: false,
                filename: Some(PathBuf::from("site.css.map")),
            },
            ..Default::default()
        };
        let out = construct(&options).execute(NESTED).unwrap();
        assert!(out.css.ends_with("/*# sourceMappingURL=site.css.map */\n"));
        let json: serde_json::Value =
            serde_json::from_str(&out.source_map_content.unwrap()).unwrap();
        assert!(json.get("sourcesContent").is_none());
    }

    #[test]
    fn css_file_for_strips_map_suffix() {
        assert_eq!(
            css_file_for(Path::new("dist/a.css.map")),
            Some(PathBuf::from("dist/a.css"))
        );
        assert_eq!(css_file_for(Path::new("a.json")), None);
    }
}

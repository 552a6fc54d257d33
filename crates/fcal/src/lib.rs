//! FCAL - a small matrix language translated to C++.
//!
//! Parsing, canonical printing and C++ generation for FCAL programs. The
//! [`Translator`] ties the stages together; the tree types are re-exported
//! from `fcal_core`.

pub mod config;

mod error;

pub use fcal_core::{ast, source_form, target_form};

pub use error::FcalError;

use log::{debug, info, trace};

use fcal_core::ast::Program;

use config::AppConfig;

/// Translator from FCAL source to C++ or canonical FCAL.
///
/// # Examples
///
/// ```
/// use fcal::{Translator, config::AppConfig};
///
/// let source = "main () { Int x; x = 2 * 3; print(x); }";
///
/// let translator = Translator::new(AppConfig::default());
///
/// // Parse source to a program tree
/// let program = translator.parse(source).expect("Failed to parse");
///
/// // Lower the tree to C++
/// let cpp = translator.lower(&program).expect("Failed to lower");
/// assert!(cpp.contains("cout << x;"));
///
/// // Or print it back as canonical FCAL
/// assert_eq!(
///     translator.unparse(&program),
///     "main () {\nInt x;\nx = 2 * 3;\nprint(x);\n}\n"
/// );
/// ```
#[derive(Debug, Default)]
pub struct Translator {
    config: AppConfig,
}

impl Translator {
    /// Create a new translator with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration this translator was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source code into a program tree.
    ///
    /// # Errors
    ///
    /// Returns [`FcalError::Parse`] holding the diagnostic and the source
    /// text when the source is not a valid program.
    pub fn parse(&self, source: &str) -> Result<Program, FcalError> {
        info!(bytes = source.len(); "Parsing program");

        let program =
            fcal_parser::parse(source).map_err(|err| FcalError::new_parse_error(err, source))?;

        debug!(program = program.name().name(); "Program parsed successfully");
        trace!(program:?; "Parsed program");

        Ok(program)
    }

    /// Print a program tree as canonical FCAL source.
    pub fn unparse(&self, program: &Program) -> String {
        program.to_source()
    }

    /// Lower a program tree to C++.
    ///
    /// # Errors
    ///
    /// Returns [`FcalError::Config`] for invalid target settings and
    /// [`FcalError::Lower`] when the tree holds a construct the code
    /// generator cannot express.
    pub fn lower(&self, program: &Program) -> Result<String, FcalError> {
        self.config.validate().map_err(FcalError::Config)?;

        info!(
            program = program.name().name(),
            runtime_header = self.config.target().runtime_header();
            "Lowering program"
        );
        let cpp = program.to_target_with(self.config.target())?;
        debug!(bytes = cpp.len(); "Program lowered successfully");

        Ok(cpp)
    }

    /// Translate FCAL source straight to C++.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Translator::parse`] or [`Translator::lower`].
    pub fn translate(&self, source: &str) -> Result<String, FcalError> {
        let program = self.parse(source)?;
        self.lower(&program)
    }

    /// Reformat FCAL source into its canonical layout.
    ///
    /// # Errors
    ///
    /// Returns [`FcalError::Parse`] when the source is not a valid program.
    pub fn canonicalize(&self, source: &str) -> Result<String, FcalError> {
        let program = self.parse(source)?;
        Ok(self.unparse(&program))
    }
}

//! Integration tests for the Translator API

use fcal::{FcalError, Translator, config::AppConfig};

const MATRIX_PRODUCT: &str = r#"
main () {
  Matrix a[3, 3] i, j = i + j;
  Matrix b = readMatrix("b.data");
  Matrix c[3, 3] i, j = 0;
  Int i;
  Int j;
  Int k;
  Int total;
  for (i = 0 : 2) {
    for (j = 0 : 2) {
      total = 0;
      for (k = 0 : 2) {
        total = total + a[i, k] * b[k, j];
      }
      c[i, j] = total;
    }
  }
  print(c);
}
"#;

#[test]
fn test_default_translator() {
    let translator = Translator::default();
    assert_eq!(translator.config().target().runtime_header(), "Matrix.h");
}

#[test]
fn test_translate_matrix_product() {
    let cpp = Translator::default()
        .translate(MATRIX_PRODUCT)
        .expect("Failed to translate");

    assert!(cpp.starts_with("#include <iostream>\n#include \"Matrix.h\"\n"));
    assert!(cpp.contains("main () {\n"));
    assert!(cpp.contains("Matrix b = Matrix::readMatrix(\"b.data\");\n"));
    assert!(cpp.contains("for(k=0; k <= 2; k ++){\n"));
    assert!(cpp.contains("total = total + *(a.access(i,k)) * *(b.access(k,j));\n"));
    assert!(cpp.contains("*(c.access(i, j)) = total;\n"));
    assert!(cpp.ends_with("cout << c;\n}\n"));
}

#[test]
fn test_parse_error_keeps_source() {
    let source = "main () { Int ; }";
    let err = Translator::default().parse(source).unwrap_err();

    match err {
        FcalError::Parse { err, src } => {
            assert_eq!(src, source);
            assert_eq!(
                err.diagnostic().message(),
                "expected variable name, found semicolon `;`"
            );
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_canonicalize_is_stable() {
    let translator = Translator::default();
    let once = translator.canonicalize(MATRIX_PRODUCT).unwrap();
    let twice = translator.canonicalize(&once).unwrap();
    assert_eq!(once, twice);
    assert_eq!(
        translator.parse(&once).unwrap(),
        translator.parse(MATRIX_PRODUCT).unwrap()
    );
}

#[test]
fn test_config_from_toml() {
    let config: AppConfig = toml::from_str(
        r#"
        [target]
        runtime_header = "runtime/Matrix.hpp"
        include_preamble = true
        "#,
    )
    .expect("valid configuration");

    let cpp = Translator::new(config)
        .translate("main () { }")
        .unwrap();
    assert!(cpp.contains("#include \"runtime/Matrix.hpp\"\n"));
}

#[test]
fn test_config_fields_default_individually() {
    let config: AppConfig = toml::from_str("[target]\ninclude_preamble = false\n").unwrap();
    assert_eq!(config.target().runtime_header(), "Matrix.h");

    let cpp = Translator::new(config).translate("main () { }").unwrap();
    assert_eq!(cpp, "main () {\n}\n");

    let empty: AppConfig = toml::from_str("").unwrap();
    assert!(empty.target().include_preamble());
}

#[test]
fn test_invalid_config_is_reported_on_lowering() {
    let config: AppConfig = toml::from_str("[target]\nruntime_header = \"\"\n").unwrap();
    let translator = Translator::new(config);

    let program = translator.parse("main () { }").unwrap();
    assert!(matches!(
        translator.lower(&program),
        Err(FcalError::Config(_))
    ));
}

#[test]
fn test_translator_reusability() {
    let translator = Translator::default();
    let first = translator.translate("main () { Int x; }").unwrap();
    let second = translator.translate("main () { Float y; }").unwrap();

    assert!(first.contains("int x;\n"));
    assert!(second.contains("float y;\n"));
}

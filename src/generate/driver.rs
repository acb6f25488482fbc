/// Replaced with the package name as a JSON string
pub const PACKAGE_PLACEHOLDER: &str = "__PACKAGE__";

/// Replaced with the entry module identifiers as a JSON array
pub const TESTMODS_PLACEHOLDER: &str = "__TESTMODS__";

/// Fill the driver template. Only the first occurrence of each placeholder
/// is replaced.
pub fn render_driver(
    template: &str,
    package: &str,
    test_modules: &[String],
) -> serde_json::Result<String> {
    let package_json = serde_json::to_string(package)?;
    let modules_json = serde_json::to_string(test_modules)?;

    Ok(template
        .replacen(PACKAGE_PLACEHOLDER, &package_json, 1)
        .replacen(TESTMODS_PLACEHOLDER, &modules_json, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_placeholders() {
        let template = "const pkg = __PACKAGE__;\nconst mods = __TESTMODS__;\n";
        let out = render_driver(
            template,
            "eventual-send",
            &["test/test-e".to_string(), "test/test-hp".to_string()],
        )
        .unwrap();
        assert_eq!(
            out,
            "const pkg = \"eventual-send\";\nconst mods = [\"test/test-e\",\"test/test-hp\"];\n"
        );
    }

    #[test]
    fn test_only_first_occurrence_replaced() {
        let out = render_driver("__PACKAGE__ __PACKAGE__", "p", &[]).unwrap();
        assert_eq!(out, "\"p\" __PACKAGE__");
    }

    #[test]
    fn test_package_name_is_escaped() {
        let out = render_driver("__PACKAGE__", "we\"ird", &[]).unwrap();
        assert_eq!(out, r#""we\"ird""#);
    }

    #[test]
    fn test_template_without_placeholders_unchanged() {
        let out = render_driver("run();\n", "p", &["t".to_string()]).unwrap();
        assert_eq!(out, "run();\n");
    }
}

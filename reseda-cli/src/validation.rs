use lazy_static::lazy_static;
use regex::Regex;
use reseda::Direction;
use std::path::Path;
use unic_langid::LanguageIdentifier;

lazy_static! {
    /// Android region qualifier, e.g. `pt-rBR`.
    static ref ANDROID_REGION: Regex = Regex::new(r"^([a-zA-Z]{2,3})-r([a-zA-Z]{2})$").unwrap();
}

/// Resolve the direction from the four path flags of `convert`.
///
/// Exactly one input/output pair must be given: `--in-csv` with `--out-res`,
/// or `--in-res` with `--out-csv`.
pub fn resolve_direction(
    in_csv: Option<String>,
    out_res: Option<String>,
    in_res: Option<String>,
    out_csv: Option<String>,
) -> Result<Direction, String> {
    match (in_csv, out_res, in_res, out_csv) {
        (Some(input_csv), Some(output_res), None, None) => {
            validate_file_path(&input_csv)?;
            Ok(Direction::CsvToTree {
                input_csv: input_csv.into(),
                output_res: output_res.into(),
            })
        }
        (None, None, Some(input_res), Some(output_csv)) => {
            validate_dir_path(&input_res)?;
            validate_output_path(&output_csv)?;
            Ok(Direction::TreeToCsv {
                input_res: input_res.into(),
                output_csv: output_csv.into(),
            })
        }
        (None, None, None, None) => Err(
            "Nothing to convert. Use --in-csv with --out-res, or --in-res with --out-csv"
                .to_string(),
        ),
        (Some(_), None, None, None) => Err("--in-csv requires --out-res".to_string()),
        (None, None, Some(_), None) => Err("--in-res requires --out-csv".to_string()),
        _ => Err(
            "Invalid combination of paths. Use either --in-csv with --out-res, or --in-res with --out-csv"
                .to_string(),
        ),
    }
}

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate a resource directory exists
pub fn validate_dir_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("Directory does not exist: {}", path));
    }

    if !path_obj.is_dir() {
        return Err(format!("Path is not a directory: {}", path));
    }

    Ok(())
}

/// Validate output directory exists or can be created
pub fn validate_output_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if path_obj.is_dir() {
        return Err(format!("Output path is a directory: {}", path));
    }

    if let Some(parent) = path_obj.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            // Try to create the directory
            if let Err(e) = std::fs::create_dir_all(parent) {
                return Err(format!("Cannot create output directory: {}", e));
            }
        }
    }

    Ok(())
}

/// Validate a locale code using unic-langid.
///
/// Android folder qualifiers (`pt-rBR`) are accepted and checked as `pt-BR`.
pub fn validate_locale(locale: &str) -> Result<(), String> {
    if locale.is_empty() {
        return Err("Locale code cannot be empty".to_string());
    }

    let bcp47 = match ANDROID_REGION.captures(locale) {
        Some(caps) => format!("{}-{}", &caps[1], &caps[2]),
        None => locale.to_string(),
    };

    let alphabetic_language = bcp47
        .split('-')
        .next()
        .is_some_and(|l| l.chars().all(|c| c.is_ascii_alphabetic()));

    match bcp47.parse::<LanguageIdentifier>() {
        Ok(lang_id) if alphabetic_language && lang_id.language.as_str() != "und" => Ok(()),
        _ => Err(format!(
            "Invalid locale code: {}. Expected a language code such as `fr`, `pt-BR` or `pt-rBR`",
            locale
        )),
    }
}

/// Parse a comma separated locale list, dropping duplicates.
pub fn parse_locales(list: &str) -> Result<Vec<String>, String> {
    let mut locales: Vec<String> = Vec::new();
    for locale in list.split(',').map(str::trim).filter(|l| !l.is_empty()) {
        validate_locale(locale)?;
        if !locales.iter().any(|l| l == locale) {
            locales.push(locale.to_string());
        }
    }
    Ok(locales)
}

/// Replace the `\t`, `\n` and `\s` escapes with the characters they name.
pub fn unescape(value: &str) -> String {
    value
        .replace("\\t", "\t")
        .replace("\\n", "\n")
        .replace("\\s", " ")
}

/// Parse the table field separator. It must be a single ASCII character.
pub fn parse_separator(value: &str) -> Result<u8, String> {
    let unescaped = unescape(value);
    match unescaped.as_bytes() {
        [b'"' | b'\n' | b'\r'] => Err(format!("Separator cannot be {:?}", unescaped)),
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!(
            "Separator must be a single ASCII character, got {:?}",
            value
        )),
    }
}

/// Parse the XML indentation unit. Only whitespace is allowed.
pub fn parse_indent(value: &str) -> Result<String, String> {
    let unescaped = unescape(value);
    if unescaped.chars().all(char::is_whitespace) {
        Ok(unescaped)
    } else {
        Err(format!("Indent must contain only whitespace, got {:?}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_locale() {
        assert!(validate_locale("fr").is_ok());
        assert!(validate_locale("pt-BR").is_ok());
        assert!(validate_locale("pt-rBR").is_ok());
        assert!(validate_locale("zh-Hans").is_ok());
        assert!(validate_locale("").is_err());
        assert!(validate_locale("not a locale").is_err());
        assert!(validate_locale("123").is_err());
    }

    #[test]
    fn test_parse_locales() {
        assert_eq!(
            parse_locales("fr, de,,fr").unwrap(),
            vec!["fr".to_string(), "de".to_string()]
        );
        assert!(parse_locales("").unwrap().is_empty());
        assert!(parse_locales("fr,???").is_err());
    }

    #[test]
    fn test_parse_separator() {
        assert_eq!(parse_separator(",").unwrap(), b',');
        assert_eq!(parse_separator(";").unwrap(), b';');
        assert_eq!(parse_separator("\\t").unwrap(), b'\t');
        assert!(parse_separator(";;").is_err());
        assert!(parse_separator("\"").is_err());
        assert!(parse_separator("é").is_err());
        assert!(parse_separator("").is_err());
    }

    #[test]
    fn test_parse_indent() {
        assert_eq!(parse_indent("\\t").unwrap(), "\t");
        assert_eq!(parse_indent("\\s\\s\\s\\s").unwrap(), "    ");
        assert_eq!(parse_indent("  ").unwrap(), "  ");
        assert!(parse_indent("--").is_err());
    }

    #[test]
    fn test_resolve_direction_requires_a_pair() {
        assert!(resolve_direction(None, None, None, None).is_err());

        let err = resolve_direction(Some("a.csv".into()), None, None, None).unwrap_err();
        assert!(err.contains("--out-res"));

        let err = resolve_direction(
            Some("a.csv".into()),
            Some("res".into()),
            Some("res".into()),
            Some("b.csv".into()),
        )
        .unwrap_err();
        assert!(err.contains("Invalid combination"));
    }

    #[test]
    fn test_resolve_direction_checks_input_exists() {
        let err = resolve_direction(
            Some("/definitely/missing.csv".into()),
            Some("res".into()),
            None,
            None,
        )
        .unwrap_err();
        assert!(err.contains("File does not exist"));
    }
}

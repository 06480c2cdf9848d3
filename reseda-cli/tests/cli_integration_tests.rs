use indoc::indoc;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn reseda_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("reseda"))
}

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const TABLE: &str = indoc! {r#"
    "META","NAME","","fr","DOCS"
    "","hello","Hello","Bonjour","Greeting"
    "-","","","",""
    "a#","Planets","","",""
    "a","planets","Mercury","Mercure",""
    "a","planets","Venus","Vénus",""
"#};

#[test]
fn test_convert_csv_to_res() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("strings.csv");
    let res = temp_dir.path().join("res");
    write_file(&input, TABLE);

    let output = reseda_cmd()
        .args([
            "convert",
            "--in-csv",
            input.to_str().unwrap(),
            "--out-res",
            res.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✅ Wrote `Default`: 1 strings, 1 arrays"));
    assert!(stdout.contains("✅ Wrote `fr`: 1 strings, 1 arrays"));

    let strings = fs::read_to_string(res.join("values/strings.xml")).unwrap();
    assert!(strings.contains(r#"<string name="hello" documentation="Greeting">Hello</string>"#));
    let arrays = fs::read_to_string(res.join("values-fr/arrays.xml")).unwrap();
    assert!(arrays.contains("<!-- Planets -->"));
    assert!(arrays.contains("<item>Vénus</item>"));
}

#[test]
fn test_convert_res_to_csv_and_back() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("strings.csv");
    let res = temp_dir.path().join("res");
    let table = temp_dir.path().join("out/strings.csv");
    write_file(&input, TABLE);

    let status = reseda_cmd()
        .args([
            "convert",
            "--in-csv",
            input.to_str().unwrap(),
            "--out-res",
            res.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let output = reseda_cmd()
        .args([
            "convert",
            "--in-res",
            res.to_str().unwrap(),
            "--out-csv",
            table.to_str().unwrap(),
            "--locales",
            "fr",
        ])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(fs::read_to_string(&table).unwrap(), TABLE);
}

#[test]
fn test_untranslated_strings_fail_with_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("strings.csv");
    let res = temp_dir.path().join("res");
    write_file(&input, "META,NAME,,fr\n,k1,Hello,\n");

    let output = reseda_cmd()
        .args([
            "convert",
            "--in-csv",
            input.to_str().unwrap(),
            "--out-res",
            res.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("untranslated `k1` for locale(s): fr"));
    assert!(!res.exists());

    let output = reseda_cmd()
        .args([
            "convert",
            "--in-csv",
            input.to_str().unwrap(),
            "--out-res",
            res.to_str().unwrap(),
            "--force-untranslated",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let fr = fs::read_to_string(res.join("values-fr/strings.xml")).unwrap();
    assert!(fr.contains(r#"<string name="k1">Hello</string>"#));
}

#[test]
fn test_convert_rejects_unpaired_arguments() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("strings.csv");
    write_file(&input, TABLE);

    let output = reseda_cmd()
        .args([
            "convert",
            "--in-csv",
            input.to_str().unwrap(),
            "--out-csv",
            "other.csv",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid combination"));
}

#[test]
fn test_convert_with_separator_and_indent() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("strings.csv");
    let res = temp_dir.path().join("res");
    write_file(&input, "META;NAME;\n;hello;Hello, world\n");

    let output = reseda_cmd()
        .args([
            "convert",
            "--in-csv",
            input.to_str().unwrap(),
            "--out-res",
            res.to_str().unwrap(),
            "--separator",
            ";",
            "--indent",
            "\\t",
        ])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let strings = fs::read_to_string(res.join("values/strings.xml")).unwrap();
    assert!(strings.contains("\t<string name=\"hello\">Hello, world</string>"));
}

#[test]
fn test_convert_rejects_invalid_locale() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("strings.csv");
    write_file(&input, TABLE);

    let output = reseda_cmd()
        .args([
            "convert",
            "--in-csv",
            input.to_str().unwrap(),
            "--out-res",
            temp_dir.path().join("res").to_str().unwrap(),
            "--locales",
            "fr,not a locale",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid locale code"));
}

#[test]
fn test_debug_dumps_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("strings.csv");
    let json_file = temp_dir.path().join("sets.json");
    write_file(&input, TABLE);

    let output = reseda_cmd()
        .args([
            "debug",
            "--in-csv",
            input.to_str().unwrap(),
            "-o",
            json_file.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "Command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_file).unwrap()).unwrap();
    let sets = json.as_array().unwrap();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0]["locale"], "");
    assert_eq!(sets[1]["locale"], "fr");
    assert_eq!(sets[1]["records"][0]["value"], "Bonjour");
}

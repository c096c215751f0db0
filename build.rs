use std::collections::{ BTreeSet, HashSet };
use std::fmt::Write as _;
use std::{ fs, path::Path, path::PathBuf };
use serde::Deserialize;
use serde_json::{ Value, Map };
use anyhow::{ bail, Context, Result };

/// Contents of `locales/languages.json`.
#[derive(Debug, Deserialize)]
struct LanguagesManifest {
    default: String,
    languages: Vec<LanguageEntry>,
}

#[derive(Debug, Deserialize)]
struct LanguageEntry {
    code: String,
    name: String,
}

const MANIFEST_FILE: &str = "languages.json";

fn main() -> Result<()> {
    let locales_dir = Path::new(&std::env::var("CARGO_MANIFEST_DIR")?).join("locales");
    let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);

    println!("cargo:rerun-if-changed=locales");

    let manifest = read_manifest(&locales_dir)?;
    let translations = build_translations(&locales_dir, &manifest)?;
    report_coverage(&manifest, &translations);

    let default_catalog = translations
        .get(&manifest.default)
        .with_context(|| format!("no catalog for default locale '{}'", manifest.default))?;
    let keys = render_keys(default_catalog)?;

    fs::write(out_dir.join("registry.rs"), render_registry(&manifest)?)?;
    fs::write(out_dir.join("keys.rs"), keys)?;
    fs::write(
        out_dir.join("all_translations.json"),
        serde_json::to_string_pretty(&Value::Object(translations))?
    )?;

    Ok(())
}

fn read_manifest(locales_dir: &Path) -> Result<LanguagesManifest> {
    let path = locales_dir.join(MANIFEST_FILE);
    let content = fs
        ::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let manifest: LanguagesManifest = serde_json
        ::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    if manifest.languages.is_empty() {
        bail!("{} must register at least one language", path.display());
    }

    let mut seen = HashSet::new();
    for language in &manifest.languages {
        if language.code.is_empty() || language.code.contains(['/', '.']) {
            bail!("invalid locale code '{}': must be a single URL path segment", language.code);
        }
        if !seen.insert(language.code.as_str()) {
            bail!("locale '{}' is registered twice", language.code);
        }
    }

    if !seen.contains(manifest.default.as_str()) {
        bail!("default locale '{}' is not a registered language", manifest.default);
    }

    Ok(manifest)
}

fn build_translations(locales_dir: &Path, manifest: &LanguagesManifest) -> Result<Map<String, Value>> {
    let mut translations = Map::new();

    for language in &manifest.languages {
        let path = locales_dir.join(format!("{}.json", language.code));
        let content = fs
            ::read_to_string(&path)
            .with_context(|| format!("missing catalog for locale '{}'", language.code))?;
        let json: Value = serde_json
            ::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        if !json.is_object() {
            bail!("{} must contain a JSON object", path.display());
        }
        validate_entry(&language.code, "", &json)?;
        translations.insert(language.code.clone(), json);
    }

    // Catalog files nobody registered are never bundled.
    for entry in fs::read_dir(locales_dir)? {
        let file_path = entry?.path();
        if file_path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let stem = file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if stem != "languages" && !translations.contains_key(stem) {
            println!("cargo:warning={} is not listed in {MANIFEST_FILE} and is ignored", file_path.display());
        }
    }

    Ok(translations)
}

fn validate_entry(locale: &str, path: &str, value: &Value) -> Result<()> {
    match value {
        Value::String(text) => {
            if text.is_empty() {
                println!(
                    "cargo:warning=locale '{locale}' has an empty string at '{path}'; it will fall back to the default locale"
                );
            }
            Ok(())
        }
        Value::Object(children) => {
            for (segment, child) in children {
                if segment.is_empty() || segment.contains('.') {
                    bail!("locale '{locale}': invalid key segment '{segment}' under '{path}'");
                }
                validate_entry(locale, &join_path(path, segment), child)?;
            }
            Ok(())
        }
        other => bail!("locale '{locale}': '{path}' must be a string or an object, found {other}"),
    }
}

fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() { segment.to_string() } else { format!("{prefix}.{segment}") }
}

fn key_paths(value: &Value, prefix: &str, out: &mut BTreeSet<String>) {
    match value {
        Value::String(_) if !prefix.is_empty() => {
            out.insert(prefix.to_string());
        }
        Value::Object(children) => {
            for (segment, child) in children {
                key_paths(child, &join_path(prefix, segment), out);
            }
        }
        _ => {}
    }
}

fn report_coverage(manifest: &LanguagesManifest, translations: &Map<String, Value>) {
    let mut expected = BTreeSet::new();
    if let Some(default_catalog) = translations.get(&manifest.default) {
        key_paths(default_catalog, "", &mut expected);
    }

    for (code, catalog) in translations {
        if code == &manifest.default {
            continue;
        }
        let mut present = BTreeSet::new();
        key_paths(catalog, "", &mut present);

        for key in expected.difference(&present) {
            println!(
                "cargo:warning=locale '{code}' is missing '{key}'; lookups fall back to '{}'",
                manifest.default
            );
        }
        for key in present.difference(&expected) {
            println!(
                "cargo:warning=locale '{code}' defines '{key}' which the default locale '{}' does not",
                manifest.default
            );
        }
    }
}

// ---------- Code generation ----------

fn render_registry(manifest: &LanguagesManifest) -> Result<String> {
    let mut out = String::from("// @generated by build.rs from locales/languages.json\n\n");

    writeln!(out, "/// Every supported locale, in declaration order.")?;
    writeln!(out, "pub static LANGUAGES: &[Locale] = &[")?;
    for language in &manifest.languages {
        writeln!(
            out,
            "    Locale {{ code: {:?}, display_name: {:?} }},",
            language.code,
            language.name
        )?;
    }
    writeln!(out, "];\n")?;

    let default_name = manifest.languages
        .iter()
        .find(|language| language.code == manifest.default)
        .map(|language| language.name.as_str())
        .unwrap_or_default();

    writeln!(out, "/// Code of the locale every lookup falls back to.")?;
    writeln!(out, "pub const DEFAULT_LOCALE: &str = {:?};\n", manifest.default)?;
    writeln!(out, "static DEFAULT_LANGUAGE: Locale = Locale {{ code: {:?}, display_name: {:?} }};", manifest.default, default_name)?;

    Ok(out)
}

fn render_keys(catalog: &Value) -> Result<String> {
    let Value::Object(root) = catalog else {
        bail!("default catalog must be a JSON object");
    };

    let mut out = String::from("// @generated by build.rs from the default locale catalog\n\n");
    let mut all = Vec::new();
    render_key_scope(root, "", 0, &mut out, &mut all)?;
    all.sort();

    writeln!(out, "/// Every key of the default locale, sorted.")?;
    writeln!(out, "pub const ALL: &[crate::keys::Key] = &[")?;
    for path in &all {
        writeln!(out, "    crate::keys::Key::new({path:?}),")?;
    }
    writeln!(out, "];")?;

    Ok(out)
}

fn render_key_scope(
    node: &Map<String, Value>,
    prefix: &str,
    depth: usize,
    out: &mut String,
    all: &mut Vec<String>
) -> Result<()> {
    let indent = "    ".repeat(depth);
    let mut idents = HashSet::new();
    if depth == 0 {
        idents.insert("ALL".to_string());
    }

    for (segment, value) in node {
        let path = join_path(prefix, segment);
        let ident = match value {
            Value::String(_) => snake_case(segment).to_uppercase(),
            _ => module_ident(segment),
        };
        if !idents.insert(ident.clone()) {
            bail!("key '{path}' maps to the identifier `{ident}`, which is already taken in its scope");
        }

        match value {
            Value::String(_) => {
                writeln!(out, "{indent}/// `{path}`")?;
                writeln!(out, "{indent}pub const {ident}: crate::keys::Key = crate::keys::Key::new({path:?});")?;
                all.push(path);
            }
            Value::Object(children) => {
                writeln!(out, "{indent}/// Keys under `{path}`.")?;
                writeln!(out, "{indent}pub mod {ident} {{")?;
                render_key_scope(children, &path, depth + 1, out, all)?;
                writeln!(out, "{indent}}}")?;
            }
            other => bail!("'{path}' must be a string or an object, found {other}"),
        }
    }

    Ok(())
}

const RESERVED: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

fn module_ident(segment: &str) -> String {
    let ident = snake_case(segment);
    if RESERVED.contains(&ident.as_str()) { format!("{ident}_") } else { ident }
}

/// `pageTitle` and `page-title` both become `page_title`.
fn snake_case(segment: &str) -> String {
    let mut ident = String::with_capacity(segment.len() + 4);
    let mut prev_lower = false;

    for c in segment.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                ident.push('_');
            }
            ident.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else if c.is_ascii_alphanumeric() {
            ident.push(c);
            prev_lower = true;
        } else {
            ident.push('_');
            prev_lower = false;
        }
    }

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if ident.chars().all(|c| c == '_') {
        ident.push_str("key");
    }
    ident
}

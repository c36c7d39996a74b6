use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tokenlint::config::{resolve_effective, Effective};
use tokenlint::fix::run_fix;
use tokenlint::lint::run_lint;
use tokenlint::models::FixStatus;

fn tree(root: &Path, files: &[(&str, &str)]) -> Effective {
    fs::write(root.join("tokenlint.toml"), "roots = [\"src\"]\n").unwrap();
    for (rel, body) in files {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(p, body).unwrap();
    }
    resolve_effective(root.to_str(), &[], None, None, None).unwrap()
}

fn rules_on(eff: &Effective, file: &str) -> Vec<(usize, String)> {
    run_lint(eff)
        .unwrap()
        .violations
        .into_iter()
        .filter(|v| v.path == file)
        .map(|v| (v.line_number, v.rule_id))
        .collect()
}

#[test]
fn single_line_properties() {
    let dir = tempdir().unwrap();
    let eff = tree(
        dir.path(),
        &[
            ("src/color.scss", ".a {\n  color: #ffffff;\n}\n"),
            ("src/token.scss", ".a {\n  padding: var(--scale-4);\n}\n"),
            ("src/spacing.scss", ".a {\n  margin: 16px;\n}\n"),
            ("src/layer.scss", ".a {\n  z-index: 999;\n}\n"),
            (
                "src/mix.scss",
                ".a {\n  background: color-mix(in srgb, red 50%, blue 50%);\n}\n",
            ),
            ("src/comment.scss", "// color: #fff;\n"),
        ],
    );
    assert_eq!(
        rules_on(&eff, "src/color.scss"),
        vec![(2, "hardcoded-color".to_string())]
    );
    assert!(rules_on(&eff, "src/token.scss").is_empty());
    assert_eq!(
        rules_on(&eff, "src/spacing.scss"),
        vec![(2, "hardcoded-spacing".to_string())]
    );
    assert_eq!(
        rules_on(&eff, "src/layer.scss"),
        vec![(2, "raw-z-index".to_string())]
    );
    assert!(rules_on(&eff, "src/mix.scss").is_empty());
    assert!(rules_on(&eff, "src/comment.scss").is_empty());
}

#[test]
fn excluded_paths_stay_silent() {
    let dir = tempdir().unwrap();
    let eff = tree(
        dir.path(),
        &[
            ("src/tokens/_colors.scss", "$brand: #ff0000;\nmargin: 16px;\n"),
            ("src/generated/out.scss", "z-index: 999;\n"),
            ("src/demos/page.scss", "color: lighten(#000, 10%);\n"),
        ],
    );
    let res = run_lint(&eff).unwrap();
    assert!(res.violations.is_empty());
    assert_eq!(res.summary.excluded, 3);
    assert_eq!(res.exit_code(), 0);
}

#[test]
fn fix_clears_migratable_violations_and_is_idempotent() {
    let dir = tempdir().unwrap();
    let eff = tree(
        dir.path(),
        &[(
            "src/card.scss",
            ".card {\n  margin: 16px;\n  z-index: 999;\n  color: var(--text-muted);\n}\n",
        )],
    );
    assert_eq!(run_lint(&eff).unwrap().exit_code(), 1);

    let first = run_fix(&eff, true).unwrap();
    assert_eq!(first.changed(), 1);
    assert_eq!(first.results[0].status, FixStatus::Fixed);
    assert_eq!(first.exit_code(false), 0);
    let body = fs::read_to_string(dir.path().join("src/card.scss")).unwrap();
    assert_eq!(
        body,
        ".card {\n  margin: var(--scale-4);\n  z-index: var(--z-index-overlay);\n  color: var(--color-text-subtle);\n}\n"
    );

    let relint = run_lint(&eff).unwrap();
    assert!(relint.violations.is_empty(), "{:?}", relint.violations);

    let second = run_fix(&eff, true).unwrap();
    assert_eq!(second.changed(), 0);
    assert_eq!(second.exit_code(true), 0);
}

#[test]
fn multiline_colour_values_are_reported() {
    let dir = tempdir().unwrap();
    let eff = tree(
        dir.path(),
        &[(
            "src/hero.scss",
            ".hero {\n  background: linear-gradient(\n    #ff0000,\n    #00ff00\n  );\n}\n",
        )],
    );
    assert_eq!(
        rules_on(&eff, "src/hero.scss"),
        vec![
            (3, "hardcoded-color".to_string()),
            (4, "hardcoded-color".to_string())
        ]
    );
}

#[test]
fn fix_leaves_bem_modifiers_alone() {
    let dir = tempdir().unwrap();
    let body = ".btn--size-lg {\n  gap: var(--space-inline-lg);\n}\n.btn {\n  &--size-md {\n    color: red;\n  }\n}\n";
    let eff = tree(dir.path(), &[("src/btn.scss", body)]);
    run_fix(&eff, true).unwrap();
    let out = fs::read_to_string(dir.path().join("src/btn.scss")).unwrap();
    assert_eq!(out, body.replace("var(--space-inline-lg)", "var(--space-inline-l)"));
}

use std::path::{Path, PathBuf};

use dbinit::error::{Error, Result};
use dbinit::resolve;

use super::setup;

fn relative(root: &Path, files: Vec<PathBuf>) -> Vec<String> {
    files
        .iter()
        .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_sorted_by_name() -> Result<()> {
    let dir = setup(&[("b.sql", ""), ("a.sql", ""), ("C.sql", ""), ("10.sql", ""), ("9.sql", "")])?;
    let files = resolve(dir.path())?;
    assert_eq!(relative(dir.path(), files), vec!["10.sql", "9.sql", "C.sql", "a.sql", "b.sql"]);
    Ok(())
}

#[test]
fn test_recurses_depth_first() -> Result<()> {
    let dir = setup(&[
        ("02_data/b.sql", ""),
        ("02_data/a.sql", ""),
        ("01_schema.sql", ""),
        ("03_views/nested/v.sql", ""),
        ("03_views/u.sql", ""),
        ("04_final.sql", ""),
    ])?;
    let files = resolve(dir.path())?;
    assert_eq!(
        relative(dir.path(), files),
        vec![
            "01_schema.sql",
            "02_data/a.sql",
            "02_data/b.sql",
            "03_views/nested/v.sql",
            "03_views/u.sql",
            "04_final.sql",
        ]
    );
    Ok(())
}

#[test]
fn test_manifest_overrides_walk() -> Result<()> {
    let dir = setup(&[
        ("x.sql", ""),
        ("y.sql", ""),
        ("z.sql", ""),
        ("sub/w.sql", ""),
        (
            "changelog.xml",
            r#"<databaseChangeLog>
                <include file="y.sql"/>
                <include file="x.sql"/>
            </databaseChangeLog>"#,
        ),
    ])?;
    let files = resolve(dir.path())?;
    assert_eq!(relative(dir.path(), files), vec!["y.sql", "x.sql"]);
    Ok(())
}

#[test]
fn test_first_manifest_wins() -> Result<()> {
    let dir = setup(&[
        ("a.xml", r#"<databaseChangeLog><include file="first.sql"/></databaseChangeLog>"#),
        ("b.xml", r#"<databaseChangeLog><include file="second.sql"/></databaseChangeLog>"#),
    ])?;
    let files = resolve(dir.path())?;
    assert_eq!(relative(dir.path(), files), vec!["first.sql"]);
    Ok(())
}

#[test]
fn test_manifest_in_subfolder() -> Result<()> {
    let dir = setup(&[
        ("01.sql", ""),
        ("02/changelog.xml", r#"<databaseChangeLog><include file="later.sql"/><include file="earlier.sql"/></databaseChangeLog>"#),
        ("02/earlier.sql", ""),
        ("02/later.sql", ""),
        ("03.sql", ""),
    ])?;
    let files = resolve(dir.path())?;
    assert_eq!(relative(dir.path(), files), vec!["01.sql", "02/later.sql", "02/earlier.sql", "03.sql"]);
    Ok(())
}

#[test]
fn test_manifest_includes_not_checked() -> Result<()> {
    let dir = setup(&[("changelog.xml", r#"<databaseChangeLog><include file="missing.sql"/></databaseChangeLog>"#)])?;
    let files = resolve(dir.path())?;
    assert_eq!(relative(dir.path(), files), vec!["missing.sql"]);
    Ok(())
}

#[test]
fn test_malformed_manifest() -> Result<()> {
    let dir = setup(&[("a.sql", ""), ("changelog.xml", "<changeLog/>")])?;
    assert!(matches!(resolve(dir.path()), Err(Error::Parse(_))));
    Ok(())
}

#[test]
fn test_empty_folder() -> Result<()> {
    let dir = setup(&[])?;
    assert!(resolve(dir.path())?.is_empty());
    Ok(())
}

#[test]
fn test_missing_folder() -> Result<()> {
    let dir = setup(&[])?;
    assert!(matches!(resolve(dir.path().join("nope")), Err(Error::IO(_))));
    Ok(())
}

#[test]
fn test_idempotent() -> Result<()> {
    let dir = setup(&[("b/2.sql", ""), ("b/1.sql", ""), ("a.sql", "")])?;
    assert_eq!(resolve(dir.path())?, resolve(dir.path())?);
    Ok(())
}

//! Engine rendering templates from a root directory on disk.

use std::fs;
use std::sync::Arc;
use std::thread;

use htl_engine::{host_args, Engine, EngineError, EngineOptions, SourceError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn setup() -> (TempDir, Engine) {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("pages")).unwrap();
    fs::write(
        dir.path().join("pages/greeting.html"),
        "<p>Hello, @name!</p>\n",
    )
    .unwrap();
    fs::write(dir.path().join("contact.html"), "mail me at me@@site.org").unwrap();

    let engine = Engine::new(EngineOptions::new(dir.path()).unwrap());
    (dir, engine)
}

#[test]
fn test_render_from_disk() {
    let (_dir, engine) = setup();
    let out = engine
        .render("pages/greeting.html", &host_args! { "name" => "A & B" })
        .unwrap();
    assert_eq!(out, "<p>Hello, A &amp; B!</p>\n");
}

#[test]
fn test_render_from_json_args() {
    let (_dir, engine) = setup();
    let json: serde_json::Value = serde_json::from_str(r#"{ "name": ["x", 2, null] }"#).unwrap();
    let out = engine.render("pages/greeting.html", &json.into()).unwrap();
    assert_eq!(out, "<p>Hello, [x, 2, null]!</p>\n");
}

#[test]
fn test_literal_at() {
    let (_dir, engine) = setup();
    assert_eq!(
        engine.render("contact.html", &host_args! {}).unwrap(),
        "mail me at me@site.org"
    );
}

#[test]
fn test_sandbox() {
    let (dir, engine) = setup();
    let outside = dir.path().parent().unwrap().join("outside.html");
    let escaped = format!("../{}", outside.file_name().unwrap().to_string_lossy());

    for file in [escaped.as_str(), "pages/../../x.html", outside.to_str().unwrap()] {
        let err = engine.render(file, &host_args! {}).unwrap_err();
        assert!(
            matches!(err, EngineError::Source(SourceError::OutsideRoot { .. })),
            "{file}: {err:?}"
        );
    }
}

#[test]
fn test_directory_is_rejected() {
    let (_dir, engine) = setup();
    let err = engine.compile("pages").unwrap_err();
    assert!(matches!(
        err,
        EngineError::Source(SourceError::NotAFile { .. })
    ));
}

#[test]
fn test_shared_across_threads() {
    let (_dir, engine) = setup();
    let engine = Arc::new(engine);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let args = host_args! { "name" => format!("t{i}") };
                engine.render("pages/greeting.html", &args).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("<p>Hello, t{i}!</p>\n"));
    }
    assert!(engine.is_cached("pages/greeting.html"));
}

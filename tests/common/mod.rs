#![allow(dead_code)]

use std::fs;
use std::io::Read;

use flate2::read::GzDecoder;
use tempfile::TempDir;

pub const INDEX_HTML: &str = "<!doctype html><div id=\"app\"></div><script src=\"/app.js\"></script>";

/// A stylesheet big enough to span several packets and repetitive enough to
/// shrink well below one.
pub fn big_css() -> String {
    ".btn { color: #333; padding: 4px 8px; border-radius: 2px; }\n".repeat(200)
}

/// Write `files` (relative path, contents) under a fresh temporary root.
pub fn tree(files: &[(&str, &[u8])]) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for (rel, contents) in files {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, contents).expect("write file");
    }
    dir
}

/// The usual SPA build output: shell, script, stylesheet, an image and some
/// files that must never be published.
pub fn spa_tree() -> TempDir {
    let css = big_css();
    tree(&[
        ("index.html", INDEX_HTML.as_bytes()),
        ("app.js", b"console.log('hello');\n".as_slice()),
        ("style.css", css.as_bytes()),
        ("img/logo.png", [0x89, b'P', b'N', b'G'].as_slice()),
        ("img/icons/check.svg", b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>".as_slice()),
        (".env", b"SECRET=1".as_slice()),
        (".git/HEAD", b"ref: refs/heads/main".as_slice()),
        ("_drafts/new.html", b"<p>draft</p>".as_slice()),
        ("img/_raw.psd", b"raw".as_slice()),
    ])
}

pub fn gunzip(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    GzDecoder::new(data).read_to_end(&mut out).expect("valid gzip stream");
    out
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

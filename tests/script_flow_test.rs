//! End-to-end tests driving a session through script files.

mod common;

use common::{koala, landscape, Workspace};
use pretty_assertions::assert_eq;
use rasterlab::codec::load_image;
use rasterlab::{EditError, Session, SessionConfig, SessionError};

#[test]
fn test_brighten_then_darken_round_trips_through_files() {
    let ws = Workspace::new();
    ws.write_ppm("koala.ppm", &koala());
    let script = ws.write_script(
        "round_trip.txt",
        "load {dir}/koala.ppm koala\n\
         brighten 10 koala koala-bright\n\
         brighten -10 koala-bright koala-back\n\
         save {dir}/koala-back.ppm koala-back\n",
    );

    let mut session = Session::default();
    let report = session.run_script(&script).unwrap();

    assert!(report.is_success());
    assert_eq!(report.executed, 4);
    assert_eq!(ws.read_ppm(&ws.path("koala-back.ppm")), koala());
}

#[test]
fn test_split_and_combine_restores_image() {
    let ws = Workspace::new();
    ws.write_ppm("land.ppm", &landscape());
    let script = ws.write_script(
        "channels.txt",
        "# split into channels and back\n\
         load {dir}/land.ppm land\n\
         \n\
         rgb-split land land-r land-g land-b\n\
         rgb-combine land-rgb land-r land-g land-b\n\
         save {dir}/land-rgb.png land-rgb\n",
    );

    let mut session = Session::default();
    let report = session.run_script(&script).unwrap();

    assert!(report.is_success());
    assert_eq!(report.executed, 4);
    assert_eq!(session.store().get("land-rgb"), Some(&landscape()));
    assert_eq!(load_image(&ws.path("land-rgb.png")).unwrap(), landscape());
}

#[test]
fn test_failed_commands_are_collected() {
    let ws = Workspace::new();
    ws.write_ppm("koala.ppm", &koala());
    let script = ws.write_script(
        "failures.txt",
        "load {dir}/koala.ppm koala\n\
         levels-adjust 2 2 2 koala koala-flat\n\
         sepia ghost ghost-sepia\n\
         emboss koala koala-emboss\n\
         levels-adjust 20 100 255 koala koala-levels\n",
    );

    let mut session = Session::default();
    let report = session.run_script(&script).unwrap();

    assert_eq!(report.executed, 2);
    let lines: Vec<usize> = report.failures.iter().map(|f| f.line_number).collect();
    assert_eq!(lines, vec![2, 3, 4]);
    assert!(matches!(
        report.failures[0].error,
        SessionError::Edit(EditError::InvalidParameter(_))
    ));
    assert!(matches!(
        &report.failures[1].error,
        SessionError::Edit(EditError::NameNotFound(name)) if name == "ghost"
    ));
    assert!(matches!(
        report.failures[2].error,
        SessionError::UnknownCommand(_)
    ));
    assert!(!session.store().contains("koala-flat"));
    assert!(session.store().contains("koala-levels"));
}

#[test]
fn test_stop_on_first_failure() {
    let ws = Workspace::new();
    ws.write_ppm("koala.ppm", &koala());
    let script = ws.write_script(
        "strict.txt",
        "load {dir}/koala.ppm koala\n\
         compress 150 koala koala-c\n\
         sepia koala koala-sepia\n",
    );

    let config = SessionConfig {
        continue_on_error: false,
        ..SessionConfig::default()
    };
    let mut session = Session::new(config);
    let report = session.run_script(&script).unwrap();

    assert_eq!(report.executed, 1);
    assert_eq!(report.failures.len(), 1);
    assert!(!session.store().contains("koala-sepia"));
}

#[test]
fn test_status_lines_are_reported() {
    let ws = Workspace::new();
    ws.write_ppm("koala.ppm", &koala());
    let script = ws.write_script(
        "status.txt",
        "load {dir}/koala.ppm koala\nhistogram koala koala-hist\n",
    );

    let mut session = Session::default();
    let mut out = Vec::new();
    session.run_script_to(&script, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Image load operation successful."));
    assert!(text.contains("Image histogram operation successful."));
    assert!(text.contains(&format!("Script {} ran successfully.", script.display())));
    assert_eq!(
        session.store().get("koala-hist").map(|b| b.dimensions()),
        Some((256, 256))
    );
}

#[test]
fn test_nested_scripts_share_the_store() {
    let ws = Workspace::new();
    ws.write_ppm("koala.ppm", &koala());
    ws.write_script("inner.txt", "vertical-flip koala koala-v\n");
    let outer = ws.write_script(
        "outer.txt",
        "load {dir}/koala.ppm koala\nrun {dir}/inner.txt\nvertical-flip koala-v koala-vv\n",
    );

    let mut session = Session::default();
    let report = session.run_script(&outer).unwrap();

    assert!(report.is_success());
    assert_eq!(session.store().get("koala-vv"), Some(&koala()));
}

#[test]
fn test_self_referencing_script_is_rejected() {
    let ws = Workspace::new();
    let script = ws.write_script("loop.txt", "run {dir}/loop.txt\n");

    let mut session = Session::default();
    let report = session.run_script(&script).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        SessionError::ScriptRecursion(_)
    ));
}

#[test]
fn test_missing_script_is_io_error() {
    let ws = Workspace::new();
    let mut session = Session::default();
    assert!(matches!(
        session.run_script(&ws.path("nope.txt")),
        Err(SessionError::Io(_))
    ));
}

#[test]
fn test_split_suffix_boundaries() {
    let ws = Workspace::new();
    ws.write_ppm("land.ppm", &landscape());
    let script = ws.write_script(
        "split.txt",
        "load {dir}/land.ppm land\n\
         sharpen land land-none split 0\n\
         sepia land land-all split 100\n\
         sepia land land-sepia\n",
    );

    let mut session = Session::default();
    session.run_script(&script).unwrap();

    let store = session.store();
    assert_eq!(store.get("land-none"), Some(&landscape()));
    assert_eq!(store.get("land-all"), store.get("land-sepia"));
}

#[test]
fn test_compress_extremes() {
    let ws = Workspace::new();
    ws.write_ppm("land.ppm", &landscape());
    let script = ws.write_script(
        "compress.txt",
        "load {dir}/land.ppm land\n\
         compress 0 land land-0\n\
         compress 100 land land-100\n\
         save {dir}/land-100.bmp land-100\n",
    );

    let mut session = Session::default();
    let report = session.run_script(&script).unwrap();
    assert!(report.is_success());

    assert_eq!(session.store().get("land-0"), Some(&landscape()));
    let black = load_image(&ws.path("land-100.bmp")).unwrap();
    assert_eq!(black.dimensions(), (6, 4));
    assert!(black.to_raw().iter().all(|&v| v == 0));
}

//! Binary-level tests: run `escale` the way a user or script would.
//!
//! Every test gets its own temp directory for the config and preference
//! store, so nothing leaks between runs or into the working tree.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn escale(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_escale"))
        .current_dir(dir)
        .arg("--config")
        .arg(dir.join("escale.toml"))
        .arg("--store")
        .arg(dir.join("prefs.json"))
        .args(args)
        .env_remove("ESCALE_LOG")
        .output()
        .expect("failed to run escale")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const VALID_RESERVATION: &[&str] = &[
    "check",
    "reservation",
    "--name",
    "Alice",
    "--email",
    "a@b.co",
    "--phone",
    "0600000000",
    "--date",
    "2026-10-20",
    "--people",
    "2",
    "--today",
    "2026-10-19",
];

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn valid_reservation_succeeds() {
    let tmp = TempDir::new().unwrap();
    let output = escale(tmp.path(), VALID_RESERVATION);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Reservation: success"));
    assert!(out.contains("Votre réservation a bien été enregistrée."));
}

#[test]
fn blank_reservation_lists_errors_and_fails() {
    let tmp = TempDir::new().unwrap();
    let output = escale(tmp.path(), &["check", "reservation"]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Reservation: error",
            "    Le nom est requis.",
            "    L'email est requis.",
            "    Le numéro de téléphone est requis.",
            "    La date est requise.",
            "    Le nombre de personnes doit être au moins 1.",
        ]
    );
}

#[test]
fn past_date_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let mut args = VALID_RESERVATION.to_vec();
    let date = args.iter().position(|a| *a == "--date").unwrap() + 1;
    args[date] = "2026-10-18";
    let output = escale(tmp.path(), &args);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("La date doit être dans le futur."));
}

#[test]
fn contact_without_message_fails_with_one_error() {
    let tmp = TempDir::new().unwrap();
    let output = escale(
        tmp.path(),
        &["check", "contact", "--name", "Bob", "--email", "bob@x.io"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "Contact: error\n    Le message est requis.\n");
}

#[test]
fn config_changes_message_limit() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("escale.toml"), "[forms]\nmessage_max_chars = 4\n").unwrap();
    let mut args = VALID_RESERVATION.to_vec();
    args.extend(["--message", "Bonjour"]);
    let output = escale(tmp.path(), &args);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Le message est trop long (4 caractères max)."));
}

#[test]
fn invalid_config_is_an_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("escale.toml"), "[slider]\nspeed = 3\n").unwrap();
    let output = escale(tmp.path(), &["check", "contact"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Toml"));
}

// ---------------------------------------------------------------------------
// theme
// ---------------------------------------------------------------------------

#[test]
fn theme_toggle_persists_between_runs() {
    let tmp = TempDir::new().unwrap();

    let first = escale(tmp.path(), &["theme"]);
    assert_eq!(stdout(&first), "Theme: light\n");
    assert!(!tmp.path().join("prefs.json").exists());

    let toggled = escale(tmp.path(), &["theme", "--toggle"]);
    assert!(stdout(&toggled).starts_with("Theme: dark (toggled"));

    let again = escale(tmp.path(), &["theme", "--prefers-dark"]);
    assert_eq!(stdout(&again), "Theme: dark\n");

    let back = escale(tmp.path(), &["theme", "--toggle"]);
    assert!(stdout(&back).starts_with("Theme: light (toggled"));
    let stored = std::fs::read_to_string(tmp.path().join("prefs.json")).unwrap();
    assert!(stored.contains("\"light\""));
}

#[test]
fn system_hint_applies_without_stored_preference() {
    let tmp = TempDir::new().unwrap();
    let output = escale(tmp.path(), &["theme", "--prefers-dark"]);
    assert_eq!(stdout(&output), "Theme: dark\n");
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

#[test]
fn render_home_runs_autoplay() {
    let tmp = TempDir::new().unwrap();
    let output = escale(tmp.path(), &["render", "home", "--elapsed-secs", "5"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let html = stdout(&output);
    assert!(html.starts_with("<!DOCTYPE html><html data-theme=\"light\""));
    assert!(html.contains("style=\"transform: translateX(-100%)\""));
    assert!(stderr(&output).contains("Slider: 2/3"));
}

#[test]
fn render_rejects_elapsed_time_beyond_one_day() {
    let tmp = TempDir::new().unwrap();
    let output = escale(tmp.path(), &["render", "home", "--elapsed-secs", "86401"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--elapsed-secs"));
}

#[test]
fn render_marks_active_link_and_opens_menu() {
    let tmp = TempDir::new().unwrap();
    let output = escale(tmp.path(), &["render", "contact", "--open-menu"]);
    let html = stdout(&output);
    assert!(html.contains("<a class=\"active\" href=\"contact.html\">"));
    assert!(html.contains("aria-expanded=\"true\""));
    assert!(html.contains("class=\"nav-menu open\""));
}

#[test]
fn render_injects_missing_theme_toggle() {
    let tmp = TempDir::new().unwrap();
    let output = escale(
        tmp.path(),
        &["render", "reservation", "--no-theme-toggle", "--prefers-dark"],
    );
    let html = stdout(&output);
    assert!(html.contains("id=\"theme-toggle\""));
    assert!(html.contains("data-theme=\"dark\""));
    assert!(html.contains("aria-label=\"Activer le mode clair\""));
}

// ---------------------------------------------------------------------------
// gen-config
// ---------------------------------------------------------------------------

#[test]
fn gen_config_output_is_loadable() {
    let tmp = TempDir::new().unwrap();
    let output = escale(tmp.path(), &["gen-config"]);
    assert!(output.status.success());
    std::fs::write(tmp.path().join("escale.toml"), stdout(&output)).unwrap();

    let check = escale(tmp.path(), VALID_RESERVATION);
    assert!(check.status.success(), "{}", stderr(&check));
}

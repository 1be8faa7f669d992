use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn platebook(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("platebook").unwrap();
    cmd.env("PLATEBOOK_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("PLATEBOOK_LOG")
        .current_dir(home.path());
    cmd
}

fn add(home: &TempDir, part1: &str, part2: &str, phone: &str) {
    platebook(home)
        .args(["add", part1, part2, phone, "--yes"])
        .assert()
        .success();
}

#[test]
fn add_then_list() {
    let home = TempDir::new().unwrap();

    platebook(&home)
        .args(["add", "abc", "1234", "0912345678", "blue sedan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added ABC-1234 0912345678"));

    platebook(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ABC-1234"))
        .stdout(predicate::str::contains("0912-345-678"))
        .stdout(predicate::str::contains("blue sedan"))
        .stdout(predicate::str::contains("1 record"));

    assert!(home.path().join("platebook.db").exists());
}

#[test]
fn empty_registry_lists_nothing() {
    let home = TempDir::new().unwrap();
    platebook(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found."));
}

#[test]
fn invalid_field_is_rejected() {
    let home = TempDir::new().unwrap();
    platebook(&home)
        .args(["add", "ABC", "1234", "09-12"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("phone number"));
}

#[test]
fn hard_duplicate_fails() {
    let home = TempDir::new().unwrap();
    add(&home, "ABC", "1234", "0912345678");

    platebook(&home)
        .args(["add", "ABC", "1234", "0912345678", "again"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record already exists"));
}

#[test]
fn soft_duplicate_declined_writes_nothing() {
    let home = TempDir::new().unwrap();
    add(&home, "ABC", "1234", "0912345678");

    platebook(&home)
        .args(["add", "ABC", "1234", "0987654321", "--no"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not saved"));

    platebook(&home)
        .args(["search", "--phone", "0987"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found."));
}

#[test]
fn soft_duplicate_prompt_accepts_yes() {
    let home = TempDir::new().unwrap();
    add(&home, "ABC", "1234", "0912345678");

    platebook(&home)
        .args(["add", "ABC", "1234", "0987654321"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("already registered"))
        .stdout(predicate::str::contains("Added ABC-1234 0987654321"));

    platebook(&home)
        .args(["search", "ABC", "1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 records"));
}

#[test]
fn soft_duplicate_prompt_defaults_to_no() {
    let home = TempDir::new().unwrap();
    add(&home, "ABC", "1234", "0912345678");

    platebook(&home)
        .args(["add", "ABC", "1234", "0987654321"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not saved"));
}

#[test]
fn plate_search_is_infix() {
    let home = TempDir::new().unwrap();
    add(&home, "ABCD", "1", "1");
    add(&home, "XYAB", "2", "2");
    add(&home, "QQQ", "3", "3");

    platebook(&home)
        .args(["search", "AB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ABCD-1"))
        .stdout(predicate::str::contains("XYAB-2"))
        .stdout(predicate::str::contains("QQQ-3").not());
}

#[test]
fn update_changes_phone_and_note() {
    let home = TempDir::new().unwrap();
    add(&home, "ABC", "1234", "0912345678");

    platebook(&home)
        .args(["update", "abc-1234", "0911111111", "moved"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated ABC-1234 (1 record)"));

    platebook(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0911-111-111"))
        .stdout(predicate::str::contains("moved"));
}

#[test]
fn update_unknown_plate_fails() {
    let home = TempDir::new().unwrap();
    platebook(&home)
        .args(["update", "ZZZ-9", "0911111111"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plate not found"));
}

#[test]
fn edit_rewrites_by_id() {
    let home = TempDir::new().unwrap();
    add(&home, "ABC", "1234", "0912345678");

    platebook(&home)
        .args(["edit", "1", "XYZ", "9", "0912345678", "renamed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated #1: ABC-1234 -> XYZ-9"));

    platebook(&home)
        .args(["edit", "42", "XYZ", "9", "0912345678"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Record not found: #42"));
}

#[test]
fn delete_with_yes_removes_every_row() {
    let home = TempDir::new().unwrap();
    add(&home, "ABC", "1234", "0912345678");
    add(&home, "ABC", "1234", "0987654321");

    platebook(&home)
        .args(["delete", "ABC-1234", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted ABC-1234 (2 records)"));

    platebook(&home)
        .args(["search", "ABC", "1234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found."));
}

#[test]
fn delete_prompt_can_abort() {
    let home = TempDir::new().unwrap();
    add(&home, "ABC", "1234", "0912345678");

    platebook(&home)
        .args(["delete", "ABC-1234"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    platebook(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ABC-1234"));
}

#[test]
fn backup_json_to_file() {
    let home = TempDir::new().unwrap();
    add(&home, "ABC", "1234", "0912345678");
    let dest = home.path().join("dump.json");

    platebook(&home)
        .args(["backup", "--output"])
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Backed up 1 records"));

    let dump: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&dest).unwrap()).unwrap();
    assert_eq!(dump["records"][0]["part1"], "ABC");
    assert!(dump["exported_at"].is_string());
}

#[test]
fn backup_dir_from_config_is_created() {
    let home = TempDir::new().unwrap();
    add(&home, "ABC", "1234", "0912345678");
    let backups = home.path().join("backups");

    platebook(&home)
        .args(["config", "backup-dir"])
        .arg(&backups)
        .assert()
        .success();

    platebook(&home).arg("backup").assert().success();
    platebook(&home).args(["backup", "--format", "db"]).assert().success();

    assert!(backups.is_dir());
    let mut names: Vec<String> = std::fs::read_dir(&backups)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names.len(), 2, "{names:?}");
    assert!(names[0].ends_with("_backup_database.db"));
    assert!(names[1].ends_with("_backup_database.json"));
}

#[test]
fn db_backup_onto_live_database_is_refused() {
    let home = TempDir::new().unwrap();
    add(&home, "ABC", "1234", "0912345678");
    let db = home.path().join("platebook.db");

    platebook(&home)
        .args(["backup", "--format", "db", "--output"])
        .arg(&db)
        .assert()
        .failure()
        .stderr(predicate::str::contains("database itself"));

    platebook(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("ABC-1234"));
}

#[test]
fn init_reports_new_then_existing_database() {
    let home = TempDir::new().unwrap();

    platebook(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized database"));

    platebook(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database connected"));
}

#[test]
fn db_flag_overrides_config() {
    let home = TempDir::new().unwrap();
    let other = home.path().join("elsewhere.db");

    platebook(&home)
        .args(["add", "ABC", "1234", "0912345678", "--db"])
        .arg(&other)
        .assert()
        .success();

    assert!(other.exists());
    assert!(!home.path().join("platebook.db").exists());
}

#[test]
fn config_set_and_show() {
    let home = TempDir::new().unwrap();

    platebook(&home)
        .args(["config", "sort", "phone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sort set to phone"));

    platebook(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("sort = phone"))
        .stdout(predicate::str::contains("database-file = platebook.db"));

    platebook(&home)
        .args(["config", "sort", "random"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn grouped_help() {
    let home = TempDir::new().unwrap();
    platebook(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Record Commands:"))
        .stdout(predicate::str::contains("Data Commands:"));
}

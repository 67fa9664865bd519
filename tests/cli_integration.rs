//! Integration tests for the webcrypto CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! The password for `derive` comes from `WEBCRYPTO_PASSWORD` so no
//! test waits on a prompt.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the webcrypto binary, with no
/// settings file inherited from the environment.
fn webcrypto() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("webcrypto").expect("binary should exist");
    cmd.env_remove("WEBCRYPTO_CONFIG")
        .env_remove("WEBCRYPTO_PASSWORD");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    webcrypto()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("usages"))
        .stdout(predicate::str::contains("digest"))
        .stdout(predicate::str::contains("random"))
        .stdout(predicate::str::contains("keygen"))
        .stdout(predicate::str::contains("derive"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag_shows_version() {
    webcrypto()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("webcrypto"));
}

#[test]
fn no_args_shows_help() {
    webcrypto()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn usages_table_lists_every_algorithm() {
    webcrypto()
        .arg("usages")
        .assert()
        .success()
        .stdout(predicate::str::contains("Algorithm"))
        .stdout(predicate::str::contains("AES-KW"))
        .stdout(predicate::str::contains("RSASSA-PKCS1-v1_5"))
        .stdout(predicate::str::contains("deriveKey, deriveBits"));
}

#[test]
fn usages_for_one_algorithm() {
    webcrypto()
        .args(["usages", "AES-GCM"])
        .assert()
        .success()
        .stdout("encrypt, decrypt\n");
}

#[test]
fn usages_for_unknown_algorithm_fails() {
    webcrypto()
        .args(["usages", "SHA-256"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid alg SHA-256"));
}

#[test]
fn digest_reads_stdin() {
    webcrypto()
        .args(["digest", "--alg", "SHA-256"])
        .write_stdin("abc")
        .assert()
        .success()
        .stdout("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad\n");
}

#[test]
fn digest_reads_a_file() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.child("input.txt");
    file.write_str("abc").unwrap();

    webcrypto()
        .args(["digest", "-a", "SHA-1"])
        .arg(file.path())
        .assert()
        .success()
        .stdout("a9993e364706816aba3e25717850c26c9cd0d89d\n");
}

#[test]
fn digest_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    webcrypto()
        .arg("digest")
        .arg(tmp.path().join("nope.bin"))
        .assert()
        .failure();
}

#[test]
fn random_prints_requested_length() {
    webcrypto()
        .args(["random", "--len", "8"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[0-9a-f]{16}\n$").unwrap());
}

#[test]
fn random_uses_configured_length() {
    let tmp = TempDir::new().unwrap();
    tmp.child("webcrypto.toml")
        .write_str("random_length = 4\n")
        .unwrap();

    webcrypto()
        .arg("random")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[0-9a-f]{8}\n$").unwrap());
}

#[test]
fn random_uuid() {
    webcrypto()
        .args(["random", "--uuid"])
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(
                "^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}\n$",
            )
            .unwrap(),
        );
}

#[test]
fn random_len_and_uuid_conflict() {
    webcrypto()
        .args(["random", "--len", "4", "--uuid"])
        .assert()
        .failure();
}

#[test]
fn keygen_aes_gcm_prints_jwk() {
    webcrypto()
        .args(["keygen", "AES-GCM"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"A256GCM\""))
        .stdout(predicate::str::contains("\"oct\""));
}

#[test]
fn keygen_ecdsa_follows_config_curve() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.child("custom.toml");
    config.write_str("default_curve = \"P-256\"\n").unwrap();

    webcrypto()
        .args(["keygen", "ECDSA", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"P-256\""))
        .stderr(predicate::str::contains("generated ECDSA key"));
}

#[test]
fn keygen_hkdf_is_refused() {
    webcrypto().args(["keygen", "HKDF"]).assert().failure();
}

#[test]
fn derive_known_answer() {
    webcrypto()
        .args([
            "derive",
            "--hash",
            "SHA-256",
            "--salt",
            "73616c74",
            "--iterations",
            "1",
        ])
        .env("WEBCRYPTO_PASSWORD", "password")
        .assert()
        .success()
        .stdout(predicate::str::contains("salt: 73616c74"))
        .stdout(predicate::str::contains(
            "bits: 120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b",
        ))
        .stderr(predicate::str::contains("below the configured 600000"));
}

#[test]
fn derive_rejects_partial_bytes() {
    webcrypto()
        .args(["derive", "--bits", "100", "--iterations", "1"])
        .env("WEBCRYPTO_PASSWORD", "password")
        .assert()
        .failure();
}

#[test]
fn completions_bash() {
    webcrypto()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("webcrypto"));
}

#[test]
fn completions_unknown_shell_fails() {
    webcrypto().args(["completions", "tcsh"]).assert().failure();
}

#[test]
fn missing_config_file_fails() {
    let tmp = TempDir::new().unwrap();
    webcrypto()
        .args(["random", "--config"])
        .arg(tmp.path().join("absent.toml"))
        .assert()
        .failure();
}

#[test]
fn malformed_config_file_fails() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.child("bad.toml");
    config.write_str("default_curve = 5\n").unwrap();

    webcrypto()
        .args(["random", "--config"])
        .arg(config.path())
        .assert()
        .failure();
}

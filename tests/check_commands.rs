use assert_fs::TempDir;
use common::command::{repository_dir, run_flagfilter_command};
use predicates::prelude::*;
use rstest::rstest;

mod common;

#[rstest]
#[case("fix: plain", "kept: no feature flag in message")]
#[case("feat: x\n\nFeature-Flag: SEARCH", "kept: flag SEARCH is enabled (message)")]
#[case("feat: x\n\nfeature-flag: BETA", "dropped: flag BETA is disabled (message)")]
#[case("feat: x\n\nFEATURE-FLAG: OTHER", "dropped: flag OTHER is not enabled (message)")]
#[case("feat: x\n\nFeature-Flag:", "kept: no feature flag in message")]
fn explains_message_decisions(
    repository_dir: TempDir,
    #[case] message: &str,
    #[case] expected: &str,
) {
    run_flagfilter_command(repository_dir.path(), &["check", "--message", message])
        .env("FEATURE_SEARCH", "true")
        .env("FEATURE_BETA", "false")
        .assert()
        .success()
        .stdout(predicate::str::contains(expected));
}

#[rstest]
fn override_block_wins_over_message(repository_dir: TempDir) {
    run_flagfilter_command(
        repository_dir.path(),
        &[
            "check",
            "--message",
            "feat: x\n\nFeature-Flag: SEARCH",
            "--override",
            "Release notes:\nBEGIN_COMMIT_OVERRIDE\nfeat: x\nFeature-Flag: BETA\nEND_COMMIT_OVERRIDE",
        ],
    )
    .env("FEATURE_SEARCH", "true")
    .assert()
    .success()
    .stdout(predicate::str::contains(
        "dropped: flag BETA is not enabled (override block)",
    ));
}

#[rstest]
fn blank_override_block_falls_back_to_message(repository_dir: TempDir) {
    run_flagfilter_command(
        repository_dir.path(),
        &[
            "check",
            "--message",
            "feat: x\n\nFeature-Flag: SEARCH",
            "--override",
            "BEGIN_COMMIT_OVERRIDE\n\nEND_COMMIT_OVERRIDE",
        ],
    )
    .env("FEATURE_SEARCH", "true")
    .assert()
    .success()
    .stdout(predicate::str::contains(
        "kept: flag SEARCH is enabled (message)",
    ));
}

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteStr, PathChild};
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    run_git_command(dir.path(), &["init", "-q"])
        .assert()
        .success();
    dir
}

/// Repository with commits spread over two packages
///
/// History, oldest first:
/// - `api`: unmarked fix
/// - `api`: marked SEARCH
/// - `web`: marked DARK_MODE
/// - `web`: unmarked docs change
/// - `api`: marked BETA
#[fixture]
pub fn monorepo_dir(repository_dir: TempDir) -> TempDir {
    commit_file(
        &repository_dir,
        "packages/api/lib.rs",
        "fn a() {}",
        "fix(api): handle empty input",
    );
    commit_file(
        &repository_dir,
        "packages/api/search.rs",
        "fn search() {}",
        "feat(api): add search endpoint\n\nFeature-Flag: SEARCH",
    );
    commit_file(
        &repository_dir,
        "packages/web/theme.css",
        "body {}",
        "feat(web): dark mode\n\nfeature-flag: DARK_MODE",
    );
    commit_file(
        &repository_dir,
        "packages/web/README.md",
        "# web",
        "docs(web): describe the theme",
    );
    commit_file(
        &repository_dir,
        "packages/api/beta.rs",
        "fn beta() {}",
        "feat(api): beta endpoint\n\nFEATURE-FLAG: BETA",
    );

    repository_dir
}

pub fn commit_file(dir: &TempDir, path: &str, content: &str, message: &str) {
    dir.child(path)
        .write_str(content)
        .expect("Failed to write file");
    run_git_command(dir.path(), &["add", "."])
        .assert()
        .success();
    git_commit(dir.path(), message).assert().success();
}

pub fn run_flagfilter_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("flagfilter").expect("Failed to find flagfilter binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    cmd.args(["-c", "commit.gpgsign=false"]);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn git_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_git_command(dir, &["commit", "-q", "-m", message]);
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", "fake_user"),
        ("GIT_AUTHOR_EMAIL", "fake_email@email.com"),
        ("GIT_AUTHOR_DATE", "2023-01-01T12:00:00+0000"),
        ("GIT_COMMITTER_NAME", "fake_user"),
        ("GIT_COMMITTER_EMAIL", "fake_email@email.com"),
        ("GIT_COMMITTER_DATE", "2023-01-01T12:00:00+0000"),
    ]);
    cmd
}

/// Short subjects of the commits printed by `filter --oneline`, in order
pub fn oneline_subjects(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| !line.starts_with("== "))
        .filter_map(|line| line.split_once(' ').map(|(_, subject)| subject.to_string()))
        .collect()
}

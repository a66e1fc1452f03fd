/// CLI integration tests exercising the actual binary with assert_cmd
///
/// ```rust
/// helper.command()
///     .args(["render"])
///     .assert()
///     .success()
///     .stdout(predicate::str::contains("CREATE TABLE"));
/// ```
pub mod apply;
pub mod error_handling;
pub mod render;

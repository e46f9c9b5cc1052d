// src/runner/program.rs
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use tokio::process::Command;

use crate::extractors::aggregate;
use crate::report::ExtractionResult;
use crate::utils::error::RunnerError;

pub const DEFAULT_COMPILER: &str = "nvcc";
pub const DEFAULT_SOURCE: &str = "social_network.cu";
pub const DEFAULT_EXECUTABLE: &str = "social_network.exe";
pub const DEFAULT_COMPILE_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_RUN_TIMEOUT: Duration = Duration::from_secs(30);

/// The external program that prints the analytics report.
#[derive(Debug, Clone)]
pub struct ReportProgram {
    pub source: PathBuf,
    pub executable: PathBuf,
    pub compiler: String,
    pub compiler_args: Vec<String>,
    pub compile_timeout: Duration,
    pub run_timeout: Duration,
    compiled: bool,
}

impl Default for ReportProgram {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE, DEFAULT_EXECUTABLE)
    }
}

impl ReportProgram {
    pub fn new<S: Into<PathBuf>, E: Into<PathBuf>>(source: S, executable: E) -> Self {
        Self {
            source: source.into(),
            executable: executable.into(),
            compiler: DEFAULT_COMPILER.to_string(),
            compiler_args: vec!["-std=c++11".to_string()],
            compile_timeout: DEFAULT_COMPILE_TIMEOUT,
            run_timeout: DEFAULT_RUN_TIMEOUT,
            compiled: false,
        }
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Compiles the source with `<compiler> -o <executable> <source> <args..>`.
    pub async fn compile(&mut self) -> Result<(), RunnerError> {
        if !self.source.exists() {
            return Err(RunnerError::SourceNotFound(self.source.display().to_string()));
        }

        tracing::info!("Compiling {} with {}", self.source.display(), self.compiler);
        let mut cmd = Command::new(&self.compiler);
        cmd.arg("-o")
            .arg(&self.executable)
            .arg(&self.source)
            .args(&self.compiler_args);

        let output = run_with_timeout(cmd, "compilation", self.compile_timeout).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::error!("Compilation failed ({})", output.status);
            return Err(RunnerError::CompileFailed(stderr));
        }

        self.compiled = true;
        tracing::info!("Compilation succeeded: {}", self.executable.display());
        Ok(())
    }

    /// Runs the compiled program and returns its standard output.
    /// Compiles first if that has not happened yet.
    pub async fn execute(&mut self) -> Result<String, RunnerError> {
        if !self.compiled {
            self.compile().await?;
        }

        let cmd = Command::new(executable_path(&self.executable));
        let output = run_with_timeout(cmd, "execution", self.run_timeout).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            tracing::error!("Report program exited with {}", output.status);
            return Err(RunnerError::ExecutionFailed(stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        tracing::debug!("Report program produced {} bytes", stdout.len());
        Ok(stdout)
    }
}

/// Produces the report and extracts it. No result is built if the program
/// cannot be compiled or run.
pub async fn analyze(program: &mut ReportProgram) -> Result<ExtractionResult, RunnerError> {
    let raw = program.execute().await?;
    Ok(aggregate(&raw))
}

/// A bare file name must be run as `./name`, otherwise it is looked up on PATH.
fn executable_path(executable: &Path) -> PathBuf {
    if cfg!(windows) || executable.components().count() > 1 || executable.is_absolute() {
        executable.to_path_buf()
    } else {
        Path::new(".").join(executable)
    }
}

async fn run_with_timeout(
    mut cmd: Command,
    stage: &'static str,
    limit: Duration,
) -> Result<Output, RunnerError> {
    cmd.kill_on_drop(true);
    match tokio::time::timeout(limit, cmd.output()).await {
        Ok(output) => Ok(output?),
        Err(_) => {
            tracing::warn!("{} timed out after {:?}", stage, limit);
            Err(RunnerError::Timeout(stage, limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_is_reported() {
        let mut program = ReportProgram::new("/nonexistent/social_network.cu", "social_network.exe");
        let err = tokio_test::block_on(program.compile()).unwrap_err();
        assert!(matches!(err, RunnerError::SourceNotFound(_)));
        assert!(!program.is_compiled());
    }

    #[test]
    fn analyze_produces_nothing_when_program_cannot_run() {
        let mut program = ReportProgram::new("/nonexistent/social_network.cu", "social_network.exe");
        let result = tokio_test::block_on(analyze(&mut program));
        assert!(result.is_err());
    }

    #[test]
    fn bare_executable_runs_from_current_dir() {
        if cfg!(windows) {
            return;
        }
        assert_eq!(executable_path(Path::new("prog")), PathBuf::from("./prog"));
        assert_eq!(executable_path(Path::new("bin/prog")), PathBuf::from("bin/prog"));
        assert_eq!(executable_path(Path::new("/usr/bin/prog")), PathBuf::from("/usr/bin/prog"));
    }

    // Scripts are written then exec'd; spawning while another test still has
    // a script open for writing fails with ETXTBSY, so these run one at a time.
    #[cfg(unix)]
    static SCRIPT_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

    #[cfg(unix)]
    fn script_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("report_runner_{}_{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, file: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(file);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[cfg(unix)]
    fn prebuilt(dir: &Path, body: &str) -> ReportProgram {
        let executable = write_script(dir, "report_bin", body);
        let mut program = ReportProgram::new(dir.join("unused.cu"), executable);
        program.compiled = true;
        program
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runs_prebuilt_program_and_captures_stdout() {
        let _guard = SCRIPT_LOCK.lock().await;
        let dir = script_dir("stdout");
        let mut program = prebuilt(&dir, "cat <<'EOF'\n--- Personas ---\nAna: 3 seguidores\nEOF");

        let result = analyze(&mut program).await.unwrap();
        assert_eq!(result.followers.people.len(), 1);
        assert_eq!(result.followers.people[0].follower_count, 3);
        assert!(result.raw_text.starts_with("--- Personas ---"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_execution_failure_with_stderr() {
        let _guard = SCRIPT_LOCK.lock().await;
        let dir = script_dir("exit");
        let mut program = prebuilt(&dir, "echo boom >&2\nexit 3");

        match program.execute().await {
            Err(RunnerError::ExecutionFailed(stderr)) => assert!(stderr.contains("boom")),
            other => panic!("expected ExecutionFailed, got {:?}", other),
        }

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_program_times_out() {
        let _guard = SCRIPT_LOCK.lock().await;
        let dir = script_dir("timeout");
        let mut program = prebuilt(&dir, "sleep 5");
        program.run_timeout = Duration::from_millis(100);

        let started = std::time::Instant::now();
        let err = program.execute().await.unwrap_err();
        assert!(matches!(err, RunnerError::Timeout("execution", _)), "got {:?}", err);
        assert!(started.elapsed() < Duration::from_secs(4));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_compiler_reports_its_stderr() {
        let _guard = SCRIPT_LOCK.lock().await;
        let dir = script_dir("compile");
        let compiler = write_script(&dir, "fake_cc", "echo 'syntax error' >&2\nexit 1");
        let source = dir.join("social_network.cu");
        std::fs::write(&source, "").unwrap();

        let mut program = ReportProgram::new(&source, dir.join("social_network.exe"));
        program.compiler = compiler.display().to_string();

        match program.compile().await {
            Err(RunnerError::CompileFailed(stderr)) => assert!(stderr.contains("syntax error")),
            other => panic!("expected CompileFailed, got {:?}", other),
        }
        assert!(!program.is_compiled());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_compiler_is_spawn_error() {
        let _guard = SCRIPT_LOCK.lock().await;
        let dir = script_dir("spawn");
        let source = dir.join("social_network.cu");
        std::fs::write(&source, "").unwrap();

        let mut program = ReportProgram::new(&source, dir.join("social_network.exe"));
        program.compiler = "/nonexistent/cc".into();

        let err = program.compile().await.unwrap_err();
        assert!(matches!(err, RunnerError::Spawn(_)), "got {:?}", err);

        let _ = std::fs::remove_dir_all(&dir);
    }
}

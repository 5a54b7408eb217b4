//! # Command Execution Module / 命令执行模块
//!
//! Spawns the program under test with all three standard streams piped,
//! feeds it input, drains its output and enforces a time budget.
//!
//! 以管道方式连接三个标准流来派生被测程序，
//! 向其写入输入、读取其输出并强制执行时间预算。

use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStdin, Command};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::core::models::RawOutcome;

/// Default number of bytes kept per output stream.
/// 每个输出流默认保留的字节数。
pub const DEFAULT_OUTPUT_LIMIT: usize = 1024 * 1024;

const READ_CHUNK: usize = 8 * 1024;

/// Bytes read from one stream, bounded by a capture limit.
/// 从一个流中读取的字节，受捕获上限约束。
#[derive(Debug, Default)]
pub struct CapturedStream {
    pub bytes: Vec<u8>,
    pub truncated: bool,
}

/// Reads `reader` to end of stream, keeping at most `limit` bytes.
/// Bytes past the limit are drained and dropped so the writer never stalls on a full pipe.
///
/// 读取 `reader` 直到流结束，最多保留 `limit` 字节。
/// 超出上限的字节会被读取并丢弃，以免写入方因管道已满而阻塞。
pub async fn read_capped<R>(mut reader: R, limit: usize) -> io::Result<CapturedStream>
where
    R: AsyncRead + Unpin,
{
    let mut captured = CapturedStream::default();
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        let room = limit.saturating_sub(captured.bytes.len());
        if n > room {
            captured.truncated = true;
        }
        captured.bytes.extend_from_slice(&chunk[..n.min(room)]);
    }
    Ok(captured)
}

/// Writes `input` to the child's stdin and closes it.
/// A child that exits without consuming its input yields a broken pipe, which is not an error here.
async fn write_input(mut stdin: ChildStdin, input: Vec<u8>) -> io::Result<()> {
    match stdin.write_all(&input).await {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }?;
    // Dropping the handle closes the pipe and signals end of input.
    // 释放句柄会关闭管道，表示输入结束。
    drop(stdin);
    Ok(())
}

/// Maps an exit status to an integer code, using `-N` for termination by signal `N`.
/// 将退出状态映射为整数，被信号 `N` 终止时为 `-N`。
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}

async fn join_capture(handle: &mut JoinHandle<io::Result<CapturedStream>>) -> CapturedStream {
    match handle.await {
        Ok(Ok(captured)) => captured,
        Ok(Err(e)) => {
            warn!("Failed to read process output: {}", e);
            CapturedStream::default()
        }
        Err(e) => {
            warn!("Failed to join output reader task: {}", e);
            CapturedStream::default()
        }
    }
}

/// Spawns `cmd`, pipes `input` into it and waits for it to finish within `timeout`.
///
/// Waiting for termination and draining stdout/stderr all happen under the same
/// deadline. When the deadline passes the child is killed and reaped before this
/// function returns, and any partial output is discarded.
///
/// 派生 `cmd`，将 `input` 写入其标准输入，并在 `timeout` 内等待其结束。
///
/// 等待进程终止与读取 stdout/stderr 共享同一截止时间。超时后，
/// 子进程会在本函数返回前被终止并回收，所有部分输出都会被丢弃。
///
/// # Arguments
/// * `cmd` - The command to run; its stdio configuration is overwritten.
/// * `input` - Bytes written to the child's standard input.
/// * `timeout` - Time budget for the whole invocation.
/// * `output_limit` - Maximum bytes captured per output stream.
pub async fn run_with_timeout(
    mut cmd: Command,
    input: Vec<u8>,
    timeout: Duration,
    output_limit: usize,
) -> RawOutcome {
    cmd.stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let start_time = Instant::now();
    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            return RawOutcome::LaunchFailed {
                reason: e.to_string(),
            };
        }
    };

    let (Some(stdin), Some(stdout), Some(stderr)) =
        (child.stdin.take(), child.stdout.take(), child.stderr.take())
    else {
        if let Err(e) = child.kill().await {
            warn!("Failed to kill process with missing pipes: {}", e);
        }
        return RawOutcome::LaunchFailed {
            reason: "failed to open standard streams".to_string(),
        };
    };

    let mut writer = tokio::spawn(write_input(stdin, input));
    let mut stdout_reader = tokio::spawn(read_capped(stdout, output_limit));
    let mut stderr_reader = tokio::spawn(read_capped(stderr, output_limit));

    let completion = tokio::time::timeout(timeout, async {
        let status = child.wait().await?;
        let stdout = join_capture(&mut stdout_reader).await;
        let stderr = join_capture(&mut stderr_reader).await;
        Ok::<_, io::Error>((status, stdout, stderr))
    })
    .await;

    match completion {
        Ok(Ok((status, stdout, stderr))) => {
            // A descendant may still hold stdin open; never wait on it past exit.
            if writer.is_finished() {
                match writer.await {
                    Ok(Err(e)) => debug!("Failed to write test input: {}", e),
                    Err(e) => debug!("Failed to join input writer task: {}", e),
                    Ok(Ok(())) => {}
                }
            } else {
                writer.abort();
            }
            let output_truncated = stdout.truncated || stderr.truncated;
            if output_truncated {
                warn!(
                    "Process output exceeded {} bytes and was truncated",
                    output_limit
                );
            }
            RawOutcome::Completed {
                exit_code: exit_code(status),
                stdout: stdout.bytes,
                stderr: stderr.bytes,
                output_truncated,
            }
        }
        Ok(Err(e)) => {
            writer.abort();
            stdout_reader.abort();
            stderr_reader.abort();
            if let Err(kill_err) = child.kill().await {
                debug!("Failed to kill process after wait error: {}", kill_err);
            }
            RawOutcome::LaunchFailed {
                reason: format!("failed to wait for process: {e}"),
            }
        }
        Err(_) => {
            // `kill` also reaps the child, so no process outlives this call.
            // `kill` 同时会回收子进程，因此不会有进程在此调用之后存活。
            if let Err(e) = child.kill().await {
                warn!("Failed to kill timed out process: {}", e);
            }
            writer.abort();
            stdout_reader.abort();
            stderr_reader.abort();
            RawOutcome::TimedOut {
                elapsed: start_time.elapsed(),
            }
        }
    }
}

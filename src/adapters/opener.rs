use crate::domain::ports::UrlOpener;
use crate::utils::error::Result;
use std::process::{Command, Stdio};
use std::thread::JoinHandle;

/// 用系統預設瀏覽器開新分頁；不等待結果
#[derive(Debug, Clone, Default)]
pub struct SystemOpener {
    program: Option<String>,
}

impl SystemOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定的程式取代平台預設
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    fn command(&self, url: &str) -> Command {
        if let Some(program) = &self.program {
            let mut command = Command::new(program);
            command.arg(url);
            return command;
        }

        if cfg!(target_os = "macos") {
            let mut command = Command::new("open");
            command.arg(url);
            command
        } else if cfg!(target_os = "windows") {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", "", url]);
            command
        } else {
            let mut command = Command::new("xdg-open");
            command.arg(url);
            command
        }
    }
}

impl SystemOpener {
    /// 啟動開啟程式，並在背景執行緒等待它結束 (回收子行程)
    pub fn spawn_detached(&self, url: &str) -> Result<JoinHandle<()>> {
        let mut child = self
            .command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        Ok(std::thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => {
                tracing::debug!("URL opener exited with {}", status);
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Could not wait for URL opener: {}", e),
        }))
    }
}

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        self.spawn_detached(url)?;
        Ok(())
    }
}

/// 無瀏覽器環境：直接把網址印到 stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutOpener;

impl UrlOpener for StdoutOpener {
    fn open(&self, url: &str) -> Result<()> {
        println!("{}", url);
        Ok(())
    }
}

use reqwest::StatusCode;
use thiserror::Error;

use crate::clipboard::{self, ClipboardProvider};
use crate::config::Config;
use crate::grammar::{self, GrammarClient};
use crate::notification::{self, Notifier};

pub const MSG_COMPLETE: &str = "Analysis complete!";
pub const MSG_EMPTY_CLIPBOARD: &str = "Clipboard is empty!";
pub const MSG_CONNECT_FAILED: &str = "Failed to connect to server!";

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("no text obtainable from the clipboard")]
    EmptyClipboard,
    #[error("invalid endpoint configuration: {0:#}")]
    Endpoint(anyhow::Error),
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("request to grammar server failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl CheckError {
    /// 通知に出す文言（タイムアウトと接続拒否は区別しない）
    pub fn user_message(&self) -> &'static str {
        match self {
            CheckError::EmptyClipboard => MSG_EMPTY_CLIPBOARD,
            CheckError::Endpoint(_) | CheckError::Encode(_) | CheckError::Transport(_) => {
                MSG_CONNECT_FAILED
            }
        }
    }
}

/// プロセスの終了コード（通信完了なら 0、それ以外は 1）
pub fn exit_status(result: &Result<StatusCode, CheckError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// クリップボード取得 → 送信 → 通知 を1回だけ行う
pub struct GrammarCheck<'a> {
    providers: Vec<Box<dyn ClipboardProvider>>,
    config: Config,
    notifier: &'a dyn Notifier,
}

impl<'a> GrammarCheck<'a> {
    pub fn new(
        providers: Vec<Box<dyn ClipboardProvider>>,
        config: Config,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            providers,
            config,
            notifier,
        }
    }

    pub fn acquire_clipboard_text(&self) -> Result<String, CheckError> {
        clipboard::first_text(&self.providers).ok_or(CheckError::EmptyClipboard)
    }

    /// 通信が完了した時点で成功とみなす。HTTP ステータスはログにのみ残す。
    pub async fn run(&self) -> Result<StatusCode, CheckError> {
        let result = self.check_clipboard().await;

        match &result {
            Ok(_) => notification::show_success(self.notifier, MSG_COMPLETE),
            Err(e) => {
                log::error!("{}", e);
                notification::show_error(self.notifier, e.user_message());
            }
        }

        result
    }

    async fn check_clipboard(&self) -> Result<StatusCode, CheckError> {
        // 空のクリップボードは接続先の設定より先に判定する
        let text = self.acquire_clipboard_text()?;

        let client = GrammarClient::new(&self.config.endpoint_url, self.config.timeout())
            .map_err(CheckError::Endpoint)?;
        log::info!("Sending {} chars to {}", text.chars().count(), client.endpoint());

        let body = grammar::build_request_body(&text)?;
        let status = client.send_check(body).await?;
        if status.is_success() {
            log::info!("Server answered {}", status);
        } else {
            log::warn!("Server answered {}; reported as complete anyway", status);
        }
        Ok(status)
    }
}

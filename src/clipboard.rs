use std::process::{Command, Stdio};

/// クリップボードからテキストを読み取る手段
///
/// ツールが存在しない場合も、中身が空の場合も `None` または空文字列を返す。
/// 呼び出し側はどちらも「内容なし」として扱う。
pub trait ClipboardProvider {
    fn name(&self) -> &str;
    fn read_text(&self) -> Option<String>;
}

/// 外部コマンドの標準出力をクリップボード内容として読む
pub struct CommandProvider {
    program: &'static str,
    args: &'static [&'static str],
}

impl CommandProvider {
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }
}

impl ClipboardProvider for CommandProvider {
    fn name(&self) -> &str {
        self.program
    }

    fn read_text(&self) -> Option<String> {
        let output = match Command::new(self.program)
            .args(self.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                log::debug!("{} unavailable: {}", self.program, e);
                return None;
            }
        };

        if !output.status.success() {
            log::debug!("{} exited with {}", self.program, output.status);
            return None;
        }

        match String::from_utf8(output.stdout) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("{} returned non UTF-8 data: {}", self.program, e);
                None
            }
        }
    }
}

#[cfg(windows)]
pub struct WindowsClipboard;

#[cfg(windows)]
impl ClipboardProvider for WindowsClipboard {
    fn name(&self) -> &str {
        "clipboard-win"
    }

    fn read_text(&self) -> Option<String> {
        use clipboard_win::{formats, get_clipboard};

        match get_clipboard::<String, _>(formats::Unicode) {
            Ok(text) => Some(text),
            Err(e) => {
                log::debug!("Failed to read clipboard: {}", e);
                None
            }
        }
    }
}

/// プラットフォームごとの既定の読み取り順
#[cfg(windows)]
pub fn default_providers() -> Vec<Box<dyn ClipboardProvider>> {
    vec![Box::new(WindowsClipboard)]
}

#[cfg(target_os = "macos")]
pub fn default_providers() -> Vec<Box<dyn ClipboardProvider>> {
    vec![Box::new(CommandProvider::new("pbpaste", &[]))]
}

/// X11 の xclip、xsel の順に試し、最後に Wayland の wl-paste
#[cfg(all(unix, not(target_os = "macos")))]
pub fn default_providers() -> Vec<Box<dyn ClipboardProvider>> {
    let providers: Vec<Box<dyn ClipboardProvider>> = vec![
        Box::new(CommandProvider::new("xclip", &["-selection", "clipboard", "-o"])),
        Box::new(CommandProvider::new("xsel", &["--clipboard", "--output"])),
        Box::new(CommandProvider::new("wl-paste", &["--no-newline"])),
    ];
    providers
}

/// 先頭から順に試し、空白以外を含む最初の結果を返す
pub fn first_text(providers: &[Box<dyn ClipboardProvider>]) -> Option<String> {
    for provider in providers {
        match provider.read_text() {
            Some(text) if !text.trim().is_empty() => {
                log::debug!("Clipboard read via {}", provider.name());
                return Some(text);
            }
            _ => log::debug!("{} yielded no text", provider.name()),
        }
    }
    None
}

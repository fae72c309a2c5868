pub const APP_TITLE: &str = "Grammar Checker";

#[cfg(windows)]
const APP_ID: &str = "ClipboardGrammar";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Low,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Critical => "critical",
        }
    }
}

/// 通知の送信先
///
/// 送信は投げっぱなしで、失敗しても呼び出し側には返さない。
pub trait Notifier {
    fn notify(&self, title: &str, message: &str, urgency: Urgency);
}

/// デスクトップ通知（Windows はトースト、macOS は osascript、それ以外は notify-send）
pub struct DesktopNotifier;

#[cfg(all(unix, not(target_os = "macos")))]
impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str, urgency: Urgency) {
        // 終了を待たない
        if let Err(e) = std::process::Command::new("notify-send")
            .args(["-u", urgency.as_str(), title, message])
            .stdin(std::process::Stdio::null())
            .spawn()
        {
            log::warn!("Failed to run notify-send: {}", e);
            eprintln!("{}: {}", title, message);
        }
    }
}

/// macOS には notify-send が無いので AppleScript の通知を使う
#[cfg(target_os = "macos")]
impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str, urgency: Urgency) {
        let script = display_notification_script(title, message, urgency);

        if let Err(e) = std::process::Command::new("osascript")
            .args(["-e", &script])
            .stdin(std::process::Stdio::null())
            .spawn()
        {
            log::warn!("Failed to run osascript: {}", e);
            eprintln!("{}: {}", title, message);
        }
    }
}

/// AppleScript の文字列リテラルにする
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn applescript_string(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// 緊急の通知には警告音を付ける
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn display_notification_script(title: &str, message: &str, urgency: Urgency) -> String {
    let mut script = format!(
        "display notification {} with title {}",
        applescript_string(message),
        applescript_string(title)
    );
    if urgency == Urgency::Critical {
        script.push_str(" sound name \"Basso\"");
    }
    script
}

#[cfg(windows)]
impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, message: &str, urgency: Urgency) {
        use winrt_notification::{Duration, Toast};

        let duration = match urgency {
            Urgency::Low => Duration::Short,
            Urgency::Critical => Duration::Long,
        };

        if let Err(e) = Toast::new(APP_ID)
            .title(title)
            .text1(message)
            .duration(duration)
            .show()
        {
            log::warn!("Failed to show notification: {}", e);
            eprintln!("{}: {}", title, message);
        }
    }
}

pub fn show_success<N: Notifier + ?Sized>(notifier: &N, message: &str) {
    notifier.notify(APP_TITLE, message, Urgency::Low);
}

pub fn show_error<N: Notifier + ?Sized>(notifier: &N, message: &str) {
    notifier.notify(APP_TITLE, message, Urgency::Critical);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) struct Sent {
        pub title: String,
        pub message: String,
        pub urgency: Urgency,
    }

    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub sent: RefCell<Vec<Sent>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, title: &str, message: &str, urgency: Urgency) {
            self.sent.borrow_mut().push(Sent {
                title: title.to_string(),
                message: message.to_string(),
                urgency,
            });
        }
    }

    #[test]
    fn helpers_map_to_urgency() {
        let notifier = RecordingNotifier::default();

        show_success(&notifier, "Analysis complete!");
        show_error(&notifier, "Clipboard is empty!");

        let sent = notifier.sent.borrow();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].title, APP_TITLE);
        assert_eq!(sent[0].urgency, Urgency::Low);
        assert_eq!(sent[1].message, "Clipboard is empty!");
        assert_eq!(sent[1].urgency, Urgency::Critical);
    }

    #[test]
    fn urgency_names_match_notify_send() {
        assert_eq!(Urgency::Low.as_str(), "low");
        assert_eq!(Urgency::Critical.as_str(), "critical");
    }

    #[test]
    fn applescript_literals_escape_quotes_and_backslashes() {
        assert_eq!(applescript_string("plain"), r#""plain""#);
        assert_eq!(
            applescript_string(r#"Line "two" \ end"#),
            r#""Line \"two\" \\ end""#
        );
    }

    #[test]
    fn critical_script_adds_alert_sound() {
        assert_eq!(
            display_notification_script(APP_TITLE, "Analysis complete!", Urgency::Low),
            r#"display notification "Analysis complete!" with title "Grammar Checker""#
        );
        assert_eq!(
            display_notification_script(APP_TITLE, "Clipboard is empty!", Urgency::Critical),
            r#"display notification "Clipboard is empty!" with title "Grammar Checker" sound name "Basso""#
        );
    }
}
